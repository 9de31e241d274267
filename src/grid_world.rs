//! The plain-text grid format: one line per row and one character per column, where `0` is open,
//! `1` is blocked and `S`/`G` mark the (open) start and goal cells.
use crate::error::{Marker, PlanningError, Result};
use crate::grid_map::GridMap;
use crate::Cell;
use core::fmt;
use grid_util::point::Point;
use log::debug;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A ground-truth map together with the start and goal markers found in its text form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridWorld {
    map: GridMap,
    start: Option<Cell>,
    goal: Option<Cell>,
}

impl GridWorld {
    pub fn new(map: GridMap, start: Option<Cell>, goal: Option<Cell>) -> GridWorld {
        GridWorld { map, start, goal }
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn into_map(self) -> GridMap {
        self.map
    }

    pub fn start(&self) -> Option<Cell> {
        self.start
    }

    pub fn goal(&self) -> Option<Cell> {
        self.goal
    }

    /// The marked start and goal, failing if either marker is absent.
    pub fn markers(&self) -> Result<(Cell, Cell)> {
        let start = self.start.ok_or(PlanningError::MissingMarker(Marker::Start))?;
        let goal = self.goal.ok_or(PlanningError::MissingMarker(Marker::Goal))?;
        Ok((start, goal))
    }

    /// The top-left and bottom-right cells, ignoring any markers.
    pub fn corners(&self) -> (Cell, Cell) {
        (
            Point::new(0, 0),
            Point::new(self.map.width() as i32 - 1, self.map.height() as i32 - 1),
        )
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<GridWorld> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PlanningError::io(path, e))?;
        let world: GridWorld = text.parse()?;
        debug!(
            "Loaded {}x{} grid from {}",
            world.map.width(),
            world.map.height(),
            path.display()
        );
        Ok(world)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|e| PlanningError::io(path, e))
    }
}

impl FromStr for GridWorld {
    type Err = PlanningError;

    fn from_str(s: &str) -> Result<GridWorld> {
        let mut rows: Vec<&str> = s.lines().map(str::trim).collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        let width = match rows.first() {
            None => return Err(PlanningError::malformed(1, "grid has no rows")),
            Some(row) if row.is_empty() => return Err(PlanningError::malformed(1, "empty row")),
            Some(row) => row.chars().count(),
        };
        let mut map = GridMap::open(width, rows.len());
        let mut start = None;
        let mut goal = None;
        for (y, row) in rows.iter().enumerate() {
            let line = y + 1;
            let columns = row.chars().count();
            if columns != width {
                return Err(PlanningError::malformed(
                    line,
                    format!("row has {} columns, expected {}", columns, width),
                ));
            }
            for (x, c) in row.chars().enumerate() {
                let cell = Point::new(x as i32, y as i32);
                let marker = match c {
                    '0' => None,
                    '1' => {
                        map.set(&cell, true);
                        None
                    }
                    'S' => Some((Marker::Start, &mut start)),
                    'G' => Some((Marker::Goal, &mut goal)),
                    other => {
                        return Err(PlanningError::malformed(
                            line,
                            format!("unexpected character {:?} in column {}", other, x + 1),
                        ))
                    }
                };
                if let Some((marker, slot)) = marker {
                    if slot.is_some() {
                        return Err(PlanningError::malformed(
                            line,
                            format!("second {} marker in column {}", marker, x + 1),
                        ));
                    }
                    *slot = Some(cell);
                }
            }
        }
        Ok(GridWorld { map, start, goal })
    }
}

impl fmt::Display for GridWorld {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.map.height() as i32 {
            let row: String = (0..self.map.width() as i32)
                .map(|x| {
                    let p = Point::new(x, y);
                    if self.start == Some(p) {
                        Marker::Start.symbol()
                    } else if self.goal == Some(p) {
                        Marker::Goal.symbol()
                    } else if self.map.is_blocked(&p) {
                        '1'
                    } else {
                        '0'
                    }
                })
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_markers_and_obstacles() {
        let world: GridWorld = "S01\n010\n00G\n".parse().unwrap();
        assert_eq!(world.map().width(), 3);
        assert_eq!(world.map().height(), 3);
        assert_eq!(world.start(), Some(Point::new(0, 0)));
        assert_eq!(world.goal(), Some(Point::new(2, 2)));
        assert!(world.map().is_blocked(&Point::new(2, 0)));
        assert!(world.map().is_blocked(&Point::new(1, 1)));
        assert!(world.map().is_open(&Point::new(0, 0)));
        assert_eq!(world.map().blocked_count(), 2);
        assert_eq!(world.to_string(), "S01\n010\n00G\n");
    }

    #[test]
    fn tolerates_whitespace_and_trailing_blank_lines() {
        let world: GridWorld = "  0S \r\nG0\n\n\n".parse().unwrap();
        assert_eq!(world.markers().unwrap(), (Point::new(1, 0), Point::new(0, 1)));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = "000\n00\n000".parse::<GridWorld>().unwrap_err();
        assert!(matches!(err, PlanningError::MalformedGrid { line: 2, .. }));
    }

    #[test]
    fn rejects_empty_input() {
        for text in ["", "\n\n", "   \n"] {
            let err = text.parse::<GridWorld>().unwrap_err();
            assert!(matches!(err, PlanningError::MalformedGrid { line: 1, .. }));
        }
    }

    #[test]
    fn rejects_unknown_characters_and_duplicate_markers() {
        let err = "0S0\n0x0".parse::<GridWorld>().unwrap_err();
        assert!(err.to_string().contains("'x'"));
        let err = "GS\nG0".parse::<GridWorld>().unwrap_err();
        assert!(matches!(err, PlanningError::MalformedGrid { line: 2, .. }));
    }

    #[test]
    fn missing_markers_are_reported() {
        let world: GridWorld = "000\n00G".parse().unwrap();
        assert!(matches!(
            world.markers(),
            Err(PlanningError::MissingMarker(Marker::Start))
        ));
        let world: GridWorld = "S00\n000".parse().unwrap();
        assert!(matches!(
            world.markers(),
            Err(PlanningError::MissingMarker(Marker::Goal))
        ));
        assert_eq!(world.corners(), (Point::new(0, 0), Point::new(2, 1)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = GridWorld::load("does/not/exist.txt").unwrap_err();
        assert!(matches!(err, PlanningError::Io { .. }));
    }
}
