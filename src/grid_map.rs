use crate::{Cell, MOVE_COST};
use core::fmt;
use grid_util::point::Point;
use log::info;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Moves in the fixed expansion order +x, -x, +y, -y.
pub const NEUMANN_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Obstacle knowledge over a rectangular grid. A cell is either blocked ([true]) or open
/// ([false]); anything outside the grid counts as blocked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridMap {
    width: usize,
    height: usize,
    blocked: Vec<bool>,
}

impl GridMap {
    pub fn new(width: usize, height: usize, default_value: bool) -> GridMap {
        GridMap {
            width,
            height,
            blocked: vec![default_value; width * height],
        }
    }

    /// A map of the given size in which every cell is assumed to be open.
    pub fn open(width: usize, height: usize) -> GridMap {
        GridMap::new(width, height, false)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, cell: &Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    fn ix(&self, cell: &Cell) -> Option<usize> {
        if self.in_bounds(cell) {
            Some(cell.y as usize * self.width + cell.x as usize)
        } else {
            None
        }
    }

    fn cell_at(&self, ix: usize) -> Cell {
        Point::new((ix % self.width) as i32, (ix / self.width) as i32)
    }

    pub fn is_blocked(&self, cell: &Cell) -> bool {
        self.ix(cell).map_or(true, |ix| self.blocked[ix])
    }

    pub fn is_open(&self, cell: &Cell) -> bool {
        !self.is_blocked(cell)
    }

    /// Sets a cell, ignoring positions outside the grid. Returns whether the cell was in bounds.
    pub fn set(&mut self, cell: &Cell, blocked: bool) -> bool {
        match self.ix(cell) {
            Some(ix) => {
                self.blocked[ix] = blocked;
                true
            }
            None => false,
        }
    }

    /// Records a discovered obstacle, producing the next knowledge state. Obstacles are never
    /// removed again, so a sequence of discoveries only grows the blocked set.
    pub fn with_obstacle(mut self, cell: Cell) -> GridMap {
        if self.set(&cell, true) {
            info!("Recorded obstacle at {}", cell);
        }
        self
    }

    /// Number of blocked cells inside the grid.
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|b| **b).count()
    }

    /// All cells of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.width * self.height).map(move |ix| self.cell_at(ix))
    }

    /// Four-connected neighbourhood of a cell in the fixed order +x, -x, +y, -y, regardless of
    /// whether the neighbours are open.
    pub fn neighborhood_points(pos: &Cell) -> [Cell; 4] {
        NEUMANN_OFFSETS.map(|(dx, dy)| Point::new(pos.x + dx, pos.y + dy))
    }

    /// Open neighbours of a cell paired with the cost of moving there.
    pub fn neighborhood_points_and_cost(&self, pos: &Cell) -> SmallVec<[(Cell, i32); 4]> {
        GridMap::neighborhood_points(pos)
            .into_iter()
            .filter(|p| self.is_open(p))
            .map(|p| (p, MOVE_COST))
            .collect()
    }

    /// Breadth-first distances (in moves) from `from` to every cell, indexed row-major.
    /// Cells that cannot be reached, including blocked ones, are [None].
    pub fn bfs_distances(&self, from: &Cell) -> Vec<Option<i32>> {
        let mut distances = vec![None; self.blocked.len()];
        let start_ix = match self.ix(from) {
            Some(ix) if !self.blocked[ix] => ix,
            _ => return distances,
        };
        distances[start_ix] = Some(0);
        let mut queue = VecDeque::from([*from]);
        while let Some(cell) = queue.pop_front() {
            let d = self.distance_at(&distances, &cell).unwrap_or(0);
            for (n, c) in self.neighborhood_points_and_cost(&cell) {
                if let Some(n_ix) = self.ix(&n) {
                    if distances[n_ix].is_none() {
                        distances[n_ix] = Some(d + c);
                        queue.push_back(n);
                    }
                }
            }
        }
        distances
    }

    /// Looks up a cell in a table produced by [bfs_distances](Self::bfs_distances).
    pub fn distance_at(&self, distances: &[Option<i32>], cell: &Cell) -> Option<i32> {
        self.ix(cell).and_then(|ix| distances.get(ix).copied().flatten())
    }

    /// True shortest distance between two cells, if they are connected.
    pub fn distance(&self, from: &Cell, to: &Cell) -> Option<i32> {
        let distances = self.bfs_distances(from);
        self.distance_at(&distances, to)
    }

    pub fn reachable(&self, from: &Cell, to: &Cell) -> bool {
        self.distance(from, to).is_some()
    }
}

impl fmt::Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.blocked.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|b| if *b { '1' } else { '0' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_is_blocked() {
        let grid = GridMap::open(3, 2);
        assert!(grid.is_open(&Point::new(2, 1)));
        assert!(grid.is_blocked(&Point::new(3, 1)));
        assert!(grid.is_blocked(&Point::new(0, 2)));
        assert!(grid.is_blocked(&Point::new(-1, 0)));
        assert!(grid.is_blocked(&Point::new(0, -1)));
    }

    #[test]
    fn neighbourhood_order_and_filtering() {
        let mut grid = GridMap::open(3, 3);
        let center = Point::new(1, 1);
        assert_eq!(
            GridMap::neighborhood_points(&center),
            [
                Point::new(2, 1),
                Point::new(0, 1),
                Point::new(1, 2),
                Point::new(1, 0)
            ]
        );
        grid.set(&Point::new(0, 1), true);
        let open: Vec<Cell> = grid
            .neighborhood_points_and_cost(&center)
            .into_iter()
            .map(|(p, _)| p)
            .collect();
        assert_eq!(open, vec![Point::new(2, 1), Point::new(1, 2), Point::new(1, 0)]);
        // Corner cells lose their out-of-bounds neighbours
        assert_eq!(grid.neighborhood_points_and_cost(&Point::new(0, 0)).len(), 1);
    }

    #[test]
    fn discovered_obstacles_accumulate() {
        let known = GridMap::open(4, 4)
            .with_obstacle(Point::new(1, 0))
            .with_obstacle(Point::new(2, 3))
            .with_obstacle(Point::new(1, 0))
            .with_obstacle(Point::new(9, 9));
        assert_eq!(known.blocked_count(), 2);
        assert!(known.is_blocked(&Point::new(1, 0)));
        assert!(known.is_blocked(&Point::new(2, 3)));
    }

    #[test]
    fn bfs_distances_route_around_walls() {
        //  ___
        // |S#G|
        // | # |
        // |   |
        //  ___
        let mut grid = GridMap::open(3, 3);
        grid.set(&Point::new(1, 0), true);
        grid.set(&Point::new(1, 1), true);
        let start = Point::new(0, 0);
        assert_eq!(grid.distance(&start, &Point::new(2, 0)), Some(6));
        assert_eq!(grid.distance(&start, &Point::new(1, 0)), None);
        assert_eq!(grid.distance(&Point::new(1, 1), &start), None);
        grid.set(&Point::new(1, 2), true);
        assert!(!grid.reachable(&start, &Point::new(2, 0)));
    }

    #[test]
    fn display_rows() {
        let mut grid = GridMap::open(3, 2);
        grid.set(&Point::new(1, 1), true);
        assert_eq!(grid.to_string(), "000\n010\n");
        assert_eq!(grid.cells().count(), 6);
        assert_eq!(grid.cells().nth(4), Some(Point::new(1, 1)));
    }
}
