//! Adaptive A*: repeated searches towards a fixed goal on a fully known map. After each search
//! the heuristic of every expanded cell is raised to `g(goal) - g(cell)`, which is still a lower
//! bound on its distance to the goal, so later searches from other starts expand fewer cells.
use crate::grid_map::GridMap;
use crate::planner::PlanReport;
use crate::search::{grid_distance, Episode, SearchEngine};
use crate::Cell;
use fxhash::FxHashMap;
use log::{debug, info};
use std::time::{Duration, Instant};

/// Learned distance-to-goal estimates, seeded with the Manhattan distance.
#[derive(Clone, Debug)]
pub struct HeuristicTable {
    goal: Cell,
    values: FxHashMap<Cell, i32>,
}

impl HeuristicTable {
    pub fn new(map: &GridMap, goal: Cell) -> HeuristicTable {
        let mut table = HeuristicTable {
            goal,
            values: FxHashMap::default(),
        };
        table.reset(map);
        table
    }

    /// Forgets everything learned and reseeds each cell of `map` with its baseline estimate.
    pub fn reset(&mut self, map: &GridMap) {
        let goal = self.goal;
        self.values = map.cells().map(|p| (p, grid_distance(&p, &goal))).collect();
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn get(&self, cell: &Cell) -> i32 {
        self.values
            .get(cell)
            .copied()
            .unwrap_or_else(|| grid_distance(cell, &self.goal))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raises the estimate of every expanded cell to `g_goal - g`, never lowering a value.
    /// `expanded` must hold settled costs from a search that reached the goal at cost `g_goal`.
    /// Returns how many estimates grew.
    pub fn update(&mut self, expanded: &[(Cell, i32)], g_goal: i32) -> usize {
        let goal = self.goal;
        let mut tightened = 0;
        for (cell, g) in expanded {
            let learned = g_goal - g;
            let h = self
                .values
                .entry(*cell)
                .or_insert_with(|| grid_distance(cell, &goal));
            if learned > *h {
                *h = learned;
                tightened += 1;
            }
        }
        tightened
    }
}

#[derive(Clone, Debug)]
pub struct AdaptivePlanner {
    map: GridMap,
    goal: Cell,
    heuristics: HeuristicTable,
    engine: SearchEngine<Cell, i32>,
}

impl AdaptivePlanner {
    pub fn new(map: GridMap, goal: Cell) -> AdaptivePlanner {
        let heuristics = HeuristicTable::new(&map, goal);
        AdaptivePlanner {
            map,
            goal,
            heuristics,
            engine: SearchEngine::new(),
        }
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn heuristics(&self) -> &HeuristicTable {
        &self.heuristics
    }

    /// A single search from `start` using the learned heuristic, updating the heuristic if the
    /// goal was reached.
    pub fn search(&mut self, start: Cell) -> Episode {
        let heuristics = &self.heuristics;
        let episode = self
            .engine
            .search_grid(&self.map, start, self.goal, |p| heuristics.get(p));
        if let Some(g_goal) = episode.cost {
            let tightened = self.heuristics.update(&episode.expanded, g_goal);
            debug!(
                "Tightened {} of {} expanded heuristic values",
                tightened, episode.expansions
            );
        }
        episode
    }

    /// Searches from `start` until the end of the returned path is the goal. With a fixed map
    /// this finishes after the first successful search; the table it leaves behind speeds up
    /// later runs from other starts.
    pub fn run(&mut self, start: Cell) -> PlanReport {
        let before = Instant::now();
        let mut report = PlanReport {
            path: None,
            expansions: 0,
            searches: 0,
            discovered: Vec::new(),
            elapsed: Duration::ZERO,
        };
        let mut path: Vec<Cell> = Vec::new();
        let mut start = start;
        loop {
            let episode = self.search(start);
            report.searches += 1;
            report.expansions += episode.expansions;
            let Some(segment) = episode.path else {
                info!("No path from {} to {}", start, self.goal);
                report.elapsed = before.elapsed();
                return report;
            };
            let end = segment.last().copied();
            // Consecutive segments share their junction cell
            let skip = usize::from(!path.is_empty());
            path.extend(segment.into_iter().skip(skip));
            match end {
                Some(end) if end == self.goal => break,
                Some(end) => start = end,
                None => {
                    report.elapsed = before.elapsed();
                    return report;
                }
            }
        }
        info!(
            "Reached {} with {} searches and {} expansions",
            self.goal, report.searches, report.expansions
        );
        report.path = Some(path);
        report.elapsed = before.elapsed();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_util::point::Point;

    fn maze() -> GridMap {
        // |S    |
        // |#### |
        // |     |
        // | ####|
        // |    G|
        let mut grid = GridMap::open(5, 5);
        for x in 0..4 {
            grid.set(&Point::new(x, 1), true);
        }
        for x in 1..5 {
            grid.set(&Point::new(x, 3), true);
        }
        grid
    }

    #[test]
    fn table_starts_at_manhattan_distance() {
        let goal = Point::new(4, 4);
        let table = HeuristicTable::new(&GridMap::open(5, 5), goal);
        assert_eq!(table.len(), 25);
        assert_eq!(table.get(&Point::new(0, 0)), 8);
        assert_eq!(table.get(&Point::new(4, 3)), 1);
        // Cells outside the seeded map fall back to the baseline
        assert_eq!(table.get(&Point::new(6, 4)), 2);
    }

    #[test]
    fn update_never_loosens() {
        let goal = Point::new(4, 0);
        let mut table = HeuristicTable::new(&GridMap::open(5, 1), goal);
        let tightened = table.update(&[(Point::new(0, 0), 0), (Point::new(3, 0), 10)], 10);
        assert_eq!(tightened, 1);
        assert_eq!(table.get(&Point::new(0, 0)), 10);
        assert_eq!(table.get(&Point::new(3, 0)), 1);
    }

    #[test]
    fn learned_values_match_true_distances_along_the_path() {
        let grid = maze();
        let goal = Point::new(4, 4);
        let mut planner = AdaptivePlanner::new(grid.clone(), goal);
        let report = planner.run(Point::new(0, 0));
        let path = report.path.unwrap();
        assert_eq!(report.searches, 1);
        assert_eq!(path.len(), 17);
        let distances = grid.bfs_distances(&goal);
        for cell in grid.cells() {
            let h = planner.heuristics().get(&cell);
            if let Some(d) = grid.distance_at(&distances, &cell) {
                assert!(h <= d, "h({}) = {} exceeds distance {}", cell, h, d);
            }
        }
        for cell in &path {
            assert_eq!(
                Some(planner.heuristics().get(cell)),
                grid.distance_at(&distances, cell)
            );
        }
    }

    #[test]
    fn reuse_reduces_expansions() {
        let goal = Point::new(4, 4);
        let mut planner = AdaptivePlanner::new(maze(), goal);
        let first = planner.search(Point::new(0, 0));
        let mut fresh = AdaptivePlanner::new(maze(), goal);
        let cold = fresh.search(Point::new(1, 0));
        let warm = planner.search(Point::new(1, 0));
        assert!(first.found());
        assert_eq!(cold.cost, Some(15));
        assert_eq!(warm.cost, Some(15));
        assert_eq!(cold.path, warm.path);
        // The learned estimate of (0, 0) keeps the dead end behind the start closed
        assert!(warm.expansions < cold.expansions);
    }

    #[test]
    fn no_path_leaves_table_untouched() {
        let mut grid = GridMap::open(3, 3);
        grid.set(&Point::new(1, 0), true);
        grid.set(&Point::new(1, 1), true);
        grid.set(&Point::new(1, 2), true);
        let goal = Point::new(2, 2);
        let mut planner = AdaptivePlanner::new(grid.clone(), goal);
        let report = planner.run(Point::new(0, 0));
        assert!(!report.found());
        assert_eq!(report.searches, 1);
        assert_eq!(report.expansions, 3);
        for cell in grid.cells() {
            assert_eq!(planner.heuristics().get(&cell), grid_distance(&cell, &goal));
        }
    }
}
