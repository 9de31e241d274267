//! A* over an arbitrary successor function, modelled on
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! There is no closed set: the best known cost per node lives next to its parent link and entries
//! popped with a larger cost are skipped (lazy deletion).
use crate::grid_map::GridMap;
use crate::queue::{PriorityQueue, QueueEntry};
use crate::Cell;
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, warn};
use num_traits::Zero;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Everything a single search produced. `expanded` lists every node taken off the frontier and
/// processed (stale entries excluded), together with its settled cost, in expansion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome<N, C> {
    pub path: Option<Vec<N>>,
    pub cost: Option<C>,
    pub expanded: Vec<(N, C)>,
}

impl<N, C> SearchOutcome<N, C> {
    pub fn expansions(&self) -> usize {
        self.expanded.len()
    }
}

/// Reusable buffers for repeated searches. Planners keep one around so that consecutive
/// episodes do not reallocate the frontier and the parent map.
#[derive(Clone, Debug)]
pub struct SearchEngine<N, C> {
    to_see: PriorityQueue<usize, C>,
    parents: FxIndexMap<N, (usize, C)>,
}

impl<N, C> Default for SearchEngine<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    fn default() -> Self {
        SearchEngine::new()
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = std::iter::successors(Some(start), |i| {
        parents.get_index(*i).map(|(_, value)| parent(value))
    })
    .map_while(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

impl<N, C> SearchEngine<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    pub fn new() -> SearchEngine<N, C> {
        SearchEngine {
            to_see: PriorityQueue::new(),
            parents: FxIndexMap::default(),
        }
    }

    /// Runs A* from `start` until a node satisfying `success` is extracted from the frontier or
    /// the frontier is exhausted. The goal only counts as reached once extracted, which
    /// guarantees its cost is minimal for an admissible heuristic.
    pub fn astar<FN, IN, FH, FS>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
    ) -> SearchOutcome<N, C>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
    {
        self.to_see.clear();
        self.parents.clear();
        self.to_see.insert(heuristic(start), Zero::zero(), 0);
        self.parents
            .insert(start.clone(), (usize::MAX, Zero::zero()));
        let mut expanded = Vec::new();
        while let Some(QueueEntry {
            g: cost,
            item: index,
            ..
        }) = self.to_see.extract_min()
        {
            let successors = {
                let Some((node, &(_, best))) = self.parents.get_index(index) else {
                    continue;
                };
                // A node may sit in the heap several times if a cheaper way to it was found
                // after it was pushed. Only the entry carrying the best cost is expanded.
                if cost > best {
                    continue;
                }
                expanded.push((node.clone(), cost));
                if success(node) {
                    let path = reverse_path(&self.parents, |&(p, _)| p, index);
                    return SearchOutcome {
                        path: Some(path),
                        cost: Some(cost),
                        expanded,
                    };
                }
                successors(node)
            };
            for (successor, move_cost) in successors {
                let new_cost = cost + move_cost;
                let h;
                let n;
                match self.parents.entry(successor) {
                    Vacant(e) => {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    }
                    Occupied(mut e) => {
                        if e.get().1 > new_cost {
                            h = heuristic(e.key());
                            n = e.index();
                            e.insert((index, new_cost));
                        } else {
                            continue;
                        }
                    }
                }
                self.to_see.insert(new_cost + h, new_cost, n);
            }
        }
        warn!(
            "Frontier exhausted after {} expansions without reaching the goal",
            expanded.len()
        );
        SearchOutcome {
            path: None,
            cost: None,
            expanded,
        }
    }
}

/// Result of one grid search: the path (start and goal inclusive) if any, its cost, and the
/// expansions it took.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Episode {
    pub path: Option<Vec<Cell>>,
    pub cost: Option<i32>,
    pub expansions: usize,
    pub expanded: Vec<(Cell, i32)>,
}

impl Episode {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

impl From<SearchOutcome<Cell, i32>> for Episode {
    fn from(outcome: SearchOutcome<Cell, i32>) -> Episode {
        Episode {
            expansions: outcome.expansions(),
            path: outcome.path,
            cost: outcome.cost,
            expanded: outcome.expanded,
        }
    }
}

/// Manhattan distance, the baseline heuristic on a four-connected unit-cost grid.
pub fn grid_distance(p1: &Cell, p2: &Cell) -> i32 {
    (p1.x - p2.x).abs() + (p1.y - p2.y).abs()
}

impl SearchEngine<Cell, i32> {
    /// Four-connected A* on `map` from `start` to `goal`, with neighbours generated in the order
    /// +x, -x, +y, -y. A blocked start or goal yields no path without expanding anything.
    pub fn search_grid<FH>(
        &mut self,
        map: &GridMap,
        start: Cell,
        goal: Cell,
        heuristic: FH,
    ) -> Episode
    where
        FH: FnMut(&Cell) -> i32,
    {
        if map.is_blocked(&start) || map.is_blocked(&goal) {
            debug!("{} or {} is blocked, skipping search", start, goal);
            return Episode::default();
        }
        let outcome = self.astar(
            &start,
            |node| map.neighborhood_points_and_cost(node),
            heuristic,
            |node| *node == goal,
        );
        debug!(
            "Search {} -> {}: {} expansions, cost {:?}",
            start,
            goal,
            outcome.expansions(),
            outcome.cost
        );
        outcome.into()
    }
}

/// One-off grid search with the Manhattan heuristic towards `goal`.
pub fn search_grid(map: &GridMap, start: Cell, goal: Cell) -> Episode {
    SearchEngine::new().search_grid(map, start, goal, |p| grid_distance(p, &goal))
}
