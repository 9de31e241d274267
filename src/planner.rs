//! Repeated A* for an agent that only learns about obstacles by bumping into them. The agent
//! plans on its known map, follows the plan through the real grid and re-plans from where it
//! stands whenever the next cell turns out to be blocked.
use crate::grid_map::GridMap;
use crate::search::{grid_distance, Episode, SearchEngine};
use crate::Cell;
use log::info;
use std::time::{Duration, Instant};

/// Outcome of a complete planning run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanReport {
    /// Cells visited from start to goal inclusive, [None] if the goal could not be reached.
    pub path: Option<Vec<Cell>>,
    /// Expansions summed over every search of the run.
    pub expansions: usize,
    pub searches: usize,
    /// Obstacles discovered while moving, in discovery order.
    pub discovered: Vec<Cell>,
    pub elapsed: Duration,
}

impl PlanReport {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of cells on the path, 0 if there is none.
    pub fn path_len(&self) -> usize {
        self.path.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    ReachedGoal,
    /// The next cell of the plan was blocked; it has been added to the known map.
    Discovered(Cell),
    NoPath,
}

/// One planning episode followed by moving along its plan. Carries the knowledge that results
/// from it so that the next step can be computed from this value alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub known: GridMap,
    pub position: Cell,
    /// Cells moved into during this step, excluding the position the step started from.
    pub walked: Vec<Cell>,
    pub expansions: usize,
    pub outcome: StepOutcome,
}

pub trait Replanner {
    /// The real obstacle layout, consulted only when moving.
    fn ground_truth(&self) -> &GridMap;
    fn goal(&self) -> Cell;
    /// Searches the known map. The returned path, if any, runs from `position` to the goal.
    fn plan_episode(&mut self, known: &GridMap, position: Cell) -> Episode;

    /// Plans from `position` and walks the plan until it is used up or the next cell is blocked
    /// in the ground truth.
    fn step(&mut self, known: GridMap, position: Cell) -> Step {
        let episode = self.plan_episode(&known, position);
        let mut step = Step {
            known,
            position,
            walked: Vec::new(),
            expansions: episode.expansions,
            outcome: StepOutcome::NoPath,
        };
        let Some(path) = episode.path else {
            return step;
        };
        for next in path.into_iter().skip(1) {
            if self.ground_truth().is_blocked(&next) {
                step.known = step.known.with_obstacle(next);
                step.outcome = StepOutcome::Discovered(next);
                return step;
            }
            step.walked.push(next);
            step.position = next;
        }
        debug_assert_eq!(step.position, self.goal());
        step.outcome = StepOutcome::ReachedGoal;
        step
    }

    /// Moves from `start` to the goal, starting out with the given knowledge. Every discovery
    /// adds a cell the failed plan went through, so the loop ends after finitely many searches.
    fn run_with_knowledge(&mut self, start: Cell, known: GridMap) -> PlanReport {
        let before = Instant::now();
        let goal = self.goal();
        let mut known = known;
        let mut position = start;
        let mut path = vec![start];
        let mut report = PlanReport {
            path: None,
            expansions: 0,
            searches: 0,
            discovered: Vec::new(),
            elapsed: Duration::ZERO,
        };
        while position != goal {
            let step = self.step(known, position);
            report.searches += 1;
            report.expansions += step.expansions;
            path.extend(step.walked);
            position = step.position;
            known = step.known;
            match step.outcome {
                StepOutcome::ReachedGoal => {}
                StepOutcome::Discovered(cell) => report.discovered.push(cell),
                StepOutcome::NoPath => {
                    info!(
                        "No path from {} to {} after {} searches",
                        position, goal, report.searches
                    );
                    report.elapsed = before.elapsed();
                    return report;
                }
            }
        }
        info!(
            "Reached {} in {} moves with {} searches and {} expansions",
            goal,
            path.len() - 1,
            report.searches,
            report.expansions
        );
        report.path = Some(path);
        report.elapsed = before.elapsed();
        report
    }

    /// Moves from `start` to the goal assuming every cell is open until shown otherwise.
    fn run(&mut self, start: Cell) -> PlanReport {
        let ground_truth = self.ground_truth();
        let known = GridMap::open(ground_truth.width(), ground_truth.height());
        self.run_with_knowledge(start, known)
    }
}

/// Searches from the agent's position towards the goal.
#[derive(Clone, Debug)]
pub struct RepeatedForwardPlanner {
    ground_truth: GridMap,
    goal: Cell,
    engine: SearchEngine<Cell, i32>,
}

impl RepeatedForwardPlanner {
    pub fn new(ground_truth: GridMap, goal: Cell) -> RepeatedForwardPlanner {
        RepeatedForwardPlanner {
            ground_truth,
            goal,
            engine: SearchEngine::new(),
        }
    }
}

impl Replanner for RepeatedForwardPlanner {
    fn ground_truth(&self) -> &GridMap {
        &self.ground_truth
    }

    fn goal(&self) -> Cell {
        self.goal
    }

    fn plan_episode(&mut self, known: &GridMap, position: Cell) -> Episode {
        let goal = self.goal;
        self.engine
            .search_grid(known, position, goal, |p| grid_distance(p, &goal))
    }
}

/// Searches from the goal towards the agent's position and walks the reversed result.
#[derive(Clone, Debug)]
pub struct RepeatedBackwardPlanner {
    ground_truth: GridMap,
    goal: Cell,
    engine: SearchEngine<Cell, i32>,
}

impl RepeatedBackwardPlanner {
    pub fn new(ground_truth: GridMap, goal: Cell) -> RepeatedBackwardPlanner {
        RepeatedBackwardPlanner {
            ground_truth,
            goal,
            engine: SearchEngine::new(),
        }
    }
}

impl Replanner for RepeatedBackwardPlanner {
    fn ground_truth(&self) -> &GridMap {
        &self.ground_truth
    }

    fn goal(&self) -> Cell {
        self.goal
    }

    fn plan_episode(&mut self, known: &GridMap, position: Cell) -> Episode {
        let mut episode =
            self.engine
                .search_grid(known, self.goal, position, |p| grid_distance(p, &position));
        if let Some(path) = episode.path.as_mut() {
            path.reverse();
        }
        episode
    }
}
