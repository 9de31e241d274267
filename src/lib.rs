//! # grid_replanning
//!
//! Incremental pathfinding on four-connected grids. At the core is an A* search whose frontier
//! breaks ties in favour of the larger cost so far and which uses lazy deletion instead of a
//! closed set. Three planners drive it:
//!
//! - [RepeatedForwardPlanner] plans from the agent to the goal on the obstacles it knows about,
//!   walks the plan and re-plans when it bumps into an obstacle it did not know.
//! - [RepeatedBackwardPlanner] does the same but searches from the goal to the agent.
//! - [AdaptivePlanner] plans on a fully known map and learns a better heuristic from every
//!   search, which pays off when the same goal is queried from different starts.
//!
//! ```
//! use grid_replanning::{GridWorld, Replanner, RepeatedForwardPlanner};
//!
//! let world: GridWorld = "S01\n010\n00G".parse().unwrap();
//! let (start, goal) = world.markers().unwrap();
//! let mut planner = RepeatedForwardPlanner::new(world.into_map(), goal);
//! let report = planner.run(start);
//! // Both obstacles were unknown and had to be bumped into
//! assert_eq!(report.discovered.len(), 2);
//! assert_eq!(report.path.unwrap().last(), Some(&goal));
//! ```
pub mod adaptive;
pub mod error;
pub mod generate;
pub mod grid_map;
pub mod grid_world;
pub mod planner;
pub mod queue;
pub mod search;
pub mod strategy;

pub use adaptive::{AdaptivePlanner, HeuristicTable};
pub use error::{Marker, PlanningError, Result};
pub use grid_map::GridMap;
pub use grid_world::GridWorld;
pub use planner::{PlanReport, RepeatedBackwardPlanner, RepeatedForwardPlanner, Replanner};
pub use search::{grid_distance, search_grid, Episode, SearchEngine};
pub use strategy::Strategy;

/// A grid position. `x` indexes columns and `y` rows, with (0, 0) the top-left cell.
pub type Cell = grid_util::point::Point;

/// Cost of a single move to one of the four neighbouring cells.
pub const MOVE_COST: i32 = 1;
