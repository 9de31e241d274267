use crate::adaptive::AdaptivePlanner;
use crate::error::Result;
use crate::grid_world::GridWorld;
use crate::planner::{PlanReport, RepeatedBackwardPlanner, RepeatedForwardPlanner, Replanner};
use crate::Cell;
use clap::ValueEnum;
use core::fmt;
use log::info;

/// Which planner to run on a [GridWorld].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Strategy {
    /// Repeated forward A*, discovering obstacles on contact.
    #[value(name = "forward")]
    RepeatedForward,
    /// Repeated backward A*, searching from the goal towards the agent.
    #[value(name = "backward")]
    RepeatedBackward,
    /// Adaptive A* on the fully known map.
    #[value(name = "adaptive")]
    Adaptive,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::RepeatedForward,
        Strategy::RepeatedBackward,
        Strategy::Adaptive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::RepeatedForward => "forward",
            Strategy::RepeatedBackward => "backward",
            Strategy::Adaptive => "adaptive",
        }
    }

    /// Start and goal for this strategy. The repeated planners need both markers; the adaptive
    /// planner always runs from the top-left to the bottom-right corner.
    pub fn endpoints(&self, world: &GridWorld) -> Result<(Cell, Cell)> {
        match self {
            Strategy::RepeatedForward | Strategy::RepeatedBackward => world.markers(),
            Strategy::Adaptive => Ok(world.corners()),
        }
    }

    pub fn plan(&self, world: &GridWorld) -> Result<PlanReport> {
        let (start, goal) = self.endpoints(world)?;
        info!("Planning {} -> {} with {} search", start, goal, self);
        let map = world.map().clone();
        let report = match self {
            Strategy::RepeatedForward => RepeatedForwardPlanner::new(map, goal).run(start),
            Strategy::RepeatedBackward => RepeatedBackwardPlanner::new(map, goal).run(start),
            Strategy::Adaptive => AdaptivePlanner::new(map, goal).run(start),
        };
        Ok(report)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
