use grid_replanning::{GridWorld, RepeatedForwardPlanner, Replanner};

// In this example an agent crosses a 5x5 grid with shape
//  _____
// |S  # |
// | # # |
// | #   |
// | ###G|
// |     |
//  _____
// where
// - # marks an obstacle the agent does not know about in advance
// - S marks the start
// - G marks the goal
//
// The agent plans as if the grid were empty and re-plans every time it bumps into a wall.

fn main() {
    let world: GridWorld = "S0010\n01010\n01000\n0111G\n00000".parse().unwrap();
    println!("{}", world);
    let (start, goal) = world.markers().unwrap();
    let mut planner = RepeatedForwardPlanner::new(world.into_map(), goal);
    let report = planner.run(start);
    println!(
        "Searches: {}; expansions: {}; discovered: {:?}",
        report.searches, report.expansions, report.discovered
    );
    println!("Path:");
    for p in report.path.unwrap() {
        println!("{:?}", p);
    }
}
