//! End-to-end runs on small hand-written grid files.
use grid_replanning::{
    search_grid, GridMap, GridWorld, Marker, PlanningError, RepeatedBackwardPlanner,
    RepeatedForwardPlanner, Replanner, Strategy,
};
use grid_util::point::Point;

fn cells(coords: &[(i32, i32)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

#[test]
fn open_three_by_three() {
    let world: GridWorld = "S00\n000\n00G".parse().unwrap();
    let (start, goal) = world.markers().unwrap();
    let episode = search_grid(world.map(), start, goal);
    assert_eq!(episode.expansions, 5);
    assert_eq!(
        episode.path,
        Some(cells(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]))
    );
}

#[test]
fn center_obstacle() {
    let world: GridWorld = "S00\n010\n00G".parse().unwrap();
    let (start, goal) = world.markers().unwrap();
    let episode = search_grid(world.map(), start, goal);
    let path = episode.path.unwrap();
    assert_eq!(path, cells(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]));
    assert!(!path.contains(&Point::new(1, 1)));
}

#[test]
fn hidden_obstacle_next_to_start_forces_one_replan() {
    let world: GridWorld = "S10\n000\n00G".parse().unwrap();
    let (start, goal) = world.markers().unwrap();
    let blocked = Point::new(1, 0);

    // The first plan on the optimistic map goes straight through the hidden obstacle
    let unknown = GridMap::open(3, 3);
    let first = search_grid(&unknown, start, goal).path.unwrap();
    assert_eq!(first[1], blocked);

    let mut planner = RepeatedForwardPlanner::new(world.map().clone(), goal);
    let report = planner.run(start);
    assert_eq!(report.searches, 2);
    assert_eq!(report.discovered, vec![blocked]);
    let path = report.path.unwrap();
    assert!(!path.contains(&blocked));
    assert_eq!(path.len(), 5);
}

#[test]
fn backward_and_forward_reach_the_same_goal() {
    let text = "S0010\n01010\n01000\n0111G\n00000\n";
    let world: GridWorld = text.parse().unwrap();
    let (start, goal) = world.markers().unwrap();
    let forward = RepeatedForwardPlanner::new(world.map().clone(), goal).run(start);
    let backward = RepeatedBackwardPlanner::new(world.map().clone(), goal).run(start);
    for report in [&forward, &backward] {
        let path = report.path.as_ref().unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert!(path.iter().all(|p| world.map().is_open(p)));
    }
}

#[test]
fn strategies_from_files() {
    let dir = std::env::temp_dir().join(format!("grid_replanning_scenarios_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let marked = dir.join("marked.txt");
    let unmarked = dir.join("unmarked.txt");
    std::fs::write(&marked, "S000\n0110\n000G\n").unwrap();
    std::fs::write(&unmarked, "0000\n0110\n0000\n").unwrap();

    let world = GridWorld::load(&marked).unwrap();
    for strategy in Strategy::ALL {
        let report = strategy.plan(&world).unwrap();
        assert_eq!(report.path_len(), 6);
    }

    let world = GridWorld::load(&unmarked).unwrap();
    assert!(matches!(
        Strategy::RepeatedBackward.plan(&world),
        Err(PlanningError::MissingMarker(Marker::Start))
    ));
    assert!(Strategy::Adaptive.plan(&world).unwrap().found());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unsolvable_grid_reports_no_path() {
    let world: GridWorld = "S01\n110\n00G".parse().unwrap();
    for strategy in Strategy::ALL {
        let report = strategy.plan(&world).unwrap();
        assert!(!report.found(), "{}", strategy);
        assert!(report.searches >= 1);
        assert!(report.expansions >= 1);
    }
}
