use grid_replanning::generate::{generate_solvable, GeneratorConfig};
use grid_replanning::AdaptivePlanner;
use grid_util::point::Point;
use rand::{rngs::StdRng, Rng, SeedableRng};

// Adaptive A* keeps what it learned about distances to the goal. Querying the same goal from
// several starts shows the expansion count dropping compared to a planner that starts fresh.

fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let config = GeneratorConfig {
        width: 41,
        height: 41,
        ..Default::default()
    };
    let world = generate_solvable(&config, 100, &mut rng).unwrap().unwrap();
    let (_, goal) = world.corners();
    let mut planner = AdaptivePlanner::new(world.map().clone(), goal);
    for _ in 0..10 {
        let start = Point::new(rng.gen_range(0..41), rng.gen_range(0..41));
        let cold = AdaptivePlanner::new(world.map().clone(), goal).search(start);
        let warm = planner.search(start);
        match warm.cost {
            Some(cost) => println!(
                "{}: cost {}, expansions {} (fresh heuristic: {})",
                start, cost, warm.expansions, cold.expansions
            ),
            None => println!("{}: unreachable", start),
        }
    }
}
