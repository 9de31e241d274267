//! Random grid worlds for experiments. Grids are carved by a randomized depth-first walk from the
//! top-left corner that blocks each newly visited cell with a fixed probability, then checked for
//! a start-to-goal connection with a breadth-first search.
use crate::error::{PlanningError, Result};
use crate::grid_map::GridMap;
use crate::grid_world::GridWorld;
use crate::Cell;
use grid_util::point::Point;
use log::{info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use smallvec::SmallVec;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    pub width: usize,
    pub height: usize,
    /// Chance that a visited cell other than the two corners becomes an obstacle.
    pub block_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> GeneratorConfig {
        GeneratorConfig {
            width: 101,
            height: 101,
            block_probability: 0.3,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlanningError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.block_probability) {
            return Err(PlanningError::InvalidConfig(format!(
                "block probability {} is outside [0, 1]",
                self.block_probability
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedGrid {
    pub world: GridWorld,
    pub solvable: bool,
}

/// Carves a grid with `S` in the top-left and `G` in the bottom-right corner. Cells the walk
/// never reaches stay open.
pub fn generate_dfs<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Result<GridWorld> {
    config.validate()?;
    let (width, height) = (config.width, config.height);
    let start = Point::new(0, 0);
    let goal = Point::new(width as i32 - 1, height as i32 - 1);
    let mut map = GridMap::open(width, height);
    let mut visited = vec![false; width * height];
    let ix = |p: &Cell| p.y as usize * width + p.x as usize;

    let mut stack = vec![start];
    while let Some(cell) = stack.pop() {
        if visited[ix(&cell)] {
            continue;
        }
        visited[ix(&cell)] = true;
        if cell != start && cell != goal && rng.gen_bool(config.block_probability) {
            map.set(&cell, true);
        } else {
            let mut neighbours: SmallVec<[Cell; 4]> = GridMap::neighborhood_points(&cell)
                .into_iter()
                .filter(|p| map.in_bounds(p) && !visited[ix(p)])
                .collect();
            neighbours.shuffle(rng);
            stack.extend(neighbours);
        }
    }
    Ok(GridWorld::new(map, Some(start), Some(goal)))
}

/// Whether the goal marker can be reached from the start marker.
pub fn is_solvable(world: &GridWorld) -> bool {
    match world.markers() {
        Ok((start, goal)) => world.map().reachable(&start, &goal),
        Err(_) => false,
    }
}

pub fn generate<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Result<GeneratedGrid> {
    let world = generate_dfs(config, rng)?;
    let solvable = is_solvable(&world);
    if !solvable {
        warn!("Generated grid has no path from start to goal");
    }
    Ok(GeneratedGrid { world, solvable })
}

/// Keeps generating until a solvable grid comes up, giving up after `attempts` tries.
pub fn generate_solvable<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    attempts: usize,
    rng: &mut R,
) -> Result<Option<GridWorld>> {
    for _ in 0..attempts {
        let generated = generate(config, rng)?;
        if generated.solvable {
            return Ok(Some(generated.world));
        }
    }
    Ok(None)
}

/// File name for the `index`-th grid of a batch; unsolvable grids are tagged so they can be told
/// apart without loading them.
pub fn batch_file_name(index: usize, solvable: bool) -> String {
    if solvable {
        format!("gridworld_{}.txt", index)
    } else {
        format!("gridworld_{}_unsolvable.txt", index)
    }
}

/// Writes `count` generated grids into `dir`, numbered from 1, and returns their paths.
pub fn write_batch<R: Rng + ?Sized>(
    dir: &Path,
    count: usize,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| PlanningError::io(dir, e))?;
    let mut paths = Vec::with_capacity(count);
    for index in 1..=count {
        let generated = generate(config, rng)?;
        let path = dir.join(batch_file_name(index, generated.solvable));
        generated.world.save(&path)?;
        paths.push(path);
    }
    info!("{} gridworlds saved to {}", count, dir.display());
    Ok(paths)
}
