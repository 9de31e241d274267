use clap::{Parser, Subcommand};
use grid_replanning::generate::{write_batch, GeneratorConfig};
use grid_replanning::{GridWorld, PlanReport, PlanningError, Strategy};
use itertools::Itertools;
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Repeated forward, repeated backward and adaptive A* on grid world files.
#[derive(Parser, Debug)]
#[command(name = "grid_replanning")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one strategy on a grid file and print the path
    Plan {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Strategy::RepeatedForward)]
        strategy: Strategy,

        /// Only print the summary, not every cell of the path
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run every strategy on a grid file, or on every .txt file of a directory
    Compare { path: PathBuf },

    /// Generate random grid worlds
    Generate {
        #[arg(long, default_value_t = 101)]
        width: usize,

        #[arg(long, default_value_t = 101)]
        height: usize,

        #[arg(short, long, default_value_t = 50)]
        count: usize,

        #[arg(long, default_value_t = 0.3)]
        block_probability: f64,

        /// Output directory
        #[arg(short, long, default_value = "gridworlds")]
        out: PathBuf,

        /// Seed for reproducible grids
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn print_report(report: &PlanReport, quiet: bool) {
    match &report.path {
        Some(path) => {
            println!("Path found:");
            if !quiet {
                println!(
                    "{}",
                    path.iter().map(|p| format!("({}, {})", p.x, p.y)).join("\n")
                );
            }
            println!("Path length: {}", path.len());
        }
        None => println!("No path found."),
    }
    println!("Number of node expansions: {}", report.expansions);
    println!("Number of searches: {}", report.searches);
    if !report.discovered.is_empty() {
        println!("Discovered obstacles: {}", report.discovered.len());
    }
    println!("Time taken: {:.2?}", report.elapsed);
}

fn grid_files(path: &Path) -> Result<Vec<PathBuf>, PlanningError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let entries = fs::read_dir(path).map_err(|e| PlanningError::io(path, e))?;
    let mut files = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect::<Vec<_>>();
    files.sort();
    Ok(files)
}

fn compare(path: &Path) -> Result<(), PlanningError> {
    println!(
        "{:<32} {:<9} {:>6} {:>11} {:>9} {:>12}",
        "grid", "strategy", "length", "expansions", "searches", "time"
    );
    for file in grid_files(path)? {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let world = match GridWorld::load(&file) {
            Ok(world) => world,
            Err(e) => {
                warn!("Skipping {}: {}", name, e);
                continue;
            }
        };
        for strategy in Strategy::ALL {
            match strategy.plan(&world) {
                Ok(report) => println!(
                    "{:<32} {:<9} {:>6} {:>11} {:>9} {:>12}",
                    name,
                    strategy,
                    report
                        .path
                        .as_ref()
                        .map_or_else(|| "-".to_owned(), |p| p.len().to_string()),
                    report.expansions,
                    report.searches,
                    format!("{:.2?}", report.elapsed)
                ),
                Err(e) => warn!("{} with {} strategy: {}", name, strategy, e),
            }
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), PlanningError> {
    match cli.command {
        Command::Plan {
            file,
            strategy,
            quiet,
        } => {
            let world = GridWorld::load(&file)?;
            let report = strategy.plan(&world)?;
            print_report(&report, quiet);
        }
        Command::Compare { path } => compare(&path)?,
        Command::Generate {
            width,
            height,
            count,
            block_probability,
            out,
            seed,
        } => {
            let config = GeneratorConfig {
                width,
                height,
                block_probability,
            };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let paths = write_batch(&out, count, &config, &mut rng)?;
            let unsolvable = paths
                .iter()
                .filter(|p| p.to_string_lossy().ends_with("_unsolvable.txt"))
                .count();
            println!(
                "{} gridworlds saved to {} ({} unsolvable)",
                paths.len(),
                out.display(),
                unsolvable
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
