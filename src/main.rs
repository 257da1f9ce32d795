//! evocells - CLI Entry Point
//!
//! Headless driver: ticks the population in a loop and reports each generation.

use clap::{Parser, Subcommand};
use evocells::{benchmark, tick_budget, Config, Population, TickOutcome};
use rand::Rng;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "evocells")]
#[command(version)]
#[command(about = "Evolve cells that learn to reach a target while avoiding hazards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of generations to evolve
        #[arg(short, long, default_value = "100")]
        generations: u32,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Write per-generation statistics to this JSON file
        #[arg(long)]
        stats: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of generations
        #[arg(short, long, default_value = "50")]
        generations: u32,

        /// Population size
        #[arg(short, long, default_value = "200")]
        population: usize,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            generations,
            seed,
            stats,
            quiet,
        } => run_simulation(config, generations, seed, stats, quiet),

        Commands::Benchmark {
            generations,
            population,
        } => {
            init_logging("info");
            run_benchmark(generations, population)
        }

        Commands::Init { output } => {
            init_logging("info");
            generate_config(output)
        }
    }
}

fn run_simulation(
    config_path: PathBuf,
    generations: u32,
    seed: Option<u64>,
    stats_path: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG still wins over the configured level
    let config = if config_path.exists() {
        let config = Config::from_file(&config_path)?;
        init_logging(&config.logging.log_level);
        log::info!("Loaded config from: {:?}", config_path);
        config
    } else {
        init_logging("info");
        log::info!("Using default configuration");
        Config::default()
    };

    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut population = Population::from_config(&config, seed)?;

    println!("Starting simulation");
    println!("  Seed: {}", seed);
    println!("  Population: {}", population.size());
    println!("  Energy: {}", config.population.energy);
    println!("  Hazards: {}", population.hazards().len());
    println!("  Generations: {}", generations);
    println!();

    let start = Instant::now();
    let budget = tick_budget(&config);
    let interval = config.logging.stats_interval;
    let mut total_ticks = 0u64;

    while population.history().len() < generations as usize {
        let mut finished = None;
        for _ in 0..budget {
            total_ticks += 1;
            if let TickOutcome::GenerationComplete(stats) = population.tick()? {
                finished = Some(stats);
                break;
            }
        }

        let Some(stats) = finished else {
            log::error!(
                "Generation {} did not finish within {} ticks",
                population.generation(),
                budget
            );
            break;
        };

        if !quiet && stats.generation % interval == 0 {
            println!("{}", stats.summary());
        }
    }

    let elapsed = start.elapsed();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Ticks: {}", total_ticks);
    println!(
        "Speed: {:.1} ticks/s",
        total_ticks as f64 / elapsed.as_secs_f64()
    );
    println!("Generation: {}", population.generation());
    if let Some(last) = population.history().latest() {
        println!("Best fitness: {:.6}", last.best_fitness);
        println!("Reached target: {}/{}", last.reached_goal, last.population);
    }

    if let Some(path) = stats_path {
        population.history().save_json(&path)?;
        println!("Stats history: {:?}", path);
    }

    Ok(())
}

fn run_benchmark(generations: u32, population: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== evocells Benchmark ===");
    println!("Generations: {}", generations);
    println!("Population: {}", population);
    println!();

    let result = benchmark(generations, population)?;
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
