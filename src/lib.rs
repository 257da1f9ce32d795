//! # evocells
//!
//! Evolutionary simulation of cells learning to reach a target.
//!
//! A fixed-size population of cells moves through a bounded world, steered one
//! gene per tick. A cell stops when it runs out of genes, leaves the world,
//! touches a hazard or reaches the target. Once every cell has stopped, fitness
//! is scored from the distance to the target and the next generation is bred
//! by roulette-wheel selection and mutation, always keeping an unmutated copy
//! of the best cell.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use evocells::{Config, Population};
//!
//! let config = Config::default();
//! let mut population = Population::from_config(&config, 42).unwrap();
//!
//! // Drive it yourself, one tick per frame
//! for _ in 0..10_000 {
//!     population.tick().unwrap();
//! }
//!
//! println!("Generation: {}", population.generation());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use evocells::Config;
//!
//! let mut config = Config::default();
//! config.population.size = 200;
//! config.population.mutation_rate = 0.02;
//! assert!(config.validate().is_ok());
//! ```

pub mod agent;
pub mod cell;
pub mod config;
pub mod error;
pub mod population;
pub mod scenario;
pub mod stats;
pub mod vector;

// Re-export main types
pub use agent::{Agent, Bounds, Color, Hazard, Target};
pub use cell::{Cell, CellState, DeathCause, Step};
pub use config::Config;
pub use error::{SimError, SimResult};
pub use population::{Population, PopulationParams, TickOutcome};
pub use stats::{GenerationStats, StatsHistory};
pub use vector::{CheckedVector, Vector2, VectorError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Ticks allowed per generation before a run is considered stuck
pub fn tick_budget(config: &Config) -> u64 {
    config.population.energy as u64 + 1
}

/// Run a quick benchmark
pub fn benchmark(generations: u32, population: usize) -> SimResult<BenchmarkResult> {
    use std::time::Instant;

    let mut config = Config::default();
    config.population.size = population;

    let mut pop = Population::from_config(&config, 42)?;
    let budget = tick_budget(&config);

    let start = Instant::now();
    let mut ticks = 0u64;
    for _ in 0..generations {
        if let Some(stats) = pop.run_generation(budget)? {
            ticks += stats.ticks;
        }
    }
    let elapsed = start.elapsed();

    Ok(BenchmarkResult {
        generations,
        population,
        ticks,
        elapsed_secs: elapsed.as_secs_f64(),
        ticks_per_second: ticks as f64 / elapsed.as_secs_f64(),
        best_fitness: pop
            .history()
            .generations
            .iter()
            .map(|s| s.best_fitness)
            .fold(0.0, f64::max),
    })
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub generations: u32,
    pub population: usize,
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub ticks_per_second: f64,
    pub best_fitness: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Generations: {}", self.generations)?;
        writeln!(f, "Population: {}", self.population)?;
        writeln!(f, "Ticks: {}", self.ticks)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} ticks/s", self.ticks_per_second)?;
        writeln!(f, "Best fitness: {:.6}", self.best_fitness)?;
        Ok(())
    }
}
