//! Per-generation statistics.

use crate::cell::{Cell, DeathCause};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Summary of one finished generation, taken just before it is replaced
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number these cells belonged to
    pub generation: u32,
    /// Ticks the generation took to finish
    pub ticks: u64,
    /// Population size
    pub population: usize,
    /// Highest fitness in the generation
    pub best_fitness: f64,
    /// Mean fitness
    pub mean_fitness: f64,
    /// Sum of all fitness values
    pub total_fitness: f64,
    /// Cells that ended inside the target
    pub reached_goal: usize,
    /// Cells that ran out of genes
    pub exhausted: usize,
    /// Cells that left the world
    pub out_of_bounds: usize,
    /// Cells that touched a hazard
    pub hit_hazard: usize,
    /// Smallest reserve range across the generation
    pub reserve_min: usize,
}

impl GenerationStats {
    /// Build stats from scored cells
    pub fn from_cells(generation: u32, ticks: u64, cells: &[Cell]) -> Self {
        let mut stats = Self {
            generation,
            ticks,
            population: cells.len(),
            ..Self::default()
        };

        if cells.is_empty() {
            return stats;
        }

        stats.total_fitness = cells.iter().map(Cell::fitness).sum();
        stats.mean_fitness = stats.total_fitness / cells.len() as f64;
        stats.best_fitness = cells.iter().map(Cell::fitness).fold(0.0, f64::max);
        stats.reserve_min = cells.iter().map(Cell::reserve_len).min().unwrap_or(0);

        for cell in cells {
            if cell.reached_goal() {
                stats.reached_goal += 1;
            }
            match cell.cause_of_death() {
                Some(DeathCause::Exhausted) => stats.exhausted += 1,
                Some(DeathCause::OutOfBounds) => stats.out_of_bounds += 1,
                Some(DeathCause::Hazard) => stats.hit_hazard += 1,
                None => {}
            }
        }

        stats
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "Gen:{:5} | Ticks:{:4} | Best:{:.6} | Mean:{:.6} | Goal:{:4} | Hazard:{:4} | Wall:{:4} | Spent:{:4}",
            self.generation,
            self.ticks,
            self.best_fitness,
            self.mean_fitness,
            self.reached_goal,
            self.hit_hazard,
            self.out_of_bounds,
            self.exhausted,
        )
    }
}

/// All generation summaries recorded so far
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    pub generations: Vec<GenerationStats>,
}

impl StatsHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    pub fn latest(&self) -> Option<&GenerationStats> {
        self.generations.last()
    }

    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Best fitness over generations
    pub fn best_fitness_series(&self) -> Vec<(u32, f64)> {
        self.generations
            .iter()
            .map(|s| (s.generation, s.best_fitness))
            .collect()
    }

    /// Goal arrivals over generations
    pub fn reached_series(&self) -> Vec<(u32, usize)> {
        self.generations
            .iter()
            .map(|s| (s.generation, s.reached_goal))
            .collect()
    }

    /// Save history to JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load history from JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
