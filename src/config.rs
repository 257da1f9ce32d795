//! Configuration system for the simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use crate::agent::Bounds;
use crate::cell::{DEFAULT_RADIUS, DEFAULT_SPEED};
use crate::vector::Vector2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub population: PopulationConfig,
    #[serde(default)]
    pub cell: CellConfig,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub hazards: HazardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// World rectangle, anchored at the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
}

/// Population configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of cells per generation
    pub size: usize,
    /// Per-locus mutation probability (0.0 - 1.0)
    pub mutation_rate: f64,
    /// Genome length, i.e. moves available to each cell
    pub energy: usize,
    /// Where every generation starts
    pub start: Vector2,
}

/// Cell body configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellConfig {
    pub radius: f64,
    /// Distance moved per tick
    pub speed: f64,
}

/// Target placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConfig {
    pub position: Vector2,
    pub radius: f64,
}

/// A hazard at a fixed spot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedHazard {
    pub position: Vector2,
    pub radius: f64,
}

/// Hazard layout: fixed entries plus randomly placed ones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardConfig {
    #[serde(default)]
    pub fixed: Vec<FixedHazard>,
    /// Number of hazards scattered at startup
    pub random_count: usize,
    /// Radius of scattered hazards
    pub random_radius: f64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Generations between summary lines
    pub stats_interval: u32,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

/// Errors that can occur loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 100,
            mutation_rate: 0.01,
            energy: 300,
            start: Vector2::new(300.0, 560.0),
        }
    }
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            speed: DEFAULT_SPEED,
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            position: Vector2::new(300.0, 60.0),
            radius: 20.0,
        }
    }
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            fixed: Vec::new(),
            random_count: 8,
            random_radius: 25.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 1,
            log_level: "info".to_string(),
        }
    }
}

fn positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.world.width, self.world.height)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if !(positive(self.world.width) && positive(self.world.height)) {
            return invalid("world width and height must be finite and > 0");
        }
        if self.population.size == 0 {
            return invalid("population.size must be > 0");
        }
        if !(0.0..=1.0).contains(&self.population.mutation_rate) {
            return invalid("population.mutation_rate must be between 0 and 1");
        }
        if self.population.energy == 0 {
            return invalid("population.energy must be > 0");
        }
        if !(positive(self.cell.radius) && positive(self.cell.speed)) {
            return invalid("cell radius and speed must be finite and > 0");
        }
        if !self.population.start.is_finite() || !self.target.position.is_finite() {
            return invalid("population.start and target.position must be finite");
        }
        if !positive(self.target.radius) || self.target.radius <= self.cell.radius {
            return invalid("target.radius must exceed cell.radius");
        }
        if self.bounds().crosses(self.population.start, self.cell.radius) {
            return invalid("population.start must leave the cell inside the world");
        }
        if self
            .hazards
            .fixed
            .iter()
            .any(|h| !h.position.is_finite() || !positive(h.radius))
            || (self.hazards.random_count > 0 && !positive(self.hazards.random_radius))
        {
            return invalid("hazards need finite positions and radii > 0");
        }
        if self.logging.stats_interval == 0 {
            return invalid("logging.stats_interval must be > 0");
        }
        Ok(())
    }
}
