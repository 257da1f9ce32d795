//! Shared agent record and the stationary agents built on it.

use crate::vector::Vector2;
use serde::{Deserialize, Serialize};

/// RGB tag handed to whatever draws the simulation. Core logic never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Marks the unmutated copy of the previous generation's best cell
    pub const ELITE: Color = Color::rgb(0, 200, 80);
    pub const TARGET: Color = Color::rgb(60, 120, 255);
    pub const HAZARD: Color = Color::rgb(220, 40, 40);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(level: u8) -> Self {
        Self::rgb(level, level, level)
    }
}

/// Axis-aligned world rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: width,
            max_y: height,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when a circle at `center` pokes through any edge
    pub fn crosses(&self, center: Vector2, radius: f64) -> bool {
        center.x - radius < self.min_x
            || center.x + radius > self.max_x
            || center.y - radius < self.min_y
            || center.y + radius > self.max_y
    }
}

/// Position, radius and tag: the part every entity in the world has
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub position: Vector2,
    pub radius: f64,
    pub color: Color,
}

impl Agent {
    pub fn new(position: Vector2, radius: f64, color: Color) -> Self {
        Self {
            position,
            radius,
            color,
        }
    }

    #[inline]
    pub fn distance(&self, other: &Agent) -> f64 {
        self.position.distance(other.position)
    }
}

/// The goal cells are trying to reach
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    agent: Agent,
}

impl Target {
    pub fn new(position: Vector2, radius: f64) -> Self {
        Self {
            agent: Agent::new(position, radius, Color::TARGET),
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn position(&self) -> Vector2 {
        self.agent.position
    }

    pub fn radius(&self) -> f64 {
        self.agent.radius
    }
}

/// A stationary obstacle that kills any cell entering its radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    agent: Agent,
}

impl Hazard {
    pub fn new(position: Vector2, radius: f64) -> Self {
        Self {
            agent: Agent::new(position, radius, Color::HAZARD),
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn position(&self) -> Vector2 {
        self.agent.position
    }

    pub fn radius(&self) -> f64 {
        self.agent.radius
    }
}
