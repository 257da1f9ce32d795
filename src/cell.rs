//! Genome-bearing cells: movement, death rules, fitness and mutation.

use crate::agent::{Agent, Bounds, Color, Hazard, Target};
use crate::vector::{CheckedVector, Vector2, VectorError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Default distance covered per tick
pub const DEFAULT_SPEED: f64 = 5.0;

/// Default cell radius
pub const DEFAULT_RADIUS: f64 = 4.0;

/// Life state of a cell. Both non-alive states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Alive,
    Dead,
    /// Dead, but inside the target. Selects the rewarding fitness branch.
    ReachedGoal,
}

/// Why a cell stopped moving without reaching the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Exhausted,
    OutOfBounds,
    Hazard,
}

/// What a living cell does on its next frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Move {
        acceleration: Vector2,
        velocity: Vector2,
    },
    Exhausted,
}

/// Random unit heading, angle uniform in [0, 2π)
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vector2 {
    Vector2::from_angle(rng.gen::<f64>() * TAU)
}

/// A mobile agent steered by its genome.
///
/// The genome is read backwards: `energy` starts at `max_energy - 1` and is the
/// index of the gene applied on the next move.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cell {
    agent: Agent,
    start_position: Vector2,
    genome: Vec<Vector2>,
    energy: usize,
    /// Genes at `[min_energy, max_energy)` were never reached by the parent
    min_energy: usize,
    velocity: Vector2,
    acceleration: Vector2,
    speed: f64,
    fitness: f64,
    state: CellState,
    cause_of_death: Option<DeathCause>,
    mutations: usize,
}

impl Cell {
    /// Create a cell with `max_energy` random genes
    pub fn new<R: Rng + ?Sized>(
        start: Vector2,
        radius: f64,
        speed: f64,
        max_energy: usize,
        rng: &mut R,
    ) -> Self {
        let genome = (0..max_energy).map(|_| random_direction(rng)).collect();
        Self::with_genome(start, radius, speed, genome)
    }

    /// Create a cell from an explicit genome
    pub fn with_genome(start: Vector2, radius: f64, speed: f64, genome: Vec<Vector2>) -> Self {
        let max_energy = genome.len();
        Self {
            agent: Agent::new(start, radius, Color::WHITE),
            start_position: start,
            genome,
            energy: max_energy.saturating_sub(1),
            min_energy: max_energy,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            speed,
            fitness: 0.0,
            state: CellState::Alive,
            cause_of_death: None,
            mutations: 0,
        }
    }

    /// Read-only view; radius and position only change through the simulation.
    ///
    /// ```compile_fail
    /// # use evocells::{Cell, Vector2};
    /// let mut cell = Cell::with_genome(Vector2::ZERO, 1.0, 1.0, vec![Vector2::X; 2]);
    /// cell.agent.radius = 100.0;
    /// ```
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    #[inline]
    pub fn position(&self) -> Vector2 {
        self.agent.position
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.agent.radius
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.agent.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.agent.color = color;
    }

    pub fn start_position(&self) -> Vector2 {
        self.start_position
    }

    pub fn genome(&self) -> &[Vector2] {
        &self.genome
    }

    pub fn energy(&self) -> usize {
        self.energy
    }

    pub fn max_energy(&self) -> usize {
        self.genome.len()
    }

    pub fn min_energy(&self) -> usize {
        self.min_energy
    }

    /// Number of reserve genes available to copy-mutations
    pub fn reserve_len(&self) -> usize {
        self.max_energy() - self.min_energy
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vector2 {
        self.acceleration
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn cause_of_death(&self) -> Option<DeathCause> {
        self.cause_of_death
    }

    /// Loci changed by the most recent `mutate`
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state == CellState::Alive
    }

    pub fn reached_goal(&self) -> bool {
        self.state == CellState::ReachedGoal
    }

    fn die(&mut self, cause: DeathCause) {
        if self.is_alive() {
            self.state = CellState::Dead;
            self.cause_of_death = Some(cause);
        }
    }

    /// Acceleration and velocity the current gene produces
    fn next_move(&self) -> Result<(Vector2, Vector2), VectorError> {
        let acceleration = self.genome[self.energy];
        let velocity = (self.velocity + acceleration).checked_normalize()? * self.speed;
        Ok((acceleration, velocity))
    }

    fn apply_move(&mut self, acceleration: Vector2, velocity: Vector2) {
        self.acceleration = acceleration;
        self.velocity = velocity;
        self.agent.position += velocity;
    }

    /// Apply the current gene and step forward at constant speed.
    ///
    /// Nothing is written back if the heading cannot be normalized.
    pub fn advance(&mut self) -> Result<(), VectorError> {
        let (acceleration, velocity) = self.next_move()?;
        self.apply_move(acceleration, velocity);
        Ok(())
    }

    /// Work out this cell's next frame without changing it.
    ///
    /// `None` for a cell that has already stopped.
    pub fn plan(&self) -> Result<Option<Step>, VectorError> {
        if !self.is_alive() {
            return Ok(None);
        }
        if self.energy == 0 {
            return Ok(Some(Step::Exhausted));
        }
        let (acceleration, velocity) = self.next_move()?;
        Ok(Some(Step::Move {
            acceleration,
            velocity,
        }))
    }

    /// Apply a step from [`Cell::plan`], then the bounds, target and hazard rules
    pub fn commit(&mut self, step: Step, target: &Target, hazards: &[Hazard], bounds: &Bounds) {
        if !self.is_alive() {
            return;
        }

        match step {
            Step::Move {
                acceleration,
                velocity,
            } => {
                self.apply_move(acceleration, velocity);
                self.energy = self.energy.saturating_sub(1);
            }
            Step::Exhausted => self.die(DeathCause::Exhausted),
        }

        if bounds.crosses(self.position(), self.radius()) {
            self.die(DeathCause::OutOfBounds);
        }

        // Reaching the target wins over any death recorded above
        if self.agent.distance(target.agent()) < target.radius() {
            self.state = CellState::ReachedGoal;
            self.cause_of_death = None;
        }

        if self.is_alive()
            && hazards
                .iter()
                .any(|h| self.agent.distance(h.agent()) < h.radius())
        {
            self.die(DeathCause::Hazard);
        }
    }

    /// One simulation frame. No-op once the cell is dead or home.
    pub fn tick(
        &mut self,
        target: &Target,
        hazards: &[Hazard],
        bounds: &Bounds,
    ) -> Result<(), VectorError> {
        if let Some(step) = self.plan()? {
            self.commit(step, target, hazards, bounds);
        }
        Ok(())
    }

    /// Score this cell against `target`, store and return it.
    ///
    /// Requires `target.radius() > self.radius()` so the clamp distance is positive.
    pub fn calc_fitness(&mut self, target: &Target) -> f64 {
        let min_dist = target.radius() - self.radius();

        self.fitness = if self.reached_goal() {
            let energy = self.energy as f64;
            1.0 / (min_dist * min_dist) + energy * energy
        } else {
            let d = self.agent.distance(target.agent()).max(min_dist);
            1.0 / (d * d)
        };
        self.fitness
    }

    /// Mutate the genome in place and return how many loci changed.
    ///
    /// A mutated locus takes a fresh heading with probability `rate`, otherwise a
    /// copy of a random reserve gene from this genome. With no reserve genes the
    /// locus takes a fresh heading.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f64, rng: &mut R) -> usize {
        let max_energy = self.max_energy();
        let mut count = 0;

        for i in 0..max_energy {
            if rng.gen::<f64>() >= rate {
                continue;
            }
            count += 1;

            let explore = rng.gen::<f64>() < rate;
            self.genome[i] = if explore || self.min_energy >= max_energy {
                random_direction(rng)
            } else {
                let j = rng.gen_range(self.min_energy..max_energy);
                self.genome[j]
            };
        }

        self.mutations = count;
        if max_energy > 0 {
            let unchanged = 1.0 - count as f64 / max_energy as f64;
            self.set_color(Color::grey((255.0 * unchanged).round() as u8));
        }
        count
    }

    /// Fresh copy at the start position carrying this genome and the parent's
    /// death energy as the reserve boundary
    pub fn child(&self) -> Cell {
        let mut child = self.respawn();
        child.min_energy = self.energy;
        child
    }

    /// Fresh, living copy at the start position with an independent genome
    pub fn respawn(&self) -> Cell {
        let mut cell = Cell::with_genome(
            self.start_position,
            self.radius(),
            self.speed,
            self.genome.clone(),
        );
        cell.set_color(self.color());
        cell
    }
}
