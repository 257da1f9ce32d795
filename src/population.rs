//! Population of cells: the per-frame tick and the generational loop.

use crate::agent::{Bounds, Color, Hazard, Target};
use crate::cell::{Cell, DEFAULT_RADIUS, DEFAULT_SPEED};
use crate::error::{SimError, SimResult};
use crate::stats::{GenerationStats, StatsHistory};
use crate::vector::Vector2;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Fixed parameters of a population, constant across generations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationParams {
    pub size: usize,
    pub mutation_rate: f64,
    /// Genome length of every cell
    pub energy: usize,
    pub start: Vector2,
    pub bounds: Bounds,
    pub cell_radius: f64,
    pub speed: f64,
}

impl PopulationParams {
    pub fn new(size: usize, mutation_rate: f64, energy: usize, start: Vector2, bounds: Bounds) -> Self {
        Self {
            size,
            mutation_rate,
            energy,
            start,
            bounds,
            cell_radius: DEFAULT_RADIUS,
            speed: DEFAULT_SPEED,
        }
    }

    fn validate(&self, target: &Target) -> SimResult<()> {
        if self.size == 0 {
            return Err(SimError::Invalid("population size must be > 0".to_string()));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(SimError::Invalid(format!(
                "mutation rate {} outside [0, 1]",
                self.mutation_rate
            )));
        }
        if self.energy == 0 {
            return Err(SimError::Invalid("energy allowance must be > 0".to_string()));
        }
        if !(positive(self.cell_radius) && positive(self.speed)) {
            return Err(SimError::Invalid(
                "cell radius and speed must be finite and > 0".to_string(),
            ));
        }
        if !self.start.is_finite()
            || !target.position().is_finite()
            || !target.radius().is_finite()
        {
            return Err(SimError::Invalid("start and target must be finite".to_string()));
        }
        if target.radius() <= self.cell_radius {
            return Err(SimError::Invalid(format!(
                "target radius {} must exceed cell radius {}",
                target.radius(),
                self.cell_radius
            )));
        }
        Ok(())
    }
}

fn positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

/// What a call to [`Population::tick`] did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// At least one cell is still moving
    Running,
    /// Every cell finished; the next generation is already in place
    GenerationComplete(GenerationStats),
}

/// The evolving population
pub struct Population {
    cells: Vec<Cell>,
    target: Target,
    hazards: Vec<Hazard>,
    params: PopulationParams,

    // State
    generation: u32,
    ticks: u64,
    total_fitness: f64,
    history: StatsHistory,

    // Single source of randomness; draw order is part of reproducibility
    rng: ChaCha8Rng,
}

impl Population {
    /// Create the first generation.
    ///
    /// Genomes are drawn from `rng` cell by cell, gene by gene.
    pub fn new(
        params: PopulationParams,
        target: Target,
        hazards: Vec<Hazard>,
        mut rng: ChaCha8Rng,
    ) -> SimResult<Self> {
        params.validate(&target)?;
        if hazards
            .iter()
            .any(|h| !h.position().is_finite() || !positive(h.radius()))
        {
            return Err(SimError::Invalid(
                "hazards need a finite position and a radius > 0".to_string(),
            ));
        }

        let cells = (0..params.size)
            .map(|_| {
                Cell::new(
                    params.start,
                    params.cell_radius,
                    params.speed,
                    params.energy,
                    &mut rng,
                )
            })
            .collect();

        log::debug!(
            "Population created: size={} energy={} hazards={}",
            params.size,
            params.energy,
            hazards.len()
        );

        Ok(Self {
            cells,
            target,
            hazards,
            params,
            generation: 1,
            ticks: 0,
            total_fitness: 0.0,
            history: StatsHistory::new(),
            rng,
        })
    }

    /// Create the first generation with a fresh `ChaCha8Rng` seeded from `seed`
    pub fn new_with_seed(
        params: PopulationParams,
        target: Target,
        hazards: Vec<Hazard>,
        seed: u64,
    ) -> SimResult<Self> {
        Self::new(params, target, hazards, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Advance every live cell by one frame, evolving once all have finished.
    ///
    /// Every move is planned before any is applied, so a vector fault aborts
    /// the tick with no cell changed.
    pub fn tick(&mut self) -> SimResult<TickOutcome> {
        let steps = self
            .cells
            .iter()
            .map(Cell::plan)
            .collect::<Result<Vec<_>, _>>()?;

        for (cell, step) in self.cells.iter_mut().zip(steps) {
            if let Some(step) = step {
                cell.commit(step, &self.target, &self.hazards, &self.params.bounds);
            }
        }
        self.ticks += 1;

        if !self.is_generation_over() {
            return Ok(TickOutcome::Running);
        }

        let stats = self.evolve();
        self.generation += 1;
        Ok(TickOutcome::GenerationComplete(stats))
    }

    /// Tick until the current generation completes or `max_ticks` is reached
    pub fn run_generation(&mut self, max_ticks: u64) -> SimResult<Option<GenerationStats>> {
        for _ in 0..max_ticks {
            if let TickOutcome::GenerationComplete(stats) = self.tick()? {
                return Ok(Some(stats));
            }
        }
        Ok(None)
    }

    /// Full scan; generation ends are rare enough that caching isn't worth it
    pub fn is_generation_over(&self) -> bool {
        self.cells.iter().all(|c| !c.is_alive())
    }

    /// Score the finished generation and replace it with the next one
    pub fn evolve(&mut self) -> GenerationStats {
        let target = self.target;
        self.total_fitness = self
            .cells
            .iter_mut()
            .map(|cell| cell.calc_fitness(&target))
            .sum();

        let stats = GenerationStats::from_cells(self.generation, self.ticks, &self.cells);
        log::debug!("{}", stats.summary());

        let best = self.fittest_index();
        let mut next = Vec::with_capacity(self.cells.len());

        for _ in 1..self.cells.len() {
            let parent = self.select_parent();
            let mut child = self.cells[parent].child();
            child.mutate(self.params.mutation_rate, &mut self.rng);
            if child.reserve_len() == 1 {
                log::trace!("Child reserve collapsed to a single gene (parent {})", parent);
            }
            next.push(child);
        }

        let mut elite = self.cells[best].respawn();
        elite.set_color(Color::ELITE);
        next.push(elite);

        self.cells = next;
        self.ticks = 0;
        self.history.record(stats.clone());
        stats
    }

    /// Index of the highest fitness; first one wins ties
    fn fittest_index(&self) -> usize {
        let mut best = 0;
        for (idx, cell) in self.cells.iter().enumerate().skip(1) {
            if cell.fitness() > self.cells[best].fitness() {
                best = idx;
            }
        }
        best
    }

    /// Roulette-wheel pick over the scored cells.
    ///
    /// Falls back to the last cell if rounding leaves the wheel unspent.
    pub fn select_parent(&mut self) -> usize {
        let mut r = self.rng.gen::<f64>() * self.total_fitness;
        for (idx, cell) in self.cells.iter().enumerate() {
            r -= cell.fitness();
            if r <= 0.0 {
                return idx;
            }
        }
        self.cells.len() - 1
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn params(&self) -> &PopulationParams {
        &self.params
    }

    pub fn bounds(&self) -> &Bounds {
        &self.params.bounds
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Current generation, starting at 1
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Ticks elapsed in the current generation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Sum of fitness from the last evolution
    pub fn total_fitness(&self) -> f64 {
        self.total_fitness
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn history(&self) -> &StatsHistory {
        &self.history
    }
}
