//! Building a ready-to-run population from a [`Config`].

use crate::agent::{Bounds, Hazard, Target};
use crate::config::Config;
use crate::error::{SimError, SimResult};
use crate::population::{Population, PopulationParams};
use crate::vector::Vector2;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Attempts per scattered hazard before giving up on it
const PLACEMENT_ATTEMPTS: usize = 100;

/// Scatter `count` hazards inside `bounds`, keeping clear of the start circle
/// and the target.
///
/// A hazard with no free spot after a bounded number of tries is skipped.
pub fn scatter_hazards<R: Rng + ?Sized>(
    count: usize,
    radius: f64,
    bounds: &Bounds,
    start: Vector2,
    start_clearance: f64,
    target: &Target,
    rng: &mut R,
) -> Vec<Hazard> {
    let mut hazards = Vec::with_capacity(count);

    for _ in 0..count {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let position = Vector2::new(
                bounds.min_x + rng.gen::<f64>() * bounds.width(),
                bounds.min_y + rng.gen::<f64>() * bounds.height(),
            );
            let blocks_start = position.distance(start) < radius + start_clearance;
            let covers_target = position.distance(target.position()) < radius + target.radius();

            if !blocks_start && !covers_target {
                hazards.push(Hazard::new(position, radius));
                break;
            }
        }
    }

    if hazards.len() < count {
        log::warn!(
            "Placed {} of {} random hazards; the world is too crowded",
            hazards.len(),
            count
        );
    }

    hazards
}

impl Population {
    /// Build a population from `config`, seeding all randomness from `seed`.
    ///
    /// Random hazards are drawn first, then the genomes, from the same generator.
    pub fn from_config(config: &Config, seed: u64) -> SimResult<Self> {
        config
            .validate()
            .map_err(|e| SimError::Invalid(e.to_string()))?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let bounds = config.bounds();
        let target = Target::new(config.target.position, config.target.radius);

        let mut hazards = scatter_hazards(
            config.hazards.random_count,
            config.hazards.random_radius,
            &bounds,
            config.population.start,
            config.cell.radius * 2.0,
            &target,
            &mut rng,
        );
        hazards.extend(
            config
                .hazards
                .fixed
                .iter()
                .map(|h| Hazard::new(h.position, h.radius)),
        );

        let params = PopulationParams {
            size: config.population.size,
            mutation_rate: config.population.mutation_rate,
            energy: config.population.energy,
            start: config.population.start,
            bounds,
            cell_radius: config.cell.radius,
            speed: config.cell.speed,
        };

        log::info!(
            "Scenario: {} cells, {} hazards, seed {}",
            params.size,
            hazards.len(),
            seed
        );

        Population::new(params, target, hazards, rng)
    }
}
