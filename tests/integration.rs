//! Integration tests for evocells

use evocells::{
    tick_budget, Bounds, Cell, CellState, Color, Config, Hazard, Population, PopulationParams,
    SimError, Target, TickOutcome, Vector2, VectorError,
};

fn corridor_params(size: usize, energy: usize) -> PopulationParams {
    PopulationParams::new(
        size,
        0.01,
        energy,
        Vector2::new(150.0, 280.0),
        Bounds::new(300.0, 300.0),
    )
}

#[test]
fn test_full_simulation_cycle() {
    let mut config = Config::default();
    config.population.size = 50;
    config.population.energy = 120;

    let mut population = Population::from_config(&config, 12345).unwrap();
    let budget = tick_budget(&config);

    for _ in 0..5 {
        let stats = population.run_generation(budget).unwrap();
        assert!(stats.is_some());
        assert_eq!(population.size(), 50);
    }

    assert_eq!(population.generation(), 6);
    assert_eq!(population.history().len(), 5);

    // Every fresh generation starts alive at the start point with full genomes
    for cell in population.cells() {
        assert_eq!(cell.state(), CellState::Alive);
        assert_eq!(cell.position(), config.population.start);
        assert_eq!(cell.max_energy(), 120);
        assert!(cell.min_energy() <= cell.max_energy());
    }
}

#[test]
fn test_single_cell_reaches_target_on_first_tick() {
    let params = PopulationParams {
        cell_radius: 1.0,
        ..PopulationParams::new(1, 0.0, 1, Vector2::new(50.0, 50.0), Bounds::new(100.0, 100.0))
    };
    let target = Target::new(Vector2::new(51.0, 50.0), 2.0);
    let mut population = Population::new_with_seed(params, target, vec![], 3).unwrap();

    match population.tick().unwrap() {
        TickOutcome::GenerationComplete(stats) => {
            assert_eq!(stats.reached_goal, 1);
            assert_eq!(stats.ticks, 1);
            // 1 / (2 - 1)^2 + 0^2
            assert_eq!(stats.best_fitness, 1.0);
            assert_eq!(population.total_fitness(), 1.0);
        }
        TickOutcome::Running => panic!("a single-gene cell must finish on its first tick"),
    }

    // The lone survivor is the elite copy
    assert_eq!(population.cells()[0].color(), Color::ELITE);
    assert_eq!(population.generation(), 2);
}

#[test]
fn test_generation_waits_for_every_cell() {
    let mut population =
        Population::new_with_seed(corridor_params(20, 30), Target::new(Vector2::new(150.0, 20.0), 15.0), vec![], 8)
            .unwrap();

    let mut ticks = 0;
    loop {
        ticks += 1;
        match population.tick().unwrap() {
            TickOutcome::Running => assert!(population.alive_count() > 0),
            TickOutcome::GenerationComplete(stats) => {
                assert_eq!(stats.ticks, ticks);
                break;
            }
        }
        assert!(ticks <= 30);
    }
}

#[test]
fn test_hazard_wall_kills_everyone() {
    // A hazard covering the start kills each cell on its first move
    let hazards = vec![Hazard::new(Vector2::new(150.0, 280.0), 50.0)];
    let mut population = Population::new_with_seed(
        corridor_params(15, 40),
        Target::new(Vector2::new(150.0, 20.0), 15.0),
        hazards,
        21,
    )
    .unwrap();

    let stats = population.run_generation(2).unwrap().unwrap();
    assert_eq!(stats.ticks, 1);
    assert_eq!(stats.hit_hazard, 15);
    assert_eq!(stats.reached_goal, 0);
}

#[test]
fn test_elitism_monotonic() {
    let mut config = Config::default();
    config.population.size = 60;
    config.population.energy = 150;
    config.population.mutation_rate = 0.03;

    let mut population = Population::from_config(&config, 2024).unwrap();
    let budget = tick_budget(&config);

    let mut best = 0.0;
    for _ in 0..15 {
        let stats = population.run_generation(budget).unwrap().unwrap();
        assert!(
            stats.best_fitness >= best,
            "generation {} regressed: {} < {}",
            stats.generation,
            stats.best_fitness,
            best
        );
        best = stats.best_fitness;
    }
}

#[test]
fn test_evolution_improves_on_random() {
    let mut config = Config::default();
    config.population.size = 100;
    config.population.energy = 150;
    config.population.mutation_rate = 0.02;
    config.hazards.random_count = 0;

    let mut population = Population::from_config(&config, 31337).unwrap();
    let budget = tick_budget(&config);

    let first = population.run_generation(budget).unwrap().unwrap();
    let mut last = first.clone();
    for _ in 0..30 {
        last = population.run_generation(budget).unwrap().unwrap();
    }

    println!("Best fitness: {} -> {}", first.best_fitness, last.best_fitness);
    assert!(last.best_fitness >= first.best_fitness);
    assert!(last.mean_fitness > first.mean_fitness);
}

#[test]
fn test_reproducibility() {
    let config = Config::default();
    let budget = tick_budget(&config);

    let mut a = Population::from_config(&config, 99999).unwrap();
    let mut b = Population::from_config(&config, 99999).unwrap();

    for _ in 0..4 {
        a.run_generation(budget).unwrap();
        b.run_generation(budget).unwrap();
    }

    assert_eq!(a.history().generations, b.history().generations);
    for (x, y) in a.cells().iter().zip(b.cells()) {
        assert_eq!(x.genome(), y.genome());
        assert_eq!(x.min_energy(), y.min_energy());
    }
}

#[test]
fn test_vector_fault_aborts_tick() {
    // Speed 1 and two opposite genes bring velocity back to exactly zero
    let params = PopulationParams {
        speed: 1.0,
        cell_radius: 1.0,
        ..corridor_params(1, 3)
    };
    let mut population =
        Population::new_with_seed(params, Target::new(Vector2::new(150.0, 20.0), 15.0), vec![], 5)
            .unwrap();

    // Reach in through a cell built the same way to confirm the fault itself
    let mut cell = Cell::with_genome(
        params.start,
        1.0,
        1.0,
        vec![Vector2::new(0.0, 1.0), Vector2::new(0.0, 1.0), Vector2::new(0.0, -1.0)],
    );
    let target = *population.target();
    cell.tick(&target, &[], &params.bounds).unwrap();
    let err = cell.tick(&target, &[], &params.bounds).unwrap_err();
    assert_eq!(err, VectorError::ZeroLength);
    assert!(cell.is_alive());

    // Random genomes never hit the fault
    assert!(population.run_generation(10).unwrap().is_some());

    let wrapped: SimError = err.into();
    assert!(wrapped.to_string().contains("zero-length"));
}

#[test]
fn test_stats_history_export() {
    let mut config = Config::default();
    config.population.size = 30;
    config.population.energy = 60;

    let mut population = Population::from_config(&config, 33333).unwrap();
    let budget = tick_budget(&config);
    for _ in 0..3 {
        population.run_generation(budget).unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.json");
    population.history().save_json(&path).unwrap();

    let loaded = evocells::StatsHistory::load_json(&path).unwrap();
    assert_eq!(loaded.len(), 3);
    let generations: Vec<u32> = loaded.generations.iter().map(|s| s.generation).collect();
    assert_eq!(generations, vec![1, 2, 3]);
}
