//! Minimal example of an external driver

use evocells::{Config, Population, TickOutcome};

fn main() {
    println!("evocells - Minimal Example");
    println!("==========================\n");

    let config = Config::default();
    let mut population = Population::from_config(&config, 42).expect("default config is valid");

    println!("Initial state:");
    println!("  Cells: {}", population.size());
    println!("  Hazards: {}", population.hazards().len());
    println!(
        "  Target: ({:.0}, {:.0}) r={}",
        population.target().position().x,
        population.target().position().y,
        population.target().radius()
    );
    println!();

    // One tick per "frame"
    let mut frame = 0u64;
    while population.generation() <= 20 {
        frame += 1;
        match population.tick() {
            Ok(TickOutcome::GenerationComplete(stats)) => println!("{}", stats.summary()),
            Ok(TickOutcome::Running) => {}
            Err(e) => {
                eprintln!("Tick {} aborted: {}", frame, e);
                break;
            }
        }
    }

    // What a renderer would draw
    println!("\nFinal frame: {}", frame);
    for cell in population.cells().iter().rev().take(3) {
        let p = cell.position();
        let c = cell.color();
        println!(
            "  cell at ({:.1}, {:.1}) r={} rgb({}, {}, {})",
            p.x,
            p.y,
            cell.radius(),
            c.r,
            c.g,
            c.b
        );
    }
}
