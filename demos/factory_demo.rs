//! Bounded factory floor run
//!
//! Runs the reference plant for thirty seconds with a capture sink, then
//! prints the final report and a small accounting of what was emitted.
//!
//! Run with: `cargo run --example factory_demo`

use std::sync::Arc;
use std::time::Duration;
use synthline::{MemorySink, Simulator};

#[tokio::main]
async fn main() -> synthline::Result<()> {
    println!("=== Synthline Factory Demo ===\n");

    // Capture everything in memory instead of streaming it
    let sink = Arc::new(MemorySink::new());
    let sim = Simulator::reference(sink.clone()).with_seed(2025);

    println!("Running the reference plant for 30 seconds...\n");
    let report = sim
        .run_until(tokio::time::sleep(Duration::from_secs(30)))
        .await?;

    println!("{}\n", report);

    // Dig into the captured stream
    let readings = sink.readings();
    let events = sink.events();
    let defects = events.iter().filter(|e| e.is_defect).count();
    let hot = readings.iter().filter(|r| r.temperature > 85.0).count();

    println!("=== Captured Stream ===\n");
    println!("Sensor readings:        {}", readings.len());
    println!("Production events:      {}", events.len());
    println!("Defective pieces:       {}", defects);
    println!("Hot readings (>85°C):   {}", hot);
    println!();

    for unit in sim.registry().units() {
        let count = sink.events_for(&unit.id).len();
        println!(
            "{}: {} cycles completed (cycle time {}s)",
            unit.id, count, unit.cycle_time_secs
        );
    }

    Ok(())
}
