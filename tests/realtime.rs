//! Wall-clock smoke test for the simulator
//!
//! Run with: cargo test --release --test realtime -- --ignored

use std::sync::Arc;
use std::time::{Duration, Instant};
use synthline::{MemorySink, Simulator};

#[tokio::test]
#[ignore] // Run manually with --ignored
async fn smoke_ten_seconds_real_time() {
    let sink = Arc::new(MemorySink::new());
    let sim = Simulator::reference(sink.clone());

    let start = Instant::now();
    let report = sim
        .run_until(tokio::time::sleep(Duration::from_secs(10)))
        .await
        .unwrap();
    let elapsed = start.elapsed();

    println!("Reference plant ran for {:?}", elapsed);
    println!("Sensor readings: {}", sink.readings().len());
    println!("Production events: {}", sink.events().len());
    println!("Total produced: {}", report.total);

    // Ideal timeline: 10 sweeps of 4 readings, EQ-001 finishing at 8s and
    // EQ-003 at 9s. Bounds stay loose for a loaded machine.
    let readings = sink.readings().len();
    assert!(
        (36..=48).contains(&readings),
        "expected around 40 readings, got {}",
        readings
    );
    assert!(
        (1..=4).contains(&report.total),
        "expected a couple of finished cycles, got {}",
        report.total
    );
    assert!(elapsed >= Duration::from_secs(10));
}
