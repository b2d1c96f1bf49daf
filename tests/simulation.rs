//! End-to-end simulation tests on a paused clock
//!
//! Every sleep inside the simulator runs against tokio's test clock, so
//! the timing assertions here are exact rather than statistical.

use std::sync::Arc;
use std::time::Duration;
use synthline::{
    Emission, MemorySink, ProductionEvent, ProductionReport, SensorReading, Simulator,
    SimulatorError, TelemetrySink, SIGNAL_PRODUCTION_COMPLETE,
};

async fn run_for(sim: &Simulator, millis: u64) -> ProductionReport {
    sim.run_until(tokio::time::sleep(Duration::from_millis(millis)))
        .await
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_reference_plant_cadence() {
    let sink = Arc::new(MemorySink::new());
    let sim = Simulator::reference(sink.clone()).with_seed(11);

    // 24.5 seconds: cycles land at
    //   EQ-001 (stagger 0, cycle 8):  8, 16, 24
    //   EQ-002 (stagger 2, cycle 10): 12, 22
    //   EQ-003 (stagger 4, cycle 5):  9, 14, 19, 24
    //   EQ-004 (stagger 6, cycle 15): 21
    let report = run_for(&sim, 24_500).await;

    assert_eq!(report.total, 10);
    assert_eq!(report.get("EQ-001"), Some(3));
    assert_eq!(report.get("EQ-002"), Some(2));
    assert_eq!(report.get("EQ-003"), Some(4));
    assert_eq!(report.get("EQ-004"), Some(1));

    // Counters hold the final tallies after the run settles.
    assert_eq!(sim.counters().total(), 10);
    assert_eq!(sim.counters().counter("EQ-001").unwrap().produced(), 3);

    // One sweep per second from t = 0 through t = 24.
    assert_eq!(sink.readings().len(), 25 * 4);

    // Per-unit cumulative counts run 1..=n with no gaps, and the report
    // settles on the last value.
    for unit in sim.registry().units() {
        let events = sink.events_for(&unit.id);
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.cumulative, i as u64 + 1);
            assert_eq!(event.count, 1);
            assert_eq!(event.signal_type, SIGNAL_PRODUCTION_COMPLETE);
            assert_eq!(event.cycle_time, unit.cycle_time_secs);
        }
        assert_eq!(report.get(&unit.id), Some(events.len() as u64));
    }

    // Exactly one report, and nothing lands after it.
    let emissions = sink.emissions();
    let reports = emissions
        .iter()
        .filter(|e| matches!(e, Emission::Report(_)))
        .count();
    assert_eq!(reports, 1);
    assert!(matches!(emissions.last(), Some(Emission::Report(r)) if *r == report));
}

#[tokio::test(start_paused = true)]
async fn test_first_emissions_are_a_full_sweep() {
    let sink = Arc::new(MemorySink::new());
    let sim = Simulator::reference(sink.clone()).with_seed(5);

    run_for(&sim, 1_500).await;

    // The sensor sweep fires at t = 0, well before any production cycle.
    let emissions = sink.emissions();
    let expected = ["EQ-001", "EQ-002", "EQ-003", "EQ-004"];
    for (emission, id) in emissions.iter().zip(expected) {
        match emission {
            Emission::Reading(r) => assert_eq!(r.equipment_id, id),
            other => panic!("expected a reading first, got {:?}", other),
        }
    }
}

struct PanickingSink;

impl TelemetrySink for PanickingSink {
    fn emit_reading(&self, _reading: &SensorReading) {
        panic!("sink exploded");
    }

    fn emit_event(&self, _event: &ProductionEvent) {}

    fn emit_report(&self, _report: &ProductionReport) {}
}

#[tokio::test(start_paused = true)]
async fn test_task_panic_ends_run() {
    let sim = Simulator::reference(Arc::new(PanickingSink));

    let err = sim.run_until(std::future::pending()).await.unwrap_err();
    match err {
        SimulatorError::TaskFailed(reason) => {
            assert!(reason.contains("sink exploded"), "reason was {:?}", reason)
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_seeded_runs_repeat() {
    type ReadingKey = (String, f64, f64, f64, u32);
    type EventKey = (String, u64, bool, u64);

    async fn capture(seed: u64) -> (Vec<ReadingKey>, Vec<EventKey>) {
        let sink = Arc::new(MemorySink::new());
        let sim = Simulator::reference(sink.clone()).with_seed(seed);
        run_for(&sim, 10_500).await;

        let readings = sink
            .readings()
            .into_iter()
            .map(|r| (r.equipment_id, r.temperature, r.pressure, r.vibration, r.speed))
            .collect();
        let events = sink
            .events()
            .into_iter()
            .map(|e| (e.equipment_id, e.cumulative, e.is_defect, e.cycle_time))
            .collect();
        (readings, events)
    }

    let (readings_a, events_a) = capture(77).await;
    let (readings_b, events_b) = capture(77).await;
    assert_eq!(readings_a.len(), 11 * 4);
    assert_eq!(readings_a, readings_b);
    assert_eq!(events_a, events_b);

    let (readings_c, _) = capture(78).await;
    assert_ne!(readings_a, readings_c);
}
