//! # Synthline - Synthetic Factory Floor Simulator
//!
//! A telemetry and production simulator for exercising factory data
//! pipelines without the factory.
//!
//! ## Key Features
//!
//! - **Reference Plant**: Four equipment units with distinct cycle times
//! - **Streaming Telemetry**: One sensor sweep per second with anomaly injection
//! - **Production Loops**: Staggered per-unit cycles feeding shared counters
//! - **Pluggable Sinks**: Console lines, JSON lines or in-memory capture
//!
//! ## Quick Start
//!
//! ```rust
//! use synthline::{EquipmentRegistry, ProductionCounters, SensorGenerator};
//!
//! // The four-unit reference plant
//! let plant = EquipmentRegistry::reference();
//! let counters = ProductionCounters::for_registry(&plant);
//!
//! // Draw a sensor reading
//! let mut sensors = SensorGenerator::with_seed(7);
//! let sample = sensors.sample("EQ-001");
//! assert_eq!(sample.reading.equipment_id, "EQ-001");
//!
//! // Count a finished piece
//! let counter = counters.counter("EQ-001").unwrap();
//! assert_eq!(counter.increment(), 1);
//! ```
//!
//! ## Running a Simulation
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use synthline::{ConsoleSink, Simulator};
//!
//! #[tokio::main]
//! async fn main() -> synthline::Result<()> {
//!     let sim = Simulator::reference(Arc::new(ConsoleSink::stdout()));
//!     let report = sim.run().await?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`plant`]: Equipment layout and the reference registry
//! - [`telemetry`]: Sensor reading and production event records
//! - [`generator`]: Randomized sensor values and defect draws
//! - [`counters`]: Shared monotonic production counters
//! - [`sink`]: Emission targets (console, JSON lines, memory)
//! - [`sensor_loop`]: The plant-wide sensor sweep task
//! - [`production_loop`]: Per-unit production cycle tasks
//! - [`simulator`]: Lifecycle coordination and shutdown
//! - [`report`]: Final production summary

// Modules
pub mod counters;
pub mod error;
pub mod generator;
pub mod plant;
pub mod production_loop;
pub mod report;
pub mod sensor_loop;
pub mod simulator;
pub mod sink;
pub mod telemetry;

// Re-exports for convenient access
pub use counters::{EquipmentCounter, ProductionCounters};
pub use error::{PlantError, Result, SimulatorError};
pub use generator::{draw_defect, draw_reading, SensorGenerator, SensorSample};
pub use plant::{Equipment, EquipmentRegistry};
pub use production_loop::ProductionLoop;
pub use report::{EquipmentProduction, ProductionReport};
pub use sensor_loop::SensorLoop;
pub use simulator::Simulator;
pub use sink::{ConsoleSink, Emission, JsonLineSink, MemorySink, TelemetrySink};
pub use telemetry::{AnomalyKind, ProductionEvent, SensorReading, SIGNAL_PRODUCTION_COMPLETE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds between sensor sweeps
pub const SENSOR_INTERVAL_SECS: u64 = 1;

/// Seconds of startup stagger per production loop index
pub const STAGGER_STEP_SECS: u64 = 2;

/// Probability that a sensor reading carries an injected anomaly
pub const ANOMALY_PROBABILITY: f64 = 0.10;

/// Probability that a finished piece is defective
pub const DEFECT_PROBABILITY: f64 = 0.05;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_basic_flow() {
        let plant = EquipmentRegistry::reference();
        let counters = ProductionCounters::for_registry(&plant);

        let mut sensors = SensorGenerator::with_seed(1);
        for unit in plant.units() {
            let sample = sensors.sample(&unit.id);
            assert_eq!(sample.reading.equipment_id, unit.id);
        }

        for counter in counters.iter() {
            assert_eq!(counter.increment(), 1);
        }
        assert_eq!(counters.total(), 4);
    }
}
