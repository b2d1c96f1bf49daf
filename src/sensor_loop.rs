//! Plant-wide sensor sweep.
//!
//! One task covers every registered unit: each tick draws a fresh reading
//! per unit in registration order, hands it to the sink, then sleeps for
//! the fixed sensor interval. The first sweep happens immediately.

use crate::generator::SensorGenerator;
use crate::plant::EquipmentRegistry;
use crate::sink::TelemetrySink;
use crate::SENSOR_INTERVAL_SECS;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// The shared sensor sweep over all registered equipment.
pub struct SensorLoop {
    registry: EquipmentRegistry,
    generator: SensorGenerator,
    sink: Arc<dyn TelemetrySink>,
}

impl SensorLoop {
    /// Sweep with an entropy-seeded generator.
    pub fn new(registry: EquipmentRegistry, sink: Arc<dyn TelemetrySink>) -> Self {
        Self {
            registry,
            generator: SensorGenerator::new(),
            sink,
        }
    }

    /// Sweep with a fixed generator seed for reproducible streams.
    pub fn with_seed(registry: EquipmentRegistry, sink: Arc<dyn TelemetrySink>, seed: u64) -> Self {
        Self {
            registry,
            generator: SensorGenerator::with_seed(seed),
            sink,
        }
    }

    /// Run the sweep until the owning task is cancelled.
    ///
    /// Pacing is a plain sleep between sweeps, so the effective period is
    /// the interval plus emission time. At one reading per unit per second
    /// that slack is negligible and keeps the loop free of tick bookkeeping.
    pub async fn run(mut self) {
        info!("Sensor loop started ({} units)", self.registry.len());
        let interval = Duration::from_secs(SENSOR_INTERVAL_SECS);

        loop {
            for unit in self.registry.units() {
                let sample = self.generator.sample(&unit.id);
                if let Some(kind) = sample.anomaly {
                    debug!("Injected {} anomaly for {}", kind, unit.id);
                }
                self.sink.emit_reading(&sample.reading);
            }
            tokio::time::sleep(interval).await;
        }
    }
}
