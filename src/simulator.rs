// Synthline - Synthetic factory floor simulator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Simulation lifecycle.
//!
//! The simulator owns the plant layout, the shared counters and the sink,
//! spawns one sensor sweep plus one production loop per unit, and keeps
//! every task handle in a [`JoinSet`]. It runs until shutdown is requested
//! or a task dies, then aborts the set, drains it and settles the final
//! report.

use crate::counters::ProductionCounters;
use crate::error::{Result, SimulatorError};
use crate::plant::EquipmentRegistry;
use crate::production_loop::ProductionLoop;
use crate::report::ProductionReport;
use crate::sensor_loop::SensorLoop;
use crate::sink::TelemetrySink;
use std::future::Future;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info};

/// Coordinator for one factory floor simulation.
pub struct Simulator {
    registry: EquipmentRegistry,
    counters: ProductionCounters,
    sink: Arc<dyn TelemetrySink>,
    seed: Option<u64>,
}

impl Simulator {
    /// Simulator over an arbitrary plant layout.
    pub fn new(registry: EquipmentRegistry, sink: Arc<dyn TelemetrySink>) -> Self {
        let counters = ProductionCounters::for_registry(&registry);
        Self {
            registry,
            counters,
            sink,
            seed: None,
        }
    }

    /// Simulator over the reference four-unit plant.
    pub fn reference(sink: Arc<dyn TelemetrySink>) -> Self {
        Self::new(EquipmentRegistry::reference(), sink)
    }

    /// Fix the base seed for reproducible runs.
    ///
    /// The sensor sweep draws from `seed` directly; production loop `i`
    /// draws from `seed + 1 + i` so no two loops share a stream.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The plant layout being simulated.
    pub fn registry(&self) -> &EquipmentRegistry {
        &self.registry
    }

    /// Live production counters, one per unit.
    pub fn counters(&self) -> &ProductionCounters {
        &self.counters
    }

    /// Run until Ctrl-C, then settle and return the final report.
    pub async fn run(&self) -> Result<ProductionReport> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to install Ctrl-C handler: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Run until `shutdown` resolves, then settle and return the final
    /// report.
    ///
    /// All simulation tasks are aborted and drained before the report is
    /// taken, so no emission can land after it. If any task dies first the
    /// run ends with [`SimulatorError::TaskFailed`] instead of a report.
    pub async fn run_until(&self, shutdown: impl Future<Output = ()>) -> Result<ProductionReport> {
        info!(
            "Starting simulation with {} equipment units",
            self.registry.len()
        );

        let mut tasks = JoinSet::new();

        let sensors = match self.seed {
            Some(seed) => SensorLoop::with_seed(self.registry.clone(), self.sink.clone(), seed),
            None => SensorLoop::new(self.registry.clone(), self.sink.clone()),
        };
        tasks.spawn(sensors.run());

        let units = self.registry.units().iter().zip(self.counters.iter());
        for (index, (unit, counter)) in units.enumerate() {
            let worker = match self.seed {
                Some(seed) => ProductionLoop::with_seed(
                    unit.clone(),
                    index,
                    counter.clone(),
                    self.sink.clone(),
                    seed + 1 + index as u64,
                ),
                None => ProductionLoop::new(unit.clone(), index, counter.clone(), self.sink.clone()),
            };
            tasks.spawn(worker.run());
        }

        tokio::select! {
            _ = shutdown => {
                info!("Shutdown requested, stopping simulation");
                Self::settle(&mut tasks).await;

                let report = ProductionReport::from_counters(&self.counters);
                self.sink.emit_report(&report);
                info!("Simulation stopped (total produced: {})", report.total);
                Ok(report)
            }
            joined = tasks.join_next() => {
                let reason = fault_reason(joined);
                error!("Simulation task failed: {}", reason);
                Self::settle(&mut tasks).await;
                Err(SimulatorError::TaskFailed(reason))
            }
        }
    }

    /// Abort every task and wait until all of them are gone.
    async fn settle(tasks: &mut JoinSet<()>) {
        tasks.abort_all();
        while tasks.join_next().await.is_some() {}
    }
}

/// Explain why the task set stopped on its own.
///
/// Simulation loops never return, so the only expected outcome here is a
/// panic; the payload is unpacked for the error message when there is one.
fn fault_reason(joined: Option<std::result::Result<(), JoinError>>) -> String {
    match joined {
        Some(Err(e)) if e.is_panic() => {
            let payload = e.into_panic();
            if let Some(message) = payload.downcast_ref::<&str>() {
                (*message).to_string()
            } else if let Ok(message) = payload.downcast::<String>() {
                *message
            } else {
                "task panicked".to_string()
            }
        }
        Some(Err(e)) => e.to_string(),
        Some(Ok(())) => "task exited unexpectedly".to_string(),
        None => "no simulation tasks were running".to_string(),
    }
}
