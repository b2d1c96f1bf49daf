// Synthline - Synthetic factory floor simulator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Per-equipment production cycle.
//!
//! Each unit gets its own task. The task announces itself, waits out its
//! startup stagger, then completes one production cycle per cycle time:
//! bump the shared counter, draw the defect outcome, emit the event.

use crate::counters::EquipmentCounter;
use crate::generator::draw_defect;
use crate::plant::Equipment;
use crate::sink::TelemetrySink;
use crate::telemetry::ProductionEvent;
use crate::STAGGER_STEP_SECS;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// The production cycle for a single equipment unit.
pub struct ProductionLoop {
    equipment: Equipment,
    stagger: Duration,
    counter: Arc<EquipmentCounter>,
    sink: Arc<dyn TelemetrySink>,
    rng: StdRng,
}

impl ProductionLoop {
    /// Loop with an entropy-seeded defect draw.
    ///
    /// `index` is the unit's position in the registry and sets the startup
    /// stagger to `index * STAGGER_STEP_SECS` seconds.
    pub fn new(
        equipment: Equipment,
        index: usize,
        counter: Arc<EquipmentCounter>,
        sink: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self::with_rng(equipment, index, counter, sink, StdRng::from_entropy())
    }

    /// Loop with a fixed defect-draw seed for reproducible streams.
    pub fn with_seed(
        equipment: Equipment,
        index: usize,
        counter: Arc<EquipmentCounter>,
        sink: Arc<dyn TelemetrySink>,
        seed: u64,
    ) -> Self {
        Self::with_rng(equipment, index, counter, sink, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        equipment: Equipment,
        index: usize,
        counter: Arc<EquipmentCounter>,
        sink: Arc<dyn TelemetrySink>,
        rng: StdRng,
    ) -> Self {
        Self {
            equipment,
            stagger: Duration::from_secs(index as u64 * STAGGER_STEP_SECS),
            counter,
            sink,
            rng,
        }
    }

    /// Run the cycle until the owning task is cancelled.
    ///
    /// The counter is bumped before the defect draw, so defective pieces
    /// still count toward cumulative production.
    pub async fn run(mut self) {
        info!(
            "Production loop started for {} (cycle: {}s)",
            self.equipment.id, self.equipment.cycle_time_secs
        );
        tokio::time::sleep(self.stagger).await;

        let cycle = self.equipment.cycle_time();
        loop {
            tokio::time::sleep(cycle).await;

            let cumulative = self.counter.increment();
            let defect = draw_defect(&mut self.rng);
            debug!(
                "Cycle complete for {} (cumulative: {}, defect: {})",
                self.equipment.id, cumulative, defect
            );
            let event = ProductionEvent::new(
                &self.equipment.id,
                cumulative,
                defect,
                self.equipment.cycle_time_secs,
            );
            self.sink.emit_event(&event);
        }
    }
}
