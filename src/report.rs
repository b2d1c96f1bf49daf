//! Final production report.
//!
//! Built from a counter snapshot when the simulation shuts down. `Display`
//! renders the console summary block; serde makes the report emittable
//! through the JSON sink like any other record.

use crate::counters::ProductionCounters;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const RULE: &str = "==================================================";

/// Items produced by one equipment unit over the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentProduction {
    /// Equipment identifier.
    pub equipment_id: String,
    /// Items produced.
    pub produced: u64,
}

/// Per-equipment production counts and their total, captured at shutdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionReport {
    /// Counts sorted by equipment identifier.
    pub per_equipment: Vec<EquipmentProduction>,
    /// Sum across all equipment.
    pub total: u64,
    /// Instant the report was generated.
    pub generated_at: DateTime<Utc>,
}

impl ProductionReport {
    /// Snapshot the counters into a report.
    ///
    /// The snapshot is best-effort: an increment racing the shutdown may or
    /// may not be included.
    pub fn from_counters(counters: &ProductionCounters) -> Self {
        let per_equipment: Vec<EquipmentProduction> = counters
            .snapshot()
            .into_iter()
            .map(|(equipment_id, produced)| EquipmentProduction {
                equipment_id,
                produced,
            })
            .collect();
        let total = per_equipment.iter().map(|e| e.produced).sum();

        Self {
            per_equipment,
            total,
            generated_at: Utc::now(),
        }
    }

    /// Produced count for one unit, if present.
    pub fn get(&self, equipment_id: &str) -> Option<u64> {
        self.per_equipment
            .iter()
            .find(|e| e.equipment_id == equipment_id)
            .map(|e| e.produced)
    }
}

impl fmt::Display for ProductionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final production summary:")?;
        writeln!(f, "{}", RULE)?;
        for entry in &self.per_equipment {
            writeln!(f, "   {}: {:>4} produced", entry.equipment_id, entry.produced)?;
        }
        writeln!(f, "{}", RULE)?;
        writeln!(f, "   total:  {:>4}", self.total)?;
        write!(f, "{}", RULE)
    }
}
