// Synthline - Synthetic factory floor simulator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Shared production counters.
//!
//! One atomic counter per equipment unit, the only mutable state shared
//! between simulation loops. Each production loop holds a handle to exactly
//! its own unit's counter, so no two loops ever write the same key; the
//! coordinator reads all counters for the final report.

use crate::plant::EquipmentRegistry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cumulative production count for a single equipment unit.
///
/// Monotonically non-decreasing: incremented once per completed item,
/// never reset during a run.
#[derive(Debug)]
pub struct EquipmentCounter {
    equipment_id: String,
    produced: AtomicU64,
}

impl EquipmentCounter {
    /// Create a counter starting at zero.
    pub fn new(equipment_id: &str) -> Self {
        Self {
            equipment_id: equipment_id.to_string(),
            produced: AtomicU64::new(0),
        }
    }

    /// The unit this counter belongs to.
    pub fn equipment_id(&self) -> &str {
        &self.equipment_id
    }

    /// Atomically add one completed item and return the post-increment total.
    pub fn increment(&self) -> u64 {
        self.produced.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Current total.
    pub fn produced(&self) -> u64 {
        self.produced.load(Ordering::SeqCst)
    }
}

/// The full set of per-equipment counters, in declaration order.
#[derive(Debug, Clone)]
pub struct ProductionCounters {
    counters: Vec<Arc<EquipmentCounter>>,
}

impl ProductionCounters {
    /// Create zeroed counters for every unit in the registry.
    pub fn for_registry(registry: &EquipmentRegistry) -> Self {
        Self {
            counters: registry
                .units()
                .iter()
                .map(|unit| Arc::new(EquipmentCounter::new(&unit.id)))
                .collect(),
        }
    }

    /// Handle to one unit's counter.
    pub fn counter(&self, equipment_id: &str) -> Option<Arc<EquipmentCounter>> {
        self.counters
            .iter()
            .find(|c| c.equipment_id() == equipment_id)
            .map(Arc::clone)
    }

    /// Counters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<EquipmentCounter>> {
        self.counters.iter()
    }

    /// Number of counters.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Best-effort snapshot of (equipment_id, produced) pairs, sorted by
    /// identifier for reproducible report ordering.
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut pairs: Vec<(String, u64)> = self
            .counters
            .iter()
            .map(|c| (c.equipment_id().to_string(), c.produced()))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    /// Sum across all equipment.
    pub fn total(&self) -> u64 {
        self.counters.iter().map(|c| c.produced()).sum()
    }
}
