//! The simulated plant: equipment units and their registry.
//!
//! The equipment set is fixed at process start. [`EquipmentRegistry::reference`]
//! returns the reference plant of four units; custom plants go through
//! [`EquipmentRegistry::new`], which validates the set.

use crate::error::PlantError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// One simulated machine with its own identifier and production cycle time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    /// Equipment identifier.
    pub id: String,
    /// Seconds the unit takes to complete one production item.
    pub cycle_time_secs: u64,
}

impl Equipment {
    /// Create an equipment unit.
    pub fn new(id: &str, cycle_time_secs: u64) -> Self {
        Self {
            id: id.to_string(),
            cycle_time_secs,
        }
    }

    /// Cycle time as a duration.
    pub fn cycle_time(&self) -> Duration {
        Duration::from_secs(self.cycle_time_secs)
    }
}

/// The fixed, validated set of equipment units, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentRegistry {
    units: Vec<Equipment>,
}

impl EquipmentRegistry {
    /// Create a registry from a list of units.
    ///
    /// The set must be non-empty, identifiers must be unique, and every
    /// cycle time must be positive.
    pub fn new(units: Vec<Equipment>) -> Result<Self, PlantError> {
        if units.is_empty() {
            return Err(PlantError::EmptyPlant);
        }

        let mut seen = HashSet::new();
        for unit in &units {
            if !seen.insert(unit.id.clone()) {
                return Err(PlantError::DuplicateEquipment {
                    id: unit.id.clone(),
                });
            }
            if unit.cycle_time_secs == 0 {
                return Err(PlantError::InvalidCycleTime {
                    id: unit.id.clone(),
                });
            }
        }

        Ok(Self { units })
    }

    /// The reference plant: two injection molders, a packer and an
    /// inspection station.
    pub fn reference() -> Self {
        Self {
            units: vec![
                Equipment::new("EQ-001", 8),
                Equipment::new("EQ-002", 10),
                Equipment::new("EQ-003", 5),
                Equipment::new("EQ-004", 15),
            ],
        }
    }

    /// Units in declaration order.
    pub fn units(&self) -> &[Equipment] {
        &self.units
    }

    /// Look up a unit by identifier.
    pub fn get(&self, id: &str) -> Option<&Equipment> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if empty (never true for a validated registry).
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
