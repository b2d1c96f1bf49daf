//! Error types for Synthline
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias for Synthline operations
pub type Result<T> = std::result::Result<T, SimulatorError>;

/// Main error type for Synthline operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
    /// Plant configuration error
    #[error("Plant error: {0}")]
    Plant(#[from] PlantError),

    /// A simulation loop task ended on its own
    #[error("Simulation task failed: {0}")]
    TaskFailed(String),
}

/// Errors validating the simulated plant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlantError {
    /// Equipment set is empty
    #[error("Equipment set is empty")]
    EmptyPlant,

    /// Two units share the same identifier
    #[error("Duplicate equipment identifier: {id}")]
    DuplicateEquipment { id: String },

    /// Cycle time must be a positive number of seconds
    #[error("Cycle time must be positive for {id}")]
    InvalidCycleTime { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimulatorError::Plant(PlantError::DuplicateEquipment {
            id: "EQ-001".to_string(),
        });
        let msg = format!("{}", err);
        assert!(msg.contains("Duplicate"));
        assert!(msg.contains("EQ-001"));
    }

    #[test]
    fn test_error_conversion() {
        let plant_err = PlantError::EmptyPlant;
        let sim_err: SimulatorError = plant_err.into();
        assert!(matches!(sim_err, SimulatorError::Plant(_)));
    }

    #[test]
    fn test_task_failed_display() {
        let err = SimulatorError::TaskFailed("sensor loop panicked".to_string());
        assert!(format!("{}", err).contains("sensor loop panicked"));
    }
}
