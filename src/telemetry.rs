// Synthline - Synthetic factory floor simulator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Telemetry record types.
//!
//! The two record families emitted by the simulation: periodic sensor
//! readings and PLC-style production completion signals. Records are
//! immutable once produced and carry both a wall-clock instant and the
//! epoch-millisecond form of the same instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signal type carried by every production completion event.
pub const SIGNAL_PRODUCTION_COMPLETE: &str = "PRODUCTION_COMPLETE";

/// One synthetic telemetry sample from an equipment unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Equipment identifier.
    pub equipment_id: String,
    /// Temperature in °C.
    pub temperature: f64,
    /// Pressure in kPa.
    pub pressure: f64,
    /// Vibration in mm/s.
    pub vibration: f64,
    /// Rotational speed in RPM.
    pub speed: u32,
    /// Instant the sample was generated.
    pub timestamp: DateTime<Utc>,
    /// Same instant as epoch milliseconds.
    pub timestamp_ms: i64,
}

impl SensorReading {
    /// Create a reading, capturing the current instant once for both
    /// timestamp fields.
    pub fn new(
        equipment_id: &str,
        temperature: f64,
        pressure: f64,
        vibration: f64,
        speed: u32,
    ) -> Self {
        let timestamp = Utc::now();
        Self {
            equipment_id: equipment_id.to_string(),
            temperature,
            pressure,
            vibration,
            speed,
            timestamp,
            timestamp_ms: timestamp.timestamp_millis(),
        }
    }
}

/// Which sensor value an anomalous sample overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    /// Temperature pushed into the overheat band.
    Overheat,
    /// Pressure pushed into the overpressure band.
    Overpressure,
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyKind::Overheat => write!(f, "OVERHEAT"),
            AnomalyKind::Overpressure => write!(f, "OVERPRESSURE"),
        }
    }
}

/// One production completion signal from an equipment unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionEvent {
    /// Equipment identifier.
    pub equipment_id: String,
    /// Always [`SIGNAL_PRODUCTION_COMPLETE`].
    pub signal_type: String,
    /// Items completed by this signal (always 1).
    pub count: u32,
    /// Running total for this unit after this completion.
    pub cumulative: u64,
    /// Whether the completed item is flagged as a defect.
    pub is_defect: bool,
    /// The unit's cycle time in seconds.
    pub cycle_time: u64,
    /// Instant the signal was generated.
    pub timestamp: DateTime<Utc>,
    /// Same instant as epoch milliseconds.
    pub timestamp_ms: i64,
}

impl ProductionEvent {
    /// Create a completion event, capturing the current instant once for
    /// both timestamp fields.
    pub fn new(equipment_id: &str, cumulative: u64, is_defect: bool, cycle_time: u64) -> Self {
        let timestamp = Utc::now();
        Self {
            equipment_id: equipment_id.to_string(),
            signal_type: SIGNAL_PRODUCTION_COMPLETE.to_string(),
            count: 1,
            cumulative,
            is_defect,
            cycle_time,
            timestamp,
            timestamp_ms: timestamp.timestamp_millis(),
        }
    }
}
