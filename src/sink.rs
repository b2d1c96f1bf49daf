// Synthline - Synthetic factory floor simulator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Emission boundary.
//!
//! Simulation loops hand every record to a [`TelemetrySink`] exactly once,
//! in emission order. Sinks own their failure handling: a write error is
//! logged and swallowed, never surfaced back into the loops.

use crate::report::ProductionReport;
use crate::telemetry::{ProductionEvent, SensorReading};
use std::io::{self, Write};
use std::sync::Mutex;
use tracing::warn;

/// Where emitted records go.
///
/// Implementations must serialize each record as it arrives; the core does
/// no buffering or reordering on their behalf.
pub trait TelemetrySink: Send + Sync {
    /// Emit one sensor reading.
    fn emit_reading(&self, reading: &SensorReading);

    /// Emit one production completion event.
    fn emit_event(&self, event: &ProductionEvent);

    /// Emit the final production report.
    fn emit_report(&self, report: &ProductionReport);
}

/// Human-readable console lines.
#[derive(Debug)]
pub struct ConsoleSink<W> {
    out: Mutex<W>,
}

impl ConsoleSink<io::Stdout> {
    /// Console sink writing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    /// Console sink writing to any writer.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap()
    }
}

impl<W: Write + Send> TelemetrySink for ConsoleSink<W> {
    fn emit_reading(&self, reading: &SensorReading) {
        let mut out = self.out.lock().unwrap();
        if let Err(e) = writeln!(
            out,
            "[SENSOR] {}: temperature={:.2}°C, pressure={:.2}kPa, vibration={:.2}mm/s, speed={}RPM",
            reading.equipment_id,
            reading.temperature,
            reading.pressure,
            reading.vibration,
            reading.speed
        ) {
            warn!("Console sink write failed: {}", e);
        }
    }

    fn emit_event(&self, event: &ProductionEvent) {
        let mut out = self.out.lock().unwrap();
        let result = if event.is_defect {
            writeln!(
                out,
                "[PLC] {}: production complete +1 -> DEFECT (cumulative: {})",
                event.equipment_id, event.cumulative
            )
        } else {
            writeln!(
                out,
                "[PLC] {}: production complete +1 (cumulative: {})",
                event.equipment_id, event.cumulative
            )
        };
        if let Err(e) = result {
            warn!("Console sink write failed: {}", e);
        }
    }

    fn emit_report(&self, report: &ProductionReport) {
        let mut out = self.out.lock().unwrap();
        if let Err(e) = writeln!(out, "\n{}", report) {
            warn!("Console sink write failed: {}", e);
        }
    }
}

/// One JSON object per line.
#[derive(Debug)]
pub struct JsonLineSink<W> {
    out: Mutex<W>,
}

impl JsonLineSink<io::Stdout> {
    /// JSON line sink writing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonLineSink<W> {
    /// JSON line sink writing to any writer.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap()
    }

    fn write_json(&self, record: &impl serde::Serialize) {
        match serde_json::to_string(record) {
            Ok(line) => {
                let mut out = self.out.lock().unwrap();
                if let Err(e) = writeln!(out, "{}", line) {
                    warn!("JSON sink write failed: {}", e);
                }
            }
            Err(e) => warn!("JSON sink serialization failed: {}", e),
        }
    }
}

impl<W: Write + Send> TelemetrySink for JsonLineSink<W> {
    fn emit_reading(&self, reading: &SensorReading) {
        self.write_json(reading);
    }

    fn emit_event(&self, event: &ProductionEvent) {
        self.write_json(event);
    }

    fn emit_report(&self, report: &ProductionReport) {
        self.write_json(report);
    }
}

/// One recorded emission, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// A sensor reading.
    Reading(SensorReading),
    /// A production completion event.
    Event(ProductionEvent),
    /// The final report.
    Report(ProductionReport),
}

/// In-memory capture of every emission, for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    emissions: Mutex<Vec<Emission>>,
}

impl MemorySink {
    /// Create an empty memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All emissions in arrival order.
    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions.lock().unwrap().clone()
    }

    /// All recorded sensor readings, in arrival order.
    pub fn readings(&self) -> Vec<SensorReading> {
        self.emissions
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Emission::Reading(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    /// All recorded production events, in arrival order.
    pub fn events(&self) -> Vec<ProductionEvent> {
        self.emissions
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Emission::Event(ev) => Some(ev.clone()),
                _ => None,
            })
            .collect()
    }

    /// Production events for one equipment unit, in arrival order.
    pub fn events_for(&self, equipment_id: &str) -> Vec<ProductionEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.equipment_id == equipment_id)
            .collect()
    }

    /// All recorded reports, in arrival order.
    pub fn reports(&self) -> Vec<ProductionReport> {
        self.emissions
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Emission::Report(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded emissions.
    pub fn len(&self) -> usize {
        self.emissions.lock().unwrap().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.emissions.lock().unwrap().is_empty()
    }

    /// Drop all recorded emissions.
    pub fn clear(&self) {
        self.emissions.lock().unwrap().clear();
    }
}

impl TelemetrySink for MemorySink {
    fn emit_reading(&self, reading: &SensorReading) {
        self.emissions
            .lock()
            .unwrap()
            .push(Emission::Reading(reading.clone()));
    }

    fn emit_event(&self, event: &ProductionEvent) {
        self.emissions
            .lock()
            .unwrap()
            .push(Emission::Event(event.clone()));
    }

    fn emit_report(&self, report: &ProductionReport) {
        self.emissions
            .lock()
            .unwrap()
            .push(Emission::Report(report.clone()));
    }
}
