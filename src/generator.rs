//! Randomized sample synthesis.
//!
//! Pure draws: each call is independent, keeps no history, and has no side
//! effects beyond advancing the RNG. The low-level functions take any
//! [`Rng`] so tests can drive them with a seeded generator; [`SensorGenerator`]
//! wraps one for the simulation loops.

use crate::telemetry::{AnomalyKind, SensorReading};
use crate::{ANOMALY_PROBABILITY, DEFECT_PROBABILITY};
use rand::prelude::*;
use rand::rngs::StdRng;

const BASE_TEMPERATURE: f64 = 70.0;
const BASE_PRESSURE: f64 = 120.0;
const BASE_VIBRATION: f64 = 2.5;

/// A generated reading plus which anomaly (if any) was injected into it.
///
/// The reading itself carries no anomaly flag; downstream consumers are
/// expected to detect out-of-range values on their own.
#[derive(Debug, Clone)]
pub struct SensorSample {
    /// The generated reading.
    pub reading: SensorReading,
    /// The override applied to this sample, if any.
    pub anomaly: Option<AnomalyKind>,
}

/// Draw one sensor reading for an equipment unit.
///
/// Temperature, pressure and vibration are a baseline plus a uniform
/// perturbation, rounded to 2 decimal places. With probability 0.10 the
/// sample is anomalous: either temperature or pressure (never both, never
/// vibration) is overridden with an out-of-range value. Speed is a uniform
/// integer in [950, 1000], independent of the anomaly draw.
pub fn draw_reading(equipment_id: &str, rng: &mut (impl Rng + ?Sized)) -> SensorSample {
    let mut temperature = round2(BASE_TEMPERATURE + rng.gen_range(-10.0..20.0));
    let mut pressure = round2(BASE_PRESSURE + rng.gen_range(-20.0..40.0));
    let vibration = round2(BASE_VIBRATION + rng.gen_range(-1.0..1.0));

    let anomaly = if rng.gen_bool(ANOMALY_PROBABILITY) {
        if rng.gen_bool(0.5) {
            temperature = round2(BASE_TEMPERATURE + rng.gen_range(15.0..30.0));
            Some(AnomalyKind::Overheat)
        } else {
            pressure = round2(BASE_PRESSURE + rng.gen_range(35.0..60.0));
            Some(AnomalyKind::Overpressure)
        }
    } else {
        None
    };

    let speed: u32 = rng.gen_range(950..=1000);

    SensorSample {
        reading: SensorReading::new(equipment_id, temperature, pressure, vibration, speed),
        anomaly,
    }
}

/// Draw the defect flag for one completed item (independent Bernoulli,
/// p = 0.05).
pub fn draw_defect(rng: &mut (impl Rng + ?Sized)) -> bool {
    rng.gen_bool(DEFECT_PROBABILITY)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sensor reading generator owning its RNG.
#[derive(Debug)]
pub struct SensorGenerator {
    rng: StdRng,
}

impl SensorGenerator {
    /// Create a generator seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a generator with a fixed seed for reproducible streams.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw one sample for an equipment unit.
    pub fn sample(&mut self, equipment_id: &str) -> SensorSample {
        draw_reading(equipment_id, &mut self.rng)
    }
}

impl Default for SensorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_round2() {
        assert_abs_diff_eq!(round2(73.456), 73.46, epsilon = 1e-9);
        assert_abs_diff_eq!(round2(119.994), 119.99, epsilon = 1e-9);
        assert_abs_diff_eq!(round2(2.5), 2.5, epsilon = 1e-9);
    }

    #[test]
    fn test_normal_sample_ranges() {
        let mut rng = test_rng();
        for _ in 0..10_000 {
            let sample = draw_reading("EQ-001", &mut rng);
            let r = &sample.reading;

            assert!(r.vibration >= 1.5 && r.vibration <= 3.5, "vibration {}", r.vibration);
            assert!(r.speed >= 950 && r.speed <= 1000, "speed {}", r.speed);

            match sample.anomaly {
                None => {
                    assert!(r.temperature >= 60.0 && r.temperature <= 90.0);
                    assert!(r.pressure >= 100.0 && r.pressure <= 160.0);
                }
                Some(AnomalyKind::Overheat) => {
                    // Only temperature is overridden.
                    assert!(r.temperature >= 85.0 && r.temperature <= 100.0);
                    assert!(r.pressure >= 100.0 && r.pressure <= 160.0);
                }
                Some(AnomalyKind::Overpressure) => {
                    // Only pressure is overridden.
                    assert!(r.pressure >= 155.0 && r.pressure <= 180.0);
                    assert!(r.temperature >= 60.0 && r.temperature <= 90.0);
                }
            }
        }
    }

    #[test]
    fn test_anomaly_rate_converges() {
        let mut rng = test_rng();
        let draws = 10_000;
        let anomalous = (0..draws)
            .filter(|_| draw_reading("EQ-001", &mut rng).anomaly.is_some())
            .count();

        let rate = anomalous as f64 / draws as f64;
        assert_abs_diff_eq!(rate, 0.10, epsilon = 0.02);
    }

    #[test]
    fn test_both_anomaly_kinds_occur() {
        let mut rng = test_rng();
        let kinds: Vec<AnomalyKind> = (0..10_000)
            .filter_map(|_| draw_reading("EQ-001", &mut rng).anomaly)
            .collect();

        assert!(kinds.contains(&AnomalyKind::Overheat));
        assert!(kinds.contains(&AnomalyKind::Overpressure));
    }

    #[test]
    fn test_defect_rate_converges() {
        let mut rng = test_rng();
        let draws = 10_000;
        let defects = (0..draws).filter(|_| draw_defect(&mut rng)).count();

        let rate = defects as f64 / draws as f64;
        assert_abs_diff_eq!(rate, 0.05, epsilon = 0.015);
    }

    #[test]
    fn test_seeded_generator_reproducible() {
        let mut a = SensorGenerator::with_seed(1234);
        let mut b = SensorGenerator::with_seed(1234);

        for _ in 0..100 {
            let sa = a.sample("EQ-001");
            let sb = b.sample("EQ-001");
            assert_eq!(sa.reading.temperature, sb.reading.temperature);
            assert_eq!(sa.reading.pressure, sb.reading.pressure);
            assert_eq!(sa.reading.vibration, sb.reading.vibration);
            assert_eq!(sa.reading.speed, sb.reading.speed);
            assert_eq!(sa.anomaly, sb.anomaly);
        }
    }

    #[test]
    fn test_sample_carries_equipment_id() {
        let mut generator = SensorGenerator::with_seed(7);
        let sample = generator.sample("EQ-004");
        assert_eq!(sample.reading.equipment_id, "EQ-004");
    }
}
