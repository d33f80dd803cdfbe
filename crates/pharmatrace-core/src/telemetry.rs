//! Synthetic telemetry generator.
//!
//! Produces time-correlated sensor readings rather than independent random
//! samples: the generator retains the last value and timestamp per sensor
//! and evolves each draw from that state using a type-specific stochastic
//! model.
//!
//! # Models
//!
//! - **temperature**: previous value plus a daily-cycle term and bounded
//!   jitter, scaled by elapsed time (capped at one minute) and clamped to
//!   the profile range. Alerts when the pre-clamp value leaves the range.
//! - **humidity**: relaxes 10% of the way toward a day/night target (45%
//!   during hours 6-18, 55% otherwise) plus unit jitter. Never alerts.
//! - **shock**: near zero 95% of the time, with 5% spikes up to 4 g.
//!   Alerts above 2 g.
//! - **location**: value held constant; never alerts.
//!
//! Time and randomness are supplied by the caller, so a fixed clock and a
//! seeded rng make every draw deterministic.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Timelike, Utc};
use rand::Rng;
use tracing::debug;

use crate::ident::entity_id;
use crate::model::{IoTReading, SensorType};

/// Daytime humidity target, hours 6-18 inclusive.
const HUMIDITY_DAY_TARGET: f64 = 45.0;

/// Nighttime humidity target.
const HUMIDITY_NIGHT_TARGET: f64 = 55.0;

/// Shock threshold in g above which a reading alerts.
const SHOCK_ALERT_THRESHOLD: f64 = 2.0;

/// Fraction of shock draws that stay in the quiet band.
const SHOCK_QUIET_PROBABILITY: f64 = 0.95;

/// Static model parameters for one sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorProfile {
    pub sensor_type: SensorType,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    /// Scale of the per-draw random change.
    pub change_rate: f64,
}

/// The simulated sensor fleet, keyed by sensor id.
///
/// s1 monitors cold-chain storage; its 2-8 °C band is the usual
/// refrigerated-transport requirement.
pub const SENSOR_FLEET: &[(&str, SensorProfile)] = &[
    (
        "s1",
        SensorProfile {
            sensor_type: SensorType::Temperature,
            unit: "°C",
            min: 2.0,
            max: 8.0,
            change_rate: 0.2,
        },
    ),
    (
        "s2",
        SensorProfile {
            sensor_type: SensorType::Humidity,
            unit: "%",
            min: 35.0,
            max: 65.0,
            change_rate: 1.0,
        },
    ),
    (
        "s3",
        SensorProfile {
            sensor_type: SensorType::Shock,
            unit: "g",
            min: 0.0,
            max: 2.0,
            change_rate: 0.5,
        },
    ),
    (
        "s4",
        SensorProfile {
            sensor_type: SensorType::Location,
            unit: "",
            min: 0.0,
            max: 0.0,
            change_rate: 0.0,
        },
    ),
];

/// Looks up the profile for a sensor id.
#[must_use]
pub fn profile(sensor_id: &str) -> Option<&'static SensorProfile> {
    SENSOR_FLEET
        .iter()
        .find(|(id, _)| *id == sensor_id)
        .map(|(_, p)| p)
}

/// Ids of all sensors in the fleet, in declaration order.
#[must_use]
pub fn sensor_ids() -> Vec<&'static str> {
    SENSOR_FLEET.iter().map(|(id, _)| *id).collect()
}

/// Carried-forward state for one sensor: the last (unrounded) value and when
/// it was observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorState {
    pub value: f64,
    pub at: DateTime<Utc>,
}

/// Generates readings for the sensor fleet, one time series per sensor.
#[derive(Debug, Default)]
pub struct TelemetryGenerator {
    last: HashMap<String, SensorState>,
}

impl TelemetryGenerator {
    /// Creates a generator with no prior sensor state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the carried state for a sensor. Used to seed a series at a
    /// known point before generating.
    pub fn seed_state(&mut self, sensor_id: &str, state: SensorState) {
        self.last.insert(sensor_id.to_string(), state);
    }

    /// Returns the carried state for a sensor, if any draw has happened.
    #[must_use]
    pub fn state(&self, sensor_id: &str) -> Option<SensorState> {
        self.last.get(sensor_id).copied()
    }

    /// Produces the next reading for `sensor_id` at time `now`.
    ///
    /// Returns `None` for sensor ids outside [`SENSOR_FLEET`]. A sensor with
    /// no prior state starts from the middle of its range, observed one
    /// minute before `now`.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        sensor_id: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Option<IoTReading> {
        let profile = profile(sensor_id)?;
        let last = self.last.get(sensor_id).copied().unwrap_or(SensorState {
            value: (profile.min + profile.max) / 2.0,
            at: now - Duration::seconds(60),
        });

        let (value, is_alert) = match profile.sensor_type {
            SensorType::Temperature => Self::next_temperature(profile, last, now, rng),
            SensorType::Humidity => (Self::next_humidity(last.value, now, rng), false),
            SensorType::Shock => Self::next_shock(rng),
            SensorType::Location => (last.value, false),
        };

        self.last
            .insert(sensor_id.to_string(), SensorState { value, at: now });

        let reading = IoTReading {
            id: entity_id(rng, "r"),
            sensor_id: sensor_id.to_string(),
            sensor_type: profile.sensor_type,
            value: round1(value),
            unit: profile.unit.to_string(),
            timestamp: now,
            is_alert,
        };
        debug!(
            sensor_id,
            sensor_type = profile.sensor_type.as_str(),
            value = reading.value,
            is_alert,
            "generated reading"
        );
        Some(reading)
    }

    /// Temperature evolves gradually: a slow daily cycle plus jitter, scaled
    /// by elapsed time capped at one minute. The carried value is clamped to
    /// the profile range; the alert flag reflects the pre-clamp value, so a
    /// reading sitting exactly on a bound does not alert.
    fn next_temperature<R: Rng + ?Sized>(
        profile: &SensorProfile,
        last: SensorState,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> (f64, bool) {
        let elapsed_secs = ((now - last.at).num_milliseconds() as f64 / 1000.0).max(0.0);
        #[allow(clippy::cast_precision_loss)]
        let daily_cycle = (now.timestamp_millis() as f64 / 3_600_000.0).sin() * 0.2;
        let jitter = (rng.gen::<f64>() - 0.5) * profile.change_rate;
        let raw = last.value + (daily_cycle + jitter) * elapsed_secs.min(60.0) / 60.0;
        let is_alert = raw < profile.min || raw > profile.max;
        (raw.clamp(profile.min, profile.max), is_alert)
    }

    /// Humidity relaxes toward the day/night target with unit jitter.
    fn next_humidity<R: Rng + ?Sized>(last_value: f64, now: DateTime<Utc>, rng: &mut R) -> f64 {
        let hour = now.hour();
        let target = if (6..=18).contains(&hour) {
            HUMIDITY_DAY_TARGET
        } else {
            HUMIDITY_NIGHT_TARGET
        };
        last_value + (target - last_value) * 0.1 + (rng.gen::<f64>() - 0.5) * 2.0
    }

    /// Shock is near zero most of the time with occasional spikes.
    fn next_shock<R: Rng + ?Sized>(rng: &mut R) -> (f64, bool) {
        let value = if rng.gen::<f64>() < SHOCK_QUIET_PROBABILITY {
            rng.gen::<f64>() * 0.5
        } else {
            rng.gen::<f64>() * 4.0
        };
        (value, value > SHOCK_ALERT_THRESHOLD)
    }
}

/// Rounds to one decimal place, the precision stored on readings.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn unknown_sensor_yields_no_reading() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut gen = TelemetryGenerator::new();
        assert!(gen.generate("s99", Utc::now(), &mut rng).is_none());
    }

    #[test]
    fn first_draw_starts_from_mid_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut gen = TelemetryGenerator::new();
        let reading = gen
            .generate("s1", at("2024-06-01T12:00:00Z"), &mut rng)
            .unwrap();
        // Mid-range is 5.0; one capped minute of drift moves at most
        // (0.2 + 0.1) from there.
        assert!((reading.value - 5.0).abs() <= 0.4, "value {}", reading.value);
        assert_eq!(reading.unit, "°C");
        assert_eq!(reading.sensor_type, SensorType::Temperature);
    }

    #[test]
    fn temperature_stays_clamped_and_alert_tracks_preclamp_value() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut gen = TelemetryGenerator::new();
        let now = at("2024-06-01T12:00:00Z");
        // Seed just inside the upper bound; no single 30-second step can
        // escape the band, so nothing should alert.
        gen.seed_state(
            "s1",
            SensorState {
                value: 8.0,
                at: now - Duration::seconds(30),
            },
        );
        let reading = gen.generate("s1", now, &mut rng).unwrap();
        assert!(reading.value <= 8.0 && reading.value >= 2.0);
        assert!(!reading.is_alert || gen.state("s1").unwrap().value >= 8.0);
    }

    #[test]
    fn boundary_value_is_not_an_alert() {
        // Raw value exactly at max: strict comparison means no alert.
        let profile = profile("s1").unwrap();
        assert!(!(8.0 > profile.max || 8.0 < profile.min));
    }

    #[test]
    fn shock_values_stay_in_range_and_spike_about_five_percent() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut gen = TelemetryGenerator::new();
        let mut now = at("2024-06-01T00:00:00Z");
        let draws = 4000;
        let mut alerts = 0;
        for _ in 0..draws {
            let reading = gen.generate("s3", now, &mut rng).unwrap();
            assert!((0.0..=4.0).contains(&reading.value), "value {}", reading.value);
            if reading.is_alert {
                alerts += 1;
                // Rounded value can sit exactly on the threshold when the
                // raw draw was just above it.
                assert!(reading.value >= 2.0);
            }
            now += Duration::seconds(10);
        }
        // 5% of spikes land anywhere in (0, 4]; half of those exceed the
        // 2 g threshold, so expect ~2.5% alerts.
        let rate = f64::from(alerts) / f64::from(draws);
        assert!(rate > 0.005 && rate < 0.06, "alert rate {rate}");
    }

    #[test]
    fn shock_spikes_exceed_half_g_about_five_percent_of_draws() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut gen = TelemetryGenerator::new();
        let mut now = at("2024-06-01T00:00:00Z");
        let draws = 4000;
        let mut spikes = 0;
        for _ in 0..draws {
            let reading = gen.generate("s3", now, &mut rng).unwrap();
            // Quiet draws live in [0, 0.5]; anything above came from the
            // spike branch (which can also land low, so this undercounts
            // slightly).
            if reading.value > 0.5 {
                spikes += 1;
            }
            now += Duration::seconds(10);
        }
        let rate = f64::from(spikes) / f64::from(draws);
        assert!(rate > 0.02 && rate < 0.07, "spike rate {rate}");
    }

    #[test]
    fn humidity_relaxes_toward_daytime_target() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut gen = TelemetryGenerator::new();
        let mut now = at("2024-06-01T10:00:00Z");
        gen.seed_state(
            "s2",
            SensorState {
                value: 65.0,
                at: now - Duration::seconds(60),
            },
        );
        for _ in 0..50 {
            let reading = gen.generate("s2", now, &mut rng).unwrap();
            assert!(!reading.is_alert);
            now += Duration::seconds(60);
        }
        // After 50 draws of 10% relaxation the series should sit near the
        // daytime target of 45.
        let settled = gen.state("s2").unwrap().value;
        assert!((settled - 45.0).abs() < 5.0, "settled at {settled}");
    }

    #[test]
    fn humidity_targets_flip_at_night() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut gen = TelemetryGenerator::new();
        let mut now = at("2024-06-01T22:00:00Z");
        gen.seed_state(
            "s2",
            SensorState {
                value: 45.0,
                at: now - Duration::seconds(60),
            },
        );
        for _ in 0..50 {
            gen.generate("s2", now, &mut rng).unwrap();
            now += Duration::seconds(60);
        }
        let settled = gen.state("s2").unwrap().value;
        assert!((settled - 55.0).abs() < 5.0, "settled at {settled}");
    }

    #[test]
    fn location_sensor_holds_value_and_never_alerts() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut gen = TelemetryGenerator::new();
        let first = gen.generate("s4", Utc::now(), &mut rng).unwrap();
        let second = gen.generate("s4", Utc::now(), &mut rng).unwrap();
        assert_eq!(first.value, second.value);
        assert!(!first.is_alert && !second.is_alert);
    }

    #[test]
    fn carried_state_advances_with_each_draw() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut gen = TelemetryGenerator::new();
        let t0 = at("2024-06-01T12:00:00Z");
        gen.generate("s1", t0, &mut rng).unwrap();
        assert_eq!(gen.state("s1").unwrap().at, t0);
        let t1 = t0 + Duration::seconds(30);
        gen.generate("s1", t1, &mut rng).unwrap();
        assert_eq!(gen.state("s1").unwrap().at, t1);
    }

    #[test]
    fn values_are_rounded_to_one_decimal() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut gen = TelemetryGenerator::new();
        for sensor in ["s1", "s2", "s3"] {
            let reading = gen.generate(sensor, Utc::now(), &mut rng).unwrap();
            assert_eq!(reading.value, round1(reading.value));
        }
    }
}
