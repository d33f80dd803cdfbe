//! IoT sensor readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of environmental sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorType {
    Temperature,
    Humidity,
    Shock,
    Location,
}

impl SensorType {
    /// Returns the snake_case wire name of this sensor type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Shock => "shock",
            Self::Location => "location",
        }
    }
}

/// One sensor observation. Append-only; superseded readings stay for
/// history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoTReading {
    pub id: String,
    pub sensor_id: String,
    pub sensor_type: SensorType,
    /// Observed value, rounded to one decimal place.
    pub value: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
    /// Derived: whether the observation breached the sensor's thresholds.
    pub is_alert: bool,
}
