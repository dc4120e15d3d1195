//! Weather reading to condition classification
//!
//! Rules are checked in a fixed priority order and the first match wins:
//! rain in the description, then snow or cold, then heat, then clouds.
//! A "light snow" reading at 30 °C is therefore cold, not sunny.

use serde::Serialize;

use crate::model::Condition;

/// Below this temperature (°C) a reading is cold
pub const COLD_BELOW_C: f64 = 10.0;

/// At or above this temperature (°C) a reading is sunny
pub const SUNNY_FROM_C: f64 = 25.0;

/// Map a temperature and free-text description to a condition
pub fn classify(temperature: f64, description: &str) -> Condition {
    let desc = description.to_lowercase();
    if desc.contains("rain") {
        return Condition::Rainy;
    }
    if desc.contains("snow") || temperature < COLD_BELOW_C {
        return Condition::Cold;
    }
    if temperature >= SUNNY_FROM_C {
        return Condition::Sunny;
    }
    Condition::Cloudy
}

/// Current conditions for a location, with the derived condition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReading {
    /// °C
    pub temperature: f64,
    pub description: String,
    pub condition: Condition,
}

impl WeatherReading {
    pub fn new(temperature: f64, description: impl Into<String>) -> Self {
        let description = description.into();
        let condition = classify(temperature, &description);
        Self {
            temperature,
            description,
            condition,
        }
    }
}
