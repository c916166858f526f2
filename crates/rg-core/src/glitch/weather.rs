//! Weather-driven glitch classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::snapshot::WeatherSnapshot;

/// Temperature band the current weather falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCondition {
    /// No data, or no temperature reported.
    Neutral,
    /// Below 0 °C.
    Freezing,
    /// 0-10 °C.
    Cold,
    /// 10-20 °C.
    Mild,
    /// 20-30 °C.
    Warm,
    /// 30 °C and above.
    Hot,
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Neutral => "neutral",
            Self::Freezing => "freezing",
            Self::Cold => "cold",
            Self::Mild => "mild",
            Self::Warm => "warm",
            Self::Hot => "hot",
        };
        f.write_str(name)
    }
}

/// Narrative themes derived from the weather.
#[derive(Debug, Clone)]
pub struct WeatherGlitch {
    /// Whether any weather data was available.
    pub active: bool,
    /// Temperature in Celsius, when reported.
    pub temperature_c: Option<f64>,
    /// Temperature band.
    pub condition: WeatherCondition,
    /// Descriptive words for the narrator to weave in.
    pub descriptors: Vec<&'static str>,
    /// Ambient events that could happen.
    pub events: Vec<&'static str>,
}

impl WeatherGlitch {
    /// The inactive, no-data glitch.
    fn inactive() -> Self {
        Self {
            active: false,
            temperature_c: None,
            condition: WeatherCondition::Neutral,
            descriptors: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Classify the latest weather snapshot.
    pub fn classify(snapshot: Option<&WeatherSnapshot>) -> Self {
        let Some(weather) = snapshot else {
            return Self::inactive();
        };

        let mut glitch = Self {
            active: true,
            temperature_c: weather.temperature_c,
            ..Self::inactive()
        };

        if let Some(temp) = weather.temperature_c {
            let (condition, descriptors, events) = temperature_band(temp);
            glitch.condition = condition;
            glitch.descriptors.extend_from_slice(descriptors);
            glitch.events.extend_from_slice(events);
        }

        if let Some(humidity) = weather.humidity {
            if humidity > 80.0 {
                glitch
                    .descriptors
                    .extend_from_slice(&["humid", "muggy", "sticky", "damp"]);
                glitch.events.push("air feels thick and heavy");
            } else if humidity < 30.0 {
                glitch.descriptors.extend_from_slice(&["dry", "arid", "parched"]);
                glitch.events.push("static electricity crackling");
            }
        }

        if let Some(wind) = weather.wind_kph {
            if wind > 30.0 {
                glitch
                    .descriptors
                    .extend_from_slice(&["windy", "gusty", "blustery"]);
                glitch.events.extend_from_slice(&[
                    "objects swaying in the wind",
                    "papers flying around",
                    "hair being tussled by wind",
                ]);
            } else if wind > 10.0 {
                glitch.descriptors.push("breezy");
                glitch.events.push("gentle breeze moving light objects");
            }
        }

        glitch
    }
}

/// Condition and theme tables per temperature band.
fn temperature_band(
    temp: f64,
) -> (WeatherCondition, &'static [&'static str], &'static [&'static str]) {
    if temp < 0.0 {
        (
            WeatherCondition::Freezing,
            &[
                "frost-covered",
                "ice-cold",
                "frigid",
                "frozen",
                "glacial",
                "wintry",
                "crystalline",
            ],
            &[
                "ice forming on surfaces",
                "breath visible in the air",
                "objects becoming brittle from cold",
                "sounds becoming muffled",
            ],
        )
    } else if temp < 10.0 {
        (
            WeatherCondition::Cold,
            &["chilly", "brisk", "cold", "cool", "nippy"],
            &[
                "shivering slightly",
                "seeking warmth",
                "cold metal surfaces",
                "goosebumps forming",
            ],
        )
    } else if temp < 20.0 {
        (
            WeatherCondition::Mild,
            &["pleasant", "mild", "comfortable", "temperate"],
            &[
                "comfortable atmospheric conditions",
                "unremarkable temperature",
            ],
        )
    } else if temp < 30.0 {
        (
            WeatherCondition::Warm,
            &["warm", "balmy", "summery", "pleasant"],
            &[
                "slight perspiration",
                "seeking shade",
                "surfaces warm to the touch",
            ],
        )
    } else {
        (
            WeatherCondition::Hot,
            &[
                "scorching",
                "searing",
                "sweltering",
                "blistering",
                "blazing",
                "sultry",
                "torrid",
            ],
            &[
                "heat mirages",
                "oppressive heat",
                "air distortion from heat",
                "surfaces too hot to touch",
                "seeking any available cooling",
            ],
        )
    }
}
