//! Reality snapshots: one value per poll per source.
//!
//! These are the rows of the three append-only fact tables. Fields that
//! the upstream APIs sometimes omit are `Option`s; classification code
//! treats an absent field as "no influence" rather than an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Index symbols the stock poller keeps.
pub const TRACKED_SYMBOLS: [&str; 5] = ["^SPX", "^DJI", "^IXIC", "^RUT", "^NYA"];

/// A Bitcoin quote at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitcoinSnapshot {
    /// Price in USD.
    pub price_usd: f64,
    /// Percent change over the last hour.
    pub percent_change_1h: Option<f64>,
    /// Percent change over the last 24 hours.
    pub percent_change_24h: Option<f64>,
    /// Upstream quote timestamp.
    pub last_updated: Option<DateTime<Utc>>,
}

/// A quote for one stock index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    /// Index symbol, e.g. `^SPX`.
    pub symbol: String,
    /// Current level.
    pub price: f64,
    /// Absolute change since the previous close.
    pub change: f64,
    /// Trading volume, when reported.
    pub volume: Option<i64>,
}

impl IndexQuote {
    /// Change as a percentage of the current level.
    pub fn percent_change(&self) -> Option<f64> {
        if self.price == 0.0 {
            None
        } else {
            Some(self.change / self.price * 100.0)
        }
    }
}

/// A weather observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Location name, e.g. city.
    pub location_name: Option<String>,
    /// Region or state.
    pub region: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
    /// Temperature in Celsius.
    pub temperature_c: Option<f64>,
    /// Apparent temperature in Celsius.
    pub feels_like_c: Option<f64>,
    /// Wind speed in km/h.
    pub wind_kph: Option<f64>,
    /// Compass wind direction, e.g. `NW`.
    pub wind_dir: Option<String>,
    /// Relative humidity percentage.
    pub humidity: Option<f64>,
    /// UV index.
    pub uv_index: Option<f64>,
    /// Upstream observation timestamp.
    pub last_updated: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_change_relative_to_price() {
        let quote = IndexQuote {
            symbol: "^SPX".into(),
            price: 5000.0,
            change: -50.0,
            volume: None,
        };
        assert_eq!(quote.percent_change(), Some(-1.0));
    }

    #[test]
    fn percent_change_undefined_at_zero_price() {
        let quote = IndexQuote {
            symbol: "^DJI".into(),
            price: 0.0,
            change: 1.0,
            volume: None,
        };
        assert_eq!(quote.percent_change(), None);
    }

    #[test]
    fn bitcoin_snapshot_round_trips_as_json() {
        let snap = BitcoinSnapshot {
            price_usd: 64123.5,
            percent_change_1h: Some(-2.4),
            percent_change_24h: Some(1.1),
            last_updated: None,
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: BitcoinSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }
}
