//! Stock-market-driven glitch classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::snapshot::IndexQuote;

/// Overall market direction from the average index change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketDirection {
    /// Average change below -1.5%.
    Bearish,
    /// Average change -1.5% to -0.5%.
    SlightlyBearish,
    /// Average change within ±0.5%.
    Neutral,
    /// Average change 0.5% to 1.5%.
    SlightlyBullish,
    /// Average change above 1.5%.
    Bullish,
}

impl fmt::Display for MarketDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bearish => "bearish",
            Self::SlightlyBearish => "slightly bearish",
            Self::Neutral => "neutral",
            Self::SlightlyBullish => "slightly bullish",
            Self::Bullish => "bullish",
        };
        f.write_str(name)
    }
}

/// Spread of the per-index changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Volatility {
    /// Standard deviation below 0.5.
    Low,
    /// Standard deviation 0.5-1.5.
    Moderate,
    /// Standard deviation above 1.5.
    High,
}

impl fmt::Display for Volatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        };
        f.write_str(name)
    }
}

/// Narrative themes derived from index quotes.
#[derive(Debug, Clone)]
pub struct MarketGlitch {
    /// Whether any index data was available.
    pub active: bool,
    /// Average percent change across indices with usable data.
    pub average_change: Option<f64>,
    /// Market direction band.
    pub direction: MarketDirection,
    /// Change spread band.
    pub volatility: Volatility,
    /// Descriptive words for the narrator.
    pub descriptors: Vec<&'static str>,
    /// Ambient events that could happen.
    pub events: Vec<&'static str>,
}

impl MarketGlitch {
    fn inactive() -> Self {
        Self {
            active: false,
            average_change: None,
            direction: MarketDirection::Neutral,
            volatility: Volatility::Low,
            descriptors: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Classify the latest set of index quotes.
    pub fn classify(quotes: &[IndexQuote]) -> Self {
        if quotes.is_empty() {
            return Self::inactive();
        }

        let mut glitch = Self {
            active: true,
            ..Self::inactive()
        };

        let changes: Vec<f64> = quotes.iter().filter_map(IndexQuote::percent_change).collect();
        if changes.is_empty() {
            return glitch;
        }

        let avg = changes.iter().sum::<f64>() / changes.len() as f64;
        glitch.average_change = Some(avg);

        let (direction, descriptors, events) = direction_band(avg);
        glitch.direction = direction;
        glitch.descriptors.extend_from_slice(descriptors);
        glitch.events.extend_from_slice(events);

        if changes.len() > 1 {
            let variance =
                changes.iter().map(|c| (c - avg).powi(2)).sum::<f64>() / changes.len() as f64;
            let std_dev = variance.sqrt();
            let (volatility, extra_descriptors, extra_events) = volatility_band(std_dev);
            glitch.volatility = volatility;
            glitch.descriptors.extend_from_slice(extra_descriptors);
            glitch.events.extend_from_slice(extra_events);
        }

        glitch
    }
}

/// Direction and theme tables per average-change band.
fn direction_band(
    avg: f64,
) -> (MarketDirection, &'static [&'static str], &'static [&'static str]) {
    if avg < -1.5 {
        (
            MarketDirection::Bearish,
            &["descending", "sinking", "diminishing", "contracting"],
            &[
                "shadows appearing longer than they should be",
                "room temperature feeling slightly colder",
                "colors seeming less vibrant",
            ],
        )
    } else if avg < -0.5 {
        (
            MarketDirection::SlightlyBearish,
            &["cautious", "restrained", "subdued", "muted"],
            &[
                "subtle feeling of heaviness in the air",
                "colors slightly desaturated",
                "sounds slightly dampened",
            ],
        )
    } else if avg <= 0.5 {
        (
            MarketDirection::Neutral,
            &["balanced", "steady", "unchanging", "consistent"],
            &[
                "environment maintaining consistent properties",
                "regular, predictable physical laws",
            ],
        )
    } else if avg < 1.5 {
        (
            MarketDirection::SlightlyBullish,
            &["improving", "rising", "ascending", "elevating"],
            &[
                "objects seeming slightly lighter than expected",
                "colors appearing somewhat brighter",
                "subtle feeling of buoyancy",
            ],
        )
    } else {
        (
            MarketDirection::Bullish,
            &["soaring", "climbing", "accelerating", "amplifying"],
            &[
                "gravity feeling subtly reduced",
                "colors appearing more vibrant than normal",
                "sounds resonating with extra clarity",
            ],
        )
    }
}

/// Volatility and theme tables per standard-deviation band.
fn volatility_band(
    std_dev: f64,
) -> (Volatility, &'static [&'static str], &'static [&'static str]) {
    if std_dev < 0.5 {
        (
            Volatility::Low,
            &["stable", "predictable", "reliable", "constant"],
            &[],
        )
    } else if std_dev < 1.5 {
        (
            Volatility::Moderate,
            &["fluctuating", "shifting", "variable", "uneven"],
            &[
                "subtle fluctuations in lighting",
                "occasional slight disorientation",
            ],
        )
    } else {
        (
            Volatility::High,
            &[
                "erratic",
                "turbulent",
                "unstable",
                "unpredictable",
                "chaotic",
                "fractured",
            ],
            &[
                "reality shimmering at the edges",
                "sounds occasionally distorting",
                "momentary visual glitches",
                "brief sensations of vertigo",
            ],
        )
    }
}
