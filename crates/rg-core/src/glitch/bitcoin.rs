//! Bitcoin-driven glitch classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::snapshot::BitcoinSnapshot;

/// Market condition derived from the one-hour price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitcoinCondition {
    /// No data, or no change reported.
    Neutral,
    /// Down more than 5% in an hour.
    Crashing,
    /// Down 2-5%.
    Declining,
    /// Within ±2%.
    Stable,
    /// Up 2-5%.
    Growing,
    /// Up more than 5%.
    Surging,
}

impl fmt::Display for BitcoinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Neutral => "neutral",
            Self::Crashing => "crashing",
            Self::Declining => "declining",
            Self::Stable => "stable",
            Self::Growing => "growing",
            Self::Surging => "surging",
        };
        f.write_str(name)
    }
}

/// Narrative themes derived from the Bitcoin quote.
#[derive(Debug, Clone)]
pub struct BitcoinGlitch {
    /// Whether any Bitcoin data was available.
    pub active: bool,
    /// Price in USD.
    pub price_usd: Option<f64>,
    /// One-hour percent change.
    pub change_1h: Option<f64>,
    /// 24-hour percent change.
    pub change_24h: Option<f64>,
    /// Condition band.
    pub condition: BitcoinCondition,
    /// Descriptive words for the narrator.
    pub descriptors: Vec<&'static str>,
    /// Ambient events that could happen.
    pub events: Vec<&'static str>,
}

impl BitcoinGlitch {
    fn inactive() -> Self {
        Self {
            active: false,
            price_usd: None,
            change_1h: None,
            change_24h: None,
            condition: BitcoinCondition::Neutral,
            descriptors: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Classify the latest Bitcoin snapshot.
    pub fn classify(snapshot: Option<&BitcoinSnapshot>) -> Self {
        let Some(btc) = snapshot else {
            return Self::inactive();
        };

        let mut glitch = Self {
            active: true,
            price_usd: Some(btc.price_usd),
            change_1h: btc.percent_change_1h,
            change_24h: btc.percent_change_24h,
            ..Self::inactive()
        };

        if let Some(change) = btc.percent_change_1h {
            let (condition, descriptors, events) = change_band(change);
            glitch.condition = condition;
            glitch.descriptors.extend_from_slice(descriptors);
            glitch.events.extend_from_slice(events);
        }

        glitch
    }
}

/// Condition and theme tables per one-hour change band.
fn change_band(
    change: f64,
) -> (BitcoinCondition, &'static [&'static str], &'static [&'static str]) {
    if change < -5.0 {
        (
            BitcoinCondition::Crashing,
            &[
                "unstable",
                "chaotic",
                "deteriorating",
                "collapsing",
                "shattering",
                "fragmenting",
            ],
            &[
                "digital displays flickering with red numbers",
                "sounds of distant alarms",
                "technology glitching more severely",
                "object surfaces appearing to fracture momentarily",
            ],
        )
    } else if change < -2.0 {
        (
            BitcoinCondition::Declining,
            &["uncertain", "wavering", "faltering", "fading"],
            &[
                "subtle downward movements in the corner of vision",
                "digital displays showing decreasing values",
                "sounds occasionally distorting to lower pitches",
            ],
        )
    } else if change < 2.0 {
        (
            BitcoinCondition::Stable,
            &["steady", "consistent", "regular", "balanced"],
            &[
                "digital systems functioning normally",
                "predictable patterns in background noise",
            ],
        )
    } else if change < 5.0 {
        (
            BitcoinCondition::Growing,
            &["energetic", "vibrant", "expanding", "brightening"],
            &[
                "subtle upward movements in peripheral vision",
                "lights seeming slightly brighter",
                "technology functioning with extra efficiency",
            ],
        )
    } else {
        (
            BitcoinCondition::Surging,
            &[
                "electric",
                "charged",
                "intense",
                "luminous",
                "brilliant",
                "pulsating",
            ],
            &[
                "digital displays showing rapidly increasing numbers",
                "faint green glow around electronic objects",
                "air seeming to vibrate with energy",
                "sounds occasionally distorting to higher pitches",
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(change_1h: Option<f64>) -> BitcoinSnapshot {
        BitcoinSnapshot {
            price_usd: 60000.0,
            percent_change_1h: change_1h,
            percent_change_24h: Some(0.0),
            last_updated: None,
        }
    }

    #[test]
    fn no_data_is_inactive() {
        let glitch = BitcoinGlitch::classify(None);
        assert!(!glitch.active);
        assert_eq!(glitch.condition, BitcoinCondition::Neutral);
    }

    #[test]
    fn change_bands() {
        let cases = [
            (-8.0, BitcoinCondition::Crashing),
            (-3.0, BitcoinCondition::Declining),
            (0.0, BitcoinCondition::Stable),
            (3.0, BitcoinCondition::Growing),
            (9.0, BitcoinCondition::Surging),
        ];
        for (change, expected) in cases {
            let glitch = BitcoinGlitch::classify(Some(&snapshot(Some(change))));
            assert_eq!(glitch.condition, expected, "at {change}");
        }
    }

    #[test]
    fn missing_change_is_neutral_but_active() {
        let glitch = BitcoinGlitch::classify(Some(&snapshot(None)));
        assert!(glitch.active);
        assert_eq!(glitch.condition, BitcoinCondition::Neutral);
        assert!(glitch.descriptors.is_empty());
    }
}
