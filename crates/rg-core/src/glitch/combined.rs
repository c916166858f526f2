//! Combined cross-source glitch effects.
//!
//! The per-source glitches are merged into one intensity level, a voted
//! mood, and a list of anomaly lines. Extreme readings (a Bitcoin move
//! beyond ±7%, temperatures past 35 °C or -10 °C, a market swing beyond
//! ±3%) trigger dedicated anomalies; moderate and strong intensities add
//! a few ambient ones at random.

use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::bitcoin::{BitcoinCondition, BitcoinGlitch};
use super::market::{MarketDirection, MarketGlitch, Volatility};
use super::weather::{WeatherCondition, WeatherGlitch};

/// How strongly reality is glitching, by count of active data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intensity {
    /// No data at all.
    None,
    /// One source active.
    Slight,
    /// Two sources active.
    Moderate,
    /// All three sources active.
    Strong,
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Slight => "slight",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
        };
        f.write_str(name)
    }
}

/// Ambient anomalies sampled in at moderate and strong intensity.
const AMBIENT_ANOMALIES: [&str; 10] = [
    "Objects briefly cast shadows in impossible directions",
    "Sounds occasionally play in reverse",
    "Peripheral vision reveals movement that disappears when looked at directly",
    "Reflective surfaces show a slight delay in movements",
    "Time briefly dilates, making moments stretch or compress",
    "Colors shift subtly toward unusual spectrums",
    "The taste of metal briefly appears in the mouth",
    "Static electricity affects objects in unusual ways",
    "Words spoken seem to have a subtle echo that wasn't there before",
    "Familiar objects momentarily appear foreign or wrong",
];

/// Merged glitch effects across all sources.
#[derive(Debug, Clone)]
pub struct CombinedGlitch {
    /// Overall intensity.
    pub intensity: Intensity,
    /// Voted mood word.
    pub mood: &'static str,
    /// Deduplicated descriptors from every active source.
    pub descriptors: Vec<&'static str>,
    /// Anomaly lines for the narrator.
    pub anomalies: Vec<&'static str>,
}

impl CombinedGlitch {
    /// Merge the per-source glitches.
    pub fn build(
        weather: &WeatherGlitch,
        bitcoin: &BitcoinGlitch,
        market: &MarketGlitch,
        rng: &mut StdRng,
    ) -> Self {
        let active_sources = [weather.active, bitcoin.active, market.active]
            .iter()
            .filter(|a| **a)
            .count();

        let intensity = match active_sources {
            0 => Intensity::None,
            1 => Intensity::Slight,
            2 => Intensity::Moderate,
            _ => Intensity::Strong,
        };

        if intensity == Intensity::None {
            return Self {
                intensity,
                mood: "neutral",
                descriptors: vec!["normal", "ordinary", "standard", "usual"],
                anomalies: Vec::new(),
            };
        }

        let mut descriptors = Vec::new();
        let mut moods = Vec::new();

        if bitcoin.active {
            descriptors.extend_from_slice(&bitcoin.descriptors);
            if let Some(mood) = bitcoin_mood(bitcoin.condition) {
                moods.push(mood);
            }
        }
        if weather.active {
            descriptors.extend_from_slice(&weather.descriptors);
            if let Some(mood) = weather_mood(weather.condition) {
                moods.push(mood);
            }
        }
        if market.active {
            descriptors.extend_from_slice(&market.descriptors);
            moods.push(market_mood(market.direction));
            match market.volatility {
                Volatility::High => moods.push("unstable"),
                Volatility::Moderate => moods.push("dynamic"),
                Volatility::Low => {}
            }
        }

        dedup_preserving_order(&mut descriptors);

        let mood = vote_mood(&moods, rng);
        let mut anomalies = triggered_anomalies(weather, bitcoin, market);
        anomalies.extend(ambient_anomalies(intensity, rng));

        Self {
            intensity,
            mood,
            descriptors,
            anomalies,
        }
    }
}

/// Mood contributed by the Bitcoin condition.
fn bitcoin_mood(condition: BitcoinCondition) -> Option<&'static str> {
    match condition {
        BitcoinCondition::Crashing => Some("anxious"),
        BitcoinCondition::Declining => Some("uneasy"),
        BitcoinCondition::Stable => Some("balanced"),
        BitcoinCondition::Growing => Some("optimistic"),
        BitcoinCondition::Surging => Some("euphoric"),
        BitcoinCondition::Neutral => None,
    }
}

/// Mood contributed by the weather condition.
fn weather_mood(condition: WeatherCondition) -> Option<&'static str> {
    match condition {
        WeatherCondition::Freezing => Some("stark"),
        WeatherCondition::Cold => Some("somber"),
        WeatherCondition::Mild => Some("neutral"),
        WeatherCondition::Warm => Some("pleasant"),
        WeatherCondition::Hot => Some("intense"),
        WeatherCondition::Neutral => None,
    }
}

/// Mood contributed by the market direction.
fn market_mood(direction: MarketDirection) -> &'static str {
    match direction {
        MarketDirection::Bearish => "pessimistic",
        MarketDirection::SlightlyBearish => "concerned",
        MarketDirection::Neutral => "steady",
        MarketDirection::SlightlyBullish => "hopeful",
        MarketDirection::Bullish => "enthusiastic",
    }
}

/// Pick the most frequent mood; ties break at random.
fn vote_mood(moods: &[&'static str], rng: &mut StdRng) -> &'static str {
    if moods.is_empty() {
        return "neutral";
    }

    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    for &mood in moods {
        *counts.entry(mood).or_insert(0) += 1;
    }
    let max = counts.values().copied().max().unwrap_or(0);

    // Iterate the original slice to keep the candidate order stable.
    let mut candidates: Vec<&'static str> = Vec::new();
    for &mood in moods {
        if counts[mood] == max && !candidates.contains(&mood) {
            candidates.push(mood);
        }
    }
    candidates[rng.random_range(0..candidates.len())]
}

/// Anomaly lines for extreme readings.
fn triggered_anomalies(
    weather: &WeatherGlitch,
    bitcoin: &BitcoinGlitch,
    market: &MarketGlitch,
) -> Vec<&'static str> {
    let mut anomalies = Vec::new();

    if bitcoin.change_1h.is_some_and(|c| c < -7.0) {
        anomalies.extend_from_slice(&[
            "Digital displays momentarily show cascading numbers",
            "Electronics briefly malfunction, showing error codes",
            "The air feels charged with a sense of digital panic",
            "Shadows seem to darken and stretch in impossible ways",
            "Lights flicker in patterns that somehow feel mathematical",
        ]);
    }
    if bitcoin.change_1h.is_some_and(|c| c > 7.0) {
        anomalies.extend_from_slice(&[
            "Electronic devices emit a subtle green glow",
            "The air crackles with unexpected static electricity",
            "Digital displays briefly show rapidly increasing numbers",
            "Light sources seem unusually bright and oversaturated",
            "Objects appear to vibrate with a strange energy",
        ]);
    }
    if weather.temperature_c.is_some_and(|t| t > 35.0) {
        anomalies.extend_from_slice(&[
            "The air wavers with visible heat distortion",
            "Surfaces appear to shimmer at the edges",
            "Colors become unnaturally vivid and intense",
            "A sense of time dilation makes movements seem slower",
            "Objects cast multiple overlapping shadows",
        ]);
    }
    if weather.temperature_c.is_some_and(|t| t < -10.0) {
        anomalies.extend_from_slice(&[
            "Breath freezes in mid-air, hanging like crystalline sculptures",
            "Sounds become muffled and distant",
            "Colors desaturate to near monochrome",
            "Surfaces develop intricate frost patterns that form and reform",
            "Time seems to slow as the cold intensifies",
        ]);
    }
    if market.average_change.is_some_and(|c| c < -3.0) {
        anomalies.extend_from_slice(&[
            "Objects appear slightly heavier, as if gravity increased",
            "Colors drain from the environment in pulses",
            "A distant sound of breaking glass occasionally echoes",
            "Vertical lines in the environment appear to bend downward",
            "Reflective surfaces momentarily show distorted versions of reality",
        ]);
    }
    if market.average_change.is_some_and(|c| c > 3.0) {
        anomalies.extend_from_slice(&[
            "Objects seem lighter, almost buoyant",
            "Colors appear unnaturally vibrant in waves",
            "A subtle upward motion appears in peripheral vision",
            "Light sources create halos that weren't there before",
            "Reflective surfaces briefly show idealized versions of reality",
        ]);
    }

    anomalies
}

/// Random ambient anomalies: 1-2 at moderate intensity, 2-4 at strong.
fn ambient_anomalies(intensity: Intensity, rng: &mut StdRng) -> Vec<&'static str> {
    let count = match intensity {
        Intensity::Moderate => rng.random_range(1..=2),
        Intensity::Strong => rng.random_range(2..=4),
        _ => return Vec::new(),
    };

    let mut pool: Vec<&'static str> = AMBIENT_ANOMALIES.to_vec();
    let mut picked = Vec::with_capacity(count);
    for _ in 0..count.min(pool.len()) {
        let idx = rng.random_range(0..pool.len());
        picked.push(pool.swap_remove(idx));
    }
    picked
}

/// Remove duplicates while keeping first-seen order.
fn dedup_preserving_order(items: &mut Vec<&'static str>) {
    let mut seen = Vec::new();
    items.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(item);
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::snapshot::{BitcoinSnapshot, IndexQuote, WeatherSnapshot};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn btc_glitch(change: f64) -> BitcoinGlitch {
        BitcoinGlitch::classify(Some(&BitcoinSnapshot {
            price_usd: 60000.0,
            percent_change_1h: Some(change),
            percent_change_24h: None,
            last_updated: None,
        }))
    }

    fn weather_glitch(temp: f64) -> WeatherGlitch {
        WeatherGlitch::classify(Some(&WeatherSnapshot {
            location_name: None,
            region: None,
            country: None,
            latitude: None,
            longitude: None,
            temperature_c: Some(temp),
            feels_like_c: None,
            wind_kph: None,
            wind_dir: None,
            humidity: None,
            uv_index: None,
            last_updated: None,
        }))
    }

    fn market_glitch(change: f64) -> MarketGlitch {
        MarketGlitch::classify(&[
            IndexQuote {
                symbol: "^SPX".into(),
                price: 100.0,
                change,
                volume: None,
            },
            IndexQuote {
                symbol: "^DJI".into(),
                price: 100.0,
                change,
                volume: None,
            },
        ])
    }

    #[test]
    fn no_sources_is_the_neutral_state() {
        let combined = CombinedGlitch::build(
            &WeatherGlitch::classify(None),
            &BitcoinGlitch::classify(None),
            &MarketGlitch::classify(&[]),
            &mut rng(),
        );
        assert_eq!(combined.intensity, Intensity::None);
        assert_eq!(combined.mood, "neutral");
        assert!(combined.anomalies.is_empty());
        assert!(combined.descriptors.contains(&"ordinary"));
    }

    #[test]
    fn three_sources_is_strong() {
        let combined = CombinedGlitch::build(
            &weather_glitch(15.0),
            &btc_glitch(0.0),
            &market_glitch(0.0),
            &mut rng(),
        );
        assert_eq!(combined.intensity, Intensity::Strong);
        // Strong intensity samples 2-4 ambient anomalies.
        assert!(combined.anomalies.len() >= 2);
    }

    #[test]
    fn bitcoin_crash_triggers_anomalies() {
        let combined = CombinedGlitch::build(
            &WeatherGlitch::classify(None),
            &btc_glitch(-9.0),
            &MarketGlitch::classify(&[]),
            &mut rng(),
        );
        assert_eq!(combined.intensity, Intensity::Slight);
        assert!(
            combined
                .anomalies
                .contains(&"Digital displays momentarily show cascading numbers")
        );
        assert_eq!(combined.mood, "anxious");
    }

    #[test]
    fn extreme_cold_triggers_anomalies() {
        let combined = CombinedGlitch::build(
            &weather_glitch(-15.0),
            &BitcoinGlitch::classify(None),
            &MarketGlitch::classify(&[]),
            &mut rng(),
        );
        assert!(combined.anomalies.contains(&"Sounds become muffled and distant"));
    }

    #[test]
    fn descriptors_are_deduplicated() {
        // "pleasant" appears in both warm-weather and mild tables; more
        // to the point, duplicates must never survive the merge.
        let combined = CombinedGlitch::build(
            &weather_glitch(25.0),
            &btc_glitch(0.0),
            &market_glitch(0.0),
            &mut rng(),
        );
        let mut unique = combined.descriptors.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), combined.descriptors.len());
    }

    #[test]
    fn mood_vote_is_deterministic_with_seed() {
        let a = CombinedGlitch::build(
            &weather_glitch(25.0),
            &btc_glitch(3.0),
            &market_glitch(1.0),
            &mut rng(),
        );
        let b = CombinedGlitch::build(
            &weather_glitch(25.0),
            &btc_glitch(3.0),
            &market_glitch(1.0),
            &mut rng(),
        );
        assert_eq!(a.mood, b.mood);
        assert_eq!(a.anomalies, b.anomalies);
    }
}
