//! Glitch classification: mapping live data onto narrative themes.
//!
//! Each data source classifies independently into a condition, a set of
//! descriptive words, and a set of ambient events. A combined pass
//! derives an overall intensity, votes on a mood, and collects anomaly
//! lines for the extremes. Missing data yields an inactive source and,
//! with all three missing, the neutral no-glitch state.

/// Bitcoin-driven glitches.
pub mod bitcoin;
/// Combined cross-source glitches.
pub mod combined;
/// Stock-market-driven glitches.
pub mod market;
/// Weather-driven glitches.
pub mod weather;

use rand::rngs::StdRng;

use crate::snapshot::{BitcoinSnapshot, IndexQuote, WeatherSnapshot};

pub use bitcoin::{BitcoinCondition, BitcoinGlitch};
pub use combined::{CombinedGlitch, Intensity};
pub use market::{MarketDirection, MarketGlitch, Volatility};
pub use weather::{WeatherCondition, WeatherGlitch};

/// Glitches derived from the latest snapshot of each source.
#[derive(Debug, Clone)]
pub struct GlitchReport {
    /// Weather-driven themes.
    pub weather: WeatherGlitch,
    /// Bitcoin-driven themes.
    pub bitcoin: BitcoinGlitch,
    /// Stock-market-driven themes.
    pub market: MarketGlitch,
    /// Cross-source intensity, mood, and anomalies.
    pub combined: CombinedGlitch,
}

impl GlitchReport {
    /// Classify the latest data from all three sources.
    pub fn classify(
        bitcoin: Option<&BitcoinSnapshot>,
        weather: Option<&WeatherSnapshot>,
        quotes: &[IndexQuote],
        rng: &mut StdRng,
    ) -> Self {
        let weather_glitch = WeatherGlitch::classify(weather);
        let bitcoin_glitch = BitcoinGlitch::classify(bitcoin);
        let market_glitch = MarketGlitch::classify(quotes);
        let combined =
            CombinedGlitch::build(&weather_glitch, &bitcoin_glitch, &market_glitch, rng);

        Self {
            weather: weather_glitch,
            bitcoin: bitcoin_glitch,
            market: market_glitch,
            combined,
        }
    }

    /// Whether no source contributed any data.
    pub fn is_neutral(&self) -> bool {
        !self.weather.active && !self.bitcoin.active && !self.market.active
    }
}
