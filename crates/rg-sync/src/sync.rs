//! The one-shot sync job and the interval scheduler.
//!
//! `run_once` walks the three sources sequentially: fetch, insert, move
//! on. A failing source is logged at `warn` and skipped; the sync
//! timestamp is recorded whenever at least one source landed, so
//! staleness checks reflect the data actually present.

use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use rg_core::Config;

use crate::coinmarket::CoinMarketClient;
use crate::fmp::FmpClient;
use crate::store::Store;
use crate::weather::WeatherClient;

/// What a single sync pass accomplished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Sources that fetched and persisted successfully.
    pub succeeded: u32,
    /// Sources that failed (network, parse, or database).
    pub failed: u32,
    /// Sources with no configured credentials.
    pub skipped: u32,
}

impl SyncOutcome {
    /// Whether any source produced a new row.
    pub fn any_succeeded(&self) -> bool {
        self.succeeded > 0
    }
}

/// Fetches all sources and persists whatever arrives.
pub struct SyncJob {
    coinmarket: Option<CoinMarketClient>,
    fmp: Option<FmpClient>,
    weather: Option<WeatherClient>,
    store: Store,
}

impl SyncJob {
    /// Build a job from configuration, constructing a client for each
    /// source that has credentials. Missing credentials downgrade the
    /// source to "skipped" rather than failing the whole job.
    pub fn from_config(config: &Config, store: Store) -> Self {
        let coinmarket = match config.coinmarket {
            Some(_) => match CoinMarketClient::from_config(config) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("coinmarketcap client unavailable: {e}");
                    None
                }
            },
            None => None,
        };
        let fmp = match config.fmp {
            Some(_) => match FmpClient::from_config(config) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("fmp client unavailable: {e}");
                    None
                }
            },
            None => None,
        };
        let weather = match config.weather {
            Some(_) => match WeatherClient::from_config(config) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("weather client unavailable: {e}");
                    None
                }
            },
            None => None,
        };

        Self {
            coinmarket,
            fmp,
            weather,
            store,
        }
    }

    /// Build a job with explicit clients (tests).
    pub fn new(
        coinmarket: Option<CoinMarketClient>,
        fmp: Option<FmpClient>,
        weather: Option<WeatherClient>,
        store: Store,
    ) -> Self {
        Self {
            coinmarket,
            fmp,
            weather,
            store,
        }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run one sync pass across every source.
    pub fn run_once(&self) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        match &self.fmp {
            None => outcome.skipped += 1,
            Some(client) => {
                let result = client
                    .fetch_index_quotes()
                    .and_then(|quotes| {
                        info!(count = quotes.len(), "fetched index quotes");
                        self.store.insert_index_quotes(&quotes)
                    });
                tally(&mut outcome, "stock indices", result);
            }
        }

        match &self.weather {
            None => outcome.skipped += 1,
            Some(client) => {
                let result = client
                    .fetch_current()
                    .and_then(|snapshot| self.store.insert_weather(&snapshot));
                tally(&mut outcome, "weather", result);
            }
        }

        match &self.coinmarket {
            None => outcome.skipped += 1,
            Some(client) => {
                let result = client
                    .fetch_bitcoin()
                    .and_then(|snapshot| self.store.insert_bitcoin(&snapshot));
                tally(&mut outcome, "bitcoin", result);
            }
        }

        if outcome.any_succeeded() {
            if let Err(e) = self.store.record_sync() {
                warn!("failed to record sync timestamp: {e}");
            }
        }

        info!(
            succeeded = outcome.succeeded,
            failed = outcome.failed,
            skipped = outcome.skipped,
            "sync pass complete"
        );
        outcome
    }

    /// Run forever: one pass, sleep, repeat.
    ///
    /// This is the background "scheduler" — a naive interval loop with
    /// no retry or backoff, stopped only by killing the process.
    pub fn run_forever(&self, interval: Duration) -> ! {
        info!(interval_secs = interval.as_secs(), "scheduler started");
        loop {
            self.run_once();
            thread::sleep(interval);
        }
    }
}

/// Count a source result, logging failures and moving on.
fn tally(outcome: &mut SyncOutcome, label: &str, result: crate::error::SyncResult<()>) {
    match result {
        Ok(()) => outcome.succeeded += 1,
        Err(e) => {
            warn!("{label} sync failed: {e}");
            outcome.failed += 1;
        }
    }
}
