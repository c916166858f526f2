//! Data plumbing for Reality Glitch: API pollers, the SQLite store, and
//! the interval scheduler.
//!
//! Three HTTP clients fetch live data (Bitcoin quote, stock index batch,
//! current weather); [`Store`] persists one row per successful poll; and
//! [`SyncJob`] glues them together, logging and skipping whatever fails.
//! There is deliberately no retry or backoff machinery — a missed poll
//! just means the game reads slightly staler reality.

/// CoinMarketCap Bitcoin quote client.
pub mod coinmarket;
/// Error types used throughout the crate.
pub mod error;
/// Financial Modeling Prep index quote client.
pub mod fmp;
/// SQLite persistence for polled snapshots.
pub mod store;
/// The one-shot sync job and the interval scheduler.
pub mod sync;
/// Current-weather client.
pub mod weather;

/// Re-export the Bitcoin client.
pub use coinmarket::CoinMarketClient;
/// Re-export error types.
pub use error::{SyncError, SyncResult};
/// Re-export the index quote client.
pub use fmp::FmpClient;
/// Re-export the store.
pub use store::Store;
/// Re-export the sync job.
pub use sync::{SyncJob, SyncOutcome};
/// Re-export the weather client.
pub use weather::WeatherClient;
