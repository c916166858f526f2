//! Core types for Reality Glitch: configuration, reality snapshots, and
//! glitch classification.
//!
//! This crate is pure data and logic — no network, no database, no
//! terminal. Pollers produce [`BitcoinSnapshot`], [`IndexQuote`], and
//! [`WeatherSnapshot`] values; the glitch module maps the latest of each
//! onto narrative themes that bias the story generator's prompt.

/// Environment-driven configuration.
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// Glitch classification: numeric thresholds to narrative themes.
pub mod glitch;
/// Prompt modifiers rendered from a glitch report.
pub mod modifiers;
/// Reality snapshots: the facts the pollers record.
pub mod snapshot;

/// Re-export configuration.
pub use config::Config;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the glitch report.
pub use glitch::GlitchReport;
/// Re-export prompt modifiers.
pub use modifiers::StoryModifiers;
/// Re-export snapshot types.
pub use snapshot::{BitcoinSnapshot, IndexQuote, WeatherSnapshot};
