//! Environment-driven configuration.
//!
//! Every external surface (three data APIs, the LLM endpoint, the
//! database file, the save directory) is configured through environment
//! variables. Callers are expected to run `dotenvy::dotenv()` before
//! constructing a [`Config`] so a local `.env` file works too.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};

/// Default chat-completions endpoint (Groq, OpenAI-compatible).
pub const DEFAULT_GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
/// Default model for story generation.
pub const DEFAULT_GROQ_MODEL: &str = "llama3-70b-8192";
/// Default weather location query (`auto:ip` resolves by IP).
pub const DEFAULT_WEATHER_QUERY: &str = "auto:ip";
/// Default interval between API syncs.
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 600;

/// Credentials and endpoint for one external API.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    /// The API key.
    pub key: String,
    /// The endpoint URL.
    pub endpoint: String,
}

/// Runtime configuration assembled from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// CoinMarketCap credentials, if configured.
    pub coinmarket: Option<ApiCredentials>,
    /// Financial Modeling Prep credentials, if configured.
    pub fmp: Option<ApiCredentials>,
    /// Weather API credentials, if configured.
    pub weather: Option<ApiCredentials>,
    /// Weather location query string.
    pub weather_query: String,
    /// LLM API key, if configured.
    pub groq_api_key: Option<String>,
    /// LLM chat-completions endpoint.
    pub groq_endpoint: String,
    /// LLM model name.
    pub groq_model: String,
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
    /// Directory holding save files.
    pub save_dir: PathBuf,
    /// Interval between background syncs.
    pub sync_interval: Duration,
}

impl Config {
    /// Assemble a configuration from the process environment.
    ///
    /// Absent API keys are not an error here; each client reports the
    /// missing credential when it is actually used.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Assemble a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(get: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sync_interval_secs = match get("RG_SYNC_INTERVAL_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| CoreError::InvalidVar {
                var: "RG_SYNC_INTERVAL_SECS",
                value: raw,
            })?,
            None => DEFAULT_SYNC_INTERVAL_SECS,
        };

        Ok(Self {
            coinmarket: credentials(&get, "COINMARKETCAP_API_KEY", "COINMARKETCAP_ENDPOINT"),
            fmp: credentials(&get, "FMP_API_KEY", "FMP_ENDPOINT"),
            weather: credentials(&get, "WEATHER_API_KEY", "WEATHER_ENDPOINT"),
            weather_query: get("WEATHER_QUERY")
                .unwrap_or_else(|| DEFAULT_WEATHER_QUERY.to_string()),
            groq_api_key: get("GROQ_API_KEY"),
            groq_endpoint: get("GROQ_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_GROQ_ENDPOINT.to_string()),
            groq_model: get("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            database_path: get("RG_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("reality_glitch.db")),
            save_dir: get("RG_SAVE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("saved_games")),
            sync_interval: Duration::from_secs(sync_interval_secs),
        })
    }

    /// CoinMarketCap credentials or an error naming the missing variable.
    pub fn require_coinmarket(&self) -> CoreResult<&ApiCredentials> {
        self.coinmarket
            .as_ref()
            .ok_or(CoreError::MissingVar("COINMARKETCAP_API_KEY"))
    }

    /// FMP credentials or an error naming the missing variable.
    pub fn require_fmp(&self) -> CoreResult<&ApiCredentials> {
        self.fmp.as_ref().ok_or(CoreError::MissingVar("FMP_API_KEY"))
    }

    /// Weather credentials or an error naming the missing variable.
    pub fn require_weather(&self) -> CoreResult<&ApiCredentials> {
        self.weather
            .as_ref()
            .ok_or(CoreError::MissingVar("WEATHER_API_KEY"))
    }

    /// LLM API key or an error naming the missing variable.
    pub fn require_groq_key(&self) -> CoreResult<&str> {
        self.groq_api_key
            .as_deref()
            .ok_or(CoreError::MissingVar("GROQ_API_KEY"))
    }
}

/// Read a key/endpoint variable pair; both must be present and non-empty.
fn credentials<F>(get: &F, key_var: &str, endpoint_var: &str) -> Option<ApiCredentials>
where
    F: Fn(&str) -> Option<String>,
{
    let key = get(key_var)?;
    let endpoint = get(endpoint_var)?;
    if key.is_empty() || endpoint.is_empty() {
        return None;
    }
    Some(ApiCredentials { key, endpoint })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> CoreResult<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = config_from(&[]).unwrap();
        assert!(cfg.coinmarket.is_none());
        assert!(cfg.require_coinmarket().is_err());
        assert!(cfg.require_groq_key().is_err());
        assert_eq!(cfg.weather_query, DEFAULT_WEATHER_QUERY);
        assert_eq!(cfg.groq_endpoint, DEFAULT_GROQ_ENDPOINT);
        assert_eq!(cfg.groq_model, DEFAULT_GROQ_MODEL);
        assert_eq!(cfg.sync_interval, Duration::from_secs(600));
        assert_eq!(cfg.database_path, PathBuf::from("reality_glitch.db"));
        assert_eq!(cfg.save_dir, PathBuf::from("saved_games"));
    }

    #[test]
    fn credentials_require_both_key_and_endpoint() {
        let cfg = config_from(&[("FMP_API_KEY", "secret")]).unwrap();
        assert!(cfg.fmp.is_none());

        let cfg = config_from(&[
            ("FMP_API_KEY", "secret"),
            ("FMP_ENDPOINT", "https://example.test/quotes"),
        ])
        .unwrap();
        let creds = cfg.require_fmp().unwrap();
        assert_eq!(creds.key, "secret");
        assert_eq!(creds.endpoint, "https://example.test/quotes");
    }

    #[test]
    fn empty_key_treated_as_missing() {
        let cfg = config_from(&[
            ("WEATHER_API_KEY", ""),
            ("WEATHER_ENDPOINT", "https://example.test"),
        ])
        .unwrap();
        assert!(cfg.weather.is_none());
    }

    #[test]
    fn interval_override_and_rejection() {
        let cfg = config_from(&[("RG_SYNC_INTERVAL_SECS", "30")]).unwrap();
        assert_eq!(cfg.sync_interval, Duration::from_secs(30));

        let err = config_from(&[("RG_SYNC_INTERVAL_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidVar { var, .. } if var == "RG_SYNC_INTERVAL_SECS"));
    }

    #[test]
    fn missing_var_error_names_the_variable() {
        let cfg = config_from(&[]).unwrap();
        let err = cfg.require_weather().unwrap_err();
        assert_eq!(err.to_string(), "missing environment variable: WEATHER_API_KEY");
    }
}
