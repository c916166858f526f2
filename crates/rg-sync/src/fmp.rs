//! Financial Modeling Prep index quote client.
//!
//! The batch quote endpoint returns every index in one array; we keep
//! only the five tracked symbols and drop entries without a price.

use std::time::Duration;

use serde::Deserialize;

use rg_core::snapshot::TRACKED_SYMBOLS;
use rg_core::{Config, IndexQuote};

use crate::error::SyncResult;

/// Request timeout for quote fetches.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the FMP batch index quote endpoint.
pub struct FmpClient {
    http: reqwest::blocking::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Deserialize)]
struct RawQuote {
    symbol: String,
    price: Option<f64>,
    change: Option<f64>,
    volume: Option<i64>,
}

impl FmpClient {
    /// Create a client with explicit credentials.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> SyncResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        })
    }

    /// Create a client from the environment configuration.
    pub fn from_config(config: &Config) -> SyncResult<Self> {
        let creds = config.require_fmp()?;
        Self::new(creds.key.clone(), creds.endpoint.clone())
    }

    /// Fetch quotes for the tracked index symbols.
    pub fn fetch_index_quotes(&self) -> SyncResult<Vec<IndexQuote>> {
        let raw: Vec<RawQuote> = self
            .http
            .get(&self.endpoint)
            .query(&[("apikey", &self.api_key)])
            .header("Accept", "application/json")
            .send()?
            .error_for_status()?
            .json()?;

        let quotes = raw
            .into_iter()
            .filter(|q| TRACKED_SYMBOLS.contains(&q.symbol.as_str()))
            .filter_map(|q| {
                Some(IndexQuote {
                    symbol: q.symbol,
                    price: q.price?,
                    change: q.change?,
                    volume: q.volume,
                })
            })
            .collect();

        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn filters_to_tracked_symbols() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/quotes").query_param("apikey", "k");
            then.status(200).json_body(json!([
                { "symbol": "^SPX", "price": 5000.0, "change": -25.0, "volume": 123456 },
                { "symbol": "^DJI", "price": 39000.0, "change": 120.0, "volume": null },
                { "symbol": "AAPL", "price": 180.0, "change": 1.0, "volume": 99 },
                { "symbol": "^RUT", "price": 2000.0, "change": null, "volume": 5 }
            ]));
        });

        let client = FmpClient::new("k", server.url("/quotes")).unwrap();
        let quotes = client.fetch_index_quotes().unwrap();

        // AAPL is not an index; ^RUT has no change and is dropped.
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].symbol, "^SPX");
        assert_eq!(quotes[0].volume, Some(123456));
        assert_eq!(quotes[1].symbol, "^DJI");
        assert_eq!(quotes[1].volume, None);
    }

    #[test]
    fn empty_payload_yields_no_quotes() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/quotes");
            then.status(200).json_body(json!([]));
        });

        let client = FmpClient::new("k", server.url("/quotes")).unwrap();
        assert!(client.fetch_index_quotes().unwrap().is_empty());
    }
}
