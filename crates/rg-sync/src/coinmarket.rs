//! CoinMarketCap Bitcoin quote client.
//!
//! One GET against the configured quotes endpoint with the API key in
//! the `X-CMC_PRO_API_KEY` header. The interesting numbers live deep in
//! the payload at `data.1.quote.USD` (CoinMarketCap id 1 is Bitcoin).

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use rg_core::{BitcoinSnapshot, Config};

use crate::error::{SyncError, SyncResult};

/// CoinMarketCap's id for Bitcoin.
const BITCOIN_ID: &str = "1";
/// Request timeout for quote fetches.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the CoinMarketCap quotes endpoint.
pub struct CoinMarketClient {
    http: reqwest::blocking::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Deserialize)]
struct QuotesResponse {
    #[serde(default)]
    data: HashMap<String, CoinEntry>,
}

#[derive(Deserialize)]
struct CoinEntry {
    #[serde(default)]
    quote: HashMap<String, CurrencyQuote>,
}

#[derive(Deserialize)]
struct CurrencyQuote {
    price: Option<f64>,
    percent_change_1h: Option<f64>,
    percent_change_24h: Option<f64>,
    last_updated: Option<DateTime<Utc>>,
}

impl CoinMarketClient {
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
        let creds = config.require_coinmarket()?;
        Self::new(creds.key.clone(), creds.endpoint.clone())
    }

    /// Fetch the current Bitcoin quote.
    pub fn fetch_bitcoin(&self) -> SyncResult<BitcoinSnapshot> {
        let response: QuotesResponse = self
            .http
            .get(&self.endpoint)
            .query(&[("slug", "bitcoin"), ("convert", "USD")])
            .header("X-CMC_PRO_API_KEY", &self.api_key)
            .header("Accept", "application/json")
            .send()?
            .error_for_status()?
            .json()?;

        let quote = response
            .data
            .get(BITCOIN_ID)
            .and_then(|coin| coin.quote.get("USD"))
            .ok_or_else(|| SyncError::Malformed {
                api: "coinmarketcap",
                detail: "no USD quote for Bitcoin in payload".to_string(),
            })?;

        let price_usd = quote.price.ok_or_else(|| SyncError::Malformed {
            api: "coinmarketcap",
            detail: "quote has no price".to_string(),
        })?;

        Ok(BitcoinSnapshot {
            price_usd,
            percent_change_1h: quote.percent_change_1h,
            percent_change_24h: quote.percent_change_24h,
            last_updated: quote.last_updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_nested_quote_payload() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v2/cryptocurrency/quotes/latest")
                .query_param("slug", "bitcoin")
                .query_param("convert", "USD")
                .header("X-CMC_PRO_API_KEY", "test-key");
            then.status(200).json_body(json!({
                "data": {
                    "1": {
                        "quote": {
                            "USD": {
                                "price": 64250.12,
                                "percent_change_1h": -1.2,
                                "percent_change_24h": 3.4,
                                "last_updated": "2025-03-01T12:00:00.000Z"
                            }
                        }
                    }
                }
            }));
        });

        let client = CoinMarketClient::new(
            "test-key",
            server.url("/v2/cryptocurrency/quotes/latest"),
        )
        .unwrap();
        let snap = client.fetch_bitcoin().unwrap();
        mock.assert();

        assert_eq!(snap.price_usd, 64250.12);
        assert_eq!(snap.percent_change_1h, Some(-1.2));
        assert_eq!(snap.percent_change_24h, Some(3.4));
        assert!(snap.last_updated.is_some());
    }

    #[test]
    fn missing_quote_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/quotes");
            then.status(200).json_body(json!({ "data": {} }));
        });

        let client = CoinMarketClient::new("k", server.url("/quotes")).unwrap();
        let err = client.fetch_bitcoin().unwrap_err();
        assert!(matches!(err, SyncError::Malformed { api: "coinmarketcap", .. }));
    }

    #[test]
    fn http_error_status_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/quotes");
            then.status(401);
        });

        let client = CoinMarketClient::new("bad", server.url("/quotes")).unwrap();
        assert!(matches!(client.fetch_bitcoin().unwrap_err(), SyncError::Http(_)));
    }
}
