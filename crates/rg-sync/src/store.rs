//! SQLite persistence for polled snapshots.
//!
//! Three append-only fact tables (one row per poll per source) plus a
//! sync log whose newest row marks the last successful sync. There are
//! no updates and no cross-table invariants; readers only ever want the
//! most recent row(s).

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use rg_core::{BitcoinSnapshot, IndexQuote, WeatherSnapshot};

use crate::error::SyncResult;

/// Schema, applied idempotently on open.
const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS bitcoin_snapshots (
    id INTEGER PRIMARY KEY,
    price_usd REAL NOT NULL,
    percent_change_1h REAL,
    percent_change_24h REAL,
    last_updated TEXT,
    recorded_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS index_quotes (
    id INTEGER PRIMARY KEY,
    symbol TEXT NOT NULL,
    price REAL NOT NULL,
    change REAL NOT NULL,
    volume INTEGER,
    recorded_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS weather_snapshots (
    id INTEGER PRIMARY KEY,
    location_name TEXT,
    region TEXT,
    country TEXT,
    latitude REAL,
    longitude REAL,
    temperature_c REAL,
    feels_like_c REAL,
    wind_kph REAL,
    wind_dir TEXT,
    humidity REAL,
    uv_index REAL,
    last_updated TEXT,
    recorded_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sync_log (
    id INTEGER PRIMARY KEY,
    timestamp TEXT NOT NULL
);
";

/// Handle to the reality database.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (creating if necessary) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> SyncResult<Self> {
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (tests).
    pub fn open_in_memory() -> SyncResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Append one Bitcoin snapshot row.
    pub fn insert_bitcoin(&self, snapshot: &BitcoinSnapshot) -> SyncResult<()> {
        self.conn.execute(
            "INSERT INTO bitcoin_snapshots
                (price_usd, percent_change_1h, percent_change_24h, last_updated, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                snapshot.price_usd,
                snapshot.percent_change_1h,
                snapshot.percent_change_24h,
                snapshot.last_updated,
                Utc::now(),
            ],
        )?;
        Ok(())
    }

    /// Append one row per index quote.
    pub fn insert_index_quotes(&self, quotes: &[IndexQuote]) -> SyncResult<()> {
        let now = Utc::now();
        let mut stmt = self.conn.prepare(
            "INSERT INTO index_quotes (symbol, price, change, volume, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for quote in quotes {
            stmt.execute(params![
                quote.symbol,
                quote.price,
                quote.change,
                quote.volume,
                now,
            ])?;
        }
        Ok(())
    }

    /// Append one weather snapshot row.
    pub fn insert_weather(&self, snapshot: &WeatherSnapshot) -> SyncResult<()> {
        self.conn.execute(
            "INSERT INTO weather_snapshots
                (location_name, region, country, latitude, longitude,
                 temperature_c, feels_like_c, wind_kph, wind_dir, humidity,
                 uv_index, last_updated, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                snapshot.location_name,
                snapshot.region,
                snapshot.country,
                snapshot.latitude,
                snapshot.longitude,
                snapshot.temperature_c,
                snapshot.feels_like_c,
                snapshot.wind_kph,
                snapshot.wind_dir,
                snapshot.humidity,
                snapshot.uv_index,
                snapshot.last_updated,
                Utc::now(),
            ],
        )?;
        Ok(())
    }

    /// Record a completed sync.
    pub fn record_sync(&self) -> SyncResult<()> {
        self.conn.execute(
            "INSERT INTO sync_log (timestamp) VALUES (?1)",
            params![Utc::now()],
        )?;
        Ok(())
    }

    /// The most recent Bitcoin snapshot, if any.
    pub fn latest_bitcoin(&self) -> SyncResult<Option<BitcoinSnapshot>> {
        let row = self
            .conn
            .query_row(
                "SELECT price_usd, percent_change_1h, percent_change_24h, last_updated
                 FROM bitcoin_snapshots ORDER BY id DESC LIMIT 1",
                [],
                |row| {
                    Ok(BitcoinSnapshot {
                        price_usd: row.get(0)?,
                        percent_change_1h: row.get(1)?,
                        percent_change_24h: row.get(2)?,
                        last_updated: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// The most recent quote per tracked symbol, ordered by symbol.
    pub fn latest_index_quotes(&self) -> SyncResult<Vec<IndexQuote>> {
        let mut stmt = self.conn.prepare(
            "SELECT symbol, price, change, volume FROM index_quotes iq
             WHERE id = (SELECT MAX(id) FROM index_quotes WHERE symbol = iq.symbol)
             ORDER BY symbol",
        )?;
        let quotes = stmt
            .query_map([], |row| {
                Ok(IndexQuote {
                    symbol: row.get(0)?,
                    price: row.get(1)?,
                    change: row.get(2)?,
                    volume: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(quotes)
    }

    /// The most recent weather snapshot, if any.
    pub fn latest_weather(&self) -> SyncResult<Option<WeatherSnapshot>> {
        let row = self
            .conn
            .query_row(
                "SELECT location_name, region, country, latitude, longitude,
                        temperature_c, feels_like_c, wind_kph, wind_dir, humidity,
                        uv_index, last_updated
                 FROM weather_snapshots ORDER BY id DESC LIMIT 1",
                [],
                |row| {
                    Ok(WeatherSnapshot {
                        location_name: row.get(0)?,
                        region: row.get(1)?,
                        country: row.get(2)?,
                        latitude: row.get(3)?,
                        longitude: row.get(4)?,
                        temperature_c: row.get(5)?,
                        feels_like_c: row.get(6)?,
                        wind_kph: row.get(7)?,
                        wind_dir: row.get(8)?,
                        humidity: row.get(9)?,
                        uv_index: row.get(10)?,
                        last_updated: row.get(11)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    /// Timestamp of the last completed sync, if any.
    pub fn last_sync_time(&self) -> SyncResult<Option<DateTime<Utc>>> {
        let ts = self
            .conn
            .query_row(
                "SELECT timestamp FROM sync_log ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(ts)
    }

    /// Whether every fact table is empty (first-run detection).
    pub fn is_empty(&self) -> SyncResult<bool> {
        for table in ["bitcoin_snapshots", "index_quotes", "weather_snapshots"] {
            let count: i64 =
                self.conn
                    .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                        row.get(0)
                    })?;
            if count > 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether the last sync is absent or older than `max_age`.
    pub fn is_stale(&self, max_age: std::time::Duration) -> SyncResult<bool> {
        match self.last_sync_time()? {
            None => Ok(true),
            Some(last) => {
                let age = Utc::now().signed_duration_since(last);
                Ok(age.num_seconds() < 0 || age.num_seconds() as u64 >= max_age.as_secs())
            }
        }
    }
}
