//! Exchange-rate loading
//!
//! Rates come either from a `code,rate` CSV file or from the JSON snapshot
//! published by the upstream rate provider. Snapshots that are missing,
//! stale or malformed resolve to the default table.

use super::rates::ExchangeRateTable;
use super::REFERENCE_CURRENCY;
use crate::error::{ProjectionError, Result};
use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Default path to the rate table CSV
pub const DEFAULT_RATES_PATH: &str = "data/rates.csv";

/// Snapshots older than this are considered stale
pub const DEFAULT_MAX_RATE_AGE_HOURS: i64 = 24;

/// Maximum snapshot age from a user-supplied number of hours
///
/// Rejects negative values and anything chrono cannot represent.
pub fn max_age_from_hours(hours: i64) -> Result<Duration> {
    if hours < 0 {
        return Err(ProjectionError::InvalidMaxAge(hours));
    }
    Duration::try_hours(hours).ok_or(ProjectionError::InvalidMaxAge(hours))
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    code: String,
    rate: f64,
}

/// Load a USD-based rate table from a CSV file with `code,rate` columns
pub fn load_rates_csv(path: &Path) -> Result<ExchangeRateTable> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        rows.push((row.code, row.rate));
    }

    info!("Loaded {} exchange rates from {}", rows.len(), path.display());
    ExchangeRateTable::new(REFERENCE_CURRENCY, rows)
}

/// Rate payload as published by the upstream provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Currency the rates are quoted against
    pub base: String,

    /// Unix timestamp (seconds) of the quote
    pub timestamp: i64,

    /// Units of each currency per 1 `base`
    pub rates: HashMap<String, f64>,
}

impl RateSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }

    /// Time the quote was taken, if the timestamp is representable
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// Whether the quote is older than `max_age` at `now`
    ///
    /// Unrepresentable timestamps count as stale.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        match self.fetched_at() {
            Some(fetched) => now - fetched > max_age,
            None => true,
        }
    }

    /// Validate into a table quoted against `reference`
    pub fn into_table(self, reference: &str) -> Result<ExchangeRateTable> {
        if !self.base.trim().eq_ignore_ascii_case(reference) {
            return Err(ProjectionError::BaseCurrencyMismatch {
                expected: reference.to_string(),
                found: self.base,
            });
        }
        ExchangeRateTable::new(reference, self.rates)
    }
}

/// Where a resolved rate table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Provider,
    Default,
}

/// Rate table ready to hand to the engine
#[derive(Debug, Clone)]
pub struct ResolvedRates {
    pub table: ExchangeRateTable,
    pub source: RateSource,
}

impl ResolvedRates {
    fn defaults() -> Self {
        Self {
            table: ExchangeRateTable::default_rates(),
            source: RateSource::Default,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == RateSource::Default
    }
}

/// Pick the provider snapshot when it is present, fresh and valid, otherwise
/// the default table
pub fn resolve_rates(
    snapshot: Option<RateSnapshot>,
    now: DateTime<Utc>,
    max_age: Duration,
) -> ResolvedRates {
    let Some(snapshot) = snapshot else {
        warn!("No exchange-rate snapshot available, using default rates");
        return ResolvedRates::defaults();
    };

    if snapshot.is_stale(now, max_age) {
        warn!(
            "Exchange-rate snapshot from {} is older than {}h, using default rates",
            snapshot.timestamp,
            max_age.num_hours()
        );
        return ResolvedRates::defaults();
    }

    match snapshot.into_table(REFERENCE_CURRENCY) {
        Ok(table) => ResolvedRates {
            table,
            source: RateSource::Provider,
        },
        Err(e) => {
            warn!("Rejected exchange-rate snapshot ({}), using default rates", e);
            ResolvedRates::defaults()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn snapshot_at(timestamp: i64) -> RateSnapshot {
        RateSnapshot {
            base: "USD".to_string(),
            timestamp,
            rates: HashMap::from([("EUR".to_string(), 0.92), ("AED".to_string(), 3.67)]),
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_760_000_000, 0).unwrap()
    }

    #[test]
    fn test_max_age_from_hours() {
        assert_eq!(max_age_from_hours(24).unwrap(), Duration::hours(24));
        assert_eq!(max_age_from_hours(0).unwrap(), Duration::zero());
        assert!(matches!(max_age_from_hours(-1), Err(ProjectionError::InvalidMaxAge(-1))));
        assert!(matches!(
            max_age_from_hours(i64::MAX),
            Err(ProjectionError::InvalidMaxAge(i64::MAX))
        ));
    }

    #[test]
    fn test_parse_provider_payload() {
        let json = r#"{"base":"USD","timestamp":1760000000,"rates":{"EUR":0.92,"GBP":0.78}}"#;
        let snapshot = RateSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.rates.len(), 2);
        assert_eq!(snapshot.fetched_at(), Some(now()));
    }

    #[test]
    fn test_fresh_snapshot_is_used() {
        let resolved = resolve_rates(
            Some(snapshot_at(1_760_000_000 - 3_600)),
            now(),
            Duration::hours(DEFAULT_MAX_RATE_AGE_HOURS),
        );
        assert_eq!(resolved.source, RateSource::Provider);
        assert_eq!(resolved.table.get("EUR"), Some(0.92));
        assert_eq!(resolved.table.get("USD"), Some(1.0));
    }

    #[test]
    fn test_stale_snapshot_falls_back() {
        let resolved = resolve_rates(
            Some(snapshot_at(1_760_000_000 - 2 * 86_400)),
            now(),
            Duration::hours(DEFAULT_MAX_RATE_AGE_HOURS),
        );
        assert!(resolved.is_fallback());
        assert_eq!(resolved.table, ExchangeRateTable::default_rates());
    }

    #[test]
    fn test_missing_or_invalid_snapshot_falls_back() {
        let max_age = Duration::hours(DEFAULT_MAX_RATE_AGE_HOURS);
        assert!(resolve_rates(None, now(), max_age).is_fallback());

        let mut wrong_base = snapshot_at(1_760_000_000);
        wrong_base.base = "EUR".to_string();
        assert!(resolve_rates(Some(wrong_base), now(), max_age).is_fallback());

        let mut negative = snapshot_at(1_760_000_000);
        negative.rates.insert("GBP".to_string(), -1.0);
        assert!(resolve_rates(Some(negative), now(), max_age).is_fallback());
    }

    #[test]
    fn test_load_rates_csv() {
        let path = std::env::temp_dir().join(format!("rates_{}.csv", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "code,rate").unwrap();
            writeln!(file, "EUR,0.93").unwrap();
            writeln!(file, "gbp,0.8").unwrap();
        }

        let table = load_rates_csv(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("GBP"), Some(0.8));
        assert_eq!(table.get("USD"), Some(1.0));
    }
}
