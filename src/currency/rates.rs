//! Exchange-rate table keyed by currency code

use super::conversion::is_reference_rate;
use super::{DisplayCurrency, REFERENCE_CURRENCY};
use crate::error::{ProjectionError, Result};
use log::warn;
use serde::Serialize;
use std::collections::HashMap;

/// Rate of the reference currency against itself
pub const REFERENCE_RATE: f64 = 1.0;

/// Default rates used when no fresh provider snapshot is available
/// (units of currency per 1 USD)
const DEFAULT_RATES: [(&str, f64); 6] = [
    ("USD", 1.0),
    ("EUR", 0.95),
    ("GBP", 0.79),
    ("AED", 3.6725),
    ("RUB", 92.5),
    ("CNY", 7.25),
];

/// Mapping from currency code to "units per 1 reference unit"
///
/// Every rate is positive and finite, and the reference currency always maps
/// to exactly [`REFERENCE_RATE`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRateTable {
    reference: String,
    rates: HashMap<String, f64>,
}

/// Outcome of looking a currency up in a table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateLookup {
    pub rate: f64,

    /// True when the code was missing and the reference rate was substituted
    pub fallback: bool,

    /// Amounts pass through unconverted and unrounded: the currency is the
    /// reference currency itself, or the lookup fell back to it
    pub passthrough: bool,
}

impl RateLookup {
    /// Lookup for a bare rate, where only the reference rate passes through
    pub fn from_rate(rate: f64) -> Self {
        Self {
            rate,
            fallback: false,
            passthrough: is_reference_rate(rate),
        }
    }
}

impl ExchangeRateTable {
    /// Build and validate a table
    ///
    /// Codes are normalised to upper case. The reference currency is added
    /// when missing and rejected when present with any rate other than 1.
    pub fn new<I, S>(reference: &str, rates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let reference = reference.trim().to_ascii_uppercase();
        let mut table = HashMap::new();

        for (code, rate) in rates {
            let code = code.as_ref().trim().to_ascii_uppercase();
            if !(rate.is_finite() && rate > 0.0) {
                return Err(ProjectionError::InvalidRate { code, rate });
            }
            if code == reference && rate != REFERENCE_RATE {
                return Err(ProjectionError::ReferenceRateMismatch { code, rate });
            }
            table.insert(code, rate);
        }

        table.insert(reference.clone(), REFERENCE_RATE);

        Ok(Self { reference, rates: table })
    }

    /// The documented default table, denominated in USD
    pub fn default_rates() -> Self {
        Self {
            reference: REFERENCE_CURRENCY.to_string(),
            rates: DEFAULT_RATES
                .iter()
                .map(|&(code, rate)| (code.to_string(), rate))
                .collect(),
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Rate for a code, if the table has it
    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.trim().to_ascii_uppercase()).copied()
    }

    /// Rate for a display currency, substituting the reference rate for
    /// unknown codes
    ///
    /// A substitution is logged and flagged in the returned lookup so the
    /// caller can tell the user fallback rates are in use.
    pub fn rate_for(&self, currency: &DisplayCurrency) -> RateLookup {
        match self.get(currency.code()) {
            Some(rate) => RateLookup {
                rate,
                fallback: false,
                passthrough: currency.code() == self.reference,
            },
            None => {
                warn!(
                    "No exchange rate for {}, using {} (rate {})",
                    currency, self.reference, REFERENCE_RATE
                );
                RateLookup {
                    rate: REFERENCE_RATE,
                    fallback: true,
                    passthrough: true,
                }
            }
        }
    }

    /// Currency codes in the table, sorted
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for ExchangeRateTable {
    fn default() -> Self {
        Self::default_rates()
    }
}
