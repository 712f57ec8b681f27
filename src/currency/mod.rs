//! Currency handling: display currencies, exchange-rate tables and
//! denomination-aware rounding of converted amounts

mod conversion;
mod rates;
mod rounding;
pub mod loader;

pub use conversion::{
    convert_to_display, convert_to_reference, display_amount, is_reference_rate, reference_amount,
};
pub use loader::{RateSnapshot, RateSource, ResolvedRates};
pub use rates::{ExchangeRateTable, RateLookup, REFERENCE_RATE};
pub use rounding::{Denomination, DenominationTable, DEFAULT_DENOMINATIONS};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Code of the currency all amounts are stored and projected in
pub const REFERENCE_CURRENCY: &str = "USD";

/// Currency an end user can pick to view amounts in
///
/// Unrecognised codes are kept as `Other` so they can still be looked up in a
/// rate table supplied by the caller; when the table lacks them the engine
/// falls back to the reference rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DisplayCurrency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Aed,
    Rub,
    Cny,
    Other(String),
}

impl DisplayCurrency {
    /// The fixed set of currencies offered in the calculator
    pub const SUPPORTED: [DisplayCurrency; 6] = [
        DisplayCurrency::Usd,
        DisplayCurrency::Eur,
        DisplayCurrency::Gbp,
        DisplayCurrency::Aed,
        DisplayCurrency::Rub,
        DisplayCurrency::Cny,
    ];

    pub fn code(&self) -> &str {
        match self {
            DisplayCurrency::Usd => "USD",
            DisplayCurrency::Eur => "EUR",
            DisplayCurrency::Gbp => "GBP",
            DisplayCurrency::Aed => "AED",
            DisplayCurrency::Rub => "RUB",
            DisplayCurrency::Cny => "CNY",
            DisplayCurrency::Other(code) => code,
        }
    }

    /// Whether this is the reference currency (no conversion, no rounding)
    pub fn is_reference(&self) -> bool {
        self.code() == REFERENCE_CURRENCY
    }

    /// Whether this currency belongs to the fixed supported set
    pub fn is_supported(&self) -> bool {
        !matches!(self, DisplayCurrency::Other(_))
    }
}

impl From<&str> for DisplayCurrency {
    fn from(code: &str) -> Self {
        let code = code.trim().to_ascii_uppercase();
        match code.as_str() {
            "USD" => DisplayCurrency::Usd,
            "EUR" => DisplayCurrency::Eur,
            "GBP" => DisplayCurrency::Gbp,
            "AED" => DisplayCurrency::Aed,
            "RUB" => DisplayCurrency::Rub,
            "CNY" => DisplayCurrency::Cny,
            _ => DisplayCurrency::Other(code),
        }
    }
}

impl From<String> for DisplayCurrency {
    fn from(code: String) -> Self {
        DisplayCurrency::from(code.as_str())
    }
}

impl From<DisplayCurrency> for String {
    fn from(currency: DisplayCurrency) -> Self {
        currency.code().to_string()
    }
}

impl fmt::Display for DisplayCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
