//! Calculator configuration
//!
//! The configuration is an immutable value; each user edit produces a new
//! config through the `with_*` builders and the projection is re-derived from
//! scratch.

use crate::currency::DisplayCurrency;
use serde::{Deserialize, Serialize};

/// Smallest investable amount in reference units
pub const DEFAULT_MIN_AMOUNT: f64 = 100_000.0;

/// Largest investable amount in reference units
pub const DEFAULT_MAX_AMOUNT: f64 = 100_000_000.0;

/// Amount the calculator opens with
pub const DEFAULT_BASE_AMOUNT: f64 = 500_000.0;

pub const DEFAULT_TIMELINE_YEARS: u32 = 5;

/// Longest timeline a projection will produce
pub const MAX_TIMELINE_YEARS: u32 = 100;

/// Expected annual return of the advertised investment (percent)
pub const DEFAULT_ANNUAL_RETURN_PERCENT: f64 = 18.0;

/// Conservative comparison return, e.g. a bank deposit (percent)
pub const DEFAULT_BASELINE_RETURN_PERCENT: f64 = 5.0;

/// Inclusive bounds for the reference amount
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountBounds {
    pub min: f64,
    pub max: f64,
}

impl AmountBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, amount_ref: f64) -> f64 {
        clamp(amount_ref, self.min, self.max)
    }

    pub fn contains(&self, amount_ref: f64) -> bool {
        amount_ref >= self.min && amount_ref <= self.max
    }
}

impl Default for AmountBounds {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_AMOUNT, DEFAULT_MAX_AMOUNT)
    }
}

/// Clamp an amount into `[min, max]`
///
/// Never panics: NaN clamps to `min`, and inverted bounds resolve to `max`.
pub fn clamp(amount_ref: f64, min: f64, max: f64) -> f64 {
    amount_ref.max(min).min(max)
}

/// Everything the calculator needs to derive a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Invested amount in the reference currency
    pub base_amount_reference: f64,

    /// Number of years to project
    pub timeline_years: u32,

    /// Annual return of the investment (percent)
    pub annual_return_percent: f64,

    /// Annual return of the comparison series (percent)
    pub baseline_return_percent: f64,

    /// Currency amounts are shown in
    pub display_currency: DisplayCurrency,

    /// Bounds the base amount is clamped to
    pub bounds: AmountBounds,

    /// Calendar year of year 0; labels read "Year N" when unset
    pub start_year: Option<i32>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            base_amount_reference: DEFAULT_BASE_AMOUNT,
            timeline_years: DEFAULT_TIMELINE_YEARS,
            annual_return_percent: DEFAULT_ANNUAL_RETURN_PERCENT,
            baseline_return_percent: DEFAULT_BASELINE_RETURN_PERCENT,
            display_currency: DisplayCurrency::Usd,
            bounds: AmountBounds::default(),
            start_year: None,
        }
    }
}

impl CalculatorConfig {
    /// New config with the base amount set and clamped to the bounds
    pub fn with_base_amount(&self, amount_ref: f64) -> Self {
        Self {
            base_amount_reference: self.bounds.clamp(amount_ref),
            ..self.clone()
        }
    }

    /// New config with the timeline capped at [`MAX_TIMELINE_YEARS`]
    pub fn with_timeline(&self, timeline_years: u32) -> Self {
        Self {
            timeline_years: timeline_years.min(MAX_TIMELINE_YEARS),
            ..self.clone()
        }
    }

    pub fn with_annual_return(&self, annual_return_percent: f64) -> Self {
        Self {
            annual_return_percent,
            ..self.clone()
        }
    }

    pub fn with_baseline_return(&self, baseline_return_percent: f64) -> Self {
        Self {
            baseline_return_percent,
            ..self.clone()
        }
    }

    /// New config shown in another currency; the reference amount is untouched
    pub fn with_display_currency(&self, display_currency: DisplayCurrency) -> Self {
        Self {
            display_currency,
            ..self.clone()
        }
    }

    /// New config with different bounds, re-clamping the base amount
    pub fn with_bounds(&self, bounds: AmountBounds) -> Self {
        Self {
            base_amount_reference: bounds.clamp(self.base_amount_reference),
            bounds,
            ..self.clone()
        }
    }

    pub fn with_start_year(&self, start_year: Option<i32>) -> Self {
        Self {
            start_year,
            ..self.clone()
        }
    }

    /// Base amount after clamping, whatever the field currently holds
    pub fn clamped_base_amount(&self) -> f64 {
        self.bounds.clamp(self.base_amount_reference)
    }

    /// Timeline after capping, whatever the field currently holds
    pub fn clamped_timeline(&self) -> u32 {
        self.timeline_years.min(MAX_TIMELINE_YEARS)
    }
}
