//! Conversion between the reference currency and a display currency

use super::rates::{RateLookup, REFERENCE_RATE};
use super::rounding::DenominationTable;

/// Whether a bare `rate` should be treated as the reference currency
///
/// Only used where no currency identity is available; a pegged currency
/// quoted at exactly 1.0 is indistinguishable here, which is why resolved
/// projections go through [`display_amount`] instead. Rates that are not
/// usable multipliers (zero, negative, NaN) also degrade to the identity.
pub fn is_reference_rate(rate: f64) -> bool {
    rate == REFERENCE_RATE || !(rate.is_finite() && rate > 0.0)
}

/// Convert a reference amount into the display currency
///
/// The reference rate returns the amount untouched; any other rate applies the
/// denomination rounding of `denominations`.
pub fn convert_to_display(amount_ref: f64, rate: f64, denominations: &DenominationTable) -> f64 {
    if is_reference_rate(rate) {
        return amount_ref;
    }
    denominations.round(amount_ref * rate)
}

/// Convert a display amount back into the reference currency
///
/// Rounded to whole reference units, without denomination rounding. Not an
/// exact inverse of [`convert_to_display`].
pub fn convert_to_reference(amount_display: f64, rate: f64) -> f64 {
    if is_reference_rate(rate) {
        return amount_display;
    }
    (amount_display / rate).round()
}

/// Convert a reference amount using a resolved rate lookup
///
/// Only the reference currency (or a fallback to it) passes through; every
/// other currency is rounded, even when quoted at exactly 1.0.
pub fn display_amount(amount_ref: f64, lookup: RateLookup, denominations: &DenominationTable) -> f64 {
    if lookup.passthrough {
        return amount_ref;
    }
    denominations.round(amount_ref * lookup.rate)
}

/// Convert a display amount back using a resolved rate lookup
pub fn reference_amount(amount_display: f64, lookup: RateLookup) -> f64 {
    if lookup.passthrough {
        return amount_display;
    }
    (amount_display / lookup.rate).round()
}
