//! Denomination brackets for rounding converted amounts
//!
//! A converted amount is rounded to the step of the highest bracket whose
//! lower bound it reaches, so displayed figures look like quoted prices
//! instead of raw FX arithmetic.

use crate::error::{ProjectionError, Result};
use serde::{Deserialize, Serialize};

/// Default `(lower_bound, step)` brackets, ascending by lower bound
pub const DEFAULT_DENOMINATIONS: [(f64, f64); 4] = [
    (0.0, 100.0),
    (10_000.0, 1_000.0),
    (100_000.0, 10_000.0),
    (1_000_000.0, 100_000.0),
];

/// One rounding bracket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Denomination {
    /// Smallest raw amount (inclusive) this bracket applies to
    pub lower_bound: f64,

    /// Rounding granularity inside the bracket
    pub step: f64,
}

/// Ordered table of rounding brackets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenominationTable {
    brackets: Vec<Denomination>,
}

impl DenominationTable {
    /// Build a table from brackets sorted by ascending lower bound
    ///
    /// The first bracket must start at zero so every non-negative amount is
    /// covered, bounds must strictly increase and steps must be positive.
    pub fn new(brackets: Vec<Denomination>) -> Result<Self> {
        let first = brackets
            .first()
            .ok_or_else(|| ProjectionError::InvalidDenominations("no brackets".to_string()))?;

        if first.lower_bound != 0.0 {
            return Err(ProjectionError::InvalidDenominations(format!(
                "first bracket starts at {}, expected 0",
                first.lower_bound
            )));
        }

        for bracket in &brackets {
            if !(bracket.step.is_finite() && bracket.step > 0.0) {
                return Err(ProjectionError::InvalidDenominations(format!(
                    "step {} at bound {} is not positive",
                    bracket.step, bracket.lower_bound
                )));
            }
        }

        for pair in brackets.windows(2) {
            if pair[1].lower_bound <= pair[0].lower_bound {
                return Err(ProjectionError::InvalidDenominations(format!(
                    "bound {} does not follow {}",
                    pair[1].lower_bound, pair[0].lower_bound
                )));
            }
        }

        Ok(Self { brackets })
    }

    /// Build a table from `(lower_bound, step)` pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(lower_bound, step)| Denomination { lower_bound, step })
                .collect(),
        )
    }

    pub fn brackets(&self) -> &[Denomination] {
        &self.brackets
    }

    /// Rounding step for a raw converted amount
    pub fn step_for(&self, raw: f64) -> f64 {
        self.brackets
            .iter()
            .rev()
            .find(|b| raw >= b.lower_bound)
            .unwrap_or(&self.brackets[0])
            .step
    }

    /// Round a raw amount to the nearest multiple of its bracket step
    pub fn round(&self, raw: f64) -> f64 {
        let raw = raw.max(0.0);
        let step = self.step_for(raw);
        (raw / step).round() * step
    }
}

impl Default for DenominationTable {
    fn default() -> Self {
        Self {
            brackets: DEFAULT_DENOMINATIONS
                .iter()
                .map(|&(lower_bound, step)| Denomination { lower_bound, step })
                .collect(),
        }
    }
}
