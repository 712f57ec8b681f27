//! Projection output structures

use serde::{Deserialize, Serialize};

/// Projected and baseline values for one year, in display currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year_index: u32,
    pub projected_value: f64,
    pub baseline_value: f64,
}

/// A point labelled for charting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRow {
    pub year_label: String,
    pub projected_value: f64,
    pub baseline_value: f64,
}

/// Label for a year: the calendar year when a start year is known,
/// otherwise "Year N"
///
/// A calendar year that would overflow `i32` falls back to "Year N".
pub fn year_label(year_index: u32, start_year: Option<i32>) -> String {
    let calendar = start_year.and_then(|start| {
        i32::try_from(year_index)
            .ok()
            .and_then(|offset| start.checked_add(offset))
    });
    match calendar {
        Some(year) => year.to_string(),
        None => format!("Year {}", year_index),
    }
}

/// Complete projection result for one calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Currency the values are expressed in
    pub display_currency: String,

    /// Rate applied to reference amounts
    pub rate: f64,

    /// The display currency was missing from the rate table
    pub used_fallback_rate: bool,

    /// Clamped base amount in the reference currency
    pub base_amount_reference: f64,

    /// Base amount converted and rounded for display
    pub current_display_amount: f64,

    /// `current_display_amount` formatted for the amount input field
    pub input_text: String,

    /// Calendar year of year 0, if labels use calendar years
    pub start_year: Option<i32>,

    /// Points for years `0..=timeline`
    pub points: Vec<ProjectionPoint>,
}

impl ProjectionResult {
    /// Points with their year labels, ready for a chart
    pub fn chart_rows(&self) -> Vec<ChartRow> {
        self.points
            .iter()
            .map(|p| ChartRow {
                year_label: year_label(p.year_index, self.start_year),
                projected_value: p.projected_value,
                baseline_value: p.baseline_value,
            })
            .collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let initial_value = self.points.first().map(|p| p.projected_value).unwrap_or(0.0);
        let final_projected = self.points.last().map(|p| p.projected_value).unwrap_or(0.0);
        let final_baseline = self.points.last().map(|p| p.baseline_value).unwrap_or(0.0);

        let growth_multiple = if initial_value > 0.0 {
            final_projected / initial_value
        } else {
            0.0
        };

        ProjectionSummary {
            timeline_years: self.points.len().saturating_sub(1) as u32,
            initial_value,
            final_projected,
            final_baseline,
            total_gain: final_projected - initial_value,
            gain_over_baseline: final_projected - final_baseline,
            growth_multiple,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub timeline_years: u32,
    pub initial_value: f64,
    pub final_projected: f64,
    pub final_baseline: f64,
    pub total_gain: f64,
    pub gain_over_baseline: f64,
    pub growth_multiple: f64,
}
