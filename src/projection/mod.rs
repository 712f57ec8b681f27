//! Projection engine for investment growth in a chosen display currency

mod config;
mod engine;
mod input;
mod points;
mod series;

pub use config::{
    clamp, AmountBounds, CalculatorConfig, DEFAULT_ANNUAL_RETURN_PERCENT, DEFAULT_BASE_AMOUNT,
    DEFAULT_BASELINE_RETURN_PERCENT, DEFAULT_MAX_AMOUNT, DEFAULT_MIN_AMOUNT,
    DEFAULT_TIMELINE_YEARS, MAX_TIMELINE_YEARS,
};
pub use engine::ProjectionEngine;
pub use input::{format_input_text, parse_input_text, reformat_input_text, AmountEditor};
pub use points::{year_label, ChartRow, ProjectionPoint, ProjectionResult, ProjectionSummary};
pub use series::ProjectionSeries;
