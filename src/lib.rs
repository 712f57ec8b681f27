//! Investment Projection - growth projections for the investment calculator
//!
//! This library provides:
//! - Year-by-year compound growth projections with a baseline comparison series
//! - Conversion from the reference currency into display currencies with
//!   denomination-aware rounding, and back
//! - Exchange-rate tables from CSV files or provider snapshots, with defaults
//! - Amount input formatting/parsing and slider synchronisation
//! - CSV export and batch scenario runs

pub mod error;
pub mod currency;
pub mod projection;
pub mod export;
pub mod scenario;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use currency::{DisplayCurrency, ExchangeRateTable, DenominationTable};
pub use projection::{CalculatorConfig, ProjectionEngine, ProjectionResult, ProjectionPoint};
pub use scenario::ScenarioRunner;
