//! Scenario runner for batch projections
//!
//! Loads a rate table once, then runs many calculator configurations
//! against it.

use crate::currency::{loader, DisplayCurrency, ExchangeRateTable};
use crate::error::Result;
use crate::projection::{CalculatorConfig, ProjectionEngine, ProjectionResult};
use rayon::prelude::*;
use std::path::Path;

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv_path(Path::new("data/rates.csv"))?;
///
/// for rate in [8.0, 12.0, 18.0] {
///     let config = CalculatorConfig::default().with_annual_return(rate);
///     let result = runner.run(&config);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the default rate table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner from a rate table CSV
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self::with_rates(loader::load_rates_csv(path)?))
    }

    /// Create runner with a pre-built rate table
    pub fn with_rates(rates: ExchangeRateTable) -> Self {
        Self {
            engine: ProjectionEngine::with_rates(rates),
        }
    }

    pub fn with_engine(engine: ProjectionEngine) -> Self {
        Self { engine }
    }

    pub fn run(&self, config: &CalculatorConfig) -> ProjectionResult {
        self.engine.project(config)
    }

    /// Run many configurations in parallel, results in input order
    pub fn run_batch(&self, configs: &[CalculatorConfig]) -> Vec<ProjectionResult> {
        configs
            .par_iter()
            .map(|config| self.engine.project(config))
            .collect()
    }

    /// Run one configuration in each of the given display currencies
    pub fn compare_currencies(
        &self,
        config: &CalculatorConfig,
        currencies: &[DisplayCurrency],
    ) -> Vec<ProjectionResult> {
        currencies
            .par_iter()
            .map(|currency| {
                self.engine
                    .project(&config.with_display_currency(currency.clone()))
            })
            .collect()
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }
}
