//! Core projection engine: compound growth in the reference currency,
//! converted to the display currency

use crate::currency::{
    self, DenominationTable, DisplayCurrency, ExchangeRateTable, RateLookup,
};
use super::config::{self, CalculatorConfig};
use super::input::format_input_text;
use super::points::ProjectionResult;
use super::series::ProjectionSeries;
use log::debug;

/// Stateless projection engine over a fixed rate table and rounding policy
///
/// All calculator state lives in [`CalculatorConfig`] and is passed in on
/// every call; the engine only holds read-only inputs.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    rates: ExchangeRateTable,
    denominations: DenominationTable,
}

impl ProjectionEngine {
    pub fn new(rates: ExchangeRateTable, denominations: DenominationTable) -> Self {
        Self { rates, denominations }
    }

    /// Engine with the default denomination brackets
    pub fn with_rates(rates: ExchangeRateTable) -> Self {
        Self::new(rates, DenominationTable::default())
    }

    pub fn rates(&self) -> &ExchangeRateTable {
        &self.rates
    }

    pub fn denominations(&self) -> &DenominationTable {
        &self.denominations
    }

    /// Rate for a display currency; unknown codes resolve to the reference
    /// rate and are flagged
    pub fn rate_for(&self, currency: &DisplayCurrency) -> RateLookup {
        self.rates.rate_for(currency)
    }

    /// Reference amount to display currency with denomination rounding
    pub fn convert_to_display(&self, amount_ref: f64, rate: f64) -> f64 {
        currency::convert_to_display(amount_ref, rate, &self.denominations)
    }

    /// Display amount back to the reference currency (lossy)
    pub fn convert_to_reference(&self, amount_display: f64, rate: f64) -> f64 {
        currency::convert_to_reference(amount_display, rate)
    }

    pub fn clamp(amount_ref: f64, min: f64, max: f64) -> f64 {
        config::clamp(amount_ref, min, max)
    }

    /// Lazy series of points for years `0..=timeline_years`
    pub fn build_projection(
        &self,
        base_ref: f64,
        timeline_years: u32,
        annual_rate_percent: f64,
        baseline_rate_percent: f64,
        rate: f64,
    ) -> ProjectionSeries<'_> {
        self.build_projection_for(
            base_ref,
            timeline_years,
            annual_rate_percent,
            baseline_rate_percent,
            RateLookup::from_rate(rate),
        )
    }

    /// Same as [`build_projection`](Self::build_projection) for a rate
    /// resolved from the table, so a currency pegged at 1.0 is still rounded
    pub fn build_projection_for(
        &self,
        base_ref: f64,
        timeline_years: u32,
        annual_rate_percent: f64,
        baseline_rate_percent: f64,
        lookup: RateLookup,
    ) -> ProjectionSeries<'_> {
        ProjectionSeries::new(
            &self.denominations,
            base_ref,
            timeline_years,
            annual_rate_percent,
            baseline_rate_percent,
            lookup,
        )
    }

    /// Display amount for a resolved lookup
    pub fn display_amount(&self, amount_ref: f64, lookup: RateLookup) -> f64 {
        currency::display_amount(amount_ref, lookup, &self.denominations)
    }

    /// Derive the full calculator output for a configuration
    pub fn project(&self, config: &CalculatorConfig) -> ProjectionResult {
        let lookup = self.rate_for(&config.display_currency);
        let base_ref = config.clamped_base_amount();
        let timeline_years = config.clamped_timeline();

        debug!(
            "Projecting {} {} over {} years at {}% (baseline {}%) in {} (rate {})",
            base_ref,
            self.rates.reference(),
            timeline_years,
            config.annual_return_percent,
            config.baseline_return_percent,
            config.display_currency,
            lookup.rate
        );

        let points = self
            .build_projection_for(
                base_ref,
                timeline_years,
                config.annual_return_percent,
                config.baseline_return_percent,
                lookup,
            )
            .collect();

        let current_display_amount = self.display_amount(base_ref, lookup);

        ProjectionResult {
            display_currency: config.display_currency.code().to_string(),
            rate: lookup.rate,
            used_fallback_rate: lookup.fallback,
            base_amount_reference: base_ref,
            current_display_amount,
            input_text: format_input_text(current_display_amount),
            start_year: config.start_year,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::config::{
        AmountBounds, DEFAULT_MAX_AMOUNT, DEFAULT_MIN_AMOUNT, MAX_TIMELINE_YEARS,
    };
    use approx::assert_relative_eq;

    fn usd_config() -> CalculatorConfig {
        CalculatorConfig {
            base_amount_reference: 500_000.0,
            timeline_years: 5,
            annual_return_percent: 18.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_usd_projection_is_unrounded_compound_growth() {
        let engine = ProjectionEngine::default();
        let result = engine.project(&usd_config());

        assert_eq!(result.points.len(), 6);
        assert_eq!(result.points[0].projected_value, 500_000.0);
        assert_relative_eq!(result.points[1].projected_value, 590_000.0, max_relative = 1e-12);
        assert_relative_eq!(
            result.points[5].projected_value,
            500_000.0 * 1.18_f64.powi(5),
            max_relative = 1e-12
        );
        assert!((result.points[5].projected_value - 1_143_930.0).abs() < 100.0);
        assert!(!result.used_fallback_rate);
        assert_eq!(result.input_text, "500,000");
    }

    #[test]
    fn test_eur_projection_is_denomination_rounded() {
        let engine = ProjectionEngine::default();
        let result = engine.project(&usd_config().with_display_currency(DisplayCurrency::Eur));

        assert_eq!(result.rate, 0.95);
        // raw 475,000 sits in the 10,000 bracket; the halfway point rounds up
        assert_eq!(engine.denominations().step_for(500_000.0 * 0.95), 10_000.0);
        assert_eq!(result.points[0].projected_value, 480_000.0);
        assert_eq!(result.current_display_amount, 480_000.0);
        // 590,000 * 0.95 = 560,500
        assert_eq!(result.points[1].projected_value, 560_000.0);
        for point in &result.points {
            let step = engine.denominations().step_for(point.projected_value);
            assert_eq!(point.projected_value % step, 0.0);
        }
    }

    #[test]
    fn test_unknown_currency_uses_identity() {
        let engine = ProjectionEngine::default();
        let config = usd_config().with_display_currency(DisplayCurrency::from("XXX"));
        let result = engine.project(&config);

        assert!(result.used_fallback_rate);
        assert_eq!(result.rate, 1.0);
        assert_eq!(result.display_currency, "XXX");
        assert_eq!(engine.convert_to_display(123_456.0, result.rate), 123_456.0);
        assert_eq!(result.points, engine.project(&usd_config()).points);
    }

    #[test]
    fn test_zero_timeline_yields_single_point() {
        let engine = ProjectionEngine::default();
        let points: Vec<_> = engine.build_projection(500_000.0, 0, 18.0, 5.0, 0.79).collect();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].year_index, 0);
        assert_eq!(points[0].projected_value, engine.convert_to_display(500_000.0, 0.79));
        assert_eq!(points[0].baseline_value, points[0].projected_value);
    }

    #[test]
    fn test_higher_return_strictly_increases_projection() {
        let engine = ProjectionEngine::default();
        for years in [1, 5, 20] {
            let low: Vec<_> = engine.build_projection(250_000.0, years, 8.0, 5.0, 1.0).collect();
            let high: Vec<_> = engine.build_projection(250_000.0, years, 8.5, 5.0, 1.0).collect();
            assert_eq!(low[0].projected_value, high[0].projected_value);
            for (l, h) in low.iter().zip(&high).skip(1) {
                assert!(h.projected_value > l.projected_value, "year {}", l.year_index);
            }
        }
    }

    #[test]
    fn test_projection_is_idempotent() {
        let engine = ProjectionEngine::default();
        let config = usd_config()
            .with_display_currency(DisplayCurrency::Rub)
            .with_timeline(30);

        let first = engine.project(&config);
        let second = engine.project(&config);
        assert_eq!(first, second);
        for (a, b) in first.points.iter().zip(&second.points) {
            assert_eq!(a.projected_value.to_bits(), b.projected_value.to_bits());
            assert_eq!(a.baseline_value.to_bits(), b.baseline_value.to_bits());
        }
    }

    #[test]
    fn test_bounds_produce_valid_series() {
        let engine = ProjectionEngine::default();
        for amount in [DEFAULT_MIN_AMOUNT, DEFAULT_MAX_AMOUNT, 1.0, 1e15] {
            let config = CalculatorConfig {
                base_amount_reference: amount,
                ..usd_config()
            };
            let result = engine.project(&config);
            assert!(AmountBounds::default().contains(result.base_amount_reference));
            assert!(result
                .points
                .iter()
                .all(|p| p.projected_value >= 0.0 && p.baseline_value >= 0.0));
        }
    }

    #[test]
    fn test_baseline_uses_its_own_rate() {
        let engine = ProjectionEngine::default();
        let result = engine.project(&usd_config().with_baseline_return(5.0));
        assert_relative_eq!(result.points[2].baseline_value, 500_000.0 * 1.05 * 1.05, max_relative = 1e-12);
        assert!(result.summary().gain_over_baseline > 0.0);
    }

    #[test]
    fn test_engine_clamp() {
        assert_eq!(ProjectionEngine::clamp(99_999.0, DEFAULT_MIN_AMOUNT, DEFAULT_MAX_AMOUNT), DEFAULT_MIN_AMOUNT);
        assert_eq!(ProjectionEngine::clamp(2e8, DEFAULT_MIN_AMOUNT, DEFAULT_MAX_AMOUNT), DEFAULT_MAX_AMOUNT);
    }

    #[test]
    fn test_higher_return_never_lowers_rounded_projection() {
        let engine = ProjectionEngine::default();
        for rate in [0.79, 0.95, 3.6725, 7.25, 92.5] {
            for years in [1, 5, 20] {
                let low: Vec<_> = engine.build_projection(100_000.0, years, 8.0, 5.0, rate).collect();
                let high: Vec<_> = engine.build_projection(100_000.0, years, 8.1, 5.0, rate).collect();
                for (l, h) in low.iter().zip(&high) {
                    assert!(h.projected_value >= l.projected_value, "rate {} year {}", rate, l.year_index);
                }
            }
        }

        // Rounding can swallow a small difference in the rate
        let low = engine.build_projection(100_000.0, 1, 8.0, 5.0, 0.95).nth(1);
        let high = engine.build_projection(100_000.0, 1, 8.1, 5.0, 0.95).nth(1);
        assert_eq!(low.map(|p| p.projected_value), Some(100_000.0));
        assert_eq!(high.map(|p| p.projected_value), Some(100_000.0));
    }

    #[test]
    fn test_pegged_currency_is_rounded() {
        let rates = ExchangeRateTable::new("USD", [("PAB", 1.0), ("EUR", 0.95)]).unwrap();
        let engine = ProjectionEngine::with_rates(rates);
        let config = CalculatorConfig {
            base_amount_reference: 123_456.0,
            ..usd_config()
        }
        .with_display_currency(DisplayCurrency::from("PAB"));

        let result = engine.project(&config);
        assert!(!result.used_fallback_rate);
        assert_eq!(result.rate, 1.0);
        assert_eq!(result.current_display_amount, 120_000.0);
        assert_eq!(result.points[0].projected_value, 120_000.0);
        assert_eq!(result.input_text, "120,000");

        let usd = engine.project(&CalculatorConfig {
            base_amount_reference: 123_456.0,
            ..usd_config()
        });
        assert_eq!(usd.current_display_amount, 123_456.0);
    }

    #[test]
    fn test_timeline_is_capped() {
        let engine = ProjectionEngine::default();
        let series = engine.build_projection(500_000.0, u32::MAX, 18.0, 5.0, 1.0);
        assert_eq!(series.len(), MAX_TIMELINE_YEARS as usize + 1);

        let config = CalculatorConfig {
            timeline_years: u32::MAX,
            ..usd_config()
        };
        let result = engine.project(&config);
        assert_eq!(result.points.len(), MAX_TIMELINE_YEARS as usize + 1);
        assert!(result.points.iter().all(|p| p.projected_value >= 500_000.0));
    }
}
