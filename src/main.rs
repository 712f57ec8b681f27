//! Investment Projection CLI
//!
//! Command-line interface for running calculator projections

use anyhow::{Context, Result};
use chrono::{Datelike, Local, Utc};
use clap::Parser;
use investment_projection::{
    currency::loader::{self, RateSnapshot, DEFAULT_MAX_RATE_AGE_HOURS},
    export,
    projection::{
        AmountBounds, AmountEditor, CalculatorConfig, DEFAULT_ANNUAL_RETURN_PERCENT, DEFAULT_BASE_AMOUNT,
        DEFAULT_BASELINE_RETURN_PERCENT, DEFAULT_MAX_AMOUNT, DEFAULT_MIN_AMOUNT,
        DEFAULT_TIMELINE_YEARS, MAX_TIMELINE_YEARS,
    },
    DisplayCurrency, ExchangeRateTable, ProjectionResult, ScenarioRunner,
};
use log::warn;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "investment-projection", version, about = "Project investment growth in a display currency")]
struct Args {
    /// Invested amount in USD
    #[arg(long, default_value_t = DEFAULT_BASE_AMOUNT)]
    amount: f64,

    /// Invested amount as typed in the display currency (e.g. "1,250,000")
    #[arg(long, conflicts_with = "amount")]
    amount_text: Option<String>,

    /// Display currency code
    #[arg(long, default_value = "USD")]
    currency: String,

    /// Number of years to project
    #[arg(
        long,
        default_value_t = DEFAULT_TIMELINE_YEARS,
        value_parser = clap::value_parser!(u32).range(0..=MAX_TIMELINE_YEARS as i64)
    )]
    years: u32,

    /// Annual return in percent
    #[arg(long, default_value_t = DEFAULT_ANNUAL_RETURN_PERCENT)]
    rate: f64,

    /// Baseline annual return in percent
    #[arg(long, default_value_t = DEFAULT_BASELINE_RETURN_PERCENT)]
    baseline_rate: f64,

    /// Minimum amount in USD
    #[arg(long, default_value_t = DEFAULT_MIN_AMOUNT)]
    min_amount: f64,

    /// Maximum amount in USD
    #[arg(long, default_value_t = DEFAULT_MAX_AMOUNT)]
    max_amount: f64,

    /// Rate table CSV (code,rate)
    #[arg(long, conflicts_with = "rates_json")]
    rates_csv: Option<PathBuf>,

    /// Provider rate snapshot JSON
    #[arg(long)]
    rates_json: Option<PathBuf>,

    /// Maximum snapshot age in hours before falling back to default rates
    #[arg(long, default_value_t = DEFAULT_MAX_RATE_AGE_HOURS)]
    max_rate_age_hours: i64,

    /// Label rows with calendar years starting from the current year
    #[arg(long)]
    calendar_years: bool,

    /// Also show the projection in every supported currency
    #[arg(long)]
    compare: bool,

    /// Write the projection to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load_rates(args: &Args) -> Result<ExchangeRateTable> {
    if let Some(path) = &args.rates_csv {
        return loader::load_rates_csv(path)
            .with_context(|| format!("Failed to load rates from {}", path.display()));
    }

    let snapshot = match &args.rates_json {
        Some(path) => match RateSnapshot::from_json_path(path) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Could not read rate snapshot {}: {}", path.display(), e);
                None
            }
        },
        None => return Ok(ExchangeRateTable::default_rates()),
    };

    let max_age = loader::max_age_from_hours(args.max_rate_age_hours)
        .context("Invalid --max-rate-age-hours")?;
    let resolved = loader::resolve_rates(snapshot, Utc::now(), max_age);
    if resolved.is_fallback() {
        println!("Note: using default exchange rates");
    }
    Ok(resolved.table)
}

fn print_projection(result: &ProjectionResult) {
    println!("{:>10} {:>18} {:>18}", "Year", "Projected", "Baseline");
    println!("{}", "-".repeat(48));

    for row in result.chart_rows() {
        println!("{:>10} {:>18.2} {:>18.2}", row.year_label, row.projected_value, row.baseline_value);
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    println!("Investment Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("==========================\n");

    let runner = ScenarioRunner::with_rates(load_rates(&args)?);

    let mut config = CalculatorConfig::default()
        .with_bounds(AmountBounds::new(args.min_amount, args.max_amount))
        .with_display_currency(DisplayCurrency::from(args.currency.as_str()))
        .with_timeline(args.years)
        .with_annual_return(args.rate)
        .with_baseline_return(args.baseline_rate)
        .with_base_amount(args.amount);

    if args.calendar_years {
        config = config.with_start_year(Some(Local::now().year()));
    }

    if let Some(text) = &args.amount_text {
        let mut editor = AmountEditor::new(runner.engine(), config);
        editor.type_text(text);
        editor.blur();
        config = editor.config().clone();
    }

    let result = runner.run(&config);

    if result.used_fallback_rate {
        println!(
            "Warning: no exchange rate for {}, amounts shown in {}\n",
            result.display_currency,
            runner.engine().rates().reference()
        );
    }

    println!("Amount:   {:.0} {}", result.base_amount_reference, runner.engine().rates().reference());
    println!("Display:  {} {} (rate {})", result.input_text, result.display_currency, result.rate);
    println!("Return:   {}% vs baseline {}%\n", config.annual_return_percent, config.baseline_return_percent);

    print_projection(&result);

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Final Value: {:.2}", summary.final_projected);
    println!("  Total Gain: {:.2}", summary.total_gain);
    println!("  Gain over Baseline: {:.2}", summary.gain_over_baseline);
    println!("  Growth Multiple: {:.3}x", summary.growth_multiple);

    if args.compare {
        println!("\nFinal value by currency:");
        for other in runner.compare_currencies(&config, &DisplayCurrency::SUPPORTED) {
            let final_value = other.summary().final_projected;
            println!("  {:>4}: {:>18.2}", other.display_currency, final_value);
        }
    }

    if let Some(path) = &args.output {
        export::export_to_path(path, &result)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\nFull results written to: {}", path.display());
    }

    Ok(())
}
