//! AWS Lambda handler for the website's investment calculator
//!
//! Accepts the calculator state as JSON and returns the chart rows, the
//! rounded display amount and its input text.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use chrono::{Datelike, Duration, Utc};
use investment_projection::{
    currency::{
        loader::{resolve_rates, RateSnapshot, RateSource, DEFAULT_MAX_RATE_AGE_HOURS},
        DisplayCurrency,
    },
    projection::{
        AmountBounds, AmountEditor, CalculatorConfig, ChartRow, ProjectionEngine,
        ProjectionSummary, DEFAULT_ANNUAL_RETURN_PERCENT, DEFAULT_BASE_AMOUNT,
        DEFAULT_BASELINE_RETURN_PERCENT, DEFAULT_MAX_AMOUNT, DEFAULT_MIN_AMOUNT,
        DEFAULT_TIMELINE_YEARS,
    },
};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::info;
use serde::{Deserialize, Serialize};

/// Calculator state posted by the page
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// Invested amount in USD (default: 500,000)
    #[serde(default = "default_base_amount")]
    pub base_amount_reference: f64,

    /// Amount as typed in the display currency; overrides `base_amount_reference`
    #[serde(default)]
    pub amount_text: Option<String>,

    /// Display currency code (default: USD)
    #[serde(default)]
    pub display_currency_code: DisplayCurrency,

    /// Number of years to project (default: 5)
    #[serde(default = "default_timeline_years")]
    pub timeline_years: u32,

    /// Annual return in percent (default: 18)
    #[serde(default = "default_annual_return")]
    pub annual_return_percent: f64,

    /// Baseline return in percent (default: 5)
    #[serde(default = "default_baseline_return")]
    pub baseline_return_percent: f64,

    #[serde(default = "default_min_amount")]
    pub min_amount: f64,

    #[serde(default = "default_max_amount")]
    pub max_amount: f64,

    /// Rate snapshot fetched by the page from the rate provider
    #[serde(default)]
    pub exchange_rates: Option<RateSnapshot>,

    /// Label rows with calendar years from the current year
    #[serde(default)]
    pub calendar_years: bool,
}

fn default_base_amount() -> f64 { DEFAULT_BASE_AMOUNT }
fn default_timeline_years() -> u32 { DEFAULT_TIMELINE_YEARS }
fn default_annual_return() -> f64 { DEFAULT_ANNUAL_RETURN_PERCENT }
fn default_baseline_return() -> f64 { DEFAULT_BASELINE_RETURN_PERCENT }
fn default_min_amount() -> f64 { DEFAULT_MIN_AMOUNT }
fn default_max_amount() -> f64 { DEFAULT_MAX_AMOUNT }

/// Output returned to the page
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub display_currency_code: String,
    pub rate: f64,
    pub rate_source: RateSource,
    /// Set when the page should show a "using fallback rates" notice
    pub using_fallback_rates: bool,
    pub base_amount_reference: f64,
    pub current_display_amount: f64,
    pub input_text: String,
    pub rows: Vec<ChartRow>,
    pub summary: ProjectionSummary,
    pub execution_time_ms: u64,
}

fn cors_builder(status: u16) -> lambda_http::http::response::Builder {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message }).to_string();
    Ok(cors_builder(status).body(Body::Text(body))?)
}

fn json_response(body: &ProjectionResponse) -> Result<Response<Body>, Error> {
    Ok(cors_builder(200).body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(cors_builder(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ProjectionRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let resolved = resolve_rates(
        request.exchange_rates,
        Utc::now(),
        Duration::hours(DEFAULT_MAX_RATE_AGE_HOURS),
    );
    let engine = ProjectionEngine::with_rates(resolved.table);

    let start_year = request.calendar_years.then(|| Utc::now().year());
    let mut config = CalculatorConfig::default()
        .with_bounds(AmountBounds::new(request.min_amount, request.max_amount))
        .with_display_currency(request.display_currency_code)
        .with_timeline(request.timeline_years)
        .with_annual_return(request.annual_return_percent)
        .with_baseline_return(request.baseline_return_percent)
        .with_start_year(start_year)
        .with_base_amount(request.base_amount_reference);

    if let Some(text) = &request.amount_text {
        let mut editor = AmountEditor::new(&engine, config);
        editor.type_text(text);
        config = editor.config().clone();
    }

    let result = engine.project(&config);

    info!(
        "Projected {} years in {} (rate {}, source {:?})",
        config.timeline_years, result.display_currency, result.rate, resolved.source
    );

    let response = ProjectionResponse {
        rows: result.chart_rows(),
        summary: result.summary(),
        using_fallback_rates: result.used_fallback_rate || resolved.source == RateSource::Default,
        display_currency_code: result.display_currency,
        rate: result.rate,
        rate_source: resolved.source,
        base_amount_reference: result.base_amount_reference,
        current_display_amount: result.current_display_amount,
        input_text: result.input_text,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    json_response(&response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
