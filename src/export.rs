//! CSV export of projection results

use crate::error::Result;
use crate::projection::ProjectionResult;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Year")]
    year: &'a str,
    #[serde(rename = "Currency")]
    currency: &'a str,
    #[serde(rename = "Projected")]
    projected: f64,
    #[serde(rename = "Baseline")]
    baseline: f64,
}

/// Write one row per projected year
pub fn write_projection_csv<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    for row in result.chart_rows() {
        writer.serialize(CsvRow {
            year: &row.year_label,
            currency: &result.display_currency,
            projected: row.projected_value,
            baseline: row.baseline_value,
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the projection to a new CSV file at `path`
pub fn export_to_path(path: &Path, result: &ProjectionResult) -> Result<()> {
    let file = File::create(path)?;
    write_projection_csv(file, result)
}
