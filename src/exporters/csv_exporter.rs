use thiserror::Error;
use tracing::info;

use crate::aggregator::AggregateResult;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write output table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush output table: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes the aggregates as a `;`-delimited table, one row per interval,
/// preserving the order it is given.
pub struct CsvExporter {
    output_path: String,
    date_format: String,
    decimal_comma: bool,
}

impl CsvExporter {
    pub fn new(
        output_path: impl Into<String>,
        date_format: impl Into<String>,
        decimal_comma: bool,
    ) -> Self {
        Self {
            output_path: output_path.into(),
            date_format: date_format.into(),
            decimal_comma,
        }
    }

    pub fn export(&self, results: &[AggregateResult]) -> Result<(), ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_path(&self.output_path)?;

        writer.write_record(["stationId", "date", "temperatureMin", "temperatureMax"])?;

        for result in results {
            writer.write_record([
                result.station_id.clone(),
                result.end.format(&self.date_format).to_string(),
                self.format_temperature(result.temperature_min),
                self.format_temperature(result.temperature_max),
            ])?;
        }

        writer.flush()?;
        info!("Wrote {} rows to {}", results.len(), self.output_path);
        Ok(())
    }

    // The underlying value stays a plain f64; the decimal comma is purely
    // an output convention.
    fn format_temperature(&self, value: f64) -> String {
        let formatted = value.to_string();
        if self.decimal_comma {
            formatted.replace('.', ",")
        } else {
            formatted
        }
    }
}
