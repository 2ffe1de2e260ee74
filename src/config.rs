use std::path::PathBuf;

/// Injected run parameters, resolved once by the binary and handed to the
/// pipeline as plain data.
#[derive(Debug, Clone)]
pub struct Config {
    pub input_path: PathBuf,
    pub sheet_name: String,
    /// Zero-based row of the column headers in the input sheet
    pub header_row: usize,
    /// Explicit numeric station ID; when set, no name lookup happens
    pub station_id: Option<String>,
    /// Station name resolved once at startup when no ID is given
    pub station_name: String,
    pub output_path: PathBuf,
    pub base_url: String,
    /// chrono format of the input sheet's Date column
    pub input_date_format: String,
    /// chrono format for dates in the output table
    pub output_date_format: String,
    /// Render output temperatures with a decimal comma
    pub decimal_comma: bool,
}
