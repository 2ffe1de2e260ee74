use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ExcelReadError {
    #[error("Failed to open workbook: {0}")]
    WorkbookOpen(String),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Header row {0} is past the end of the sheet")]
    MissingHeaderRow(usize),

    #[error("No '{0}' column in header row")]
    MissingDateColumn(String),
}

/// One input record: the raw text of the row's `Date` cell.
///
/// All parsing happens downstream; the reader only stringifies cells.
#[derive(Debug, Clone)]
pub struct InputRow {
    pub date_text: String,
}

const DATE_COLUMN: &str = "Date";

/// Reader for the input workbook of dated rows
pub struct ExcelReader {
    workbook_path: String,
}

impl ExcelReader {
    pub fn new(workbook_path: impl Into<String>) -> Self {
        Self {
            workbook_path: workbook_path.into(),
        }
    }

    /// Read the dated rows of one sheet.
    ///
    /// `header_row` is the zero-based row holding the column titles; data
    /// rows follow it. Blank cells in the `Date` column are skipped.
    /// Native Excel datetime cells are rendered with `datetime_format` so
    /// that every row reaches the caller as a string.
    pub fn read_rows(
        &self,
        sheet_name: &str,
        header_row: usize,
        datetime_format: &str,
    ) -> Result<Vec<InputRow>, ExcelReadError> {
        info!("Reading sheet '{}' from {}", sheet_name, self.workbook_path);

        // Open workbook (this is synchronous, caller should use spawn_blocking)
        let mut workbook: Xlsx<BufReader<File>> = match open_workbook(Path::new(&self.workbook_path))
        {
            Ok(wb) => wb,
            Err(e) => return Err(ExcelReadError::WorkbookOpen(e.to_string())),
        };

        let range = match workbook.worksheet_range(sheet_name) {
            Ok(range) => range,
            Err(_) => return Err(ExcelReadError::SheetNotFound(sheet_name.to_string())),
        };

        let rows = rows_from_range(&range, header_row, datetime_format)?;
        info!("Read {} dated rows from '{}'", rows.len(), sheet_name);
        Ok(rows)
    }
}

fn rows_from_range(
    range: &Range<Data>,
    header_row: usize,
    datetime_format: &str,
) -> Result<Vec<InputRow>, ExcelReadError> {
    let header = range
        .rows()
        .nth(header_row)
        .ok_or(ExcelReadError::MissingHeaderRow(header_row))?;

    let date_col = header
        .iter()
        .position(|cell| match cell {
            Data::String(s) => s.trim().eq_ignore_ascii_case(DATE_COLUMN),
            _ => false,
        })
        .ok_or_else(|| ExcelReadError::MissingDateColumn(DATE_COLUMN.to_string()))?;
    debug!("'{}' column found at index {}", DATE_COLUMN, date_col);

    let mut rows = Vec::new();

    for (row_idx, row) in range.rows().enumerate().skip(header_row + 1) {
        match cell_to_string(row.get(date_col), datetime_format) {
            Some(date_text) => rows.push(InputRow { date_text }),
            None => {
                debug!("Skipping row {} with blank '{}' cell", row_idx, DATE_COLUMN);
            }
        }
    }

    Ok(rows)
}

/// Render a cell as a string, or `None` for blank cells.
fn cell_to_string(cell: Option<&Data>, datetime_format: &str) -> Option<String> {
    match cell {
        Some(Data::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(Data::DateTime(excel_date)) => match excel_date.as_datetime() {
            Some(dt) => Some(dt.format(datetime_format).to_string()),
            None => {
                warn!("Unconvertible Excel datetime cell, skipping row");
                None
            }
        },
        Some(Data::Float(f)) => Some(f.to_string()),
        Some(Data::Int(i)) => Some(i.to_string()),
        Some(Data::Empty) | None => None,
        Some(other) => {
            warn!("Unexpected cell type {:?}, skipping row", other);
            None
        }
    }
}
