use crate::tables::DELIMITER;
use log::trace;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CellError {
    #[error("column {index} is out of range for a row with {cell_count} cells")]
    MissingColumn { index: usize, cell_count: usize },

    #[error("cell '{0}' is not a number")]
    NotANumber(String),
}

/// Trimmed, non-empty cells of a delimited row. Column indices count only these cells.
pub fn split_cells(line: &str) -> Vec<&str> {
    line.split(DELIMITER)
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}

/// Parses a currency cell such as `$12,345.60`.
pub fn parse_amount(cell: &str) -> Result<f64, CellError> {
    let cleaned = cell.replace(['$', ','], "");
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| CellError::NotANumber(cell.to_string()))
}

pub fn parse_column(line: &str, column_index: usize) -> Result<f64, CellError> {
    let cells = split_cells(line);
    let cell = cells.get(column_index).ok_or(CellError::MissingColumn {
        index: column_index,
        cell_count: cells.len(),
    })?;
    parse_amount(cell)
}

/// Numeric value of the given column, or 0.0 when the column is missing or not a number.
pub fn extract_number(line: &str, column_index: usize) -> f64 {
    match parse_column(line, column_index) {
        Ok(value) => value,
        Err(e) => {
            trace!("Treating cell as 0.0 in '{}': {}", line, e);
            0.0
        }
    }
}
