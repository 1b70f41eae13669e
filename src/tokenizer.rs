//! Line-oriented CSV tokenizer for uploaded text.
//!
//! The delimiter is always `,` and the quote character is always `"`. A quote
//! toggles the in-quotes state and is dropped from the output, so doubled
//! quotes (`""`) do not produce a literal quote character. Every cell is
//! trimmed after extraction.

use log::debug;

use crate::error::{IntakeError, Result};

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Tokenized upload: one header row followed by one or more data rows.
///
/// Data rows may be shorter or longer than the header; use [`RawTable::cell`]
/// to read a column without caring about raggedness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Returns the cell at `column` in `row`, or `""` when the row is short.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

pub fn tokenize(text: &str) -> Result<RawTable> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let header_line = lines.next().ok_or(IntakeError::EmptyInput { lines: 0 })?;
    let headers = split_line(header_line);
    let rows = lines.map(split_line).collect::<Vec<_>>();
    if rows.is_empty() {
        return Err(IntakeError::EmptyInput { lines: 1 });
    }
    debug!(
        "Tokenized {} header cell(s) and {} data row(s)",
        headers.len(),
        rows.len()
    );
    Ok(RawTable { headers, rows })
}

/// Splits a single line into trimmed cells, honoring quoted delimiters.
pub fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            other => current.push(other),
        }
    }
    cells.push(current.trim().to_string());
    cells
}
