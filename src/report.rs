use serde::Serialize;

use crate::validator::RowOutcome;

pub const DEFAULT_ERROR_RECORD_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub row: usize,
    pub data: String,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub success: bool,
    pub total_rows: usize,
    pub valid_rows: usize,
    pub error_rows: usize,
    pub error_records: Vec<ErrorRecord>,
    /// More invalid rows existed than `error_records` lists.
    pub truncated: bool,
}

/// Counts outcomes and keeps the first `error_limit` invalid rows in file order.
pub fn aggregate(outcomes: &[RowOutcome], error_limit: usize) -> ImportResult {
    let total_rows = outcomes.len();
    let valid_rows = outcomes.iter().filter(|o| o.is_valid()).count();
    let error_rows = total_rows - valid_rows;

    let mut invalid = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            RowOutcome::Invalid {
                row_index,
                preview,
                errors,
            } => Some(ErrorRecord {
                row: *row_index,
                data: preview.clone(),
                errors: errors.clone(),
            }),
            RowOutcome::Valid { .. } => None,
        })
        .collect::<Vec<_>>();
    invalid.sort_by_key(|record| record.row);
    invalid.truncate(error_limit);

    ImportResult {
        success: error_rows == 0,
        total_rows,
        valid_rows,
        error_rows,
        truncated: error_rows > invalid.len(),
        error_records: invalid,
    }
}
