//! Per-column type profiling over a bounded sample of data rows.

use log::debug;
use serde::Serialize;

use crate::{
    data::{FieldType, is_numeric_literal, parse_boolean, parse_decimal, parse_integer, parse_naive_date},
    tokenizer::RawTable,
};

pub const DEFAULT_SAMPLE_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub header: String,
    pub sample_values: Vec<String>,
    pub inferred_type: FieldType,
}

/// Profiles every header column using at most `sample_rows` data rows.
///
/// Empty cells are skipped; a column with no non-empty samples is `text`.
pub fn profile(headers: &[String], rows: &[Vec<String>], sample_rows: usize) -> Vec<ColumnProfile> {
    let sample = &rows[..rows.len().min(sample_rows)];
    headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let sample_values = sample
                .iter()
                .filter_map(|row| row.get(idx))
                .filter(|value| !value.is_empty())
                .cloned()
                .collect::<Vec<_>>();
            let inferred_type = infer_type(&sample_values);
            debug!("Column '{header}' inferred as {inferred_type}");
            ColumnProfile {
                header: header.clone(),
                sample_values,
                inferred_type,
            }
        })
        .collect()
}

pub fn profile_table(table: &RawTable, sample_rows: usize) -> Vec<ColumnProfile> {
    profile(table.headers(), table.rows(), sample_rows)
}

/// Picks the first type that every value satisfies, in the order boolean,
/// integer, decimal, date, text. Numeric types use the same parsers as row
/// validation, so a column is `decimal` as soon as one value carries a point
/// or overflows `i64`, and `text` when a value does not fit a decimal at all.
/// One outlier demotes the column to `text`.
pub fn infer_type<S: AsRef<str>>(values: &[S]) -> FieldType {
    if values.is_empty() {
        return FieldType::Text;
    }
    let all = |predicate: &dyn Fn(&str) -> bool| values.iter().all(|v| predicate(v.as_ref()));

    if all(&|v: &str| parse_boolean(v).is_some()) {
        FieldType::Boolean
    } else if all(&|v: &str| parse_integer(v).is_some()) {
        FieldType::Integer
    } else if all(&|v: &str| parse_decimal(v).is_some()) {
        FieldType::Decimal
    } else if all(&|v: &str| !is_numeric_literal(v) && parse_naive_date(v).is_some()) {
        FieldType::Date
    } else {
        FieldType::Text
    }
}
