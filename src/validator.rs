//! Row validation against a matched schema and mapping.
//!
//! A row is never rejected early: every field is checked so an invalid row
//! carries its complete list of problems.

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{
    data::{Value, parse_typed_value},
    mapper::MappingSuggestion,
    registry::{FieldSpec, SchemaDefinition},
    tokenizer::RawTable,
};

pub const DEFAULT_PREVIEW_CHARS: usize = 80;

/// Target field name to coerced value, ready for insertion.
pub type MappedRecord = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Valid {
        row_index: usize,
        record: MappedRecord,
    },
    Invalid {
        row_index: usize,
        preview: String,
        errors: Vec<String>,
    },
}

impl RowOutcome {
    pub fn row_index(&self) -> usize {
        match self {
            RowOutcome::Valid { row_index, .. } | RowOutcome::Invalid { row_index, .. } => {
                *row_index
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, RowOutcome::Valid { .. })
    }

    pub fn record(&self) -> Option<&MappedRecord> {
        match self {
            RowOutcome::Valid { record, .. } => Some(record),
            RowOutcome::Invalid { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RowValidator<'a> {
    headers: &'a [String],
    mapping: &'a MappingSuggestion,
    schema: &'a SchemaDefinition,
    preview_chars: usize,
}

impl<'a> RowValidator<'a> {
    pub fn new(
        headers: &'a [String],
        mapping: &'a MappingSuggestion,
        schema: &'a SchemaDefinition,
    ) -> Self {
        Self {
            headers,
            mapping,
            schema,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    /// Validates one data row. `row_index` is the 1-based data row number.
    pub fn validate(&self, row_index: usize, row: &[String]) -> RowOutcome {
        if self.schema.is_custom() {
            return RowOutcome::Valid {
                row_index,
                record: passthrough_record(self.headers, row),
            };
        }

        let mut record = MappedRecord::new();
        let mut errors = Vec::new();
        for field in self.schema.fields {
            let raw = self
                .mapping
                .column_for(field.target_name)
                .map(|idx| row.get(idx).map(String::as_str).unwrap_or(""));
            match check_field(field, raw) {
                Ok(Some(value)) => {
                    record.insert(field.target_name.to_string(), value);
                }
                Ok(None) => {}
                Err(message) => errors.push(message),
            }
        }

        if errors.is_empty() {
            RowOutcome::Valid { row_index, record }
        } else {
            RowOutcome::Invalid {
                row_index,
                preview: row_preview(row, self.preview_chars),
                errors,
            }
        }
    }

    pub fn validate_table(&self, table: &RawTable) -> Vec<RowOutcome> {
        table
            .rows()
            .iter()
            .enumerate()
            .map(|(idx, row)| self.validate(idx + 1, row))
            .collect()
    }
}

pub fn validate_row(
    row_index: usize,
    row: &[String],
    headers: &[String],
    mapping: &MappingSuggestion,
    schema: &SchemaDefinition,
) -> RowOutcome {
    RowValidator::new(headers, mapping, schema).validate(row_index, row)
}

pub fn validate_rows(
    table: &RawTable,
    mapping: &MappingSuggestion,
    schema: &SchemaDefinition,
) -> Vec<RowOutcome> {
    RowValidator::new(table.headers(), mapping, schema).validate_table(table)
}

/// `raw` is `None` when the field has no mapped column.
fn check_field(field: &FieldSpec, raw: Option<&str>) -> Result<Option<Value>, String> {
    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ if field.required => return Err(format!("{} is required", field.target_name)),
        _ => return Ok(None),
    };
    let value = parse_typed_value(raw, field.expected_type).ok_or_else(|| {
        format!(
            "{}: invalid {} value '{raw}'",
            field.target_name, field.expected_type
        )
    })?;
    if let Some(check) = field.check {
        check(&value).map_err(|reason| format!("{}: {reason}", field.target_name))?;
    }
    Ok(Some(value))
}

fn passthrough_record(headers: &[String], row: &[String]) -> MappedRecord {
    let mut record = MappedRecord::new();
    for (header, cell) in headers.iter().zip(row) {
        if header.is_empty() || cell.is_empty() {
            continue;
        }
        record
            .entry(header.clone())
            .or_insert_with(|| Value::Text(cell.clone()));
    }
    record
}

/// Comma-joined cells cut to `max_chars` characters.
pub fn row_preview(row: &[String], max_chars: usize) -> String {
    let joined = row.iter().join(",");
    if joined.chars().count() <= max_chars {
        return joined;
    }
    let mut preview = joined.chars().take(max_chars).collect::<String>();
    preview.push_str("...");
    preview
}
