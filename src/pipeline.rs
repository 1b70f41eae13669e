//! End-to-end intake: tokenize, profile, match, map, validate, report.
//! Only `analyze` profiles columns; `import` goes straight from headers to
//! schema matching.
//!
//! Every call works on its own freshly tokenized table; the schema registry is
//! the only shared state and it is read-only.

use std::collections::BTreeMap;

use log::info;
use serde::Serialize;

use crate::{
    data::FieldType,
    error::{IntakeError, Result},
    mapper::{MappingSuggestion, build_mapping},
    matcher::match_schema,
    profile::{ColumnProfile, DEFAULT_SAMPLE_ROWS, profile_table},
    registry::{SchemaDefinition, find_schema},
    report::{DEFAULT_ERROR_RECORD_LIMIT, ImportResult, aggregate},
    tokenizer::{RawTable, tokenize},
    validator::{DEFAULT_PREVIEW_CHARS, MappedRecord, RowOutcome, RowValidator},
};

/// Upload ceiling applied by the I/O layer before the pipeline runs.
pub const DEFAULT_MAX_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub sample_rows: usize,
    pub error_record_limit: usize,
    pub preview_chars: usize,
    pub max_bytes: usize,
    /// Import into this registry schema instead of matching headers.
    pub schema: Option<String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            sample_rows: DEFAULT_SAMPLE_ROWS,
            error_record_limit: DEFAULT_ERROR_RECORD_LIMIT,
            preview_chars: DEFAULT_PREVIEW_CHARS,
            max_bytes: DEFAULT_MAX_BYTES,
            schema: None,
        }
    }
}

impl ImportOptions {
    fn resolve_schema(&self, headers: &[String]) -> Result<&'static SchemaDefinition> {
        match &self.schema {
            Some(name) => find_schema(name).ok_or_else(|| IntakeError::UnknownSchema {
                name: name.clone(),
            }),
            None => Ok(match_schema(headers)),
        }
    }
}

/// Pre-import preview of an upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub filename: String,
    pub total_rows: usize,
    pub headers: Vec<String>,
    pub sample_data: Vec<Vec<String>>,
    pub data_types: BTreeMap<String, FieldType>,
    pub suggested_table: String,
    pub suggested_mapping: BTreeMap<String, String>,
    #[serde(skip)]
    pub profiles: Vec<ColumnProfile>,
}

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub schema: &'static SchemaDefinition,
    pub mapping: MappingSuggestion,
    pub result: ImportResult,
    pub outcomes: Vec<RowOutcome>,
}

impl ImportOutcome {
    /// Records of valid rows in file order, for the persistence layer.
    pub fn valid_records(&self) -> Vec<&MappedRecord> {
        self.outcomes.iter().filter_map(RowOutcome::record).collect()
    }
}

pub fn analyze(filename: &str, text: &str, options: &ImportOptions) -> Result<FileAnalysis> {
    let table = tokenize(text)?;
    let profiles = profile_table(&table, options.sample_rows);
    let schema = options.resolve_schema(table.headers())?;
    let mapping = build_mapping(table.headers(), schema);

    let sample_data = table
        .rows()
        .iter()
        .take(options.sample_rows)
        .cloned()
        .collect();
    let mut data_types = BTreeMap::new();
    for column in &profiles {
        data_types
            .entry(column.header.clone())
            .or_insert(column.inferred_type);
    }

    info!(
        "Analyzed '{filename}': {} row(s), {} column(s), suggested table '{}'",
        table.row_count(),
        table.column_count(),
        schema.name
    );
    Ok(FileAnalysis {
        filename: filename.to_string(),
        total_rows: table.row_count(),
        headers: table.headers().to_vec(),
        sample_data,
        data_types,
        suggested_table: schema.name.to_string(),
        suggested_mapping: mapping.to_map(),
        profiles,
    })
}

pub fn import(text: &str, options: &ImportOptions) -> Result<ImportOutcome> {
    let table = tokenize(text)?;
    import_table(&table, options)
}

pub fn import_table(table: &RawTable, options: &ImportOptions) -> Result<ImportOutcome> {
    let schema = options.resolve_schema(table.headers())?;
    let mapping = build_mapping(table.headers(), schema);
    info!(
        "Importing {} row(s) as '{}' with {} of {} column(s) mapped",
        table.row_count(),
        schema.name,
        mapping.len(),
        table.column_count()
    );

    let outcomes = RowValidator::new(table.headers(), &mapping, schema)
        .with_preview_chars(options.preview_chars)
        .validate_table(table);
    let result = aggregate(&outcomes, options.error_record_limit);
    info!(
        "Import finished: {} valid, {} rejected of {} row(s)",
        result.valid_rows, result.error_rows, result.total_rows
    );
    Ok(ImportOutcome {
        schema,
        mapping,
        result,
        outcomes,
    })
}
