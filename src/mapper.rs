use std::collections::BTreeMap;

use log::{debug, warn};
use serde::Serialize;

use crate::{matcher::lowercase_headers, registry::SchemaDefinition};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedColumn {
    pub header: String,
    pub column_index: usize,
    pub target_name: String,
}

/// One-to-one association between upload headers and schema fields.
///
/// Neither a header nor a target field appears in more than one entry. The
/// mapping may be partial or empty; gaps surface later as row errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSuggestion {
    entries: Vec<MappedColumn>,
}

impl MappingSuggestion {
    pub fn entries(&self) -> &[MappedColumn] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn column_for(&self, target_name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.target_name == target_name)
            .map(|entry| entry.column_index)
    }

    pub fn target_for(&self, header: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.header == header)
            .map(|entry| entry.target_name.as_str())
    }

    /// Header to target field, as shown to users for confirmation.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|entry| (entry.header.clone(), entry.target_name.clone()))
            .collect()
    }
}

/// For each field in declaration order, claims the first unclaimed header
/// containing one of the field's keywords.
pub fn build_mapping<S: AsRef<str>>(headers: &[S], schema: &SchemaDefinition) -> MappingSuggestion {
    let lowered = lowercase_headers(headers);
    let mut entries: Vec<MappedColumn> = Vec::new();

    for field in schema.fields {
        let claimed = lowered.iter().enumerate().find(|(idx, lowered_header)| {
            let header = headers[*idx].as_ref();
            !entries
                .iter()
                .any(|entry| entry.column_index == *idx || entry.header == header)
                && field.matches_header(lowered_header)
        });
        match claimed {
            Some((idx, _)) => {
                let header = headers[idx].as_ref().to_string();
                debug!("Mapped header '{header}' to field '{}'", field.target_name);
                entries.push(MappedColumn {
                    header,
                    column_index: idx,
                    target_name: field.target_name.to_string(),
                });
            }
            None if field.required => {
                warn!(
                    "No header found for required field '{}' of schema '{}'",
                    field.target_name, schema.name
                );
            }
            None => {}
        }
    }

    MappingSuggestion { entries }
}
