use std::borrow::Cow;
use std::fmt::Write as _;

use crate::{
    pipeline::FileAnalysis,
    registry::{SchemaDefinition, all_schemas},
};

const SAMPLE_PREVIEW_VALUES: usize = 3;

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    for width in &mut widths {
        *width = (*width).max(1);
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_row(headers, &widths));

    let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<usize>>();
    let separator_cells = separator_widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_row(&separator_cells, &separator_widths));

    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths));
    }

    output
}

/// One line per column: header, inferred type, proposed field, samples.
pub fn render_analysis(analysis: &FileAnalysis) -> String {
    let headers = ["column", "type", "field", "samples"].map(String::from);
    let rows = analysis
        .profiles
        .iter()
        .map(|profile| {
            vec![
                profile.header.clone(),
                profile.inferred_type.to_string(),
                analysis
                    .suggested_mapping
                    .get(&profile.header)
                    .cloned()
                    .unwrap_or_else(|| "-".to_string()),
                profile
                    .sample_values
                    .iter()
                    .take(SAMPLE_PREVIEW_VALUES)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" | "),
            ]
        })
        .collect::<Vec<_>>();
    let mut output = format!(
        "{}: {} row(s), suggested table '{}'\n",
        analysis.filename, analysis.total_rows, analysis.suggested_table
    );
    output.push_str(&render_table(&headers, &rows));
    output
}

pub fn render_schemas() -> String {
    let headers = ["schema", "field", "type", "required", "keywords"].map(String::from);
    let rows = all_schemas()
        .iter()
        .flat_map(|schema| schema_rows(schema))
        .collect::<Vec<_>>();
    render_table(&headers, &rows)
}

fn schema_rows(schema: &SchemaDefinition) -> Vec<Vec<String>> {
    schema
        .fields
        .iter()
        .map(|field| {
            vec![
                schema.name.to_string(),
                field.target_name.to_string(),
                field.expected_type.to_string(),
                if field.required { "yes" } else { "no" }.to_string(),
                field.header_keywords.join(", "),
            ]
        })
        .collect()
}

fn format_row(values: &[String], widths: &[usize]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate() {
        if idx >= widths.len() {
            break;
        }
        let sanitized = sanitize_cell(value);
        let padding = widths[idx].saturating_sub(display_width(sanitized.as_ref()));
        let mut cell = sanitized.into_owned();
        cell.push_str(&" ".repeat(padding));
        cells.push(cell);
    }
    cells.join("  ").trim_end().to_string()
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
