//! Static catalog of the target schemas an upload can be imported into.
//!
//! Each [`SchemaDefinition`] declares its fields in insertion order together
//! with the lowercase header keywords used both by the matcher gate and by the
//! column mapper. The catalog is built at compile time and never mutated.

use chrono::{Datelike, Local};

use crate::data::{FieldType, Value};

pub const CUSTOM_IMPORT: &str = "custom_import";

/// Extra rule applied after a value has been coerced to its field type.
pub type FieldCheck = fn(&Value) -> Result<(), String>;

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub target_name: &'static str,
    pub expected_type: FieldType,
    pub required: bool,
    pub header_keywords: &'static [&'static str],
    pub check: Option<FieldCheck>,
}

impl FieldSpec {
    const fn new(
        target_name: &'static str,
        expected_type: FieldType,
        required: bool,
        header_keywords: &'static [&'static str],
    ) -> Self {
        Self {
            target_name,
            expected_type,
            required,
            header_keywords,
            check: None,
        }
    }

    const fn with_check(mut self, check: FieldCheck) -> Self {
        self.check = Some(check);
        self
    }

    /// True when the lowercased header contains any of this field's keywords.
    pub fn matches_header(&self, lowered_header: &str) -> bool {
        self.header_keywords
            .iter()
            .any(|keyword| lowered_header.contains(keyword))
    }
}

/// Boolean header test deciding whether a schema fits an upload.
#[derive(Debug, Clone, Copy)]
pub enum Gate {
    /// Some header contains one of the keywords.
    Keyword(&'static [&'static str]),
    All(&'static [Gate]),
    Any(&'static [Gate]),
}

#[derive(Debug)]
pub struct SchemaDefinition {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
    /// `None` only for the fallback schema, which is never matched directly.
    pub gate: Option<Gate>,
}

impl SchemaDefinition {
    pub fn field(&self, target_name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.target_name == target_name)
    }

    pub fn is_custom(&self) -> bool {
        self.fields.is_empty()
    }
}

const DATE_KEYWORDS: &[&str] = &["date"];
const EARNING_AMOUNT_KEYWORDS: &[&str] = &["amount", "revenue", "income"];
const EARNING_SOURCE_KEYWORDS: &[&str] = &["source", "booking"];
const EXPENSE_AMOUNT_KEYWORDS: &[&str] = &["amount", "cost"];
const RECIPIENT_KEYWORDS: &[&str] = &["vendor", "recipient", "payee"];
const GUEST_KEYWORDS: &[&str] = &["guest", "customer", "renter"];
const START_KEYWORDS: &[&str] = &["start", "checkin"];
const END_KEYWORDS: &[&str] = &["end", "checkout"];
const MAKE_KEYWORDS: &[&str] = &["make", "brand"];
const MODEL_KEYWORDS: &[&str] = &["model"];

static EARNINGS: SchemaDefinition = SchemaDefinition {
    name: "earnings",
    fields: &[
        FieldSpec::new("date", FieldType::Date, true, DATE_KEYWORDS),
        FieldSpec::new("amount", FieldType::Decimal, true, EARNING_AMOUNT_KEYWORDS),
        FieldSpec::new("source", FieldType::Text, true, EARNING_SOURCE_KEYWORDS),
        FieldSpec::new("description", FieldType::Text, false, &["description", "memo"]),
    ],
    gate: Some(Gate::All(&[
        Gate::Keyword(EARNING_AMOUNT_KEYWORDS),
        Gate::Keyword(EARNING_SOURCE_KEYWORDS),
    ])),
};

static EXPENSES: SchemaDefinition = SchemaDefinition {
    name: "expenses",
    fields: &[
        FieldSpec::new("date", FieldType::Date, true, DATE_KEYWORDS),
        FieldSpec::new("amount", FieldType::Decimal, true, EXPENSE_AMOUNT_KEYWORDS),
        FieldSpec::new("recipient", FieldType::Text, true, RECIPIENT_KEYWORDS),
        FieldSpec::new("category_name", FieldType::Text, false, &["category"]),
        FieldSpec::new("notes", FieldType::Text, false, &["notes", "memo", "description"]),
    ],
    gate: Some(Gate::All(&[
        Gate::Keyword(EXPENSE_AMOUNT_KEYWORDS),
        Gate::Keyword(RECIPIENT_KEYWORDS),
    ])),
};

static TRIPS: SchemaDefinition = SchemaDefinition {
    name: "trips",
    fields: &[
        FieldSpec::new("guest_name", FieldType::Text, true, GUEST_KEYWORDS),
        FieldSpec::new("start_date", FieldType::Date, true, START_KEYWORDS),
        FieldSpec::new("end_date", FieldType::Date, true, END_KEYWORDS),
        FieldSpec::new("total_amount", FieldType::Decimal, false, &["amount", "total", "revenue"]),
        FieldSpec::new("vehicle_id", FieldType::Text, false, &["vehicle", "car"]),
    ],
    gate: Some(Gate::All(&[
        Gate::Keyword(GUEST_KEYWORDS),
        Gate::Any(&[Gate::Keyword(START_KEYWORDS), Gate::Keyword(END_KEYWORDS)]),
    ])),
};

static VEHICLES: SchemaDefinition = SchemaDefinition {
    name: "vehicles",
    fields: &[
        FieldSpec::new("make", FieldType::Text, true, MAKE_KEYWORDS),
        FieldSpec::new("model", FieldType::Text, true, MODEL_KEYWORDS),
        FieldSpec::new("year", FieldType::Integer, false, &["year"]).with_check(check_model_year),
        FieldSpec::new("vin", FieldType::Text, false, &["vin"]),
        FieldSpec::new("license_plate", FieldType::Text, false, &["license", "plate"]),
    ],
    gate: Some(Gate::All(&[
        Gate::Keyword(MAKE_KEYWORDS),
        Gate::Keyword(MODEL_KEYWORDS),
    ])),
};

static CUSTOM: SchemaDefinition = SchemaDefinition {
    name: CUSTOM_IMPORT,
    fields: &[],
    gate: None,
};

static NAMED_SCHEMAS: [&SchemaDefinition; 4] = [&EARNINGS, &EXPENSES, &TRIPS, &VEHICLES];

/// Named schemas in matching priority order. The fallback is not included.
pub fn all_schemas() -> &'static [&'static SchemaDefinition] {
    &NAMED_SCHEMAS
}

pub fn custom_import() -> &'static SchemaDefinition {
    &CUSTOM
}

pub fn find_schema(name: &str) -> Option<&'static SchemaDefinition> {
    let name = name.trim();
    if name.eq_ignore_ascii_case(CUSTOM_IMPORT) {
        return Some(&CUSTOM);
    }
    NAMED_SCHEMAS
        .iter()
        .copied()
        .find(|schema| schema.name.eq_ignore_ascii_case(name))
}

const FIRST_MODEL_YEAR: i64 = 1886;

fn check_model_year(value: &Value) -> Result<(), String> {
    let latest = i64::from(Local::now().year()) + 1;
    match value {
        Value::Integer(year) if (FIRST_MODEL_YEAR..=latest).contains(year) => Ok(()),
        Value::Integer(year) => Err(format!(
            "year {year} is outside {FIRST_MODEL_YEAR}-{latest}"
        )),
        other => Err(format!("expected an integer year, got '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_schema_is_case_insensitive_and_knows_fallback() {
        assert_eq!(find_schema("Trips").map(|s| s.name), Some("trips"));
        assert_eq!(find_schema("custom_import").map(|s| s.name), Some(CUSTOM_IMPORT));
        assert!(find_schema("invoices").is_none());
    }

    #[test]
    fn model_year_check_bounds() {
        assert!(check_model_year(&Value::Integer(2019)).is_ok());
        assert!(check_model_year(&Value::Integer(1700)).is_err());
        assert!(check_model_year(&Value::Integer(9999)).is_err());
    }

    #[test]
    fn model_year_allows_next_year_only() {
        let current = i64::from(Local::now().year());
        assert!(check_model_year(&Value::Integer(current + 1)).is_ok());
        assert!(check_model_year(&Value::Integer(current + 2)).is_err());
    }
}
