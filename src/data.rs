//! Typed cell values and the lexical parsers behind them.
//!
//! [`FieldType`] is the closed set of semantic types a column or target field
//! can carry, and [`Value`] is the coerced representation handed to the
//! persistence layer. Inference uses the lenient [`parse_naive_date`]; row
//! validation only accepts [`parse_iso_date`].

use std::{fmt, str::FromStr, sync::OnceLock};

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Boolean,
    Integer,
    Decimal,
    Date,
    Text,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Boolean => "boolean",
            FieldType::Integer => "integer",
            FieldType::Decimal => "decimal",
            FieldType::Date => "date",
            FieldType::Text => "text",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Decimal(Decimal),
    Date(NaiveDate),
    Text(String),
}

impl Value {
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Boolean(_) => FieldType::Boolean,
            Value::Integer(_) => FieldType::Integer,
            Value::Decimal(_) => FieldType::Decimal,
            Value::Date(_) => FieldType::Date,
            Value::Text(_) => FieldType::Text,
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            Value::Boolean(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

// Records are inserted as plain JSON objects, so values serialize without a
// variant tag. Decimals go out as strings to keep their scale.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Decimal(d) => serializer.serialize_str(&d.to_string()),
            Value::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            Value::Text(s) => serializer.serialize_str(s),
        }
    }
}

fn numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("numeric literal pattern is valid")
    })
}

fn iso_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("ISO date pattern is valid"))
}

/// True when `value` is a plain decimal number: optional sign, ASCII digits,
/// and at most one decimal point. Exponents, thousands separators, currency
/// symbols, and non-ASCII digits are rejected.
pub fn is_numeric_literal(value: &str) -> bool {
    numeric_pattern().is_match(value)
}

pub fn parse_boolean(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub fn parse_integer(value: &str) -> Option<i64> {
    if !is_numeric_literal(value) || value.contains('.') {
        return None;
    }
    value.parse().ok()
}

pub fn parse_decimal(value: &str) -> Option<Decimal> {
    if !is_numeric_literal(value) {
        return None;
    }
    let (sign, digits) = match value.strip_prefix(['+', '-']) {
        Some(rest) => (&value[..1], rest),
        None => ("", value),
    };
    let digits = digits.strip_suffix('.').unwrap_or(digits);
    let normalized = if digits.starts_with('.') {
        format!("{}0{digits}", sign.trim_start_matches('+'))
    } else {
        format!("{}{digits}", sign.trim_start_matches('+'))
    };
    Decimal::from_str(&normalized).ok()
}

/// Strict `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    if !iso_date_pattern().is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Lenient date parsing used for type inference only.
pub fn parse_naive_date(value: &str) -> Option<NaiveDate> {
    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%d-%m-%Y"];
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for fmt in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, fmt) {
            return Some(parsed);
        }
    }
    let without_zone = value.trim_end_matches('Z');
    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(without_zone, fmt) {
            return Some(parsed.date());
        }
    }
    None
}

/// Coerces a non-empty cell into `ty`, or `None` when it does not parse.
pub fn parse_typed_value(value: &str, ty: FieldType) -> Option<Value> {
    match ty {
        FieldType::Boolean => parse_boolean(value).map(Value::Boolean),
        FieldType::Integer => parse_integer(value).map(Value::Integer),
        FieldType::Decimal => parse_decimal(value).map(Value::Decimal),
        FieldType::Date => parse_iso_date(value).map(Value::Date),
        FieldType::Text => Some(Value::Text(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_literal_rejects_residue() {
        assert!(is_numeric_literal("45"));
        assert!(is_numeric_literal("-45.50"));
        assert!(is_numeric_literal(".5"));
        assert!(!is_numeric_literal("45abc"));
        assert!(!is_numeric_literal("1e5"));
        assert!(!is_numeric_literal("1,000"));
        assert!(!is_numeric_literal("NaN"));
        assert!(!is_numeric_literal(""));
    }

    #[test]
    fn non_ascii_digits_are_not_numeric() {
        assert!(!is_numeric_literal("\u{0664}\u{0665}"));
        assert!(!is_numeric_literal("\u{ff11}\u{ff19}\u{ff19}\u{ff10}"));
        assert_eq!(parse_integer("\u{ff11}\u{ff19}\u{ff19}\u{ff10}"), None);
        assert_eq!(parse_iso_date("\u{ff12}024-01-15"), None);
    }

    #[test]
    fn parse_decimal_normalizes_bare_points() {
        assert_eq!(parse_decimal(".5"), Decimal::from_str("0.5").ok());
        assert_eq!(parse_decimal("-.5"), Decimal::from_str("-0.5").ok());
        assert_eq!(parse_decimal("+12."), Decimal::from_str("12").ok());
        assert_eq!(parse_decimal("45.50").map(|d| d.to_string()), Some("45.50".into()));
        assert_eq!(parse_decimal("not-a-number"), None);
    }

    #[test]
    fn parse_integer_rejects_decimals_and_overflow() {
        assert_eq!(parse_integer("2019"), Some(2019));
        assert_eq!(parse_integer("2019.0"), None);
        assert_eq!(parse_integer("99999999999999999999"), None);
    }

    #[test]
    fn parse_iso_date_is_strict() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_iso_date("2024-01-15"), expected);
        assert_eq!(parse_iso_date("2024-1-15"), None);
        assert_eq!(parse_iso_date("01/15/2024"), None);
        assert_eq!(parse_iso_date("2024-13-40"), None);
    }

    #[test]
    fn parse_naive_date_supports_multiple_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 6);
        assert_eq!(parse_naive_date("2024-05-06"), expected);
        assert_eq!(parse_naive_date("2024/05/06"), expected);
        assert_eq!(parse_naive_date("05/06/2024"), expected);
        assert_eq!(parse_naive_date("2024-05-06T14:30:00Z"), expected);
        assert_eq!(parse_naive_date("Shell"), None);
    }

    #[test]
    fn values_serialize_without_tags() {
        let date = Value::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-01-15\"");
        let amount = Value::Decimal(Decimal::from_str("45.50").unwrap());
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"45.50\"");
        assert_eq!(serde_json::to_string(&Value::Integer(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&FieldType::Decimal).unwrap(), "\"decimal\"");
    }
}
