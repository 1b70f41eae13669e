mod common;

use std::collections::HashSet;

use common::strings;
use csv_intake::{
    mapper::build_mapping,
    registry::{all_schemas, custom_import, find_schema},
};
use proptest::prelude::*;

#[test]
fn expenses_headers_map_one_to_one() {
    let headers = strings(&["Date", "Amount", "Recipient", "Category", "Notes"]);
    let schema = find_schema("expenses").expect("expenses schema");
    let mapping = build_mapping(&headers, schema);

    let map = mapping.to_map();
    assert_eq!(map.len(), 5);
    assert_eq!(map["Date"], "date");
    assert_eq!(map["Amount"], "amount");
    assert_eq!(map["Recipient"], "recipient");
    assert_eq!(map["Category"], "category_name");
    assert_eq!(map["Notes"], "notes");
    assert_eq!(mapping.column_for("recipient"), Some(2));
}

#[test]
fn first_matching_header_in_header_order_is_claimed() {
    let headers = strings(&["Notes", "Trip Total", "Total Amount", "Guest"]);
    let schema = find_schema("trips").expect("trips schema");
    let mapping = build_mapping(&headers, schema);
    assert_eq!(mapping.target_for("Trip Total"), Some("total_amount"));
    assert_eq!(mapping.target_for("Total Amount"), None);
    assert_eq!(mapping.column_for("guest_name"), Some(3));
}

#[test]
fn claimed_header_is_not_reused_by_later_fields() {
    // Both headers contain "date"; only the first is claimed for `date`.
    let headers = strings(&["Payment Date", "Booking Date", "Amount"]);
    let schema = find_schema("earnings").expect("earnings schema");
    let mapping = build_mapping(&headers, schema);
    assert_eq!(mapping.target_for("Payment Date"), Some("date"));
    assert_eq!(mapping.target_for("Booking Date"), Some("source"));
    assert_eq!(mapping.column_for("amount"), Some(2));
}

#[test]
fn missing_required_fields_leave_mapping_partial() {
    let headers = strings(&["Make", "Colour"]);
    let schema = find_schema("vehicles").expect("vehicles schema");
    let mapping = build_mapping(&headers, schema);
    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.column_for("model"), None);
}

#[test]
fn duplicate_header_text_is_mapped_once() {
    let headers = strings(&["Amount", "Amount", "Source"]);
    let schema = find_schema("earnings").expect("earnings schema");
    let mapping = build_mapping(&headers, schema);
    assert_eq!(mapping.column_for("amount"), Some(0));
    assert_eq!(mapping.len(), 2);
}

#[test]
fn custom_import_produces_empty_mapping() {
    let headers = strings(&["Amount", "Source"]);
    assert!(build_mapping(&headers, custom_import()).is_empty());
}

const HEADER_POOL: &[&str] = &[
    "Date", "Amount", "Source", "Vendor", "Category", "Notes", "Guest", "Start", "End",
    "Total", "Vehicle", "Make", "Model", "Year", "VIN", "License Plate", "Booking Date",
    "Description", "Cost", "Payee",
];

proptest! {
    #[test]
    fn mapping_keys_and_values_are_unique(
        picks in proptest::collection::vec(0..HEADER_POOL.len(), 0..12),
        schema_idx in 0..4usize,
    ) {
        let headers = picks.iter().map(|&i| HEADER_POOL[i].to_string()).collect::<Vec<_>>();
        let schema = all_schemas()[schema_idx];
        let mapping = build_mapping(&headers, schema);

        let mut seen_headers = HashSet::new();
        let mut seen_fields = HashSet::new();
        for entry in mapping.entries() {
            prop_assert!(seen_headers.insert(entry.header.clone()));
            prop_assert!(seen_fields.insert(entry.target_name.clone()));
            prop_assert_eq!(&headers[entry.column_index], &entry.header);
            prop_assert!(schema.field(&entry.target_name).is_some());
        }
    }
}
