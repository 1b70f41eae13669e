use std::collections::BTreeMap;

use csv_intake::{report::aggregate, validator::RowOutcome};
use proptest::prelude::*;

fn valid(row_index: usize) -> RowOutcome {
    RowOutcome::Valid {
        row_index,
        record: BTreeMap::new(),
    }
}

fn invalid(row_index: usize) -> RowOutcome {
    RowOutcome::Invalid {
        row_index,
        preview: format!("row {row_index}"),
        errors: vec![format!("problem in row {row_index}")],
    }
}

#[test]
fn aggregate_counts_and_lists_errors_in_row_order() {
    let outcomes = vec![valid(1), invalid(4), valid(2), invalid(3)];
    let result = aggregate(&outcomes, 200);
    assert!(!result.success);
    assert_eq!(result.total_rows, 4);
    assert_eq!(result.valid_rows, 2);
    assert_eq!(result.error_rows, 2);
    assert!(!result.truncated);
    let rows = result.error_records.iter().map(|r| r.row).collect::<Vec<_>>();
    assert_eq!(rows, [3, 4]);
    assert_eq!(result.error_records[0].data, "row 3");
    assert_eq!(result.error_records[0].errors, ["problem in row 3"]);
}

#[test]
fn aggregate_caps_error_records_and_flags_truncation() {
    let outcomes = (1..=5).map(invalid).collect::<Vec<_>>();
    let result = aggregate(&outcomes, 2);
    assert_eq!(result.error_rows, 5);
    assert_eq!(result.error_records.len(), 2);
    assert_eq!(result.error_records[1].row, 2);
    assert!(result.truncated);
}

#[test]
fn all_valid_rows_report_success() {
    let result = aggregate(&[valid(1), valid(2)], 200);
    assert!(result.success);
    assert!(result.error_records.is_empty());
}

#[test]
fn import_result_serializes_with_camel_case_keys() {
    let result = aggregate(&[valid(1), invalid(2)], 200);
    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(json["totalRows"], 2);
    assert_eq!(json["validRows"], 1);
    assert_eq!(json["errorRows"], 1);
    assert_eq!(json["success"], false);
    assert_eq!(json["errorRecords"][0]["row"], 2);
    assert_eq!(json["errorRecords"][0]["data"], "row 2");
}

proptest! {
    #[test]
    fn valid_plus_error_rows_equals_total(
        flags in proptest::collection::vec(any::<bool>(), 0..300),
        limit in 0usize..50,
    ) {
        let outcomes = flags
            .iter()
            .enumerate()
            .map(|(idx, ok)| if *ok { valid(idx + 1) } else { invalid(idx + 1) })
            .collect::<Vec<_>>();
        let result = aggregate(&outcomes, limit);
        prop_assert_eq!(result.valid_rows + result.error_rows, result.total_rows);
        prop_assert_eq!(result.total_rows, flags.len());
        prop_assert!(result.error_records.len() <= limit);
        prop_assert_eq!(result.truncated, result.error_rows > limit);
    }
}
