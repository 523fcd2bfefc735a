//! Integration tests for schema inference over heterogeneous records

use dataframe_core::{Column, DataType, SchemaInferrer, Table};
use serde_json::json;

fn infer(records: Vec<serde_json::Value>) -> Table {
    SchemaInferrer::new()
        .infer_table(&records)
        .expect("inference should not fail")
}

#[test]
fn test_mixed_scalar_records() {
    let table = infer(vec![
        json!({"a": 1, "b": "text"}),
        json!({"a": 2, "b": 5, "c": 4.5}),
    ]);

    assert_eq!(table.ncol(), 3);
    assert_eq!(table.nrow(), 2);

    match table.column("a").unwrap() {
        Column::Int(col) => {
            assert!(!col.data_type().nullable);
            assert_eq!(col.values(), &[Some(1), Some(2)]);
        }
        other => panic!("expected integer column, got {}", other),
    }

    // Mixed string/number widens to the broad comparable type
    match table.column("b").unwrap() {
        Column::Any(col) => {
            assert_eq!(col.data_type().kind, DataType::Any);
            assert_eq!(col.get(0).unwrap(), Some(&json!("text")));
            assert_eq!(col.get(1).unwrap(), Some(&json!(5)));
        }
        other => panic!("expected any column, got {}", other),
    }

    match table.column("c").unwrap() {
        Column::Float(col) => {
            assert!(col.data_type().nullable);
            assert_eq!(col.values(), &[None, Some(4.5)]);
        }
        other => panic!("expected float column, got {}", other),
    }
}

#[test]
fn test_clashing_object_array_scalar_degrades_to_any() {
    let table = infer(vec![
        json!({"a": "text"}),
        json!({"a": {"b": 2}}),
        json!({"a": [6, 7, 8]}),
    ]);

    assert_eq!(table.ncol(), 1);
    assert_eq!(table.nrow(), 3);
    match table.column("a").unwrap() {
        Column::Any(col) => {
            assert_eq!(col.get(0).unwrap(), Some(&json!("text")));
            assert_eq!(col.get(1).unwrap(), Some(&json!({"b": 2})));
            assert_eq!(col.get(2).unwrap(), Some(&json!([6, 7, 8])));
        }
        other => panic!("expected any column, got {}", other),
    }
}

#[test]
fn test_arrays_of_objects_become_frames() {
    let table = infer(vec![
        json!({"a": [{"b": 2}, {"c": 3}]}),
        json!({"a": [{"b": 4}, {"d": 5}]}),
    ]);

    assert_eq!(table.ncol(), 1);
    assert_eq!(table.nrow(), 2);

    match table.column("a").unwrap() {
        Column::Frame(frame) => {
            assert_eq!(frame.len(), 2);

            // Each row holds an independent 2-row sub-table over the union
            // of element fields observed across all rows
            for i in 0..2 {
                let sub = frame.get(i).unwrap();
                assert_eq!(sub.nrow(), 2);
                assert_eq!(sub.ncol(), 3);
                for name in ["b", "c", "d"] {
                    assert!(sub.column(name).is_ok());
                }
            }

            let first = frame.get(0).unwrap();
            match first.column("b").unwrap() {
                Column::Int(col) => assert_eq!(col.values(), &[Some(2), None]),
                other => panic!("expected integer column, got {}", other),
            }
        }
        other => panic!("expected frame column, got {}", other),
    }
}

#[test]
fn test_missing_array_is_empty_list_not_any() {
    let table = infer(vec![
        json!({"a": [3, 5]}),
        json!({}),
        json!({"a": [3.4, 5.6]}),
    ]);

    assert_eq!(table.ncol(), 1);
    assert_eq!(table.nrow(), 3);

    match table.column("a").unwrap() {
        Column::List(col) => {
            // Integer and float elements widen across all arrays at the path
            assert_eq!(
                col.data_type().kind,
                DataType::List(Box::new(DataType::Float))
            );
            assert!(!col.data_type().nullable);
            assert_eq!(col.get(1).unwrap(), Some(&Vec::new()));
        }
        other => panic!("expected list column, got {}", other),
    }
}

#[test]
fn test_empty_array_and_missing_field_agree() {
    let table = infer(vec![
        json!({"tags": ["x"]}),
        json!({"tags": []}),
        json!({}),
    ]);

    match table.column("tags").unwrap() {
        Column::List(col) => {
            assert_eq!(
                col.data_type().kind,
                DataType::List(Box::new(DataType::String))
            );
            assert_eq!(col.get(1).unwrap(), Some(&Vec::new()));
            assert_eq!(col.get(2).unwrap(), Some(&Vec::new()));
        }
        other => panic!("expected list column, got {}", other),
    }
}

#[test]
fn test_nested_group_roundtrip_through_rows() {
    let table = infer(vec![
        json!({"id": 1, "user": {"name": "Alice", "address": {"city": "Berlin"}}}),
        json!({"id": 2, "user": {"name": "Bob"}}),
    ]);

    match table.column("user").unwrap() {
        Column::Group(group) => {
            assert_eq!(group.len(), 2);
            match group.table().column("address").unwrap() {
                Column::Group(address) => {
                    assert_eq!(address.len(), 2);
                }
                other => panic!("expected nested group, got {}", other),
            }
        }
        other => panic!("expected group column, got {}", other),
    }

    assert_eq!(
        table.row(1).unwrap(),
        json!({"id": 2, "user": {"name": "Bob", "address": {"city": null}}})
    );
}

#[test]
fn test_frame_rows_materialize_as_arrays() {
    let table = infer(vec![
        json!({"orders": [{"sku": "a"}, {"sku": "b"}]}),
        json!({"orders": []}),
    ]);

    assert_eq!(
        table.row(0).unwrap(),
        json!({"orders": [{"sku": "a"}, {"sku": "b"}]})
    );
    assert_eq!(table.row(1).unwrap(), json!({"orders": []}));
}

#[test]
fn test_slicing_inferred_table_recomputes_nullability() {
    let table = infer(vec![
        json!({"x": 1}),
        json!({"x": null}),
        json!({"x": 3}),
    ]);

    let no_nulls = table.take(&[0, 2]).unwrap();
    match no_nulls.column("x").unwrap() {
        Column::Int(col) => assert!(!col.data_type().nullable),
        other => panic!("expected integer column, got {}", other),
    }

    let with_null = table.filter(&[true, true, false]).unwrap();
    match with_null.column("x").unwrap() {
        Column::Int(col) => assert!(col.data_type().nullable),
        other => panic!("expected integer column, got {}", other),
    }
}

#[test]
fn test_distinct_consistency_on_inferred_columns() {
    let table = infer(vec![
        json!({"k": "a"}),
        json!({"k": "a"}),
        json!({"k": "b"}),
        json!({"k": null}),
    ]);

    match table.column("k").unwrap() {
        Column::Str(col) => {
            assert_eq!(col.ndistinct(), col.distinct().len());
            assert_eq!(col.ndistinct(), 3);
            assert!(col.contains(Some(&"a".to_string())));
            assert!(col.contains(None));
        }
        other => panic!("expected string column, got {}", other),
    }
}
