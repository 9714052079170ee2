
use crate::{
    aggregate::{AggregateConfig, InvalidRowError, aggregate},
    error::Error,
    row::Row,
    value::{Float64, Value},
};

fn tags_config() -> AggregateConfig {
    AggregateConfig::new("tags")
}

#[test]
fn empty_input_yields_empty_output() {
    let result = aggregate(vec![], &AggregateConfig::default()).expect("aggregate");

    assert!(result.is_empty());
    assert_eq!(result.count(), 0);
    assert_eq!(result.observability().rows(), 0);
}

#[test]
fn single_identifier_collects_all_children_in_order() {
    let rows = vec![
        Row::new(5i64, "a"),
        Row::new(5i64, "b"),
        Row::new(5i64, "c"),
    ];
    let result = aggregate(rows, &AggregateConfig::default()).expect("aggregate");

    assert_eq!(result.count(), 1);
    let parent = result.one().expect("one parent");
    assert_eq!(parent.key(), &Value::Int(5));
    assert_eq!(
        parent.children().iter().cloned().collect::<Vec<_>>(),
        vec![
            Value::Text("a".to_string()),
            Value::Text("b".to_string()),
            Value::Text("c".to_string()),
        ],
    );
}

#[test]
fn contiguous_groups_emit_one_parent_per_identifier_in_first_appearance_order() {
    let rows = vec![
        Row::new(10i64, "a"),
        Row::new(10i64, "b"),
        Row::new(3i64, "c"),
        Row::new(42i64, "d"),
        Row::new(42i64, "e"),
    ];
    let result = aggregate(rows, &AggregateConfig::default()).expect("aggregate");

    assert_eq!(result.count(), 3);
    assert_eq!(
        result.keys(),
        vec![Value::Int(10), Value::Int(3), Value::Int(42)],
    );
}

#[test]
fn interleaved_groups_merge_into_existing_parents() {
    let rows = vec![
        Row::new(1i64, "a"),
        Row::new(2i64, "x"),
        Row::new(1i64, "b"),
    ];
    let result = aggregate(rows, &AggregateConfig::default()).expect("aggregate");

    assert_eq!(result.count(), 2, "reappearing identifier must not start a new parent");

    let parents = result.parents();
    assert_eq!(parents[0].key(), &Value::Int(1));
    assert_eq!(
        parents[0].children().iter().cloned().collect::<Vec<_>>(),
        vec![Value::Text("a".to_string()), Value::Text("b".to_string())],
    );
    assert_eq!(parents[1].key(), &Value::Int(2));
    assert_eq!(
        parents[1].children().iter().cloned().collect::<Vec<_>>(),
        vec![Value::Text("x".to_string())],
    );
}

#[test]
fn sparse_and_non_one_based_identifiers_group_correctly() {
    // The identifiers are deliberately unusable as array positions.
    let rows = vec![
        Row::new(1_000i64, "a"),
        Row::new(-5i64, "b"),
        Row::new(1_000i64, "c"),
    ];
    let result = aggregate(rows, &AggregateConfig::default()).expect("aggregate");

    assert_eq!(result.count(), 2);
    assert_eq!(result.keys(), vec![Value::Int(1_000), Value::Int(-5)]);
}

#[test]
fn message_tag_scenario_produces_nested_tags() {
    let rows = vec![
        Row::new(1i64, "funny").with_field("text", "first"),
        Row::new(1i64, "happy").with_field("text", "first"),
        Row::new(2i64, "funny").with_field("text", "second"),
        Row::new(2i64, "silly").with_field("text", "second"),
        Row::new(3i64, "silly").with_field("text", "third"),
    ];
    let result = aggregate(rows, &tags_config()).expect("aggregate");

    let json = serde_json::to_value(&result).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!([
            { "id": 1, "text": "first", "tags": ["funny", "happy"] },
            { "id": 2, "text": "second", "tags": ["funny", "silly"] },
            { "id": 3, "text": "third", "tags": ["silly"] },
        ]),
    );
}

#[test]
fn null_identifier_aborts_the_batch() {
    let rows = vec![
        Row::new(1i64, "a"),
        Row::new(Value::Null, "b"),
        Row::new(2i64, "c"),
    ];
    let err = aggregate(rows, &AggregateConfig::default()).expect_err("must fail");

    assert!(matches!(
        err,
        Error::InvalidRow(InvalidRowError::MissingKey { index: 1 }),
    ));
}

#[test]
fn non_integer_identifier_aborts_the_batch() {
    let rows = vec![Row::new("one", "a")];
    let err = aggregate(rows, &AggregateConfig::default()).expect_err("must fail");

    match err {
        Error::InvalidRow(InvalidRowError::UnkeyableKey {
            index,
            type_label,
            value,
        }) => {
            assert_eq!(index, 0);
            assert_eq!(type_label, "text");
            assert_eq!(value, Value::Text("one".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn float_identifier_is_rejected() {
    let rows = vec![Row::new(Value::Float64(Float64::try_new(1.0).unwrap()), "a")];

    assert!(aggregate(rows, &AggregateConfig::default()).is_err());
}

#[test]
fn mixed_signedness_identifiers_address_one_parent() {
    let rows = vec![
        Row::new(Value::Int(9), "a"),
        Row::new(Value::Uint(9), "b"),
    ];
    let result = aggregate(rows, &AggregateConfig::default()).expect("aggregate");

    assert_eq!(result.count(), 1);
    let parent = result.one().expect("one parent");
    // The identifier keeps the representation of the first row seen.
    assert_eq!(parent.key(), &Value::Int(9));
    assert_eq!(parent.children().len(), 2);
}

#[test]
fn parent_fields_come_from_the_first_row_of_the_group() {
    let rows = vec![
        Row::new(1i64, "a").with_field("text", "first"),
        Row::new(1i64, "b").with_field("text", "stale"),
    ];
    let result = aggregate(rows, &AggregateConfig::default()).expect("aggregate");

    let parent = result.one().expect("one parent");
    assert_eq!(parent.field("text"), Some(&Value::Text("first".to_string())));
}

#[test]
fn observability_counts_rows_parents_and_children() {
    let rows = vec![
        Row::new(1i64, "a"),
        Row::new(1i64, "b"),
        Row::new(2i64, "c"),
    ];
    let result = aggregate(rows, &AggregateConfig::default()).expect("aggregate");

    let obs = result.observability();
    assert_eq!(obs.rows(), 3);
    assert_eq!(obs.parents(), 2);
    assert_eq!(obs.children(), 3);
}

#[test]
fn flatten_then_aggregate_round_trips() {
    let rows = vec![
        Row::new(1i64, "funny").with_field("text", "first"),
        Row::new(1i64, "happy").with_field("text", "first"),
        Row::new(2i64, "silly").with_field("text", "second"),
    ];
    let config = tags_config();

    let first = aggregate(rows, &config).expect("aggregate");
    let second = aggregate(first.clone().flatten(), &config).expect("re-aggregate");

    assert_eq!(first, second);
}
