use crate::mocks::{Counter, MockEngine, PanickingRow, StuTb, Untagged};
use batch_update_engine::{BatchOption, BatchUpdateEngine, BatchUpdateError};
use serde_json::json;

#[tokio::test]
async fn test_zero_rows_is_configuration_error() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows: Vec<Counter> = Vec::new();

    let failure = engine.cols(["count"]).update(&rows).await.unwrap_err();

    assert_eq!(failure.affected, 0);
    assert!(matches!(failure.source, BatchUpdateError::NoRows));
    assert!(failure.source.is_configuration_error());
    assert!(mock.executed().is_empty());
}

#[tokio::test]
async fn test_missing_columns_fail_before_adapter_calls() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![StuTb::new(1, "ann", 3)];

    let failure = engine.update(&rows).await.unwrap_err();

    assert!(matches!(failure.source, BatchUpdateError::NoColumns));
    assert_eq!(failure.source.to_string(), "no columns to update");
    assert!(mock.metadata_calls().is_empty());
    assert!(mock.executed().is_empty());
}

#[tokio::test]
async fn test_partial_success_preserved_when_second_chunk_fails() {
    let mock = MockEngine::new().failing_on(2);
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows: Vec<Counter> = (1..=7).map(|id| Counter::new(id, id)).collect();

    let failure = engine
        .set_max_update_count(3)
        .cols(["count"])
        .update(&rows)
        .await
        .unwrap_err();

    assert_eq!(failure.affected, 3);
    assert!(matches!(failure.source, BatchUpdateError::Adapter { .. }));
    // The third chunk never runs
    assert_eq!(mock.executed().len(), 2);
}

#[tokio::test]
async fn test_synthesis_failure_stops_later_chunks() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![
        json!({"Id": 1, "Count": 1}),
        json!({"Id": 2, "Count": 2}),
        json!("not a row"),
        json!({"Id": 4, "Count": 4}),
        json!({"Id": 5, "Count": 5}),
    ];

    let failure = engine
        .set_max_update_count(2)
        .table("t")
        .pk("id")
        .cols(["count"])
        .update(&rows)
        .await
        .unwrap_err();

    assert_eq!(failure.affected, 2);
    assert!(matches!(failure.source, BatchUpdateError::NotARecord { index: 2 }));
    assert!(failure.source.is_type_error());
    assert_eq!(mock.executed().len(), 1);
}

#[tokio::test]
async fn test_undeclared_primary_key_aborts() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![Untagged { id: 1, score: 2.0 }];

    let failure = engine.table("scores").cols(["score"]).update(&rows).await.unwrap_err();

    assert!(matches!(failure.source, BatchUpdateError::UnknownPrimaryKey { .. }));
    assert!(mock.executed().is_empty());
}

#[tokio::test]
async fn test_undeclared_table_name_aborts() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![Untagged { id: 1, score: 2.0 }];

    let failure = engine.pk("id").cols(["score"]).update(&rows).await.unwrap_err();

    assert!(matches!(failure.source, BatchUpdateError::MissingTableName));
    assert!(mock.executed().is_empty());
}

#[tokio::test]
async fn test_non_integer_primary_key_rejected() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![json!({"Code": "abc", "Count": 1})];

    let failure = engine
        .table("t")
        .pk("code")
        .cols(["count"])
        .update(&rows)
        .await
        .unwrap_err();

    match failure.source {
        BatchUpdateError::NonIntegerPrimaryKey { column, value } => {
            assert_eq!(column, "code");
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_missing_member_rejected() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![StuTb::new(1, "ann", 3)];

    let failure = engine.cols(["nickname"]).update(&rows).await.unwrap_err();

    assert!(matches!(
        failure.source,
        BatchUpdateError::MissingField { ref member, .. } if member == "Nickname"
    ));
}

#[tokio::test]
async fn test_panicking_row_becomes_fault() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows: Vec<PanickingRow> = (1..=4)
        .map(|id| PanickingRow { id, explode_on: 3 })
        .collect();

    let failure = engine
        .set_opt([BatchOption::OnceMaxCount(2), BatchOption::ShowLog(true)])
        .cols(["count"])
        .update(&rows)
        .await
        .unwrap_err();

    assert_eq!(failure.affected, 2);
    match failure.source {
        BatchUpdateError::Fault { message } => {
            assert_eq!(message, "accessor exploded on row 3");
        }
        other => panic!("unexpected error: {other}"),
    }

    // The engine stays usable after a caught panic
    let rows = vec![Counter::new(1, 1)];
    assert_eq!(engine.cols(["count"]).update(&rows).await.unwrap(), 1);
}

#[tokio::test]
async fn test_auto_all_columns_with_empty_column_set_is_rejected() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![Untagged { id: 1, score: 2.0 }];

    let failure = engine
        .set_opt([BatchOption::AutoUpdateAllCols(true)])
        .table("scores")
        .pk("id")
        .update(&rows)
        .await
        .unwrap_err();

    assert!(matches!(failure.source, BatchUpdateError::NoColumns));
    assert_eq!(mock.metadata_calls(), vec!["columns"]);
    assert!(mock.column_type_lookups().is_empty());
    assert!(mock.executed().is_empty());
}

#[tokio::test]
async fn test_panicking_adapter_becomes_fault_and_clears_state() {
    let mock = MockEngine::new().panicking_on(2);
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows: Vec<Counter> = (1..=5).map(|id| Counter::new(id, id)).collect();

    let failure = engine
        .set_max_update_count(2)
        .table("t")
        .pk("id")
        .cols(["count"])
        .update(&rows)
        .await
        .unwrap_err();

    assert_eq!(failure.affected, 2);
    match failure.source {
        BatchUpdateError::Fault { message } => {
            assert_eq!(message, "driver crashed on statement 2");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(mock.executed().len(), 2);
    assert!(engine.columns().is_empty());
    assert!(engine.primary_key().is_empty());
    assert!(engine.table_name().is_empty());
}
