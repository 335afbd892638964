use crate::mocks::mock_engine::rows_in_statement;
use crate::mocks::{Counter, MockEngine, StuTb, Untagged};
use batch_update_engine::{BatchOption, BatchUpdateEngine, NameMapping};
use serde_json::json;

fn id_list(ids: std::ops::RangeInclusive<i64>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

#[tokio::test]
async fn test_canonical_case_statement() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![Counter::new(1, 5), Counter::new(2, 7)];

    let affected = engine
        .table("t")
        .pk("id")
        .cols(["count"])
        .update(&rows)
        .await
        .unwrap();

    assert_eq!(affected, 2);
    assert_eq!(
        mock.executed(),
        vec!["update t set count = case id when 1 then '5' when 2 then '7' end where id in (1,2)"]
    );
    assert!(mock.metadata_calls().is_empty());
}

#[tokio::test]
async fn test_rows_split_into_bounded_statements() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows: Vec<Counter> = (1..=1201).map(|id| Counter::new(id, id % 7)).collect();

    let affected = engine.cols(["count"]).update(&rows).await.unwrap();

    let executed = mock.executed();
    assert_eq!(affected, 1201);
    assert_eq!(executed.len(), 3);
    assert_eq!(
        executed.iter().map(|sql| rows_in_statement(sql)).collect::<Vec<_>>(),
        vec![500, 500, 201]
    );
    assert!(executed[0].ends_with(&format!("where id in ({})", id_list(1..=500))));
    assert!(executed[1].ends_with(&format!("where id in ({})", id_list(501..=1000))));
    assert!(executed[2].ends_with(&format!("where id in ({})", id_list(1001..=1201))));
}

#[tokio::test]
async fn test_custom_batch_size() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows: Vec<Counter> = (1..=10).map(|id| Counter::new(id, id)).collect();

    engine
        .set_opt([BatchOption::OnceMaxCount(4)])
        .cols(["count"])
        .update(&rows)
        .await
        .unwrap();

    assert_eq!(mock.executed().len(), 3);
}

#[tokio::test]
async fn test_metadata_resolved_from_first_row() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![StuTb::new(4920, "ann", 106), StuTb::new(4921, "bo", 10)];

    let affected = engine.cols(["user_count"]).update(&rows).await.unwrap();

    assert_eq!(affected, 2);
    assert_eq!(mock.metadata_calls(), vec!["primary_key", "table_name"]);
    assert_eq!(
        mock.executed()[0],
        "update stu_tb set user_count = case id when 4920 then '106' when 4921 then '10' end where id in (4920,4921)"
    );
}

#[tokio::test]
async fn test_metadata_resolved_once_per_operation() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows: Vec<StuTb> = (1..=6).map(|id| StuTb::new(id, "x", 1)).collect();

    engine
        .set_max_update_count(2)
        .cols(["user_count"])
        .update(&rows)
        .await
        .unwrap();

    assert_eq!(mock.executed().len(), 3);
    assert_eq!(mock.metadata_calls(), vec!["primary_key", "table_name"]);
}

#[tokio::test]
async fn test_case_expressions_cast_to_adapter_column_types() {
    let mock = MockEngine::new().with_column_types(&[("count", "integer")]);
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows: Vec<Counter> = (1..=3).map(|id| Counter::new(id, id * 10)).collect();

    let affected = engine
        .set_max_update_count(2)
        .cols(["count"])
        .update(&rows)
        .await
        .unwrap();

    assert_eq!(affected, 3);
    assert_eq!(
        mock.executed(),
        vec![
            "update t set count = (case id when 1 then '10' when 2 then '20' end)::integer where id in (1,2)",
            "update t set count = (case id when 3 then '30' end)::integer where id in (3)",
        ]
    );
    // One lookup per operation, not per chunk
    assert_eq!(
        mock.column_type_lookups(),
        vec![("t".to_string(), vec!["count".to_string()])]
    );
}

#[tokio::test]
async fn test_auto_update_all_columns() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![StuTb::new(1, "ann", 3), StuTb::new(2, "bo", 4)];

    engine
        .set_opt([BatchOption::AutoUpdateAllCols(true)])
        .update(&rows)
        .await
        .unwrap();

    assert_eq!(mock.metadata_calls(), vec!["primary_key", "table_name", "columns"]);
    assert_eq!(
        mock.executed()[0],
        "update stu_tb set name = case id when 1 then 'ann' when 2 then 'bo' end, \
         user_count = case id when 1 then '3' when 2 then '4' end where id in (1,2)"
    );
}

#[tokio::test]
async fn test_explicit_columns_win_over_auto_all() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![StuTb::new(1, "ann", 3)];

    engine
        .set_opt([BatchOption::AutoUpdateAllCols(true)])
        .cols(["name"])
        .update(&rows)
        .await
        .unwrap();

    assert!(!mock.metadata_calls().contains(&"columns"));
    assert_eq!(
        mock.executed()[0],
        "update stu_tb set name = case id when 1 then 'ann' end where id in (1)"
    );
}

#[tokio::test]
async fn test_duplicate_primary_key_last_write_wins() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![Counter::new(1, 5), Counter::new(2, 6), Counter::new(1, 9)];

    let affected = engine.cols(["count"]).update(&rows).await.unwrap();

    // The earlier row for id 1 is dropped; its key keeps the first position
    assert_eq!(affected, 2);
    assert_eq!(
        mock.executed()[0],
        "update t set count = case id when 1 then '9' when 2 then '6' end where id in (1,2)"
    );
}

#[tokio::test]
async fn test_quotes_escaped_by_default() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![StuTb::new(1, "O'Brien", 0)];

    engine.cols(["name"]).update(&rows).await.unwrap();
    assert_eq!(
        mock.executed()[0],
        "update stu_tb set name = case id when 1 then 'O''Brien' end where id in (1)"
    );
}

#[tokio::test]
async fn test_raw_interpolation_keeps_values_verbatim() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![StuTb::new(1, "O'Brien", 0)];

    engine
        .set_opt([BatchOption::RawInterpolation(true)])
        .cols(["name"])
        .update(&rows)
        .await
        .unwrap();
    assert_eq!(
        mock.executed()[0],
        "update stu_tb set name = case id when 1 then 'O'Brien' end where id in (1)"
    );
}

#[tokio::test]
async fn test_json_rows_with_snake_mapping() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![
        json!({"__table": "stu_tb", "__pk": "id", "id": 10, "user_count": 1}),
        json!({"id": 11, "user_count": null}),
    ];

    engine
        .set_opt([BatchOption::NameMapping(NameMapping::Snake)])
        .cols(["user_count"])
        .update(&rows)
        .await
        .unwrap();

    assert_eq!(
        mock.executed()[0],
        "update stu_tb set user_count = case id when 10 then '1' when 11 then NULL end where id in (10,11)"
    );
}

#[tokio::test]
async fn test_float_values_and_explicit_metadata() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![Untagged { id: 3, score: 1.5 }];

    engine
        .table("scores")
        .pk("id")
        .cols(["score"])
        .update(&rows)
        .await
        .unwrap();

    assert_eq!(
        mock.executed()[0],
        "update scores set score = case id when 3 then '1.5' end where id in (3)"
    );
}

#[test]
fn test_update_runs_on_blocking_executor() {
    let mock = MockEngine::new();
    let mut engine = BatchUpdateEngine::new(mock.clone());
    let rows = vec![Counter::new(1, 1)];

    let affected = tokio_test::block_on(engine.cols(["count"]).update(&rows)).unwrap();
    assert_eq!(affected, 1);
}
