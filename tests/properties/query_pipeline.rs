use crate::{client_with, standard_client, CountingTable};
use mock_backend::{OrderOptions, QueryData, Record, Response, Value};

fn abc() -> CountingTable {
    CountingTable::new(
        "t",
        vec![
            Record::new().field("a", 1).field("b", 1).field("x", 3),
            Record::new().field("a", 1).field("b", 2).field("x", 8),
            Record::new().field("a", 2).field("b", 1).field("x", 5),
        ],
    )
}

#[tokio::test]
async fn test_filters_are_conjunctive() {
    let client = client_with(abc());
    let response = client.from("t").eq("a", 1).eq("b", 1).await;

    assert_eq!(response.rows().len(), 1);
    let row = &response.rows()[0];
    assert_eq!(row.get_i64("a"), Some(1));
    assert_eq!(row.get_i64("b"), Some(1));
}

#[tokio::test]
async fn test_limit_before_order_still_returns_maximum() {
    let client = client_with(abc());
    let response = client
        .from("t")
        .limit(1)
        .order("x", OrderOptions::descending())
        .await;

    assert_eq!(response.rows().len(), 1);
    assert_eq!(response.rows()[0].get_i64("x"), Some(8));
}

#[tokio::test]
async fn test_single_miss_is_null_data_without_error() {
    let client = client_with(abc());
    let response = client.from("t").eq("a", 42).single().await;
    assert_eq!(response, Response::empty());

    let response = client.from("t").eq("a", 42).maybe_single().await;
    assert_eq!(response, Response::empty());
}

#[tokio::test]
async fn test_single_hit_returns_object() {
    let client = client_with(abc());
    let response = client
        .from("t")
        .order("x", OrderOptions::ascending())
        .single()
        .await;
    match response.data {
        Some(QueryData::One(row)) => assert_eq!(row.get_i64("x"), Some(3)),
        other => panic!("expected one row, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_table_resolves_empty() {
    let client = standard_client(42);
    let response = client.from("page_views").eq("id", 1).limit(5).await;
    assert!(response.error.is_none());
    assert_eq!(response.data, Some(QueryData::Many(Vec::new())));
}

#[tokio::test]
async fn test_malformed_in_operands_are_coerced() {
    let client = client_with(abc());

    let scalar = client.from("t").in_("a", 2).await;
    assert_eq!(scalar.rows().len(), 1);

    let null = client.from("t").in_("a", Value::Null).await;
    assert_eq!(null.rows().len(), 3);

    let text = client.from("t").in_("a", vec!["1", "2"]).await;
    assert_eq!(text.rows().len(), 3);
}

#[tokio::test]
async fn test_results_are_copies() {
    let client = client_with(abc());
    let mut first = client.from("t").await.data.unwrap().into_rows();
    first[0].insert("a", 99);

    let second = client.from("t").eq("a", 99).await;
    assert!(second.rows().is_empty());
}
