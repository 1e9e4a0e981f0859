use crate::standard_client;

async fn dump(seed: u64) -> Vec<String> {
    let client = standard_client(seed);
    let mut tables = Vec::new();
    for table in client.table_names() {
        let response = client.from(table).await;
        assert!(response.error.is_none(), "{table} failed: {:?}", response.error);
        tables.push(serde_json::to_string(&response).unwrap());
    }
    tables
}

#[tokio::test]
async fn test_independent_caches_produce_identical_bytes() {
    assert_eq!(dump(42).await, dump(42).await);
}

#[tokio::test]
async fn test_regeneration_after_clear_is_identical() {
    let client = standard_client(42);
    let before = serde_json::to_string(&client.from("social_posts").await).unwrap();
    client.clear_cache();
    let after = serde_json::to_string(&client.from("social_posts").await).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_different_seed_changes_procedural_tables() {
    let a = standard_client(42).from("daily_activity").await;
    let b = standard_client(7).from("daily_activity").await;
    assert_eq!(a.rows().len(), b.rows().len());
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_tabulated_tables_ignore_seed() {
    let a = standard_client(42).from("monthly_summary").await;
    let b = standard_client(7).from("monthly_summary").await;
    assert_eq!(a, b);
}
