use crate::{client_with, standard_client, CountingTable};
use futures::future::join_all;
use mock_backend::Record;
use std::sync::atomic::Ordering;

fn table() -> CountingTable {
    CountingTable::new(
        "events",
        (0..10).map(|i| Record::new().field("id", i)).collect(),
    )
}

#[tokio::test]
async fn test_repeated_queries_generate_once() {
    let table = table();
    let calls = table.calls();
    let client = client_with(table);

    for _ in 0..5 {
        let response = client.from("events").eq("id", 3).await;
        assert_eq!(response.rows().len(), 1);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_concurrent_first_access_generates_once() {
    let table = table();
    let calls = table.calls();
    let client = client_with(table);

    let queries = (0..16).map(|i| client.from("events").gte("id", i % 10).execute());
    let responses = join_all(queries).await;

    assert!(responses.iter().all(|r| r.error.is_none()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(client.cache().generation_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_access_across_threads() {
    let table = table();
    let calls = table.calls();
    let client = client_with(table);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.from("events").await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().rows().len(), 10);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_clear_forces_regeneration() {
    let table = table();
    let calls = table.calls();
    let client = client_with(table);

    let _ = client.from("events").await;
    client.clear_cache();
    let _ = client.from("events").await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_derived_tables_reuse_cached_dependencies() {
    let client = standard_client(42);

    let _ = client.from("feature_usage").await;
    let _ = client.from("daily_revenue").await;
    let _ = client.from("daily_activity").await;

    // daily_activity, feature_usage, daily_revenue
    assert_eq!(client.cache().generation_count(), 3);
}
