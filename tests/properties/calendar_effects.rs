use crate::standard_client;
use mock_backend::Record;

fn mean_active(rows: &[Record]) -> f64 {
    assert!(!rows.is_empty());
    let total: i64 = rows
        .iter()
        .filter_map(|r| r.get_i64("active_user_count"))
        .sum();
    total as f64 / rows.len() as f64
}

#[tokio::test]
async fn test_weekend_mean_below_weekday_mean() {
    let client = standard_client(42);
    let weekend = client.from("daily_activity").eq("is_weekend", true).await;
    let weekday = client.from("daily_activity").eq("is_weekend", false).await;

    assert_eq!(weekend.rows().len() + weekday.rows().len(), 366);
    assert!(mean_active(weekend.rows()) < mean_active(weekday.rows()));
}

#[tokio::test]
async fn test_near_exam_mean_above_unflagged_mean() {
    let client = standard_client(42);
    let near = client.from("daily_activity").eq("is_near_exam", true).await;
    let unflagged = client
        .from("daily_activity")
        .eq("is_near_exam", false)
        .eq("is_holiday", false)
        .await;

    assert!(mean_active(near.rows()) > mean_active(unflagged.rows()));
}

#[tokio::test]
async fn test_holiday_window_is_flagged_and_depressed() {
    let client = standard_client(42);
    let holiday = client.from("daily_activity").eq("is_holiday", true).await;
    assert_eq!(holiday.rows().len(), 7);

    let september = client
        .from("daily_activity")
        .gte("date", "2024-09-01")
        .lt("date", "2024-10-01")
        .await;
    assert!(mean_active(holiday.rows()) < mean_active(september.rows()));
}
