//! Built-in dashboard tables.
//!
//! Procedural tables compose a baseline trend, the calendar multiplier and
//! seeded jitter over a fixed history; tabulated tables are hand-authored.
//! Each table defines its typed row once and converts to records at the end.
//!
//! Every generated quantity draws from its own [`SeedStream`], a block of
//! seeds reserved for it alone (see [`STREAMS`]), so two quantities never
//! share a random draw.

pub mod daily_activity;
pub mod feature_usage;
pub mod monthly_summary;
pub mod retention;
pub mod revenue;
pub mod segments;
pub mod social;

use crate::registry::TableGenerator;
use chrono::NaiveDate;
use std::sync::Arc;

pub use daily_activity::{DailyActivity, DailyActivityGenerator};
pub use feature_usage::{FeatureUsage, FeatureUsageGenerator};
pub use monthly_summary::{MonthlySummary, MonthlySummaryGenerator};
pub use retention::{RetentionCohort, RetentionGenerator};
pub use revenue::{DailyRevenue, DailyRevenueGenerator};
pub use segments::{UserSegment, UserSegmentsGenerator};
pub use social::{SocialAccount, SocialAccountsGenerator, SocialPost, SocialPostsGenerator};

/// Number of days of generated history (all of 2024).
pub const HISTORY_DAYS: u64 = 366;

/// First day of generated history.
pub fn history_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

/// Last day of generated history, inclusive.
pub fn history_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default()
}

/// Every day of history with its day index.
pub fn history() -> impl Iterator<Item = (u64, NaiveDate)> {
    history_start()
        .iter_days()
        .take(HISTORY_DAYS as usize)
        .enumerate()
        .map(|(i, date)| (i as u64, date))
}

/// Day index of `date` within history, `None` outside it.
pub fn day_index(date: NaiveDate) -> Option<u64> {
    let days = (date - history_start()).num_days();
    u64::try_from(days).ok().filter(|d| *d < HISTORY_DAYS)
}

/// Linear baseline from `from` on the first day to `to` on the last.
pub fn linear_trend(day_index: u64, from: f64, to: f64) -> f64 {
    let progress = day_index as f64 / (HISTORY_DAYS - 1) as f64;
    from + (to - from) * progress
}

/// Round to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round a non-negative quantity to a count, flooring at `min`.
pub fn to_count(value: f64, min: i64) -> i64 {
    (value.round() as i64).max(min)
}

/// A contiguous block of seeds reserved for one generated quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedStream {
    pub name: &'static str,
    pub base: u64,
    pub width: u64,
}

impl SeedStream {
    pub const fn new(name: &'static str, base: u64, width: u64) -> Self {
        Self { name, base, width }
    }

    /// Seed at `offset` within the stream; callers keep `offset < width`.
    pub fn seed(&self, offset: u64) -> u64 {
        self.base + offset
    }

    /// First seed past the stream.
    pub fn end(&self) -> u64 {
        self.base + self.width
    }

    pub fn overlaps(&self, other: &SeedStream) -> bool {
        self.base < other.end() && other.base < self.end()
    }
}

pub const ACTIVE_USERS: SeedStream = SeedStream::new("active_users", 0, HISTORY_DAYS);
pub const NEW_USERS: SeedStream = SeedStream::new("new_users", 1_000, HISTORY_DAYS);
pub const SESSIONS: SeedStream = SeedStream::new("sessions", 2_000, HISTORY_DAYS);
pub const SESSION_LENGTH: SeedStream = SeedStream::new("session_length", 3_000, HISTORY_DAYS);
/// One seed per (day, feature), `FEATURE_STRIDE` seeds per day.
pub const FEATURE_ADOPTION: SeedStream =
    SeedStream::new("feature_adoption", 5_000, HISTORY_DAYS * FEATURE_STRIDE);
pub const RETENTION: SeedStream = SeedStream::new("retention", 9_000, 1_200);
pub const REVENUE: SeedStream = SeedStream::new("revenue", 13_000, HISTORY_DAYS);
pub const CONVERSION: SeedStream = SeedStream::new("conversion", 13_500, HISTORY_DAYS);
pub const REFUNDS: SeedStream = SeedStream::new("refunds", 14_000, HISTORY_DAYS);
/// `ACCOUNT_STRIDE` seeds per account, `POST_STRIDE` per account-day.
pub const SOCIAL_POSTS: SeedStream = SeedStream::new("social_posts", 20_000, 5 * ACCOUNT_STRIDE);

pub const FEATURE_STRIDE: u64 = 8;
pub const ACCOUNT_STRIDE: u64 = 100_000;
pub const POST_STRIDE: u64 = 16;

/// Every seed stream used by the built-in tables.
pub const STREAMS: [SeedStream; 10] = [
    ACTIVE_USERS,
    NEW_USERS,
    SESSIONS,
    SESSION_LENGTH,
    FEATURE_ADOPTION,
    RETENTION,
    REVENUE,
    CONVERSION,
    REFUNDS,
    SOCIAL_POSTS,
];

/// Every built-in generator, in no particular order.
pub fn standard_generators() -> Vec<Arc<dyn TableGenerator>> {
    vec![
        Arc::new(DailyActivityGenerator),
        Arc::new(MonthlySummaryGenerator),
        Arc::new(RetentionGenerator),
        Arc::new(FeatureUsageGenerator),
        Arc::new(DailyRevenueGenerator),
        Arc::new(SocialAccountsGenerator),
        Arc::new(SocialPostsGenerator::all_platforms()),
        Arc::new(UserSegmentsGenerator),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TableRegistry;

    #[test]
    fn test_history_covers_2024() {
        let days: Vec<_> = history().collect();
        assert_eq!(days.len(), 366);
        assert_eq!(days.first().unwrap().1, history_start());
        assert_eq!(days.last().unwrap().1, history_end());
        assert_eq!(day_index(history_end()), Some(365));
        assert_eq!(day_index(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()), None);
        assert_eq!(day_index(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()), None);
    }

    #[test]
    fn test_trend_and_rounding() {
        assert_eq!(linear_trend(0, 10.0, 20.0), 10.0);
        assert_eq!(linear_trend(HISTORY_DAYS - 1, 10.0, 20.0), 20.0);
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(to_count(-4.0, 1), 1);
        assert_eq!(to_count(7.6, 1), 8);
    }

    #[test]
    fn test_seed_streams_are_disjoint() {
        for (i, a) in STREAMS.iter().enumerate() {
            for b in &STREAMS[i + 1..] {
                assert!(!a.overlaps(b), "{} overlaps {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn test_strided_streams_fit_their_width() {
        let last_day = HISTORY_DAYS - 1;
        let features = feature_usage::FEATURES.len() as u64;
        assert!(features <= FEATURE_STRIDE);
        assert!(FEATURE_ADOPTION.seed(last_day * FEATURE_STRIDE + features - 1) < FEATURE_ADOPTION.end());

        // twelve cohorts, 100 seeds each, at most eleven periods
        assert!(RETENTION.seed(11 * 100 + 11) < RETENTION.end());

        // build_post reads up to seed + 11 for a post
        assert!(last_day * POST_STRIDE + POST_STRIDE <= ACCOUNT_STRIDE);
        assert!(social::SocialAccountsGenerator::rows().len() as u64 * ACCOUNT_STRIDE <= SOCIAL_POSTS.width);
    }

    #[test]
    fn test_feature_and_revenue_draws_differ() {
        assert_ne!(FEATURE_ADOPTION.seed(260 * FEATURE_STRIDE), REVENUE.seed(80));
        assert!(!FEATURE_ADOPTION.overlaps(&REVENUE));
    }

    #[test]
    fn test_standard_registry_builds() {
        let registry = TableRegistry::standard().unwrap();
        assert_eq!(
            registry.table_names(),
            vec![
                "daily_activity",
                "daily_revenue",
                "feature_usage",
                "monthly_summary",
                "retention_cohorts",
                "social_accounts",
                "social_posts",
                "user_segments",
            ]
        );
    }
}
