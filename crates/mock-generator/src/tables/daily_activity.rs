//! `daily_activity`: one row per day of active users, sessions and sign-ups.
//!
//! This is the root table of the dataset. Feature usage and revenue scale by
//! its `active_user_count`, reading it back through the cache.

use super::{
    history, linear_trend, round_to, to_count, ACTIVE_USERS, NEW_USERS, SESSIONS, SESSION_LENGTH,
};
use crate::calendar::DayProfile;
use crate::error::GeneratorError;
use crate::registry::{GenerationContext, TableGenerator};
use crate::sequence::SeedSequence;
use chrono::NaiveDate;
use mock_core::{into_records, Record, TableRow};

const ACTIVE_FROM: f64 = 1_800.0;
const ACTIVE_TO: f64 = 3_200.0;
const ACTIVE_JITTER: f64 = 0.08;
const MIN_ACTIVE_USERS: i64 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub active_user_count: i64,
    pub new_user_count: i64,
    pub session_count: i64,
    pub avg_session_minutes: f64,
    pub is_weekend: bool,
    pub is_holiday: bool,
    pub is_near_exam: bool,
}

impl DailyActivity {
    /// Build the row for one day.
    pub fn for_day(seeds: &SeedSequence, day_index: u64, date: NaiveDate) -> Self {
        let profile = DayProfile::classify(date);
        let baseline = linear_trend(day_index, ACTIVE_FROM, ACTIVE_TO);
        let active = to_count(
            baseline * profile.multiplier() * (1.0 + seeds.jitter(ACTIVE_USERS.seed(day_index), ACTIVE_JITTER)),
            MIN_ACTIVE_USERS,
        );

        let signup_rate = seeds.range(NEW_USERS.seed(day_index), 0.04, 0.09);
        let sessions_per_user = 1.6 + 0.6 * seeds.value(SESSIONS.seed(day_index));

        let mut minutes = 18.0 + seeds.jitter(SESSION_LENGTH.seed(day_index), 4.0);
        if profile.near_exam {
            minutes += 6.0;
        }
        if profile.is_weekend() {
            minutes -= 3.0;
        }

        Self {
            date,
            active_user_count: active,
            new_user_count: to_count(active as f64 * signup_rate, 1),
            session_count: to_count(active as f64 * sessions_per_user, active),
            avg_session_minutes: round_to(minutes.clamp(5.0, 60.0), 1),
            is_weekend: profile.is_weekend(),
            is_holiday: profile.holiday,
            is_near_exam: profile.near_exam,
        }
    }

    /// Read a row back from a cached record.
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            date: record.get_date("date")?,
            active_user_count: record.get_i64("active_user_count")?,
            new_user_count: record.get_i64("new_user_count")?,
            session_count: record.get_i64("session_count")?,
            avg_session_minutes: record.get_f64("avg_session_minutes")?,
            is_weekend: record.get("is_weekend").as_bool()?,
            is_holiday: record.get("is_holiday").as_bool()?,
            is_near_exam: record.get("is_near_exam").as_bool()?,
        })
    }
}

impl TableRow for DailyActivity {
    const TABLE: &'static str = "daily_activity";

    fn into_record(self) -> Record {
        Record::new()
            .field("date", self.date)
            .field("active_user_count", self.active_user_count)
            .field("new_user_count", self.new_user_count)
            .field("session_count", self.session_count)
            .field("avg_session_minutes", self.avg_session_minutes)
            .field("is_weekend", self.is_weekend)
            .field("is_holiday", self.is_holiday)
            .field("is_near_exam", self.is_near_exam)
    }
}

/// Generator for [`DailyActivity`].
#[derive(Debug, Default)]
pub struct DailyActivityGenerator;

impl DailyActivityGenerator {
    pub fn rows(seeds: &SeedSequence) -> Vec<DailyActivity> {
        history()
            .map(|(day_index, date)| DailyActivity::for_day(seeds, day_index, date))
            .collect()
    }
}

impl TableGenerator for DailyActivityGenerator {
    fn table(&self) -> &str {
        DailyActivity::TABLE
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<Record>, GeneratorError> {
        Ok(into_records(Self::rows(&ctx.seeds())))
    }
}

/// Decode a cached `daily_activity` snapshot, failing on malformed rows.
pub(crate) fn decode(table: &str, records: &[Record]) -> Result<Vec<DailyActivity>, GeneratorError> {
    records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            DailyActivity::from_record(record).ok_or_else(|| GeneratorError::Invalid {
                table: table.to_string(),
                message: format!("malformed daily_activity row {row}"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean(values: impl Iterator<Item = i64>) -> f64 {
        let (sum, n) = values.fold((0i64, 0usize), |(s, n), v| (s + v, n + 1));
        sum as f64 / n as f64
    }

    #[test]
    fn test_counts_positive_and_dates_sequential() {
        let rows = DailyActivityGenerator::rows(&SeedSequence::default());
        assert_eq!(rows.len(), 366);
        for pair in rows.windows(2) {
            assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
        for row in &rows {
            assert!(row.active_user_count >= MIN_ACTIVE_USERS);
            assert!(row.new_user_count >= 1);
            assert!(row.session_count >= row.active_user_count);
            assert!((5.0..=60.0).contains(&row.avg_session_minutes));
        }
    }

    #[test]
    fn test_weekend_mean_below_weekday_mean() {
        let rows = DailyActivityGenerator::rows(&SeedSequence::default());
        let weekend = mean(rows.iter().filter(|r| r.is_weekend).map(|r| r.active_user_count));
        let weekday = mean(rows.iter().filter(|r| !r.is_weekend).map(|r| r.active_user_count));
        assert!(weekend < weekday, "weekend {weekend} >= weekday {weekday}");
    }

    #[test]
    fn test_near_exam_mean_above_surrounding_days() {
        let rows = DailyActivityGenerator::rows(&SeedSequence::default());
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let window: Vec<_> = rows
            .iter()
            .filter(|r| r.date >= start && r.date <= end)
            .collect();

        let flagged = mean(window.iter().filter(|r| r.is_near_exam).map(|r| r.active_user_count));
        let unflagged = mean(window.iter().filter(|r| !r.is_near_exam).map(|r| r.active_user_count));
        assert!(flagged > unflagged, "flagged {flagged} <= unflagged {unflagged}");
    }

    #[test]
    fn test_record_round_trip_through_typed_row() {
        let seeds = SeedSequence::default();
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let row = DailyActivity::for_day(&seeds, 63, date);
        let record = row.clone().into_record();

        assert_eq!(DailyActivity::from_record(&record), Some(row));
        assert!(DailyActivity::from_record(&Record::new()).is_none());
    }
}
