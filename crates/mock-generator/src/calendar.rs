//! Calendar rules used to shape synthetic metrics.
//!
//! All functions are pure classifiers over a date. The events are fixed:
//! a national holiday week every October, and three annual exam dates whose
//! two-week run-up drives study engagement up.

use chrono::{Datelike, NaiveDate, Weekday};

/// First and last day (month, day) of the yearly holiday window, inclusive.
pub const HOLIDAY_WINDOW: ((u32, u32), (u32, u32)) = ((10, 1), (10, 7));

/// Annual exam dates as (month, day): winter finals, national entrance exam,
/// postgraduate entrance exam.
pub const EXAM_DATES: [(u32, u32); 3] = [(1, 10), (6, 7), (12, 23)];

/// Days before an exam (inclusive of the exam day itself) that count as "near".
pub const EXAM_LOOKBACK_DAYS: i64 = 14;

pub const WEEKEND_FACTOR: f64 = 0.72;
pub const HOLIDAY_FACTOR: f64 = 0.55;
pub const NEAR_EXAM_FACTOR: f64 = 1.35;

/// Weekday/weekend classification of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayKind {
    Weekday,
    Weekend,
}

impl DayKind {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Weekday => 1.0,
            Self::Weekend => WEEKEND_FACTOR,
        }
    }
}

pub fn day_of_week(date: NaiveDate) -> DayKind {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayKind::Weekend,
        _ => DayKind::Weekday,
    }
}

pub fn is_holiday_window(date: NaiveDate) -> bool {
    let ((start_month, start_day), (end_month, end_day)) = HOLIDAY_WINDOW;
    let key = (date.month(), date.day());
    key >= (start_month, start_day) && key <= (end_month, end_day)
}

/// True when the date falls within [`EXAM_LOOKBACK_DAYS`] before an exam date.
///
/// Exams early in the year are checked against the following year as well,
/// so late-December dates see the January exam.
pub fn is_near_recurring_event(date: NaiveDate) -> bool {
    [date.year(), date.year() + 1].into_iter().any(|year| {
        EXAM_DATES.iter().any(|&(month, day)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map(|exam| (0..=EXAM_LOOKBACK_DAYS).contains(&(exam - date).num_days()))
                .unwrap_or(false)
        })
    })
}

/// All calendar classifications of one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayProfile {
    pub date: NaiveDate,
    pub kind: DayKind,
    pub holiday: bool,
    pub near_exam: bool,
}

impl DayProfile {
    pub fn classify(date: NaiveDate) -> Self {
        Self {
            date,
            kind: day_of_week(date),
            holiday: is_holiday_window(date),
            near_exam: is_near_recurring_event(date),
        }
    }

    pub fn is_weekend(&self) -> bool {
        self.kind == DayKind::Weekend
    }

    /// Combined engagement multiplier for this day.
    pub fn multiplier(&self) -> f64 {
        let mut factor = self.kind.multiplier();
        if self.holiday {
            factor *= HOLIDAY_FACTOR;
        }
        if self.near_exam {
            factor *= NEAR_EXAM_FACTOR;
        }
        factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_of_week() {
        // 2024-03-04 is a Monday
        assert_eq!(day_of_week(date(2024, 3, 4)), DayKind::Weekday);
        assert_eq!(day_of_week(date(2024, 3, 8)), DayKind::Weekday);
        assert_eq!(day_of_week(date(2024, 3, 9)), DayKind::Weekend);
        assert_eq!(day_of_week(date(2024, 3, 10)), DayKind::Weekend);
    }

    #[test]
    fn test_holiday_window_is_inclusive() {
        assert!(!is_holiday_window(date(2024, 9, 30)));
        assert!(is_holiday_window(date(2024, 10, 1)));
        assert!(is_holiday_window(date(2024, 10, 7)));
        assert!(!is_holiday_window(date(2024, 10, 8)));
        assert!(is_holiday_window(date(2031, 10, 4)));
    }

    #[test]
    fn test_near_exam_lookback() {
        assert!(is_near_recurring_event(date(2024, 6, 7)));
        assert!(is_near_recurring_event(date(2024, 5, 24)));
        assert!(!is_near_recurring_event(date(2024, 5, 23)));
        assert!(!is_near_recurring_event(date(2024, 6, 8)));
    }

    #[test]
    fn test_near_exam_wraps_year_end() {
        // 14 days before Jan 10 is Dec 27 of the previous year
        assert!(is_near_recurring_event(date(2024, 12, 28)));
        assert!(is_near_recurring_event(date(2025, 1, 2)));
        assert!(!is_near_recurring_event(date(2024, 7, 1)));
    }

    #[test]
    fn test_profile_multiplier() {
        let tuesday = DayProfile::classify(date(2024, 3, 5));
        assert_eq!(tuesday.multiplier(), 1.0);

        let saturday = DayProfile::classify(date(2024, 3, 9));
        assert!(saturday.is_weekend());
        assert_eq!(saturday.multiplier(), WEEKEND_FACTOR);

        let holiday = DayProfile::classify(date(2024, 10, 2));
        assert!(holiday.holiday);
        assert!(holiday.multiplier() < 1.0);

        let cram = DayProfile::classify(date(2024, 6, 4));
        assert!(cram.near_exam);
        assert_eq!(cram.multiplier(), NEAR_EXAM_FACTOR);
    }
}
