//! `feature_usage`: per-day, per-feature usage scaled by that day's active users.

use super::daily_activity::{self, DailyActivity};
use super::{day_index, round_to, to_count, FEATURE_ADOPTION, FEATURE_STRIDE};
use crate::error::GeneratorError;
use crate::registry::{GenerationContext, TableGenerator};
use crate::sequence::SeedSequence;
use chrono::NaiveDate;
use mock_core::{into_records, Record, TableRow};

/// Feature name, adoption on the first day, adoption gained by the last day.
pub const FEATURES: [(&str, f64, f64); 5] = [
    ("practice_tests", 0.42, 0.05),
    ("video_lessons", 0.35, 0.02),
    ("flashcards", 0.28, 0.04),
    ("ai_tutor", 0.06, 0.22),
    ("study_groups", 0.08, 0.03),
];

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureUsage {
    pub date: NaiveDate,
    pub feature: &'static str,
    pub usage_count: i64,
    pub adoption_rate: f64,
}

impl TableRow for FeatureUsage {
    const TABLE: &'static str = "feature_usage";

    fn into_record(self) -> Record {
        Record::new()
            .field("date", self.date)
            .field("feature", self.feature)
            .field("usage_count", self.usage_count)
            .field("adoption_rate", self.adoption_rate)
    }
}

/// Generator for [`FeatureUsage`]; depends on `daily_activity`.
#[derive(Debug, Default)]
pub struct FeatureUsageGenerator;

impl FeatureUsageGenerator {
    pub fn rows(seeds: &SeedSequence, activity: &[DailyActivity]) -> Vec<FeatureUsage> {
        let mut rows = Vec::with_capacity(activity.len() * FEATURES.len());
        for day in activity {
            let Some(idx) = day_index(day.date) else {
                continue;
            };
            let progress = idx as f64 / 365.0;

            for (f, &(feature, start, gain)) in FEATURES.iter().enumerate() {
                let seed = FEATURE_ADOPTION.seed(idx * FEATURE_STRIDE + f as u64);
                let mut adoption = start + gain * progress + seeds.jitter(seed, 0.03);
                if day.is_near_exam && feature == "practice_tests" {
                    adoption += 0.08;
                }
                let adoption_rate = round_to(adoption.clamp(0.0, 1.0), 4);

                rows.push(FeatureUsage {
                    date: day.date,
                    feature,
                    usage_count: to_count(day.active_user_count as f64 * adoption_rate, 0),
                    adoption_rate,
                });
            }
        }
        rows
    }
}

impl TableGenerator for FeatureUsageGenerator {
    fn table(&self) -> &str {
        FeatureUsage::TABLE
    }

    fn dependencies(&self) -> &[&'static str] {
        &[DailyActivity::TABLE]
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<Record>, GeneratorError> {
        let snapshot = ctx.dependency(DailyActivity::TABLE)?;
        let activity = daily_activity::decode(ctx.table(), &snapshot)?;
        Ok(into_records(Self::rows(&ctx.seeds(), &activity)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::DailyActivityGenerator;

    #[test]
    fn test_usage_never_exceeds_same_day_actives() {
        let seeds = SeedSequence::default();
        let activity = DailyActivityGenerator::rows(&seeds);
        let usage = FeatureUsageGenerator::rows(&seeds, &activity);

        assert_eq!(usage.len(), activity.len() * FEATURES.len());
        for (i, row) in usage.iter().enumerate() {
            let day = &activity[i / FEATURES.len()];
            assert_eq!(row.date, day.date);
            assert!(row.usage_count <= day.active_user_count);
            assert!((0.0..=1.0).contains(&row.adoption_rate));
        }
    }

    #[test]
    fn test_ai_tutor_adoption_grows() {
        let seeds = SeedSequence::default();
        let activity = DailyActivityGenerator::rows(&seeds);
        let usage = FeatureUsageGenerator::rows(&seeds, &activity);
        let tutor: Vec<_> = usage.iter().filter(|r| r.feature == "ai_tutor").collect();

        let early: f64 = tutor[..30].iter().map(|r| r.adoption_rate).sum::<f64>() / 30.0;
        let late: f64 = tutor[tutor.len() - 30..].iter().map(|r| r.adoption_rate).sum::<f64>() / 30.0;
        assert!(late > early);
    }
}
