//! `retention_cohorts`: monthly sign-up cohorts and their retention curve.
//!
//! Long format, one row per (cohort, period). Only periods that have elapsed
//! by the end of history are emitted, giving the usual triangle.

use super::{round_to, to_count, RETENTION};
use crate::error::GeneratorError;
use crate::registry::{GenerationContext, TableGenerator};
use crate::sequence::SeedSequence;
use mock_core::{into_records, Record, TableRow};

const COHORTS: u64 = 12;
const MIN_RATE: f64 = 0.05;
const MAX_RATE: f64 = 0.95;

#[derive(Debug, Clone, PartialEq)]
pub struct RetentionCohort {
    pub cohort_month: String,
    pub cohort_size: i64,
    pub period: i64,
    pub retention_rate: f64,
    pub retained_users: i64,
}

impl TableRow for RetentionCohort {
    const TABLE: &'static str = "retention_cohorts";

    fn into_record(self) -> Record {
        Record::new()
            .field("cohort_month", self.cohort_month)
            .field("cohort_size", self.cohort_size)
            .field("period", self.period)
            .field("retention_rate", self.retention_rate)
            .field("retained_users", self.retained_users)
    }
}

/// Generator for [`RetentionCohort`].
#[derive(Debug, Default)]
pub struct RetentionGenerator;

impl RetentionGenerator {
    pub fn rows(seeds: &SeedSequence) -> Vec<RetentionCohort> {
        let mut rows = Vec::new();
        for cohort in 0..COHORTS {
            let month = format!("2024-{:02}", cohort + 1);
            let base_seed = RETENTION.seed(cohort * 100);
            let growth = 900.0 + 60.0 * cohort as f64;
            let cohort_size = to_count(growth * (1.0 + seeds.jitter(base_seed, 0.1)), 100);

            // June and December cohorts sign up for exams and stay longer
            let loyalty = if matches!(cohort, 5 | 11) { 0.06 } else { 0.0 };

            for period in 1..COHORTS - cohort {
                let decay = (-0.18 * (period - 1) as f64).exp();
                let rate = (0.58 * decay + loyalty + seeds.jitter(base_seed + period, 0.04))
                    .clamp(MIN_RATE, MAX_RATE);
                let retention_rate = round_to(rate, 4);

                rows.push(RetentionCohort {
                    cohort_month: month.clone(),
                    cohort_size,
                    period: period as i64,
                    retention_rate,
                    retained_users: to_count(cohort_size as f64 * retention_rate, 0),
                });
            }
        }
        rows
    }
}

impl TableGenerator for RetentionGenerator {
    fn table(&self) -> &str {
        RetentionCohort::TABLE
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<Record>, GeneratorError> {
        Ok(into_records(Self::rows(&ctx.seeds())))
    }
}
