//! `daily_revenue`: subscription revenue derived from the same day's activity.

use super::daily_activity::{self, DailyActivity};
use super::{day_index, linear_trend, round_to, to_count, CONVERSION, REFUNDS, REVENUE};
use crate::error::GeneratorError;
use crate::registry::{GenerationContext, TableGenerator};
use crate::sequence::SeedSequence;
use chrono::NaiveDate;
use mock_core::{into_records, Record, TableRow};

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
    pub new_subscriptions: i64,
    pub refunds: i64,
    pub arpu: f64,
}

impl TableRow for DailyRevenue {
    const TABLE: &'static str = "daily_revenue";

    fn into_record(self) -> Record {
        Record::new()
            .field("date", self.date)
            .field("revenue", self.revenue)
            .field("new_subscriptions", self.new_subscriptions)
            .field("refunds", self.refunds)
            .field("arpu", self.arpu)
    }
}

/// Generator for [`DailyRevenue`]; depends on `daily_activity`.
#[derive(Debug, Default)]
pub struct DailyRevenueGenerator;

impl DailyRevenueGenerator {
    pub fn rows(seeds: &SeedSequence, activity: &[DailyActivity]) -> Vec<DailyRevenue> {
        activity
            .iter()
            .filter_map(|day| {
                let idx = day_index(day.date)?;
                let per_user = linear_trend(idx, 0.85, 1.20);
                let revenue = (day.active_user_count as f64
                    * per_user
                    * (1.0 + seeds.jitter(REVENUE.seed(idx), 0.1)))
                .max(0.0);
                let conversion = seeds.range(CONVERSION.seed(idx), 0.08, 0.14);

                Some(DailyRevenue {
                    date: day.date,
                    revenue: round_to(revenue, 2),
                    new_subscriptions: to_count(day.new_user_count as f64 * conversion, 0),
                    refunds: seeds.int_range(REFUNDS.seed(idx), 0, 3),
                    arpu: round_to(revenue / day.active_user_count.max(1) as f64, 2),
                })
            })
            .collect()
    }
}

impl TableGenerator for DailyRevenueGenerator {
    fn table(&self) -> &str {
        DailyRevenue::TABLE
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
