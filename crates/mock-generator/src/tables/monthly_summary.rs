//! `monthly_summary`: hand-authored monthly rollups for 2024.

use crate::error::GeneratorError;
use crate::registry::{GenerationContext, TableGenerator};
use mock_core::{into_records, Record, TableRow};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub month: &'static str,
    pub active_users: i64,
    pub new_users: i64,
    pub revenue: f64,
    pub churn_rate: f64,
}

// month, active users, new users, revenue, churn rate
const MONTHS: [(&str, i64, i64, f64, f64); 12] = [
    ("2024-01", 21_400, 3_120, 48_250.00, 0.061),
    ("2024-02", 22_150, 2_870, 50_110.50, 0.058),
    ("2024-03", 23_900, 3_340, 53_980.25, 0.055),
    ("2024-04", 24_600, 3_010, 55_420.00, 0.057),
    ("2024-05", 27_300, 3_960, 61_870.75, 0.049),
    ("2024-06", 29_800, 4_410, 67_300.00, 0.046),
    ("2024-07", 25_200, 2_690, 58_940.40, 0.071),
    ("2024-08", 25_900, 2_930, 60_125.00, 0.066),
    ("2024-09", 28_100, 3_780, 64_880.60, 0.052),
    ("2024-10", 26_700, 2_950, 62_410.00, 0.063),
    ("2024-11", 30_400, 4_020, 70_955.30, 0.048),
    ("2024-12", 33_200, 4_680, 77_640.90, 0.044),
];

/// Generator for [`MonthlySummary`].
#[derive(Debug, Default)]
pub struct MonthlySummaryGenerator;

impl MonthlySummaryGenerator {
    pub fn rows() -> Vec<MonthlySummary> {
        MONTHS
            .iter()
            .map(
                |&(month, active_users, new_users, revenue, churn_rate)| MonthlySummary {
                    month,
                    active_users,
                    new_users,
                    revenue,
                    churn_rate,
                },
            )
            .collect()
    }
}

impl TableRow for MonthlySummary {
    const TABLE: &'static str = "monthly_summary";

    fn into_record(self) -> Record {
        Record::new()
            .field("month", self.month)
            .field("active_users", self.active_users)
            .field("new_users", self.new_users)
            .field("revenue", self.revenue)
            .field("churn_rate", self.churn_rate)
    }
}

impl TableGenerator for MonthlySummaryGenerator {
    fn table(&self) -> &str {
        MonthlySummary::TABLE
    }

    fn generate(&self, _ctx: &GenerationContext<'_>) -> Result<Vec<Record>, GeneratorError> {
        Ok(into_records(Self::rows()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_ordered_months() {
        let rows = MonthlySummaryGenerator::rows();
        assert_eq!(rows.len(), 12);
        assert!(rows.windows(2).all(|w| w[0].month < w[1].month));
        assert!(rows.iter().all(|r| (0.0..=1.0).contains(&r.churn_rate)));
    }
}
