//! `user_segments`: hand-authored breakdown of the user base.

use crate::error::GeneratorError;
use crate::registry::{GenerationContext, TableGenerator};
use mock_core::{into_records, Record, TableRow};

#[derive(Debug, Clone, PartialEq)]
pub struct UserSegment {
    pub segment: &'static str,
    pub user_count: i64,
    pub share: f64,
}

const SEGMENTS: [(&str, i64, f64); 5] = [
    ("high_school", 14_200, 0.4277),
    ("university", 9_850, 0.2967),
    ("postgraduate_prep", 4_630, 0.1395),
    ("working_professional", 3_120, 0.0940),
    ("other", 1_400, 0.0422),
];

impl TableRow for UserSegment {
    const TABLE: &'static str = "user_segments";

    fn into_record(self) -> Record {
        Record::new()
            .field("segment", self.segment)
            .field("user_count", self.user_count)
            .field("share", self.share)
    }
}

/// Generator for [`UserSegment`].
#[derive(Debug, Default)]
pub struct UserSegmentsGenerator;

impl UserSegmentsGenerator {
    pub fn rows() -> Vec<UserSegment> {
        SEGMENTS
            .iter()
            .map(|&(segment, user_count, share)| UserSegment {
                segment,
                user_count,
                share,
            })
            .collect()
    }
}

impl TableGenerator for UserSegmentsGenerator {
    fn table(&self) -> &str {
        UserSegment::TABLE
    }

    fn generate(&self, _ctx: &GenerationContext<'_>) -> Result<Vec<Record>, GeneratorError> {
        Ok(into_records(Self::rows()))
    }
}
