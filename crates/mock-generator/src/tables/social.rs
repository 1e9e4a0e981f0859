//! `social_accounts` and `social_posts`.
//!
//! Accounts are hand-authored. Posts are generated per platform for every
//! account on that platform, so each post's `account_id` is an id that exists
//! in `social_accounts` and a dashboard filtering posts by account sees them.

use super::{history, round_to, to_count, ACCOUNT_STRIDE, POST_STRIDE, SOCIAL_POSTS};
use crate::calendar::DayProfile;
use crate::error::GeneratorError;
use crate::registry::{GenerationContext, TableGenerator};
use crate::sequence::SeedSequence;
use chrono::{DateTime, NaiveDate, Utc};
use mock_core::{into_records, Record, TableRow, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct SocialAccount {
    pub id: String,
    pub platform: String,
    pub handle: String,
    pub display_name: String,
    pub follower_count: i64,
}

// id, platform, handle, display name, followers
const ACCOUNTS: [(&str, &str, &str, &str, i64); 5] = [
    ("acct-ig-01", "instagram", "@studyhub", "StudyHub", 184_000),
    ("acct-ig-02", "instagram", "@studyhub.exams", "StudyHub Exams", 61_500),
    ("acct-tt-01", "tiktok", "@studyhub", "StudyHub", 326_000),
    ("acct-x-01", "x", "@studyhub", "StudyHub", 42_300),
    ("acct-li-01", "linkedin", "studyhub", "StudyHub for Teams", 18_900),
];

impl SocialAccount {
    pub fn from_record(record: &Record) -> Option<Self> {
        Some(Self {
            id: record.get_str("id")?.to_string(),
            platform: record.get_str("platform")?.to_string(),
            handle: record.get_str("handle")?.to_string(),
            display_name: record.get_str("display_name")?.to_string(),
            follower_count: record.get_i64("follower_count")?,
        })
    }
}

impl TableRow for SocialAccount {
    const TABLE: &'static str = "social_accounts";

    fn into_record(self) -> Record {
        Record::new()
            .field("id", self.id)
            .field("platform", self.platform)
            .field("handle", self.handle)
            .field("display_name", self.display_name)
            .field("follower_count", self.follower_count)
    }
}

/// Generator for [`SocialAccount`].
#[derive(Debug, Default)]
pub struct SocialAccountsGenerator;

impl SocialAccountsGenerator {
    pub fn rows() -> Vec<SocialAccount> {
        ACCOUNTS
            .iter()
            .map(
                |&(id, platform, handle, display_name, follower_count)| SocialAccount {
                    id: id.to_string(),
                    platform: platform.to_string(),
                    handle: handle.to_string(),
                    display_name: display_name.to_string(),
                    follower_count,
                },
            )
            .collect()
    }
}

impl TableGenerator for SocialAccountsGenerator {
    fn table(&self) -> &str {
        SocialAccount::TABLE
    }

    fn generate(&self, _ctx: &GenerationContext<'_>) -> Result<Vec<Record>, GeneratorError> {
        Ok(into_records(Self::rows()))
    }
}

/// Posting behaviour of one platform.
struct Platform {
    name: &'static str,
    post_probability: f64,
    content_types: &'static [&'static str],
    reactions: &'static [(&'static str, f64)],
}

const PLATFORMS: [Platform; 4] = [
    Platform {
        name: "instagram",
        post_probability: 0.5,
        content_types: &["image", "carousel", "reel"],
        reactions: &[("like", 0.78), ("comment", 0.1), ("share", 0.05), ("save", 0.07)],
    },
    Platform {
        name: "tiktok",
        post_probability: 0.8,
        content_types: &["short_video"],
        reactions: &[("like", 0.82), ("comment", 0.08), ("share", 0.1)],
    },
    Platform {
        name: "x",
        post_probability: 0.9,
        content_types: &["text", "image", "thread"],
        reactions: &[("like", 0.6), ("reply", 0.15), ("repost", 0.2), ("bookmark", 0.05)],
    },
    Platform {
        name: "linkedin",
        post_probability: 0.3,
        content_types: &["article", "image", "text"],
        reactions: &[("like", 0.55), ("celebrate", 0.15), ("insightful", 0.15), ("comment", 0.15)],
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct SocialPost {
    pub id: Uuid,
    pub account_id: String,
    pub platform: String,
    pub published_at: DateTime<Utc>,
    pub content_type: &'static str,
    pub reach: i64,
    pub impressions: i64,
    pub engagement_rate: f64,
    pub reaction_breakdown: BTreeMap<String, i64>,
}

impl TableRow for SocialPost {
    const TABLE: &'static str = "social_posts";

    fn into_record(self) -> Record {
        let reactions: BTreeMap<String, Value> = self
            .reaction_breakdown
            .into_iter()
            .map(|(k, v)| (k, Value::Int(v)))
            .collect();

        Record::new()
            .field("id", self.id)
            .field("account_id", self.account_id)
            .field("platform", self.platform)
            .field("published_at", self.published_at)
            .field("content_type", self.content_type)
            .field("reach", self.reach)
            .field("impressions", self.impressions)
            .field("engagement_rate", self.engagement_rate)
            .field("reaction_breakdown", reactions)
    }
}

/// Posts for every account on `platform`, in publication order.
///
/// Unknown platforms yield no posts.
pub fn posts_for_platform(
    seeds: &SeedSequence,
    platform: &str,
    accounts: &[SocialAccount],
) -> Vec<SocialPost> {
    let Some(behaviour) = PLATFORMS.iter().find(|p| p.name == platform) else {
        return Vec::new();
    };

    let mut posts = Vec::new();
    for (a, account) in accounts.iter().enumerate() {
        if account.platform != platform {
            continue;
        }
        let account_seed = SOCIAL_POSTS.seed(a as u64 * ACCOUNT_STRIDE);

        for (idx, date) in history() {
            let seed = account_seed + idx * POST_STRIDE;
            if seeds.value(seed) >= behaviour.post_probability {
                continue;
            }
            posts.push(build_post(seeds, behaviour, account, seed, date));
        }
    }
    posts.sort_by(|a, b| a.published_at.cmp(&b.published_at));
    posts
}

fn build_post(
    seeds: &SeedSequence,
    behaviour: &Platform,
    account: &SocialAccount,
    seed: u64,
    date: NaiveDate,
) -> SocialPost {
    let profile = DayProfile::classify(date);
    let hour = seeds.int_range(seed + 1, 8, 21) as u32;
    let minute = seeds.int_range(seed + 2, 0, 59) as u32;
    let published_at = date
        .and_hms_opt(hour, minute, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_default();

    let reach = to_count(
        account.follower_count as f64 * seeds.range(seed + 3, 0.05, 0.30) * profile.multiplier(),
        1,
    );
    let impressions = to_count(reach as f64 * seeds.range(seed + 4, 1.1, 1.8), reach);
    let engagement_rate = round_to(seeds.range(seed + 5, 0.01, 0.09).clamp(0.0, 1.0), 4);
    let engagements = reach as f64 * engagement_rate;

    let reaction_breakdown = behaviour
        .reactions
        .iter()
        .enumerate()
        .map(|(r, &(kind, weight))| {
            let noise = 1.0 + seeds.jitter(seed + 8 + r as u64, 0.2);
            (kind.to_string(), to_count(engagements * weight * noise, 0))
        })
        .collect();

    SocialPost {
        id: seeds.uuid(seed + 6),
        account_id: account.id.clone(),
        platform: behaviour.name.to_string(),
        published_at,
        content_type: seeds
            .pick(seed + 7, behaviour.content_types)
            .copied()
            .unwrap_or("text"),
        reach,
        impressions,
        engagement_rate,
        reaction_breakdown,
    }
}

/// Generator for [`SocialPost`]; depends on `social_accounts`.
#[derive(Debug)]
pub struct SocialPostsGenerator {
    platforms: Vec<&'static str>,
}

impl SocialPostsGenerator {
    pub fn new(platforms: Vec<&'static str>) -> Self {
        Self { platforms }
    }

    pub fn all_platforms() -> Self {
        Self::new(PLATFORMS.iter().map(|p| p.name).collect())
    }

    pub fn rows(&self, seeds: &SeedSequence, accounts: &[SocialAccount]) -> Vec<SocialPost> {
        let mut posts: Vec<SocialPost> = self
            .platforms
            .iter()
            .flat_map(|platform| posts_for_platform(seeds, platform, accounts))
            .collect();
        posts.sort_by(|a, b| a.published_at.cmp(&b.published_at));
        posts
    }
}

impl TableGenerator for SocialPostsGenerator {
    fn table(&self) -> &str {
        SocialPost::TABLE
    }

    fn dependencies(&self) -> &[&'static str] {
        &[SocialAccount::TABLE]
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> Result<Vec<Record>, GeneratorError> {
        let snapshot = ctx.dependency(SocialAccount::TABLE)?;
        let accounts = snapshot
            .iter()
            .map(SocialAccount::from_record)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| GeneratorError::Invalid {
                table: ctx.table().to_string(),
                message: "malformed social_accounts row".to_string(),
            })?;

        Ok(into_records(self.rows(&ctx.seeds(), &accounts)))
    }
}
