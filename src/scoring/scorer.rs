use serde::{Deserialize, Serialize};

use crate::scoring::{EngagementWeights, RateBasis, ScorePolicy, WeightedScorer};

pub const SCORE_CEILING: f64 = 100.0;
const RATE_SCALE: f64 = 100.0;
const AUDIENCE_SCALE: f64 = 1000.0;
const NO_AUDIENCE_DIVISOR: f64 = 10.0;
const FIXED_DIVISOR: f64 = 100.0;

/// Raw counters for one piece of content. Absent fields deserialize as zero.
///
/// Counters are signed so that out-of-range input reaches the scorer
/// unchanged; range checks belong to whoever builds the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngagementRecord {
    pub views: i64,
    pub likes: i64,
    pub reposts: i64,
    pub comments: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<i64>,
}

impl EngagementRecord {
    fn followers(&self) -> i64 {
        self.follower_count.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub engagement_rate: f64,
    pub engagement_score: f64,
}

/// Computes the derived engagement metrics for a record.
///
/// Holds only immutable settings, so one instance can be shared across any
/// number of concurrent callers.
#[derive(Debug, Clone, Copy)]
pub struct EngagementScorer {
    weighted: WeightedScorer,
    rate_basis: RateBasis,
    score_policy: ScorePolicy,
}

impl Default for EngagementScorer {
    fn default() -> Self {
        Self::new(RateBasis::default(), ScorePolicy::default())
    }
}

impl EngagementScorer {
    pub fn new(rate_basis: RateBasis, score_policy: ScorePolicy) -> Self {
        Self {
            weighted: WeightedScorer::new(EngagementWeights::STANDARD),
            rate_basis,
            score_policy,
        }
    }

    pub fn rate_basis(&self) -> RateBasis {
        self.rate_basis
    }

    pub fn score_policy(&self) -> ScorePolicy {
        self.score_policy
    }

    pub fn compute(&self, record: &EngagementRecord) -> DerivedMetrics {
        DerivedMetrics {
            engagement_rate: self.engagement_rate(record),
            engagement_score: self.engagement_score(record),
        }
    }

    pub fn engagement_rate(&self, record: &EngagementRecord) -> f64 {
        let denominator = match self.rate_basis {
            RateBasis::Followers => record.followers(),
            RateBasis::Views => record.views,
        };
        if denominator <= 0 {
            return 0.0;
        }
        finite_or_zero(self.weighted.interactions(record) / denominator as f64 * RATE_SCALE)
    }

    pub fn engagement_score(&self, record: &EngagementRecord) -> f64 {
        let weighted = self.weighted.weighted_engagement(record);
        let raw = match self.score_policy {
            ScorePolicy::AudienceNormalized => {
                let followers = record.followers();
                if followers > 0 {
                    weighted / followers as f64 * AUDIENCE_SCALE
                } else {
                    weighted / NO_AUDIENCE_DIVISOR
                }
            }
            ScorePolicy::FixedDivisor => weighted / FIXED_DIVISOR,
        };
        clamp_score(raw)
    }
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(SCORE_CEILING)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
