use crate::scoring::EngagementRecord;

/// Relative importance of each engagement signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementWeights {
    pub like: f64,
    pub repost: f64,
    pub comment: f64,
    pub view: f64,
}

impl EngagementWeights {
    pub const STANDARD: EngagementWeights = EngagementWeights {
        like: 1.0,
        repost: 2.0,
        comment: 3.0,
        view: 0.1,
    };
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WeightedScorer {
    weights: EngagementWeights,
}

impl WeightedScorer {
    pub fn new(weights: EngagementWeights) -> Self {
        Self { weights }
    }

    /// Likes, reposts and comments only. Used as the engagement rate numerator.
    pub fn interactions(&self, record: &EngagementRecord) -> f64 {
        let mut total = 0.0;

        total += record.likes as f64 * self.weights.like;
        total += record.reposts as f64 * self.weights.repost;
        total += record.comments as f64 * self.weights.comment;

        total
    }

    /// Interactions plus the view term. Used as the engagement score input.
    pub fn weighted_engagement(&self, record: &EngagementRecord) -> f64 {
        self.interactions(record) + record.views as f64 * self.weights.view
    }
}
