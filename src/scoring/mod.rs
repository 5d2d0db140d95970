pub mod policy;
pub mod scorer;
pub mod weighted;

pub use policy::{RateBasis, ScorePolicy};
pub use scorer::{DerivedMetrics, EngagementRecord, EngagementScorer, SCORE_CEILING};
pub use weighted::{EngagementWeights, WeightedScorer};
