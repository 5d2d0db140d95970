use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Denominator used for the engagement rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RateBasis {
    /// Interactions per follower of the poster.
    Followers,
    /// Interactions per impression.
    Views,
}

impl RateBasis {
    pub fn label(self) -> &'static str {
        match self {
            RateBasis::Followers => "followers",
            RateBasis::Views => "views",
        }
    }
}

impl Default for RateBasis {
    fn default() -> Self {
        RateBasis::Views
    }
}

impl FromStr for RateBasis {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_name(value).as_str() {
            "followers" | "follower" => Ok(RateBasis::Followers),
            "views" | "view" => Ok(RateBasis::Views),
            other => Err(format!(
                "invalid rate basis: {} (expected followers or views)",
                other
            )),
        }
    }
}

impl fmt::Display for RateBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How weighted engagement is squeezed into the 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScorePolicy {
    /// Relative to audience size, falling back to an absolute scale without followers.
    AudienceNormalized,
    /// Weighted engagement over a fixed divisor.
    FixedDivisor,
}

impl ScorePolicy {
    pub fn label(self) -> &'static str {
        match self {
            ScorePolicy::AudienceNormalized => "audience-normalized",
            ScorePolicy::FixedDivisor => "fixed-divisor",
        }
    }
}

impl Default for ScorePolicy {
    fn default() -> Self {
        ScorePolicy::FixedDivisor
    }
}

impl FromStr for ScorePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_name(value).as_str() {
            "audience-normalized" | "audience" => Ok(ScorePolicy::AudienceNormalized),
            "fixed-divisor" | "fixed" => Ok(ScorePolicy::FixedDivisor),
            other => Err(format!(
                "invalid score policy: {} (expected audience-normalized or fixed-divisor)",
                other
            )),
        }
    }
}

impl fmt::Display for ScorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize_name(value: &str) -> String {
    value.trim().to_lowercase().replace('_', "-")
}
