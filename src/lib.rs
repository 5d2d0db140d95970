pub mod config;
pub mod error;
pub mod scoring;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::error::{Error, Result};
use crate::scoring::{DerivedMetrics, EngagementRecord, EngagementScorer};

pub const CUSTOM_CATEGORY: &str = "custom";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Linkedin,
}

impl Platform {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "twitter" | "x" => Some(Platform::Twitter),
            "linkedin" => Some(Platform::Linkedin),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Promotional,
    Educational,
    Entertaining,
    Branding,
    Conversational,
    News,
    Storytelling,
}

impl ContentType {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "promotional" => Some(ContentType::Promotional),
            "educational" => Some(ContentType::Educational),
            "entertaining" => Some(ContentType::Entertaining),
            "branding" => Some(ContentType::Branding),
            "conversational" => Some(ContentType::Conversational),
            "news" => Some(ContentType::News),
            "storytelling" => Some(ContentType::Storytelling),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentType::Promotional => "promotional",
            ContentType::Educational => "educational",
            ContentType::Entertaining => "entertaining",
            ContentType::Branding => "branding",
            ContentType::Conversational => "conversational",
            ContentType::News => "news",
            ContentType::Storytelling => "storytelling",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketingPattern {
    Question,
    List,
    HowTo,
    CallToAction,
    Statistics,
    SocialProof,
    ProblemSolution,
}

impl MarketingPattern {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "question" => Some(MarketingPattern::Question),
            "list" => Some(MarketingPattern::List),
            "how-to" => Some(MarketingPattern::HowTo),
            "call-to-action" => Some(MarketingPattern::CallToAction),
            "statistics" => Some(MarketingPattern::Statistics),
            "social-proof" => Some(MarketingPattern::SocialProof),
            "problem-solution" => Some(MarketingPattern::ProblemSolution),
            _ => None,
        }
    }
}

/// Presentation flags captured alongside the content text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentFormat {
    pub has_images: bool,
    pub has_videos: bool,
    pub has_links: bool,
    pub is_thread: bool,
    #[serde(rename = "hasCTA")]
    pub has_cta: bool,
    pub uses_statistics: bool,
    pub hashtags: bool,
    pub contains_emoji: bool,
    pub hashtag_count: u32,
    pub list_item_count: u32,
}

/// Stored engagement block: raw counters plus the metrics derived from them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(flatten)]
    pub counts: EngagementRecord,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

/// A validated submission, ready to be scored and stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSubmission {
    pub content: String,
    pub category: String,
    pub custom_category: Option<String>,
    pub content_type: ContentType,
    pub marketing_patterns: Vec<MarketingPattern>,
    pub format: ContentFormat,
    pub platform: Platform,
    pub engagement: EngagementRecord,
}

impl ContentSubmission {
    /// Checks the constraints the storage schema places on a submission.
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(Error::Validation("content is required".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(Error::Validation("category is required".to_string()));
        }
        if self.category == CUSTOM_CATEGORY
            && self
                .custom_category
                .as_deref()
                .map(|value| value.trim().is_empty())
                .unwrap_or(true)
        {
            return Err(Error::Validation(
                "customCategory is required when category is custom".to_string(),
            ));
        }

        let counters = [
            ("views", self.engagement.views),
            ("likes", self.engagement.likes),
            ("reposts", self.engagement.reposts),
            ("comments", self.engagement.comments),
            ("followerCount", self.engagement.follower_count.unwrap_or(0)),
        ];
        for (field, value) in counters {
            if value < 0 {
                return Err(Error::Validation(format!(
                    "engagement.{} must be >= 0 (got {})",
                    field, value
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub id: String,
    pub content: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_category: Option<String>,
    pub content_type: ContentType,
    #[serde(default)]
    pub marketing_patterns: Vec<MarketingPattern>,
    #[serde(default)]
    pub format: ContentFormat,
    pub platform: Platform,
    pub engagement: Engagement,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentRecord {
    /// Builds the stored form of a submission. The derived metrics are always
    /// recomputed here, immediately before the record is written.
    pub fn from_submission(
        id: String,
        submission: ContentSubmission,
        scorer: &EngagementScorer,
        now: DateTime<Utc>,
    ) -> Self {
        let metrics = scorer.compute(&submission.engagement);
        Self {
            id,
            content: submission.content,
            category: submission.category,
            custom_category: submission.custom_category,
            content_type: submission.content_type,
            marketing_patterns: submission.marketing_patterns,
            format: submission.format,
            platform: submission.platform,
            engagement: Engagement {
                counts: submission.engagement,
                metrics,
            },
            created_at: now,
            updated_at: now,
        }
    }

    /// Category shown to readers: the custom label when one was given.
    pub fn display_category(&self) -> &str {
        match self.custom_category.as_deref() {
            Some(custom) if self.category == CUSTOM_CATEGORY && !custom.trim().is_empty() => custom,
            _ => &self.category,
        }
    }
}

pub fn format_number(value: i64) -> String {
    let negative = value < 0;
    let mut chars: Vec<char> = value.unsigned_abs().to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }
    if negative {
        result.push('-');
    }

    result.chars().rev().collect()
}

/// Formats a value that is already on the percentage scale.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
