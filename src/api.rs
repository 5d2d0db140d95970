use engagement_log::scoring::EngagementRecord;
use engagement_log::{ContentFormat, ContentSubmission, ContentType, MarketingPattern, Platform};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/content`, as the submission form sends it.
///
/// `engagementRate` and `engagementScore` may be present in the payload; they
/// are not read, because the store always recomputes them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContentRequest {
    pub content: Option<String>,
    pub category: Option<String>,
    pub custom_category: Option<String>,
    pub content_type: Option<String>,
    pub marketing_patterns: Option<Vec<String>>,
    pub format: Option<ApiFormat>,
    pub platform: Option<String>,
    pub engagement: Option<ApiEngagement>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFormat {
    pub has_images: Option<bool>,
    pub has_videos: Option<bool>,
    pub has_links: Option<bool>,
    pub is_thread: Option<bool>,
    #[serde(rename = "hasCTA")]
    pub has_cta: Option<bool>,
    pub uses_statistics: Option<bool>,
    pub hashtags: Option<bool>,
    pub contains_emoji: Option<bool>,
    pub hashtag_count: Option<i64>,
    pub list_item_count: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEngagement {
    pub views: Option<i64>,
    pub likes: Option<i64>,
    pub reposts: Option<i64>,
    pub comments: Option<i64>,
    pub follower_count: Option<i64>,
}

impl ApiContentRequest {
    pub fn into_submission(self) -> Result<ContentSubmission, String> {
        let content = self.content.unwrap_or_default().trim().to_string();
        if content.is_empty() {
            return Err("content is required".to_string());
        }

        let category = self.category.unwrap_or_default().trim().to_string();
        let custom_category = self
            .custom_category
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let content_type = match self.content_type.as_deref() {
            Some(value) if !value.trim().is_empty() => ContentType::from_str(value)
                .ok_or_else(|| format!("invalid content type: {}", value))?,
            _ => return Err("contentType is required".to_string()),
        };

        let platform = match self.platform.as_deref() {
            Some(value) if !value.trim().is_empty() => Platform::from_str(value)
                .ok_or_else(|| format!("invalid platform: {}", value))?,
            _ => return Err("platform is required".to_string()),
        };

        let mut marketing_patterns = Vec::new();
        for value in self.marketing_patterns.unwrap_or_default() {
            let pattern = MarketingPattern::from_str(&value)
                .ok_or_else(|| format!("invalid marketing pattern: {}", value))?;
            if !marketing_patterns.contains(&pattern) {
                marketing_patterns.push(pattern);
            }
        }

        let format = self.format.unwrap_or_default().into_format()?;
        let engagement = self.engagement.unwrap_or_default().into_record();

        Ok(ContentSubmission {
            content,
            category,
            custom_category,
            content_type,
            marketing_patterns,
            format,
            platform,
            engagement,
        })
    }
}

impl ApiFormat {
    fn into_format(self) -> Result<ContentFormat, String> {
        Ok(ContentFormat {
            has_images: self.has_images.unwrap_or(false),
            has_videos: self.has_videos.unwrap_or(false),
            has_links: self.has_links.unwrap_or(false),
            is_thread: self.is_thread.unwrap_or(false),
            has_cta: self.has_cta.unwrap_or(false),
            uses_statistics: self.uses_statistics.unwrap_or(false),
            hashtags: self.hashtags.unwrap_or(false),
            contains_emoji: self.contains_emoji.unwrap_or(false),
            hashtag_count: non_negative_count("format.hashtagCount", self.hashtag_count)?,
            list_item_count: non_negative_count("format.listItemCount", self.list_item_count)?,
        })
    }
}

impl ApiEngagement {
    // Missing or null counters become zero; range checks happen in
    // `ContentSubmission::validate`.
    fn into_record(self) -> EngagementRecord {
        EngagementRecord {
            views: self.views.unwrap_or(0),
            likes: self.likes.unwrap_or(0),
            reposts: self.reposts.unwrap_or(0),
            comments: self.comments.unwrap_or(0),
            follower_count: self.follower_count,
        }
    }
}

fn non_negative_count(field: &str, value: Option<i64>) -> Result<u32, String> {
    let value = value.unwrap_or(0);
    u32::try_from(value)
        .map_err(|_| format!("{} must be between 0 and {} (got {})", field, u32::MAX, value))
}

#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiEnvelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiEnvelope<()> {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ApiContentRequest {
        serde_json::from_value(value).expect("request should deserialize")
    }

    fn form_payload() -> serde_json::Value {
        json!({
            "content": "  5 ways to ship faster  ",
            "category": "Developer Tools",
            "contentType": "educational",
            "marketingPatterns": ["list", "how-to", "list"],
            "format": { "hasImages": true, "hasCTA": true, "hashtagCount": 2 },
            "platform": "twitter",
            "engagement": { "views": 100, "likes": 10, "reposts": 5, "comments": 2 }
        })
    }

    #[test]
    fn converts_form_payload() {
        let submission = parse(form_payload()).into_submission().unwrap();

        assert_eq!(submission.content, "5 ways to ship faster");
        assert_eq!(submission.content_type, ContentType::Educational);
        assert_eq!(submission.platform, Platform::Twitter);
        assert_eq!(
            submission.marketing_patterns,
            vec![MarketingPattern::List, MarketingPattern::HowTo]
        );
        assert!(submission.format.has_images);
        assert!(submission.format.has_cta);
        assert_eq!(submission.format.hashtag_count, 2);
        assert_eq!(submission.engagement.views, 100);
        assert_eq!(submission.engagement.follower_count, None);
    }

    #[test]
    fn ignores_client_supplied_metrics() {
        let mut payload = form_payload();
        payload["engagement"]["engagementRate"] = json!(999.0);
        payload["engagement"]["engagementScore"] = json!(-5.0);

        let submission = parse(payload).into_submission().unwrap();

        assert_eq!(submission.engagement.likes, 10);
    }

    #[test]
    fn null_counters_default_to_zero() {
        let mut payload = form_payload();
        payload["engagement"] = json!({ "views": null, "likes": 3 });

        let record = parse(payload).into_submission().unwrap().engagement;

        assert_eq!(record.views, 0);
        assert_eq!(record.likes, 3);
        assert_eq!(record.comments, 0);
    }

    #[test]
    fn rejects_unknown_enum_values() {
        let mut payload = form_payload();
        payload["platform"] = json!("myspace");
        let err = parse(payload).into_submission().unwrap_err();
        assert!(err.contains("invalid platform"));

        let mut payload = form_payload();
        payload["marketingPatterns"] = json!(["clickbait"]);
        let err = parse(payload).into_submission().unwrap_err();
        assert!(err.contains("invalid marketing pattern"));
    }

    #[test]
    fn requires_content_type_and_platform() {
        let mut payload = form_payload();
        payload["contentType"] = json!("");
        assert_eq!(
            parse(payload).into_submission().unwrap_err(),
            "contentType is required"
        );

        let mut payload = form_payload();
        payload.as_object_mut().unwrap().remove("platform");
        assert_eq!(
            parse(payload).into_submission().unwrap_err(),
            "platform is required"
        );
    }

    #[test]
    fn rejects_negative_format_counts() {
        let mut payload = form_payload();
        payload["format"]["hashtagCount"] = json!(-1);

        let err = parse(payload).into_submission().unwrap_err();

        assert!(err.starts_with("format.hashtagCount"));
    }
}
