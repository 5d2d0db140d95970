use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::Result;
use crate::scoring::EngagementScorer;
use crate::{ContentRecord, ContentSubmission};

static RECORD_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// JSON file holding every content record, newest first.
///
/// Constructed once at startup and handed to whoever needs it; there is no
/// process-wide handle.
pub struct ContentStore {
    path: PathBuf,
    records: Mutex<Vec<ContentRecord>>,
}

impl ContentStore {
    pub async fn load(path: PathBuf) -> Result<Self> {
        let mut records: Vec<ContentRecord> = if path.exists() {
            let data = tokio::fs::read_to_string(&path).await?;
            if data.trim().is_empty() {
                Vec::new()
            } else {
                serde_json::from_str(&data)?
            }
        } else {
            Vec::new()
        };
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        info!(path = %path.display(), records = records.len(), "content store loaded");
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn list(&self) -> Vec<ContentRecord> {
        let guard = self.records.lock().await;
        guard.clone()
    }

    pub async fn get(&self, record_id: &str) -> Option<ContentRecord> {
        let guard = self.records.lock().await;
        guard.iter().find(|record| record.id == record_id).cloned()
    }

    /// Validates, scores and persists a submission.
    pub async fn create(
        &self,
        submission: ContentSubmission,
        scorer: &EngagementScorer,
    ) -> Result<ContentRecord> {
        submission.validate()?;
        let record =
            ContentRecord::from_submission(generate_record_id(), submission, scorer, Utc::now());
        debug!(
            id = %record.id,
            rate = record.engagement.metrics.engagement_rate,
            score = record.engagement.metrics.engagement_score,
            "scored content"
        );

        let mut guard = self.records.lock().await;
        guard.insert(0, record.clone());
        if let Err(err) = self.persist(&guard).await {
            guard.remove(0);
            return Err(err);
        }
        info!(id = %record.id, platform = record.platform.label(), "content saved");
        Ok(record)
    }

    async fn persist(&self, records: &[ContentRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent).await?;
        }
        let payload = serde_json::to_string_pretty(records)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, payload).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

async fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.exists() {
        return Ok(());
    }
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}

fn generate_record_id() -> String {
    let counter = RECORD_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("content-{}-{}", Utc::now().timestamp_millis(), counter)
}
