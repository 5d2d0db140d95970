use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::scoring::{EngagementScorer, RateBasis, ScorePolicy};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicyConfig {
    pub rate_basis: RateBasis,
    pub score_policy: ScorePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/content.json"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scoring: ScoringPolicyConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| Error::Config(format!("failed to read config: {}", err)))?;
                Self::from_toml(&contents)?
            }
            _ => AppConfig::default(),
        };

        config.apply_env_overrides()?;
        Ok((config, config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|err| Error::Config(format!("failed to parse config: {}", err)))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| Error::Config(format!("failed to serialize config: {}", err)))?;
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn scorer(&self) -> EngagementScorer {
        EngagementScorer::new(self.scoring.rate_basis, self.scoring.score_policy)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = non_empty_var("SCORING_RATE_BASIS") {
            self.scoring.rate_basis = value.parse::<RateBasis>().map_err(Error::Config)?;
        }
        if let Some(value) = non_empty_var("SCORING_SCORE_POLICY") {
            self.scoring.score_policy = value.parse::<ScorePolicy>().map_err(Error::Config)?;
        }
        if let Some(value) = non_empty_var("CONTENT_STORE_PATH") {
            self.store.path = PathBuf::from(value);
        }
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn default_config_path() -> Option<PathBuf> {
    non_empty_var("ENGAGEMENT_CONFIG_PATH")
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/engagement.toml")))
}
