use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("content not found: {0}")]
    NotFound(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store payload error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
