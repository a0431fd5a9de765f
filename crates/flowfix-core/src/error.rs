use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowfixError {
    #[error("n8n database not found at {0}: start n8n once to create it, or pass --db")]
    StoreMissing(PathBuf),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlowfixError>;
