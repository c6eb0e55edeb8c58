// Error types for wishwatch.
// Covers wishlist endpoint errors, cache persistence errors, and settings errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WishwatchError {
    #[error("wishlist request error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("wrote default settings to {}, fill in your data before the next run", .path.display())]
    ConfigMissing { path: PathBuf },

    #[error("invalid settings: {reason}")]
    ConfigInvalid { reason: String },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, WishwatchError>;
