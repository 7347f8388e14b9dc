use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading one of the site's external resources.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV is missing required column {0:?}")]
    MissingColumn(&'static str),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("invalid timestamp {value:?}")]
    Timestamp { value: String },
    #[error("image could not be decoded: {0}")]
    Image(#[from] image::ImageError),
}

pub type LoadResult<T> = Result<T, LoadError>;
