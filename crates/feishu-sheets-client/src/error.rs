//! Error types for the sheets client.

use thiserror::Error;

use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Core(#[from] feishu_sheets_core::Error),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not obtain a tenant access token: {0}")]
    Auth(String),

    #[error("API returned code {code}: {msg}")]
    Api { code: i64, msg: String },

    #[error("Failed to read sheet {sheet}: {reason}")]
    ReadFailed { sheet: String, reason: String },

    #[error("Failed to write {range}: {source}")]
    WriteFailed {
        range: String,
        #[source]
        source: Box<ClientError>,
    },

    #[error("Failed to write image to {range}: {source}")]
    ImageWriteFailed {
        range: String,
        #[source]
        source: Box<ClientError>,
    },

    #[error("{0} is not a single cell; use set_range")]
    NotSingleCell(String),

    #[error("Image has no file token to download")]
    MissingFileToken,

    #[error("Environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
