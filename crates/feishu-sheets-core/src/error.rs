//! Error types for feishu-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in feishu-sheets-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u32),

    /// Address lies outside the loaded sheet data
    #[error("Cell {address} is outside the sheet data ({rows} rows x {cols} columns)")]
    OutOfBounds {
        address: String,
        rows: usize,
        cols: usize,
    },

    /// Values written to a range do not match its dimensions
    #[error("Range {range} expects {expected_rows}x{expected_cols} values, got {actual}")]
    ShapeMismatch {
        range: String,
        expected_rows: u32,
        expected_cols: u32,
        actual: String,
    },

    /// Image bytes could not be inspected
    #[error("Unrecognized image data: {0}")]
    UnknownImageFormat(String),

    /// Reading an image from disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
