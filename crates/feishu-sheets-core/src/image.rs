//! Embedded cell images
//!
//! An [`Image`] can come from a remote file token (cells read from a sheet),
//! a local path, or raw bytes. Bytes are loaded lazily and cached on first
//! access; the remote download itself is supplied by the caller so this crate
//! stays free of any transport.

use std::fmt;
use std::path::{Path, PathBuf};

use base64::Engine;
use image::ImageFormat;
use once_cell::sync::OnceCell;
use uuid::Uuid;

use crate::error::{Error, Result};

/// An image stored in (or destined for) a cell
#[derive(Clone, Default)]
pub struct Image {
    file_token: Option<String>,
    path: Option<PathBuf>,
    name: OnceCell<String>,
    bytes: OnceCell<Vec<u8>>,
}

impl Image {
    /// Image that lives on the server, identified by its media file token
    pub fn from_token<S: Into<String>>(file_token: S) -> Self {
        Self {
            file_token: Some(file_token.into()),
            ..Default::default()
        }
    }

    /// Image read from a local file the first time its bytes are needed
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Image from in-memory bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: OnceCell::from(bytes),
            ..Default::default()
        }
    }

    /// File token of an image already stored in Feishu
    pub fn file_token(&self) -> Option<&str> {
        self.file_token.as_deref()
    }

    /// Local file the image was created from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// File name sent along with uploads
    ///
    /// The basename of the local path when there is one, otherwise a random
    /// `<hex>.png` generated once per value.
    pub fn name(&self) -> &str {
        self.name.get_or_init(|| {
            self.path
                .as_deref()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("{}.png", Uuid::new_v4().simple()))
        })
    }

    /// Bytes if they have already been loaded
    pub fn cached_bytes(&self) -> Option<&[u8]> {
        self.bytes.get().map(Vec::as_slice)
    }

    /// Replace the cached bytes (e.g. after a fresh download)
    pub fn set_bytes(&mut self, bytes: Vec<u8>) {
        self.bytes = OnceCell::from(bytes);
    }

    /// Load the image bytes, caching the first successful result
    ///
    /// Sources are tried in order: cached bytes, the local path, then
    /// `fetch(file_token)`. An image with no source yields an empty buffer.
    pub fn bytes_with<F, E>(&self, fetch: F) -> std::result::Result<&[u8], E>
    where
        F: FnOnce(&str) -> std::result::Result<Vec<u8>, E>,
        E: From<Error>,
    {
        self.bytes
            .get_or_try_init(|| {
                if let Some(path) = &self.path {
                    return std::fs::read(path).map_err(|e| E::from(Error::Io(e)));
                }
                match &self.file_token {
                    Some(token) => fetch(token),
                    None => Ok(Vec::new()),
                }
            })
            .map(Vec::as_slice)
    }

    /// Base64 of the image bytes, as the image upload endpoint expects
    pub fn encoded_with<F, E>(&self, fetch: F) -> std::result::Result<String, E>
    where
        F: FnOnce(&str) -> std::result::Result<Vec<u8>, E>,
        E: From<Error>,
    {
        self.bytes_with(fetch).map(encode_base64)
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        if self.file_token.is_none() && self.path.is_none() {
            return other.file_token.is_none()
                && other.path.is_none()
                && self.bytes.get() == other.bytes.get();
        }
        self.file_token == other.file_token && self.path == other.path
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("file_token", &self.file_token)
            .field("path", &self.path)
            .field("bytes", &self.bytes.get().map(Vec::len))
            .finish()
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file_token, &self.path) {
            (Some(token), _) => write!(f, "<image fileToken:{}>", token),
            (None, Some(path)) => write!(f, "<image path:{}>", path.display()),
            (None, None) => write!(f, "<image>"),
        }
    }
}

/// Standard base64 encoding
pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Decodes image bytes far enough to name their format
pub trait ImageInspector: Send + Sync {
    /// Lowercase format name such as "png" or "jpeg"
    fn format_name(&self, bytes: &[u8]) -> Result<String>;
}

/// Identifies formats from their file signature
#[derive(Debug, Default, Clone, Copy)]
pub struct MagicBytesInspector;

impl ImageInspector for MagicBytesInspector {
    fn format_name(&self, bytes: &[u8]) -> Result<String> {
        let format =
            image::guess_format(bytes).map_err(|e| Error::UnknownImageFormat(e.to_string()))?;
        Ok(format_name(format).to_string())
    }
}

fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "png",
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Gif => "gif",
        ImageFormat::WebP => "webp",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Tiff => "tiff",
        ImageFormat::Ico => "ico",
        other => other.extensions_str().first().copied().unwrap_or("bin"),
    }
}
