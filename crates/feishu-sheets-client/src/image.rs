//! Downloading embedded images.

use std::path::{Path, PathBuf};

use feishu_sheets_core::Image;

use crate::client::Client;
use crate::error::{ClientError, Result};

/// Network operations on [`Image`]
pub trait ImageExt {
    /// The image bytes, downloaded by file token on first use
    fn bytes<'a>(&'a self, client: &Client) -> Result<&'a [u8]>;

    /// Lowercase format name, e.g. "png"
    fn format(&self, client: &Client) -> Result<String>;

    /// Download the bytes again, replacing any cached copy
    fn download(&mut self, client: &Client) -> Result<&[u8]>;

    /// Download into `path`, returning where the file was written
    ///
    /// With `auto_suffix`, `.{format}` is appended to the path.
    fn download_to<P: AsRef<Path>>(
        &mut self,
        client: &Client,
        path: P,
        auto_suffix: bool,
    ) -> Result<PathBuf>;
}

impl ImageExt for Image {
    fn bytes<'a>(&'a self, client: &Client) -> Result<&'a [u8]> {
        self.bytes_with(|token| client.download_media(token))
    }

    fn format(&self, client: &Client) -> Result<String> {
        let bytes = self.bytes(client)?;
        Ok(client.inspector().format_name(bytes)?)
    }

    fn download(&mut self, client: &Client) -> Result<&[u8]> {
        let token = self.file_token().ok_or(ClientError::MissingFileToken)?;
        let bytes = client.download_media(token)?;
        self.set_bytes(bytes);
        Ok(self.cached_bytes().unwrap_or_default())
    }

    fn download_to<P: AsRef<Path>>(
        &mut self,
        client: &Client,
        path: P,
        auto_suffix: bool,
    ) -> Result<PathBuf> {
        let bytes = self.download(client)?;

        let mut path = path.as_ref().to_path_buf();
        if auto_suffix {
            let format = client.inspector().format_name(bytes)?;
            let mut name = path.into_os_string();
            name.push(".");
            name.push(format);
            path = PathBuf::from(name);
        }

        std::fs::write(&path, bytes)?;
        tracing::info!("Saved image to {}", path.display());
        Ok(path)
    }
}
