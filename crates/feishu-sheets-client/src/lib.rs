//! # feishu-sheets-client
//!
//! Blocking client for the Feishu sheets REST API.
//!
//! A [`Client`] carries configuration, the tenant access token cache and the
//! HTTP [`Transport`]. [`Sheet`] handles built from it read values lazily and
//! keep a local cache in step with their own writes.
//!
//! ## Example
//!
//! ```no_run
//! use feishu_sheets_client::{Client, ImageExt};
//! use feishu_sheets_core::{CellValue, Image};
//!
//! # fn main() -> feishu_sheets_client::Result<()> {
//! let client = Client::from_env()?;
//! let mut sheet = client.sheet("shtcnmBA3G2Xd1C0ZyWmtQwwxyz", "0b12ab");
//!
//! let title = sheet.get("A1")?;
//! sheet.set("B3", 42)?;
//! sheet.set("C3", CellValue::formula("=SUM(B1:B3)"))?;
//! sheet.set("D3", Image::from_path("chart.png"))?;
//!
//! if let Some(CellValue::Image(mut img)) = title.into_value() {
//!     img.download_to(&client, "title", true)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod sheet;
pub mod transport;

pub use auth::{default_auth, Auth, Credentials};
pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use image::ImageExt;
pub use sheet::Sheet;
pub use transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
