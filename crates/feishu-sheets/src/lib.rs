//! # feishu-sheets
//!
//! A Rust client for spreadsheets in the Feishu (Lark) cloud office suite.
//!
//! ## Features
//!
//! - A1 addressing for cells and ranges
//! - Lazy reads with a local cache kept in step with writes
//! - Plain values, formulas and embedded images
//! - Image download with format detection
//! - CSV and JSON export of read values
//!
//! Credentials come from `FEISHU_APP_ID` and `FEISHU_APP_SECRET`; the tenant
//! access token is fetched on the first request and refreshed when it expires.
//!
//! ## Example
//!
//! ```no_run
//! use feishu_sheets::prelude::*;
//!
//! # fn main() -> feishu_sheets::ClientResult<()> {
//! let client = Client::from_env()?;
//! let mut sheet = client.sheet("shtcnmBA3G2Xd1C0ZyWmtQwwxyz", "0b12ab");
//!
//! // Read a range
//! let table = sheet.get("A1:C5")?;
//! println!("{}", table.to_json());
//!
//! // Write a cell, a formula and a block
//! sheet.set("D1", "total")?;
//! sheet.set("D2", CellValue::formula("=SUM(B2:C2)"))?;
//! sheet.set_range(
//!     "E1:F1",
//!     vec![vec![CellValue::from(1), CellValue::from(2)]],
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod prelude;

// Re-export core types
pub use feishu_sheets_core::{
    qualified,
    CellAddress,
    CellRange,
    CellRangeIterator,
    // Cell types
    CellValue,
    // Error types
    Error,
    Formula,
    // Images
    Image,
    ImageInspector,
    IntoRangeRef,
    MagicBytesInspector,
    RangeRef,
    Result,
    Selection,
    SheetData,
    WriteBatch,

    MAX_COLS,
    // Constants
    MAX_ROWS,
};

// Re-export wire helpers
pub use feishu_sheets_protocol::{decode_cell, encode_cell, encode_cell_for_display, Endpoints};

// Re-export the client
pub use feishu_sheets_client::{
    default_auth, Auth, Client, ClientConfig, ClientError, Credentials, HttpRequest, HttpResponse,
    ImageExt, Method, Sheet, Transport, TransportError,
};
pub use feishu_sheets_client::Result as ClientResult;

#[cfg(feature = "reqwest")]
pub use feishu_sheets_client::ReqwestTransport;

pub use export::{CsvExportOptions, SelectionExt};
