//! # feishu-sheets-core
//!
//! Core data structures for the feishu-sheets client library.
//!
//! This crate provides the transport-free parts of the client:
//! - [`CellAddress`], [`CellRange`] and [`RangeRef`] - A1-style addressing
//! - [`CellValue`] - Cell values (text, numbers, booleans, formulas, images)
//! - [`Image`] - Embedded images with lazily loaded bytes
//! - [`SheetData`] and [`WriteBatch`] - The local value cache and write planning
//!
//! ## Example
//!
//! ```rust
//! use feishu_sheets_core::{CellValue, RangeRef, Selection, SheetData};
//!
//! let data = SheetData::new(vec![
//!     vec![CellValue::text("name"), CellValue::text("score")],
//!     vec![CellValue::text("ada"), CellValue::from(42)],
//! ]);
//!
//! let index = RangeRef::parse("B2").unwrap();
//! assert_eq!(data.get(&index).unwrap(), Selection::Value(CellValue::Number(42.0)));
//! ```

pub mod address;
pub mod error;
pub mod grid;
pub mod image;
pub mod value;

// Re-exports for convenience
pub use address::{qualified, CellAddress, CellRange, CellRangeIterator, IntoRangeRef, RangeRef};
pub use error::{Error, Result};
pub use grid::{Selection, SheetData, WriteBatch};
pub use image::{encode_base64, Image, ImageInspector, MagicBytesInspector};
pub use value::{CellValue, Formula};

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a sheet
pub const MAX_COLS: u32 = 16_384;
