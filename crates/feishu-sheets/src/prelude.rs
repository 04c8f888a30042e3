//! Prelude module - common imports for feishu-sheets users
//!
//! ```rust
//! use feishu_sheets::prelude::*;
//! ```

pub use crate::{
    CellAddress,
    CellRange,
    // Cell types
    CellValue,
    // Client types
    Client,
    ClientConfig,
    ClientError,
    Credentials,
    // Export
    CsvExportOptions,
    Formula,
    Image,
    ImageExt,
    RangeRef,
    Selection,
    SelectionExt,
    Sheet,
};
