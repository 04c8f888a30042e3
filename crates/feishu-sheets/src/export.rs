//! Exporting read values as CSV or JSON

#[cfg(feature = "csv")]
use std::io::Write;

use feishu_sheets_core::{CellValue, Selection};
#[cfg(feature = "csv")]
use feishu_sheets_core::{Error, Result};
use feishu_sheets_protocol::encode_cell_for_display;
use serde_json::Value;

/// Delimiter and line ending for [`SelectionExt::write_csv`]
#[derive(Debug, Clone)]
pub struct CsvExportOptions {
    pub delimiter: u8,
    pub crlf: bool,
}

impl Default for CsvExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            crlf: false,
        }
    }
}

/// Output formats for a [`Selection`]
pub trait SelectionExt {
    /// JSON in the shape the read endpoint returns: a scalar for a cell,
    /// an array for a column, an array of arrays for a range
    fn to_json(&self) -> Value;

    /// One CSV record per row, cells rendered with their display text
    #[cfg(feature = "csv")]
    fn write_csv<W: Write>(&self, writer: W, options: &CsvExportOptions) -> Result<()>;
}

impl SelectionExt for Selection {
    fn to_json(&self) -> Value {
        match self {
            Selection::Value(v) => encode_cell_for_display(v),
            Selection::Column(values) => values.iter().map(encode_cell_for_display).collect(),
            Selection::Rows(rows) => rows.iter().map(|row| row_json(row)).collect(),
        }
    }

    #[cfg(feature = "csv")]
    fn write_csv<W: Write>(&self, writer: W, options: &CsvExportOptions) -> Result<()> {
        let terminator = if options.crlf {
            csv::Terminator::CRLF
        } else {
            csv::Terminator::Any(b'\n')
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer);

        for row in self.clone().into_rows() {
            let record: Vec<String> = row.iter().map(CellValue::to_string).collect();
            csv_writer
                .write_record(&record)
                .map_err(|e| Error::other(e.to_string()))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

fn row_json(row: &[CellValue]) -> Value {
    Value::Array(row.iter().map(encode_cell_for_display).collect())
}
