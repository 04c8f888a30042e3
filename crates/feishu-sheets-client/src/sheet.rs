//! One sheet of a spreadsheet, with a lazily loaded value cache.

use feishu_sheets_core::{
    qualified, CellAddress, CellRange, CellValue, Image, IntoRangeRef, RangeRef, Selection,
    SheetData, WriteBatch,
};
use feishu_sheets_protocol::{
    decode_grid, encode_grid, ReadResponse, WriteImageRequest, WriteValuesRequest,
};
use serde_json::Value;

use crate::client::Client;
use crate::error::{ClientError, Result};

/// A sheet addressed by spreadsheet token and sheet id.
///
/// Values are fetched the first time they are needed and kept until
/// [`refresh`](Sheet::refresh) or [`invalidate`](Sheet::invalidate). Writes go
/// straight to the server and are then mirrored into the cache when the cache
/// is loaded and the written cells fall inside it.
#[derive(Debug)]
pub struct Sheet {
    client: Client,
    spreadsheet_token: String,
    sheet_id: String,
    data: Option<SheetData>,
}

impl Sheet {
    pub fn new(
        client: Client,
        spreadsheet_token: impl Into<String>,
        sheet_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            spreadsheet_token: spreadsheet_token.into(),
            sheet_id: sheet_id.into(),
            data: None,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn spreadsheet_token(&self) -> &str {
        &self.spreadsheet_token
    }

    pub fn sheet_id(&self) -> &str {
        &self.sheet_id
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// The cached values, fetched on first access
    pub fn data(&mut self) -> Result<&SheetData> {
        self.loaded()
    }

    /// Number of cached rows
    pub fn rows(&mut self) -> Result<usize> {
        Ok(self.loaded()?.row_count())
    }

    /// Number of cached columns
    pub fn cols(&mut self) -> Result<usize> {
        Ok(self.loaded()?.col_count())
    }

    /// Re-read every value of the sheet from the server
    pub fn refresh(&mut self) -> Result<&SheetData> {
        let data = self.fetch()?;
        let data: &SheetData = self.data.insert(data);
        Ok(data)
    }

    /// Forget the cached values; the next read fetches them again
    pub fn invalidate(&mut self) {
        self.data = None;
    }

    /// Read a cell ("B3") or a range ("A1:C5")
    pub fn get<I: IntoRangeRef>(&mut self, index: I) -> Result<Selection> {
        let index = index.into_range_ref()?;
        Ok(self.loaded()?.get(&index)?)
    }

    /// Borrow one cached cell
    pub fn cell<I: IntoRangeRef>(&mut self, index: I) -> Result<&CellValue> {
        let addr = single_cell(index.into_range_ref()?)?;
        Ok(self.loaded()?.cell(addr)?)
    }

    /// Write one cell
    ///
    /// Formulas are sent as formula objects and images through the image
    /// endpoint; everything else is written as a plain value.
    pub fn set<I, V>(&mut self, index: I, value: V) -> Result<()>
    where
        I: IntoRangeRef,
        V: Into<CellValue>,
    {
        let addr = single_cell(index.into_range_ref()?)?;
        self.execute(&WriteBatch::cell(addr, value.into()))
    }

    /// Write a block of values; `values` must match the range's shape
    pub fn set_range<I: IntoRangeRef>(
        &mut self,
        index: I,
        values: Vec<Vec<CellValue>>,
    ) -> Result<()> {
        let range = index.into_range_ref()?.as_range();
        let batch = WriteBatch::range(range, values)?;
        self.execute(&batch)
    }

    /// Send a planned write, then mirror it into the cache
    pub fn execute(&mut self, batch: &WriteBatch) -> Result<()> {
        if let Some((range, values)) = batch.values() {
            self.write_values(range, values)?;
        }
        for (addr, image) in batch.images() {
            self.write_image(*addr, image)?;
        }

        if let Some(data) = self.data.as_mut() {
            let updated = data.apply_range(batch.target(), &batch.cache_values());
            tracing::debug!("Updated {updated} cached cells of sheet {}", self.sheet_id);
        }
        Ok(())
    }

    /// PUT values over `range` without touching the cache
    pub fn write_values(&self, range: &CellRange, values: &[Vec<CellValue>]) -> Result<()> {
        let target = qualified(&self.sheet_id, range);
        let body = WriteValuesRequest::new(target.clone(), encode_grid(values));
        let url = self.client.endpoints().values_write(&self.spreadsheet_token);

        match self.client.put_json::<_, Value>(url, &body) {
            Ok(response) => {
                tracing::debug!("Wrote {target}: {response}");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to write {target}: {e}");
                Err(ClientError::WriteFailed {
                    range: target,
                    source: Box::new(e),
                })
            }
        }
    }

    /// Upload an image into one cell without touching the cache
    pub fn write_image(&self, addr: CellAddress, image: &Image) -> Result<()> {
        let target = qualified(&self.sheet_id, &CellRange::single(addr));
        let client = &self.client;

        let result = image
            .encoded_with(|token| client.download_media(token))
            .and_then(|encoded| {
                let body = WriteImageRequest {
                    range: target.clone(),
                    image: encoded,
                    name: image.name().to_string(),
                };
                let url = client.endpoints().values_image(&self.spreadsheet_token);
                client.post_json::<_, Value>(url, &body)
            });

        match result {
            Ok(response) => {
                tracing::debug!("Wrote image {} to {target}: {response}", image.name());
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to write image to {target}: {e}");
                Err(ClientError::ImageWriteFailed {
                    range: target,
                    source: Box::new(e),
                })
            }
        }
    }

    fn loaded(&mut self) -> Result<&SheetData> {
        let data = match self.data.take() {
            Some(data) => data,
            None => self.fetch()?,
        };
        let data: &SheetData = self.data.insert(data);
        Ok(data)
    }

    fn fetch(&self) -> Result<SheetData> {
        let url = self
            .client
            .endpoints()
            .values_read(&self.spreadsheet_token, &self.sheet_id);

        let ReadResponse { envelope, data } = self.client.get_json(url).map_err(|e| {
            tracing::error!("Failed to read sheet {}: {e}", self.sheet_id);
            e
        })?;

        let Some(data) = data else {
            let reason = envelope
                .msg
                .unwrap_or_else(|| "response has no data".to_string());
            tracing::error!("Failed to read sheet {}: {reason}", self.sheet_id);
            return Err(ClientError::ReadFailed {
                sheet: self.sheet_id.clone(),
                reason,
            });
        };

        let data = SheetData::new(decode_grid(data.value_range.values));
        tracing::info!(
            "Loaded sheet {} ({} rows x {} columns)",
            self.sheet_id,
            data.row_count(),
            data.col_count()
        );
        Ok(data)
    }
}

/// The address of a one-cell index
fn single_cell(index: RangeRef) -> Result<CellAddress> {
    match index {
        RangeRef::Cell(addr) => Ok(addr),
        RangeRef::Range(range) if range.is_single_cell() => Ok(range.start),
        RangeRef::Range(range) => Err(ClientError::NotSingleCell(range.to_a1_string())),
    }
}
