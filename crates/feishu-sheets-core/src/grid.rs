//! Local cache of a sheet's values and write planning
//!
//! [`SheetData`] holds the values last fetched from the server and answers
//! reads by A1 index. Writes go to the server first; the cache is then
//! reconciled for cells that fall inside the already-loaded area only, so the
//! cache never grows beyond what the server returned.

use crate::address::{CellAddress, CellRange, RangeRef};
use crate::error::{Error, Result};
use crate::image::Image;
use crate::value::CellValue;

/// The result of reading an index from the cache
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A single cell
    Value(CellValue),
    /// A one-column range: one value per row
    Column(Vec<CellValue>),
    /// A multi-column range: one slice per row
    Rows(Vec<Vec<CellValue>>),
}

impl Selection {
    /// Unwrap a single-cell selection
    pub fn into_value(self) -> Option<CellValue> {
        match self {
            Selection::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Flatten into rows; a column becomes one single-cell row per value
    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        match self {
            Selection::Value(v) => vec![vec![v]],
            Selection::Column(values) => values.into_iter().map(|v| vec![v]).collect(),
            Selection::Rows(rows) => rows,
        }
    }
}

/// Values of one sheet, row-major
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetData {
    rows: Vec<Vec<CellValue>>,
}

impl SheetData {
    /// Wrap rows as returned by a read
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row (0 for an empty sheet)
    pub fn col_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    /// The cached rows
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Consume the cache, returning its rows
    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        self.rows
    }

    /// Borrow a single cell
    pub fn cell(&self, addr: CellAddress) -> Result<&CellValue> {
        self.rows
            .get(addr.row as usize)
            .and_then(|row| row.get(addr.col as usize))
            .ok_or_else(|| self.out_of_bounds(addr))
    }

    /// Read a cell or a range
    ///
    /// Ranges are clamped to the loaded data: missing rows are dropped and
    /// each row is cut at its own length. A one-column range yields one value
    /// per row instead, and a row too short for that column is an error.
    pub fn get(&self, index: &RangeRef) -> Result<Selection> {
        let range = match index {
            RangeRef::Cell(addr) => return self.cell(*addr).cloned().map(Selection::Value),
            RangeRef::Range(range) => range,
        };

        let start_row = (range.start.row as usize).min(self.rows.len());
        let end_row = (range.end.row as usize + 1).min(self.rows.len());
        let rows = &self.rows[start_row..end_row];

        if range.col_count() == 1 {
            let col = range.start.col;
            return rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    row.get(col as usize).cloned().ok_or_else(|| {
                        self.out_of_bounds(CellAddress::new((start_row + i) as u32, col))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Selection::Column);
        }

        let start_col = range.start.col as usize;
        let end_col = range.end.col as usize + 1;
        Ok(Selection::Rows(
            rows.iter()
                .map(|row| {
                    let start = start_col.min(row.len());
                    let end = end_col.min(row.len());
                    row[start..end].to_vec()
                })
                .collect(),
        ))
    }

    /// Reconcile one written cell; returns whether the cache changed
    ///
    /// Only cells inside `row_count() x col_count()` are updated.
    pub fn apply_cell(&mut self, addr: CellAddress, value: CellValue) -> bool {
        let (rows, cols) = (self.row_count(), self.col_count());
        if (addr.row as usize) >= rows || (addr.col as usize) >= cols {
            return false;
        }
        match self.rows[addr.row as usize].get_mut(addr.col as usize) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Reconcile a written range; returns the number of cells updated
    pub fn apply_range(&mut self, range: &CellRange, values: &[Vec<CellValue>]) -> usize {
        let mut updated = 0;
        for (addr, value) in range.cells().zip(values.iter().flatten()) {
            if self.apply_cell(addr, value.clone()) {
                updated += 1;
            }
        }
        updated
    }

    fn out_of_bounds(&self, addr: CellAddress) -> Error {
        Error::OutOfBounds {
            address: addr.to_a1_string(),
            rows: self.row_count(),
            cols: self.col_count(),
        }
    }
}

/// The server calls needed to write a cell or a range
///
/// Images cannot go through the value endpoint, so they are split out into
/// one upload per cell while their slot in the value grid is blanked.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteBatch {
    range: CellRange,
    values: Option<Vec<Vec<CellValue>>>,
    images: Vec<(CellAddress, Image)>,
}

impl WriteBatch {
    /// Plan a single-cell write
    pub fn cell(addr: CellAddress, value: CellValue) -> Self {
        let range = CellRange::single(addr);
        match value {
            CellValue::Image(img) => Self {
                range,
                values: None,
                images: vec![(addr, img)],
            },
            other => Self {
                range,
                values: Some(vec![vec![other]]),
                images: Vec::new(),
            },
        }
    }

    /// Plan a range write
    ///
    /// `values` must match the range exactly: `row_count()` rows of
    /// `col_count()` cells each.
    pub fn range(range: CellRange, values: Vec<Vec<CellValue>>) -> Result<Self> {
        let expected_rows = range.row_count();
        let expected_cols = range.col_count();
        let shape_ok = values.len() == expected_rows as usize
            && values.iter().all(|row| row.len() == expected_cols as usize);
        if !shape_ok {
            return Err(Error::ShapeMismatch {
                range: range.to_a1_string(),
                expected_rows,
                expected_cols,
                actual: describe_shape(&values),
            });
        }

        let mut images = Vec::new();
        let mut all_images = true;
        let mut grid = values;
        for (addr, slot) in range.cells().zip(grid.iter_mut().flatten()) {
            if slot.is_image() {
                if let CellValue::Image(img) = std::mem::replace(slot, CellValue::text("")) {
                    images.push((addr, img));
                }
            } else {
                all_images = false;
            }
        }

        Ok(Self {
            range,
            values: if all_images { None } else { Some(grid) },
            images,
        })
    }

    /// The range this batch writes to
    pub fn target(&self) -> &CellRange {
        &self.range
    }

    /// The value write, if any cell needs one
    pub fn values(&self) -> Option<(&CellRange, &[Vec<CellValue>])> {
        self.values.as_deref().map(|v| (&self.range, v))
    }

    /// Per-cell image uploads
    pub fn images(&self) -> &[(CellAddress, Image)] {
        &self.images
    }

    /// What the cache should hold after the batch succeeds
    pub fn cache_values(&self) -> Vec<Vec<CellValue>> {
        let mut grid = match &self.values {
            Some(values) => values.clone(),
            None => vec![
                vec![CellValue::Empty; self.range.col_count() as usize];
                self.range.row_count() as usize
            ],
        };
        for (addr, img) in &self.images {
            let r = (addr.row - self.range.start.row) as usize;
            let c = (addr.col - self.range.start.col) as usize;
            grid[r][c] = CellValue::Image(img.clone());
        }
        grid
    }
}

fn describe_shape(values: &[Vec<CellValue>]) -> String {
    let widths: Vec<usize> = values.iter().map(Vec::len).collect();
    match widths.first() {
        Some(first) if widths.iter().all(|w| w == first) => {
            format!("{}x{}", values.len(), first)
        }
        Some(_) => format!("{} rows of widths {:?}", values.len(), widths),
        None => "0 rows".to_string(),
    }
}
