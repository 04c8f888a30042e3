//! A1-style cell addresses, ranges and index references

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "B3")
///
/// Both indices are zero-based: "A1" is `(0, 0)` and "B3" is row 2, column 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., XFD=16383)
    pub col: u32,
}

impl CellAddress {
    /// Create a new cell address from zero-based indices
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Create a cell address, rejecting indices outside the sheet grid
    pub fn try_new(row: u32, col: u32) -> Result<Self> {
        let addr = Self { row, col };
        addr.validate()?;
        Ok(addr)
    }

    /// Check that the address lies within `MAX_ROWS x MAX_COLS`
    pub fn validate(&self) -> Result<()> {
        if self.row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(self.row, MAX_ROWS - 1));
        }
        if self.col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(self.col, MAX_COLS - 1));
        }
        Ok(())
    }

    /// Parse a cell address from A1-style notation
    ///
    /// Surrounding whitespace is ignored and column letters are
    /// case-insensitive. Anything after the row digits is rejected.
    ///
    /// # Examples
    /// ```
    /// use feishu_sheets_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B3").unwrap();
    /// assert_eq!((addr.row, addr.col), (2, 1));
    ///
    /// let addr = CellAddress::parse(" aa10 ").unwrap();
    /// assert_eq!((addr.row, addr.col), (9, 26));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        // Parse column letters
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }

        if pos == 0 {
            return Err(Error::InvalidAddress(format!("no column letters in '{}'", s)));
        }

        let col = Self::letters_to_column(&s[..pos])?;

        // Parse row number
        let row_str = &s[pos..];
        if row_str.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }

        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "unexpected characters after column letters in '{}'",
                s
            )));
        }

        let row: u64 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        let row = row - 1;

        if row >= MAX_ROWS as u64 {
            return Err(Error::RowOutOfBounds(
                row.min(u32::MAX as u64) as u32,
                MAX_ROWS - 1,
            ));
        }

        Ok(Self {
            row: row as u32,
            col,
        })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col as u64 + 1;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u64 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u64 - 'A' as u64 + 1);

            if col > MAX_COLS as u64 {
                return Err(Error::ColumnOutOfBounds(
                    col.min(u32::MAX as u64) as u32 - 1,
                    MAX_COLS - 1,
                ));
            }
        }

        Ok((col - 1) as u32)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row as u64 + 1)
    }

    /// Create a range from this address to another
    pub fn to(&self, other: CellAddress) -> CellRange {
        CellRange::new(*self, other)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A range of cells (e.g., "A1:C5"), inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        // Normalize so start is top-left and end is bottom-right
        Self {
            start: CellAddress::new(start.row.min(end.row), start.col.min(end.col)),
            end: CellAddress::new(start.row.max(end.row), start.col.max(end.col)),
        }
    }

    /// Create a range, rejecting corners outside the sheet grid
    pub fn try_new(start: CellAddress, end: CellAddress) -> Result<Self> {
        let range = Self::new(start, end);
        range.validate()?;
        Ok(range)
    }

    /// Check that both corners lie within the sheet grid
    pub fn validate(&self) -> Result<()> {
        self.start.validate()?;
        self.end.validate()
    }

    /// Create a range from row/column indices
    pub fn from_indices(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse a range from A1:C5 notation
    ///
    /// A bare address parses to a single-cell range.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        match s.split_once(':') {
            Some((start, end)) => {
                if end.contains(':') {
                    return Err(Error::InvalidRange(format!("more than one ':' in '{}'", s)));
                }
                let start = CellAddress::parse(start)
                    .map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e)))?;
                let end = CellAddress::parse(end)
                    .map_err(|e| Error::InvalidRange(format!("'{}': {}", s, e)))?;
                Ok(Self::new(start, end))
            }
            None => Ok(Self::single(CellAddress::parse(s)?)),
        }
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u32 {
        (self.end.row - self.start.row).saturating_add(1)
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u32 {
        (self.end.col - self.start.col).saturating_add(1)
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    /// Whether the range covers exactly one cell
    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: self.start.row,
            current_col: self.start.col,
            remaining: self.cell_count(),
        }
    }

    /// Format as "A1:C5"
    ///
    /// Single-cell ranges keep both ends ("B3:B3") since the API
    /// only accepts the two-corner form.
    pub fn to_a1_string(&self) -> String {
        format!("{}:{}", self.start.to_a1_string(), self.end.to_a1_string())
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    current_row: u32,
    current_col: u32,
    remaining: u64,
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let addr = CellAddress::new(self.current_row, self.current_col);
        self.remaining -= 1;

        // Move to next cell
        if self.current_col == self.range.end.col {
            self.current_col = self.range.start.col;
            self.current_row += 1;
        } else {
            self.current_col += 1;
        }

        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellRangeIterator {}

/// An index into a sheet: a single cell ("B3") or a range ("A1:C5")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeRef {
    Cell(CellAddress),
    Range(CellRange),
}

impl RangeRef {
    /// Parse an index string; anything containing ':' is a range
    pub fn parse(s: &str) -> Result<Self> {
        if s.contains(':') {
            CellRange::parse(s).map(RangeRef::Range)
        } else {
            CellAddress::parse(s).map(RangeRef::Cell)
        }
    }

    /// The covered cells as a range (a cell becomes a one-cell range)
    pub fn as_range(&self) -> CellRange {
        match self {
            RangeRef::Cell(addr) => CellRange::single(*addr),
            RangeRef::Range(range) => *range,
        }
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeRef::Cell(addr) => write!(f, "{}", addr),
            RangeRef::Range(range) => write!(f, "{}", range),
        }
    }
}

impl FromStr for RangeRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<CellAddress> for RangeRef {
    fn from(addr: CellAddress) -> Self {
        RangeRef::Cell(addr)
    }
}

impl From<CellRange> for RangeRef {
    fn from(range: CellRange) -> Self {
        RangeRef::Range(range)
    }
}

/// Conversion into a [`RangeRef`], fallible for textual indices
pub trait IntoRangeRef {
    fn into_range_ref(self) -> Result<RangeRef>;
}

impl IntoRangeRef for RangeRef {
    fn into_range_ref(self) -> Result<RangeRef> {
        self.as_range().validate()?;
        Ok(self)
    }
}

impl IntoRangeRef for CellAddress {
    fn into_range_ref(self) -> Result<RangeRef> {
        self.validate()?;
        Ok(RangeRef::Cell(self))
    }
}

impl IntoRangeRef for CellRange {
    fn into_range_ref(self) -> Result<RangeRef> {
        self.validate()?;
        Ok(RangeRef::Range(self))
    }
}

impl IntoRangeRef for (CellAddress, CellAddress) {
    fn into_range_ref(self) -> Result<RangeRef> {
        CellRange::try_new(self.0, self.1).map(RangeRef::Range)
    }
}

impl IntoRangeRef for &str {
    fn into_range_ref(self) -> Result<RangeRef> {
        RangeRef::parse(self)
    }
}

impl IntoRangeRef for &String {
    fn into_range_ref(self) -> Result<RangeRef> {
        RangeRef::parse(self)
    }
}

impl IntoRangeRef for String {
    fn into_range_ref(self) -> Result<RangeRef> {
        RangeRef::parse(&self)
    }
}

/// Build the sheet-qualified range string the API expects ("sheet!A1:C5")
pub fn qualified(sheet_id: &str, range: &CellRange) -> String {
    format!("{}!{}", sheet_id, range.to_a1_string())
}
