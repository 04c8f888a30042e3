//! Cell value types

use std::fmt;

use crate::image::Image;

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// Boolean value
    Boolean(bool),

    /// Numeric value
    Number(f64),

    /// Plain text
    Text(String),

    /// Formula; the server computes its value
    Formula(Formula),

    /// Image embedded in the cell
    Image(Image),

    /// Any other structured cell content (rich text segments, mentions, links)
    Other(serde_json::Value),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Create a new formula value
    pub fn formula<S: Into<String>>(text: S) -> Self {
        CellValue::Formula(Formula::new(text))
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the cell contains a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula(_))
    }

    /// Check if the cell contains an image
    pub fn is_image(&self) -> bool {
        matches!(self, CellValue::Image(_))
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as formula if this is a formula
    pub fn as_formula(&self) -> Option<&Formula> {
        match self {
            CellValue::Formula(f) => Some(f),
            _ => None,
        }
    }

    /// Get as image if this is an image
    pub fn as_image(&self) -> Option<&Image> {
        match self {
            CellValue::Image(img) => Some(img),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Boolean(_) => "boolean",
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "text",
            CellValue::Formula(_) => "formula",
            CellValue::Image(_) => "image",
            CellValue::Other(_) => "other",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, ""),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Formula(formula) => write!(f, "{}", formula),
            CellValue::Image(img) => write!(f, "{}", img),
            CellValue::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<Formula> for CellValue {
    fn from(f: Formula) -> Self {
        CellValue::Formula(f)
    }
}

impl From<Image> for CellValue {
    fn from(img: Image) -> Self {
        CellValue::Image(img)
    }
}

/// A formula to be evaluated by the server (e.g., "=SUM(A1:A10)")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Formula {
    pub text: String,
}

impl Formula {
    /// Wrap formula text as entered (e.g. "=SUM(A1:A3)")
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
