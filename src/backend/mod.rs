//! The narrow operation set the renderer drives.
//!
//! All coordinates are 1-based `(col, row)`: row 1 is the first sheet row and
//! column 1 is `A`.

pub mod memory;

use std::fmt;

use thiserror::Error;

use crate::border::{Border, BorderSide, Borders};
use crate::data::Value;
use crate::format::FormatError;
use crate::style::Style;

pub use memory::MemorySheet;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BackendError {
    #[error("invalid cell coordinate ({col}, {row})")]
    InvalidCoordinate { col: u32, row: u32 },
    #[error("invalid range {0}")]
    InvalidRange(CellRange),
    #[error("range {requested} overlaps merged range {existing}")]
    MergeConflict {
        requested: CellRange,
        existing: CellRange,
    },
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("{0}")]
    Other(String),
}

/// An inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub start_col: u32,
    pub start_row: u32,
    pub end_col: u32,
    pub end_row: u32,
}

impl CellRange {
    pub fn new(start_col: u32, start_row: u32, end_col: u32, end_row: u32) -> Self {
        CellRange {
            start_col,
            start_row,
            end_col,
            end_row,
        }
    }

    /// 1-based, non-empty and correctly ordered.
    pub fn is_valid(&self) -> bool {
        self.start_col >= 1
            && self.start_row >= 1
            && self.start_col <= self.end_col
            && self.start_row <= self.end_row
    }

    pub fn contains(&self, col: u32, row: u32) -> bool {
        (self.start_col..=self.end_col).contains(&col)
            && (self.start_row..=self.end_row).contains(&row)
    }

    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.start_col <= other.end_col
            && other.start_col <= self.end_col
            && self.start_row <= other.end_row
            && other.start_row <= self.end_row
    }

    pub fn is_single_cell(&self) -> bool {
        self.start_col == self.end_col && self.start_row == self.end_row
    }

    /// Iterates every `(col, row)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> {
        let CellRange {
            start_col,
            start_row,
            end_col,
            end_row,
        } = *self;
        (start_row..=end_row).flat_map(move |row| (start_col..=end_col).map(move |col| (col, row)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.start_col, self.start_row, self.end_col, self.end_row
        )
    }
}

/// Cell I/O, merge and styling operations of a sheet.
///
/// Implemented by the in-memory sheet in this crate; other spreadsheet
/// adapters can implement it to receive renders directly.
pub trait Backend {
    fn set_cell_value(&mut self, col: u32, row: u32, value: &Value) -> Result<(), BackendError>;

    /// Text currently shown in the cell, empty if unset.
    fn get_cell_value(&self, col: u32, row: u32) -> String;

    fn merge_cells(
        &mut self,
        start_col: u32,
        start_row: u32,
        end_col: u32,
        end_row: u32,
    ) -> Result<(), BackendError>;

    fn is_cell_merged(&self, col: u32, row: u32) -> bool;

    /// `true` if the cell belongs to a merged range spanning more than one column.
    fn is_cell_merged_horizontally(&self, col: u32, row: u32) -> bool;

    fn apply_border_to_cell(
        &mut self,
        col: u32,
        row: u32,
        side: BorderSide,
        border: &Border,
    ) -> Result<(), BackendError>;

    /// Applies every declared outer side of `borders` to every cell in the range.
    fn apply_borders_to_range(
        &mut self,
        range: CellRange,
        borders: &Borders,
    ) -> Result<(), BackendError>;

    fn has_existing_border(&self, col: u32, row: u32, side: BorderSide) -> bool;

    fn apply_style_to_cell(&mut self, col: u32, row: u32, style: &Style)
        -> Result<(), BackendError>;

    fn apply_style_to_range(&mut self, range: CellRange, style: &Style)
        -> Result<(), BackendError>;

    /// Spreadsheet letter(s) for a 1-based column, e.g. `1 -> "A"`, `28 -> "AB"`.
    fn column_letter(&self, col: u32) -> Result<String, BackendError>;

    /// Renders a raw value according to a column's format spec.
    fn process_value(&self, raw: &Value, format: &str) -> Result<Value, BackendError>;
}
