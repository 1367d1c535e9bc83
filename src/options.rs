//! Per-row and per-cell overrides, and render-wide options.

use std::collections::HashMap;

use serde::Deserialize;

use crate::border::Borders;
use crate::merge::MergeRules;
use crate::style::Style;

/// Overrides for one data row (0-based data-row index, header rows excluded).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RowOptions {
    pub borders: Option<Borders>,
    pub style: Option<Style>,
    /// Row-level merge rules. When set, the row is excluded from column-level
    /// vertical merging, and non-empty `horizontal` rules replace the columns' own.
    pub merge: Option<MergeRules>,
    /// `Some(false)` vetoes vertical merging through this row.
    pub mergeable: Option<bool>,
}

impl RowOptions {
    pub fn is_mergeable(&self) -> bool {
        self.mergeable != Some(false)
    }

    /// Horizontal rules that override the column-level ones, if any.
    pub fn horizontal_override(&self) -> Option<&[crate::merge::MergeCondition]> {
        self.merge
            .as_ref()
            .map(|m| m.horizontal.as_slice())
            .filter(|conditions| !conditions.is_empty())
    }
}

/// Overrides for one body cell, the finest granularity.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CellOptions {
    pub borders: Option<Borders>,
    pub style: Option<Style>,
    /// `Some(false)` excludes the cell from every merge range.
    pub mergeable: Option<bool>,
}

impl CellOptions {
    pub fn is_mergeable(&self) -> bool {
        self.mergeable != Some(false)
    }
}

/// Addresses a body cell by leaf-column index and data-row index, both 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub column: usize,
    pub row: usize,
}

impl CellKey {
    pub fn new(column: usize, row: usize) -> Self {
        CellKey { column, row }
    }
}

pub type RowOptionsMap = HashMap<usize, RowOptions>;
pub type CellOptionsMap = HashMap<CellKey, CellOptions>;

/// Options that apply to a whole render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Write the (possibly multi-row) header above the data.
    pub write_header: bool,
}

impl Default for RenderOptions {
    /// Returns the default options: the header is written.
    fn default() -> Self {
        RenderOptions { write_header: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::MergeCondition;

    #[test]
    fn test_mergeable_defaults_to_true() {
        assert!(RowOptions::default().is_mergeable());
        assert!(CellOptions::default().is_mergeable());
        let vetoed = RowOptions {
            mergeable: Some(false),
            ..Default::default()
        };
        assert!(!vetoed.is_mergeable());
    }

    #[test]
    fn test_horizontal_override() {
        let mut options = RowOptions::default();
        assert_eq!(options.horizontal_override(), None);

        options.merge = Some(MergeRules::vertical(&[MergeCondition::Identical]));
        assert_eq!(options.horizontal_override(), None);

        options.merge = Some(MergeRules::horizontal(&[MergeCondition::Empty]));
        assert_eq!(
            options.horizontal_override(),
            Some(&[MergeCondition::Empty][..])
        );
    }

    #[test]
    fn test_render_options_default() {
        assert!(RenderOptions::default().write_header);
    }
}
