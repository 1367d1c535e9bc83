//! Header text layout and header merge ranges.

use super::TableRenderer;
use crate::backend::{Backend, CellRange};
use crate::column::{self, Column};
use crate::data::Value;
use crate::table::{HeaderLayout, RenderError};

/// Returns the header text of one level (0-based) for every leaf column.
///
/// A group label lands on the first physical column of its span, and the rest
/// of the span is blank. A leaf above `level` leaves a blank placeholder since
/// its label already sits in a higher row.
pub fn header_labels(columns: &[Column], level: usize) -> Vec<String> {
    let mut labels = Vec::with_capacity(column::total_leaf_count(columns));
    fill_level(columns, 0, level, &mut labels);
    labels
}

fn fill_level(columns: &[Column], depth: usize, level: usize, labels: &mut Vec<String>) {
    for column in columns {
        if depth == level {
            labels.push(column.label.clone());
            labels.extend(std::iter::repeat(String::new()).take(column.leaf_count() - 1));
        } else if column.has_children() {
            fill_level(&column.children, depth + 1, level, labels);
        } else {
            labels.push(String::new());
        }
    }
}

/// Returns the merges a multi-level header needs, in depth-first order.
///
/// Groups spanning more than one column merge across their span; leaves that
/// end above the last header row merge down to it. A single-level header needs
/// no merges.
pub fn header_merge_ranges(columns: &[Column], depth: u32) -> Vec<CellRange> {
    let mut ranges = Vec::new();
    if depth > 1 {
        collect_merges(columns, 1, 1, depth, &mut ranges);
    }
    ranges
}

fn collect_merges(
    columns: &[Column],
    row: u32,
    first_col: u32,
    depth: u32,
    ranges: &mut Vec<CellRange>,
) {
    let mut col = first_col;
    for column in columns {
        let span = column.leaf_count() as u32;
        if column.has_children() {
            if span > 1 {
                ranges.push(CellRange::new(col, row, col + span - 1, row));
            }
            collect_merges(&column.children, row + 1, col, depth, ranges);
        } else if row < depth {
            ranges.push(CellRange::new(col, row, col, depth));
        }
        col += span;
    }
}

impl TableRenderer<'_> {
    pub(super) fn write_header<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        layout: &HeaderLayout,
    ) -> Result<(), RenderError> {
        for level in 0..layout.depth {
            let labels = header_labels(&self.table.columns, level as usize);
            for (index, label) in labels.iter().enumerate() {
                if label.is_empty() {
                    continue;
                }
                backend.set_cell_value(index as u32 + 1, level + 1, &Value::from(label.as_str()))?;
            }
        }
        Ok(())
    }

    pub(super) fn merge_header<B: Backend + ?Sized>(&self, backend: &mut B, layout: &HeaderLayout) {
        for range in header_merge_ranges(&self.table.columns, layout.depth) {
            self.merge_range(backend, range, "header");
        }
    }
}
