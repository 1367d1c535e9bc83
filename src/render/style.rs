//! Style and border cascade.

use super::TableRenderer;
use crate::backend::{Backend, CellRange};
use crate::border::{Border, BorderSide, Borders};
use crate::column::Column;
use crate::options::CellKey;
use crate::style::Style;
use crate::table::{HeaderLayout, Table};

/// Resolves the style of one body cell: cell options, then row options, then
/// the column's own style.
pub fn effective_style<'a>(
    table: &'a Table,
    leaf_index: usize,
    leaf: &'a Column,
    row: usize,
) -> Option<&'a Style> {
    table
        .cell_options(leaf_index, row)
        .and_then(|o| o.style.as_ref())
        .or_else(|| table.row_options(row).and_then(|o| o.style.as_ref()))
        .or(leaf.style.as_ref())
}

/// Picks the border of `side` for the cell at `position` of `count` cells along
/// the layer's axis. `leading`/`trailing` are the sides facing the start and
/// end of that axis; the two across it are drawn on every cell.
fn layered_side(
    borders: &Borders,
    side: BorderSide,
    leading: BorderSide,
    trailing: BorderSide,
    position: usize,
    count: usize,
) -> Option<Border> {
    if side == leading && position > 0 {
        borders.interior_side(side)
    } else if side == trailing && position + 1 < count {
        borders.interior_side(side)
    } else {
        borders.side(side)
    }
}

impl TableRenderer<'_> {
    pub(super) fn apply_styles<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        layout: &HeaderLayout,
        leaves: &[&Column],
    ) {
        if layout.write_header {
            self.apply_header_style(backend, layout, leaves.len() as u32);
        }

        for row_index in 0..self.table.rows.len() {
            let row = layout.sheet_row(row_index);
            for (leaf_index, leaf) in leaves.iter().enumerate() {
                let Some(style) = effective_style(self.table, leaf_index, leaf, row_index) else {
                    continue;
                };
                let col = leaf_index as u32 + 1;
                if let Err(err) = backend.apply_style_to_cell(col, row, style) {
                    self.warn(format!("failed to style cell ({col}, {row}): {err}"));
                }
            }
        }
    }

    fn apply_header_style<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        layout: &HeaderLayout,
        width: u32,
    ) {
        let style = Style::header_default();
        let range = CellRange::new(1, 1, width, layout.header_rows());
        let Err(err) = backend.apply_style_to_range(range, &style) else {
            return;
        };
        self.warn(format!(
            "failed to style header range {range}, styling cells one by one: {err}"
        ));
        for (col, row) in range.cells() {
            if let Err(err) = backend.apply_style_to_cell(col, row, &style) {
                self.warn(format!("failed to style header cell ({col}, {row}): {err}"));
            }
        }
    }

    pub(super) fn apply_borders<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        layout: &HeaderLayout,
        leaves: &[&Column],
    ) {
        let row_count = self.table.rows.len();
        let width = leaves.len();

        // Column layer
        for (leaf_index, leaf) in leaves.iter().enumerate() {
            let Some(borders) = leaf.borders.as_ref().filter(|b| !b.is_empty()) else {
                continue;
            };
            let col = leaf_index as u32 + 1;
            for row_index in 0..row_count {
                let row = layout.sheet_row(row_index);
                for side in BorderSide::ALL {
                    let border = layered_side(
                        borders,
                        side,
                        BorderSide::Top,
                        BorderSide::Bottom,
                        row_index,
                        row_count,
                    );
                    self.apply_side(backend, col, row, side, border);
                }
            }
        }

        // Row layer
        for row_index in 0..row_count {
            let Some(borders) = self
                .table
                .row_options(row_index)
                .and_then(|o| o.borders.as_ref())
                .filter(|b| !b.is_empty())
            else {
                continue;
            };
            let row = layout.sheet_row(row_index);
            for leaf_index in 0..width {
                for side in BorderSide::ALL {
                    let border = layered_side(
                        borders,
                        side,
                        BorderSide::Left,
                        BorderSide::Right,
                        leaf_index,
                        width,
                    );
                    self.apply_side(backend, leaf_index as u32 + 1, row, side, border);
                }
            }
        }

        if layout.write_header {
            self.apply_header_border(backend, layout, width as u32);
        }

        // Cell layer, row-major
        let mut keys: Vec<&CellKey> = self.table.cell_options.keys().collect();
        keys.sort_by_key(|k| (k.row, k.column));
        for key in keys {
            let Some(borders) = self.table.cell_options[key].borders.as_ref() else {
                continue;
            };
            if key.column >= width || key.row >= row_count {
                self.warn(format!(
                    "cell options for column {} / data row {} are outside the table",
                    key.column, key.row
                ));
                continue;
            }
            let (col, row) = (key.column as u32 + 1, layout.sheet_row(key.row));
            for side in BorderSide::ALL {
                self.apply_side(backend, col, row, side, borders.side(side));
            }
        }
    }

    fn apply_header_border<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        layout: &HeaderLayout,
        width: u32,
    ) {
        let row = layout.header_rows();
        let range = CellRange::new(1, row, width, row);
        let bottom = Borders::new().with_bottom(Border::thin());
        let Err(err) = backend.apply_borders_to_range(range, &bottom) else {
            return;
        };
        self.warn(format!(
            "failed to border header range {range}, bordering cells one by one: {err}"
        ));
        for col in 1..=width {
            if backend.has_existing_border(col, row, BorderSide::Bottom) {
                continue;
            }
            self.apply_side(backend, col, row, BorderSide::Bottom, Some(Border::thin()));
        }
    }

    fn apply_side<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        col: u32,
        row: u32,
        side: BorderSide,
        border: Option<Border>,
    ) {
        let Some(border) = border else {
            return;
        };
        if let Err(err) = backend.apply_border_to_cell(col, row, side, &border) {
            self.warn(format!("failed to apply {side:?} border to ({col}, {row}): {err}"));
        }
    }
}
