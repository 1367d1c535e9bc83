//! The table renderer.
//!
//! Rendering drives a [`Backend`] strictly in this order: header text, header
//! merges, body values, vertical merges (column by column), horizontal merges
//! (row by row), styles (header, then body in row-major order) and finally
//! borders (column, row, header and cell layers).

pub mod header;
pub mod merge;
pub mod style;

use crate::backend::{Backend, CellRange};
use crate::column::Column;
use crate::data::Value;
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::options::RenderOptions;
use crate::table::{lookup_field, HeaderLayout, RenderError, Table};

/// Formatted body values, indexed `[data row][leaf column]`. `None` marks a
/// missing field.
pub type BodyGrid = Vec<Vec<Option<Value>>>;

pub struct TableRenderer<'a> {
    table: &'a Table,
    options: RenderOptions,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> TableRenderer<'a> {
    /// Creates a renderer that reports warnings through the `log` facade.
    pub fn new(table: &'a Table, options: RenderOptions) -> Self {
        TableRenderer {
            table,
            options,
            diagnostics: &LogDiagnostics,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: &'a dyn Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn layout(&self) -> HeaderLayout {
        HeaderLayout::new(&self.table.columns, &self.options)
    }

    /// Renders the table into `backend`.
    ///
    /// # Returns
    ///
    /// `Err` only for structural problems (no columns, malformed nested data, a
    /// cell value the backend refuses to store). Failed merges, styles and
    /// borders are reported to the diagnostics sink and skipped.
    pub fn render<B: Backend + ?Sized>(&self, backend: &mut B) -> Result<(), RenderError> {
        self.table.validate()?;

        let layout = self.layout();
        let leaves = self.table.leaves();

        if layout.write_header {
            self.write_header(backend, &layout)?;
            self.merge_header(backend, &layout);
        }

        let grid = self.format_body(&*backend, &leaves)?;
        self.write_body(backend, &layout, &grid)?;

        self.merge_vertical(backend, &layout, &leaves, &grid);
        self.merge_horizontal(backend, &layout, &leaves, &grid);

        self.apply_styles(backend, &layout, &leaves);
        self.apply_borders(backend, &layout, &leaves);

        log::debug!(
            "rendered {} rows x {} columns ({} header rows)",
            self.table.rows.len(),
            leaves.len(),
            layout.header_rows()
        );
        Ok(())
    }

    /// Runs every present body value through the backend formatter.
    ///
    /// A value the formatter rejects is kept raw, with a warning.
    pub fn format_body<B: Backend + ?Sized>(
        &self,
        backend: &B,
        leaves: &[&Column],
    ) -> Result<BodyGrid, RenderError> {
        let mut grid = Vec::with_capacity(self.table.rows.len());
        for (row_index, row) in self.table.rows.iter().enumerate() {
            let mut cells = Vec::with_capacity(leaves.len());
            for leaf in leaves {
                let cell = match lookup_field(row, leaf, row_index)? {
                    None => None,
                    Some(raw) => match backend.process_value(raw, &leaf.format) {
                        Ok(value) => Some(value),
                        Err(err) => {
                            self.warn(format!(
                                "data row {row_index}, column \"{}\": cannot apply format \"{}\": {err}",
                                leaf.name, leaf.format
                            ));
                            Some(raw.clone())
                        }
                    },
                };
                cells.push(cell);
            }
            grid.push(cells);
        }
        Ok(grid)
    }

    fn write_body<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        layout: &HeaderLayout,
        grid: &BodyGrid,
    ) -> Result<(), RenderError> {
        for (row_index, cells) in grid.iter().enumerate() {
            let row = layout.sheet_row(row_index);
            for (col_index, cell) in cells.iter().enumerate() {
                if let Some(value) = cell {
                    backend.set_cell_value(col_index as u32 + 1, row, value)?;
                }
            }
        }
        Ok(())
    }

    fn warn(&self, message: String) {
        self.diagnostics.warn(&message);
    }

    /// Issues one merge call, reporting a failure instead of propagating it.
    fn merge_range<B: Backend + ?Sized>(&self, backend: &mut B, range: CellRange, kind: &str) {
        let name = range_name(&*backend, range);
        match backend.merge_cells(range.start_col, range.start_row, range.end_col, range.end_row) {
            Ok(()) => log::debug!("merged {name} ({kind})"),
            Err(err) => self.warn(format!("failed to merge {name} ({kind}): {err}")),
        }
    }
}

/// Spreadsheet-style name of a range such as `A2:B4`, for messages.
fn range_name<B: Backend + ?Sized>(backend: &B, range: CellRange) -> String {
    let start = backend.column_letter(range.start_col);
    let end = backend.column_letter(range.end_col);
    match (start, end) {
        (Ok(start), Ok(_)) if range.is_single_cell() => format!("{start}{}", range.start_row),
        (Ok(start), Ok(end)) => {
            format!("{start}{}:{end}{}", range.start_row, range.end_row)
        }
        _ => range.to_string(),
    }
}
