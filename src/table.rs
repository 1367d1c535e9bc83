use thiserror::Error;

use crate::backend::BackendError;
use crate::column::{self, Column};
use crate::data::{Data, DataError, DataSlice, Value};
use crate::options::{
    CellKey, CellOptions, CellOptionsMap, RenderOptions, RowOptions, RowOptionsMap,
};

/// Errors that abort a render. Backend failures on individual merges, styles and
/// borders are not among them; those are reported as warnings.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("no table data provided: the table has no columns")]
    NoColumns,
    #[error("data row {row}, column \"{column}\": {source}")]
    Data {
        row: usize,
        column: String,
        #[source]
        source: DataError,
    },
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Everything a render reads: the column tree, the rows and their overrides.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: DataSlice,
    pub row_options: RowOptionsMap,
    pub cell_options: CellOptionsMap,
}

impl Table {
    /// Creates a new `Table` without any overrides.
    ///
    /// # Arguments
    ///
    /// * `columns` - The top-level columns, left to right.
    /// * `rows` - The data rows in output order.
    pub fn new(columns: Vec<Column>, rows: DataSlice) -> Self {
        Table {
            columns,
            rows,
            ..Default::default()
        }
    }

    pub fn with_row_options(mut self, row: usize, options: RowOptions) -> Self {
        self.row_options.insert(row, options);
        self
    }

    pub fn with_cell_options(mut self, column: usize, row: usize, options: CellOptions) -> Self {
        self.cell_options.insert(CellKey::new(column, row), options);
        self
    }

    /// The leaf columns in output order.
    pub fn leaves(&self) -> Vec<&Column> {
        column::flatten(&self.columns)
    }

    pub fn row_options(&self, row: usize) -> Option<&RowOptions> {
        self.row_options.get(&row)
    }

    pub fn cell_options(&self, column: usize, row: usize) -> Option<&CellOptions> {
        self.cell_options.get(&CellKey::new(column, row))
    }

    /// Validates the table before rendering.
    ///
    /// Checks that there is at least one column and that every leaf lookup on
    /// every row is structurally sound. Missing fields are fine.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the table can be rendered, otherwise the first `RenderError` found.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.columns.is_empty() {
            return Err(RenderError::NoColumns);
        }
        let leaves = self.leaves();
        for (row_index, row) in self.rows.iter().enumerate() {
            for leaf in &leaves {
                lookup_field(row, leaf, row_index)?;
            }
        }
        Ok(())
    }

    /// Checks if the `Table` is valid.
    pub fn valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Reads a leaf column's raw value from a row, `None` when the field is missing.
pub(crate) fn lookup_field<'a>(
    row: &'a Data,
    leaf: &Column,
    row_index: usize,
) -> Result<Option<&'a Value>, RenderError> {
    row.lookup(&leaf.field_path())
        .map_err(|source| RenderError::Data {
            row: row_index,
            column: leaf.name.clone(),
            source,
        })
}

/// Placement of the header block and the translation between sheet rows and
/// data-row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    pub write_header: bool,
    /// Number of header levels in the column tree (at least 1).
    pub depth: u32,
}

impl HeaderLayout {
    pub fn new(columns: &[Column], options: &RenderOptions) -> Self {
        HeaderLayout {
            write_header: options.write_header,
            depth: column::max_depth(columns) as u32,
        }
    }

    /// Number of sheet rows occupied by the header.
    pub fn header_rows(&self) -> u32 {
        if self.write_header {
            self.depth
        } else {
            0
        }
    }

    /// The 1-based sheet row of the first data row.
    pub fn first_data_row(&self) -> u32 {
        1 + self.header_rows()
    }

    /// The 1-based sheet row of a 0-based data row.
    pub fn sheet_row(&self, data_row: usize) -> u32 {
        self.first_data_row() + data_row as u32
    }

    /// The 0-based data row of a sheet row, `None` inside the header.
    pub fn data_row(&self, sheet_row: u32) -> Option<usize> {
        sheet_row
            .checked_sub(self.first_data_row())
            .map(|index| index as usize)
    }
}
