//! JSON table definitions.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::border::Borders;
use crate::column::Column;
use crate::data::{self, Data};
use crate::options::{CellOptions, RenderOptions, RowOptions};
use crate::style::Style;
use crate::table::Table;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid table definition: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sort_by field \"{0}\" is not a leaf column")]
    UnknownSortField(String),
}

/// One entry of the `cell_options` list, addressed by 0-based leaf column and
/// data row.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CellOptionsEntry {
    pub column: usize,
    pub row: usize,
    pub borders: Option<Borders>,
    pub style: Option<Style>,
    pub mergeable: Option<bool>,
}

/// A complete table as read from JSON.
///
/// ```json
/// {
///   "sheet_name": "Orders",
///   "columns": [{"name": "region", "label": "Region", "merge": {"vertical": ["identical"]}}],
///   "rows": [{"region": "North"}, {"region": "North"}],
///   "row_options": {"1": {"style": {"bold": true}}},
///   "cell_options": [{"column": 0, "row": 0, "mergeable": false}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableDefinition {
    pub columns: Vec<Column>,
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
    pub row_options: BTreeMap<usize, RowOptions>,
    pub cell_options: Vec<CellOptionsEntry>,
    pub write_header: bool,
    pub sheet_name: Option<String>,
    /// Leaf column name to sort the rows by, oldest first, before rendering.
    pub sort_by: Option<String>,
}

impl Default for TableDefinition {
    fn default() -> Self {
        TableDefinition {
            columns: Vec::new(),
            rows: Vec::new(),
            row_options: BTreeMap::new(),
            cell_options: Vec::new(),
            write_header: true,
            sheet_name: None,
            sort_by: None,
        }
    }
}

impl TableDefinition {
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            write_header: self.write_header,
        }
    }

    /// Builds the `Table`, sorting the rows first when `sort_by` is set.
    pub fn into_table(self) -> Result<Table, ConfigError> {
        let mut rows: Vec<Data> = self.rows.into_iter().map(Data::from).collect();
        if let Some(field) = &self.sort_by {
            let is_leaf = crate::column::flatten(&self.columns)
                .iter()
                .any(|leaf| &leaf.name == field);
            if !is_leaf {
                return Err(ConfigError::UnknownSortField(field.clone()));
            }
            data::sort_chronologically(&mut rows, field);
        }

        let mut table = Table::new(self.columns, rows);
        table.row_options.extend(self.row_options);
        for entry in self.cell_options {
            table = table.with_cell_options(
                entry.column,
                entry.row,
                CellOptions {
                    borders: entry.borders,
                    style: entry.style,
                    mergeable: entry.mergeable,
                },
            );
        }
        Ok(table)
    }
}
