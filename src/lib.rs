pub mod backend;
pub mod border;
pub mod cli;
pub mod column;
pub mod config;
pub mod data;
pub mod diagnostics;
pub mod docs;
pub mod export;
pub mod format;
pub mod merge;
pub mod options;
pub mod render;
pub mod style;
pub mod table;

pub use backend::{Backend, BackendError, CellRange, MemorySheet};
pub use column::Column;
pub use data::{Data, Value};
pub use options::{CellOptions, RenderOptions, RowOptions};
pub use render::TableRenderer;
pub use table::{RenderError, Table};

pub fn get_output_types() -> Vec<String> {
    export::ExportFormat::ALL
        .iter()
        .map(|format| format.to_string())
        .collect()
}
