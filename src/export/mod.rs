//! Writers that turn a rendered [`MemorySheet`](crate::backend::MemorySheet)
//! into an output file.

pub mod csv;
pub mod xlsx;

use std::fmt;

use clap::ValueEnum;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("xlsx export failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("csv export failed: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Xlsx, ExportFormat::Csv];
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Xlsx => write!(f, "xlsx"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}
