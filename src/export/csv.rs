use std::io::Write;

use super::ExportError;
use crate::backend::{Backend, MemorySheet};

/// Writes the used range of `sheet` as CSV, one record per sheet row.
///
/// Merged cells keep their text on the anchor only; the covered cells are
/// empty.
pub fn write_csv<W: Write>(sheet: &MemorySheet, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(false).from_writer(writer);
    let (max_col, max_row) = sheet.dimensions();
    for row in 1..=max_row {
        let record: Vec<String> = (1..=max_col)
            .map(|col| match sheet.merged_range_at(col, row) {
                Some(m) if (m.start_col, m.start_row) != (col, row) => String::new(),
                _ => sheet.get_cell_value(col, row),
            })
            .collect();
        csv_writer.write_record(&record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
