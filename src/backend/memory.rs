use std::collections::BTreeMap;

use rust_xlsxwriter::utility::column_number_to_name;

use super::{Backend, BackendError, CellRange};
use crate::border::{Border, BorderSide, Borders};
use crate::data::Value;
use crate::format::format_value;
use crate::style::Style;

/// Largest column number an XLSX sheet can hold (`XFD`).
pub const MAX_COLUMNS: u32 = 16_384;
/// Largest row number an XLSX sheet can hold.
pub const MAX_ROWS: u32 = 1_048_576;

/// The four edges recorded for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellBorders {
    pub left: Option<Border>,
    pub right: Option<Border>,
    pub top: Option<Border>,
    pub bottom: Option<Border>,
}

impl CellBorders {
    pub fn get(&self, side: BorderSide) -> Option<Border> {
        match side {
            BorderSide::Left => self.left,
            BorderSide::Right => self.right,
            BorderSide::Top => self.top,
            BorderSide::Bottom => self.bottom,
        }
    }

    pub fn set(&mut self, side: BorderSide, border: Border) {
        let slot = match side {
            BorderSide::Left => &mut self.left,
            BorderSide::Right => &mut self.right,
            BorderSide::Top => &mut self.top,
            BorderSide::Bottom => &mut self.bottom,
        };
        *slot = Some(border);
    }
}

/// A sparse in-memory sheet implementing [`Backend`].
///
/// Cells are keyed by `(row, col)` so iteration is row-major. The sheet is the
/// intermediate form both exporters read from.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    name: String,
    values: BTreeMap<(u32, u32), Value>,
    styles: BTreeMap<(u32, u32), Style>,
    borders: BTreeMap<(u32, u32), CellBorders>,
    merges: Vec<CellRange>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: &str) -> Self {
        MemorySheet {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self, col: u32, row: u32) -> Option<&Value> {
        self.values.get(&(row, col))
    }

    pub fn style(&self, col: u32, row: u32) -> Option<&Style> {
        self.styles.get(&(row, col))
    }

    pub fn borders(&self, col: u32, row: u32) -> Option<&CellBorders> {
        self.borders.get(&(row, col))
    }

    pub fn merged_ranges(&self) -> &[CellRange] {
        &self.merges
    }

    pub fn merged_range_at(&self, col: u32, row: u32) -> Option<&CellRange> {
        self.merges.iter().find(|m| m.contains(col, row))
    }

    /// Returns `(max_col, max_row)` over everything written to the sheet,
    /// or `(0, 0)` for an untouched sheet.
    pub fn dimensions(&self) -> (u32, u32) {
        let keys = self
            .values
            .keys()
            .chain(self.styles.keys())
            .chain(self.borders.keys())
            .copied();
        let corners = self.merges.iter().map(|m| (m.end_row, m.end_col));
        keys.chain(corners)
            .fold((0, 0), |(max_col, max_row), (row, col)| {
                (max_col.max(col), max_row.max(row))
            })
    }

    fn check_coordinate(col: u32, row: u32) -> Result<(), BackendError> {
        if (1..=MAX_COLUMNS).contains(&col) && (1..=MAX_ROWS).contains(&row) {
            Ok(())
        } else {
            Err(BackendError::InvalidCoordinate { col, row })
        }
    }

    fn check_range(range: CellRange) -> Result<(), BackendError> {
        if !range.is_valid() {
            return Err(BackendError::InvalidRange(range));
        }
        Self::check_coordinate(range.end_col, range.end_row)
    }
}

impl Backend for MemorySheet {
    fn set_cell_value(&mut self, col: u32, row: u32, value: &Value) -> Result<(), BackendError> {
        Self::check_coordinate(col, row)?;
        self.values.insert((row, col), value.clone());
        Ok(())
    }

    fn get_cell_value(&self, col: u32, row: u32) -> String {
        self.value(col, row).map(Value::to_string).unwrap_or_default()
    }

    fn merge_cells(
        &mut self,
        start_col: u32,
        start_row: u32,
        end_col: u32,
        end_row: u32,
    ) -> Result<(), BackendError> {
        let requested = CellRange::new(start_col, start_row, end_col, end_row);
        Self::check_range(requested)?;
        if requested.is_single_cell() {
            return Err(BackendError::InvalidRange(requested));
        }
        if let Some(existing) = self.merges.iter().find(|m| m.overlaps(&requested)) {
            return Err(BackendError::MergeConflict {
                requested,
                existing: *existing,
            });
        }
        self.merges.push(requested);
        Ok(())
    }

    fn is_cell_merged(&self, col: u32, row: u32) -> bool {
        self.merged_range_at(col, row).is_some()
    }

    fn is_cell_merged_horizontally(&self, col: u32, row: u32) -> bool {
        self.merged_range_at(col, row)
            .is_some_and(|m| m.start_col != m.end_col)
    }

    fn apply_border_to_cell(
        &mut self,
        col: u32,
        row: u32,
        side: BorderSide,
        border: &Border,
    ) -> Result<(), BackendError> {
        Self::check_coordinate(col, row)?;
        self.borders.entry((row, col)).or_default().set(side, *border);
        Ok(())
    }

    fn apply_borders_to_range(
        &mut self,
        range: CellRange,
        borders: &Borders,
    ) -> Result<(), BackendError> {
        Self::check_range(range)?;
        for (col, row) in range.cells() {
            for side in BorderSide::ALL {
                if let Some(border) = borders.side(side) {
                    self.borders.entry((row, col)).or_default().set(side, border);
                }
            }
        }
        Ok(())
    }

    fn has_existing_border(&self, col: u32, row: u32, side: BorderSide) -> bool {
        self.borders(col, row)
            .and_then(|b| b.get(side))
            .is_some_and(|b| b.is_visible())
    }

    fn apply_style_to_cell(
        &mut self,
        col: u32,
        row: u32,
        style: &Style,
    ) -> Result<(), BackendError> {
        Self::check_coordinate(col, row)?;
        self.styles.insert((row, col), style.clone());
        Ok(())
    }

    fn apply_style_to_range(
        &mut self,
        range: CellRange,
        style: &Style,
    ) -> Result<(), BackendError> {
        Self::check_range(range)?;
        for (col, row) in range.cells() {
            self.styles.insert((row, col), style.clone());
        }
        Ok(())
    }

    fn column_letter(&self, col: u32) -> Result<String, BackendError> {
        if !(1..=MAX_COLUMNS).contains(&col) {
            return Err(BackendError::InvalidCoordinate { col, row: 1 });
        }
        Ok(column_number_to_name((col - 1) as u16))
    }

    fn process_value(&self, raw: &Value, format: &str) -> Result<Value, BackendError> {
        Ok(format_value(raw, format)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::BorderStyle;

    #[test]
    fn test_set_and_get_cell_value() {
        let mut sheet = MemorySheet::new();
        sheet.set_cell_value(2, 3, &Value::Int(42)).unwrap();
        assert_eq!(sheet.get_cell_value(2, 3), "42");
        assert_eq!(sheet.get_cell_value(1, 1), "");
        assert_eq!(sheet.dimensions(), (2, 3));
        assert_eq!(
            sheet.set_cell_value(0, 1, &Value::Null),
            Err(BackendError::InvalidCoordinate { col: 0, row: 1 })
        );
    }

    #[test]
    fn test_merge_cells_rejects_overlap() {
        let mut sheet = MemorySheet::new();
        sheet.merge_cells(1, 1, 2, 1).unwrap();
        let err = sheet.merge_cells(2, 1, 2, 3).unwrap_err();
        assert_eq!(
            err,
            BackendError::MergeConflict {
                requested: CellRange::new(2, 1, 2, 3),
                existing: CellRange::new(1, 1, 2, 1),
            }
        );
        sheet.merge_cells(3, 1, 3, 3).unwrap();
        assert_eq!(sheet.merged_ranges().len(), 2);
    }

    #[test]
    fn test_merge_cells_rejects_invalid_ranges() {
        let mut sheet = MemorySheet::new();
        assert!(matches!(
            sheet.merge_cells(2, 1, 1, 1),
            Err(BackendError::InvalidRange(_))
        ));
        assert!(matches!(
            sheet.merge_cells(1, 1, 1, 1),
            Err(BackendError::InvalidRange(_))
        ));
        assert!(sheet.merged_ranges().is_empty());
    }

    #[test]
    fn test_merged_queries() {
        let mut sheet = MemorySheet::new();
        sheet.merge_cells(1, 2, 1, 4).unwrap();
        sheet.merge_cells(2, 1, 3, 1).unwrap();
        assert!(sheet.is_cell_merged(1, 3));
        assert!(!sheet.is_cell_merged_horizontally(1, 3));
        assert!(sheet.is_cell_merged_horizontally(3, 1));
        assert!(!sheet.is_cell_merged(2, 2));
    }

    #[test]
    fn test_borders() {
        let mut sheet = MemorySheet::new();
        sheet
            .apply_border_to_cell(1, 1, BorderSide::Top, &Border::thin())
            .unwrap();
        sheet
            .apply_border_to_cell(1, 1, BorderSide::Left, &Border::new(BorderStyle::None))
            .unwrap();
        assert!(sheet.has_existing_border(1, 1, BorderSide::Top));
        assert!(!sheet.has_existing_border(1, 1, BorderSide::Left));
        assert!(!sheet.has_existing_border(2, 2, BorderSide::Top));

        let range = CellRange::new(1, 2, 2, 3);
        sheet
            .apply_borders_to_range(range, &Borders::new().with_bottom(Border::thin()))
            .unwrap();
        for (col, row) in range.cells() {
            assert!(sheet.has_existing_border(col, row, BorderSide::Bottom));
            assert!(!sheet.has_existing_border(col, row, BorderSide::Right));
        }
    }

    #[test]
    fn test_styles() {
        let mut sheet = MemorySheet::new();
        let style = Style::new().set_italic();
        sheet
            .apply_style_to_range(CellRange::new(1, 1, 2, 1), &style)
            .unwrap();
        assert_eq!(sheet.style(2, 1), Some(&style));
        assert_eq!(sheet.style(1, 2), None);
        assert!(sheet
            .apply_style_to_range(CellRange::new(2, 1, 1, 1), &style)
            .is_err());
    }

    #[test]
    fn test_column_letter() {
        let sheet = MemorySheet::new();
        assert_eq!(sheet.column_letter(1).unwrap(), "A");
        assert_eq!(sheet.column_letter(28).unwrap(), "AB");
        assert_eq!(sheet.column_letter(MAX_COLUMNS).unwrap(), "XFD");
        assert!(sheet.column_letter(0).is_err());
        assert!(sheet.column_letter(MAX_COLUMNS + 1).is_err());
    }

    #[test]
    fn test_process_value_delegates_to_formatter() {
        let sheet = MemorySheet::new();
        assert_eq!(
            sheet.process_value(&Value::Float(2.5), "decimal:1"),
            Ok(Value::from("2.5"))
        );
        assert!(matches!(
            sheet.process_value(&Value::from("x"), "nope"),
            Err(BackendError::Format(_))
        ));
    }
}
