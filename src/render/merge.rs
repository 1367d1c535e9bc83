//! Body merge detection: vertical runs per column, horizontal runs per row.

use super::{BodyGrid, TableRenderer};
use crate::backend::{Backend, CellRange};
use crate::column::Column;
use crate::merge::{condition_set, detect_spans, MergeCondition, MergeSpan};
use crate::table::{HeaderLayout, Table};

/// Returns the vertical merge spans (0-based data rows) of one leaf column.
///
/// Rows vetoed by `mergeable: false`, rows carrying their own merge rules, cells
/// vetoed by `mergeable: false` and missing fields are boundaries.
pub fn vertical_spans(
    table: &Table,
    leaf_index: usize,
    leaf: &Column,
    grid: &BodyGrid,
) -> Vec<MergeSpan> {
    let conditions = leaf.vertical_conditions();
    if conditions.is_empty() {
        return Vec::new();
    }

    let cells: Vec<Option<String>> = grid
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            let row_blocks = table
                .row_options(row)
                .is_some_and(|o| !o.is_mergeable() || o.merge.is_some());
            let cell_blocks = table
                .cell_options(leaf_index, row)
                .is_some_and(|o| !o.is_mergeable());
            if row_blocks || cell_blocks {
                return None;
            }
            cells[leaf_index].as_ref().map(|v| v.to_string())
        })
        .collect();

    detect_spans(&cells, conditions)
}

/// Groups consecutive leaf columns sharing the same non-empty horizontal
/// condition set. Returns inclusive `(first, last)` leaf indices of each group
/// with at least two columns.
pub fn horizontal_runs(leaves: &[&Column]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = 0;
    while start < leaves.len() {
        let conditions = condition_set(leaves[start].horizontal_conditions());
        let mut end = start;
        if !conditions.is_empty() {
            while end + 1 < leaves.len()
                && condition_set(leaves[end + 1].horizontal_conditions()) == conditions
            {
                end += 1;
            }
            if end > start {
                runs.push((start, end));
            }
        }
        start = end + 1;
    }
    runs
}

impl TableRenderer<'_> {
    pub(super) fn merge_vertical<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        layout: &HeaderLayout,
        leaves: &[&Column],
        grid: &BodyGrid,
    ) {
        for (leaf_index, leaf) in leaves.iter().enumerate() {
            let col = leaf_index as u32 + 1;
            for span in vertical_spans(self.table, leaf_index, leaf, grid) {
                let range = CellRange::new(
                    col,
                    layout.sheet_row(span.first),
                    col,
                    layout.sheet_row(span.last),
                );
                self.merge_range(backend, range, "vertical");
            }
        }
    }

    pub(super) fn merge_horizontal<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        layout: &HeaderLayout,
        leaves: &[&Column],
        grid: &BodyGrid,
    ) {
        let runs = horizontal_runs(leaves);
        for row_index in 0..grid.len() {
            let row_override = self
                .table
                .row_options(row_index)
                .and_then(|o| o.horizontal_override());
            match row_override {
                Some(conditions) => {
                    self.merge_row_segment(
                        backend,
                        layout,
                        grid,
                        row_index,
                        0,
                        leaves.len() - 1,
                        conditions,
                    );
                }
                None => {
                    for &(first, last) in &runs {
                        let conditions = leaves[first].horizontal_conditions();
                        self.merge_row_segment(
                            backend, layout, grid, row_index, first, last, conditions,
                        );
                    }
                }
            }
        }
    }

    /// Scans leaf columns `first..=last` of one data row and merges the runs found.
    ///
    /// Cells vetoed by `mergeable: false`, missing fields and cells already inside
    /// a merged range are boundaries.
    #[allow(clippy::too_many_arguments)]
    fn merge_row_segment<B: Backend + ?Sized>(
        &self,
        backend: &mut B,
        layout: &HeaderLayout,
        grid: &BodyGrid,
        row_index: usize,
        first: usize,
        last: usize,
        conditions: &[MergeCondition],
    ) {
        let row = layout.sheet_row(row_index);
        let cells: Vec<Option<String>> = (first..=last)
            .map(|leaf_index| {
                let vetoed = self
                    .table
                    .cell_options(leaf_index, row_index)
                    .is_some_and(|o| !o.is_mergeable());
                if vetoed || backend.is_cell_merged(leaf_index as u32 + 1, row) {
                    return None;
                }
                grid[row_index][leaf_index].as_ref().map(|v| v.to_string())
            })
            .collect();

        for span in detect_spans(&cells, conditions) {
            let range = CellRange::new(
                (first + span.first) as u32 + 1,
                row,
                (first + span.last) as u32 + 1,
                row,
            );
            self.merge_range(backend, range, "horizontal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemorySheet;
    use crate::data::{Data, Value};
    use crate::diagnostics::CollectingDiagnostics;
    use crate::merge::MergeRules;
    use crate::options::{CellOptions, RenderOptions, RowOptions};
    use pretty_assertions::assert_eq;
    use crate::merge::MergeCondition::{Empty, Identical};

    fn single_column(values: &[Value], conditions: &[MergeCondition]) -> Table {
        let rows = values
            .iter()
            .map(|v| Data::new().with("v", v.clone()))
            .collect();
        Table::new(
            vec![Column::new("v", "V").with_merge(MergeRules::vertical(conditions))],
            rows,
        )
    }

    fn grid_of(table: &Table) -> BodyGrid {
        let sheet = MemorySheet::new();
        let renderer = TableRenderer::new(table, RenderOptions::default());
        renderer.format_body(&sheet, &table.leaves()).unwrap()
    }

    fn render(table: &Table) -> MemorySheet {
        let mut sheet = MemorySheet::new();
        let diagnostics = CollectingDiagnostics::new();
        TableRenderer::new(table, RenderOptions::default())
            .with_diagnostics(&diagnostics)
            .render(&mut sheet)
            .unwrap();
        assert_eq!(diagnostics.messages(), Vec::<String>::new());
        sheet
    }

    fn spans_of(table: &Table) -> Vec<MergeSpan> {
        let grid = grid_of(table);
        let leaves = table.leaves();
        vertical_spans(table, 0, leaves[0], &grid)
    }

    #[test]
    fn test_vertical_identical() {
        let values: Vec<Value> = ["A", "A", "B", "B", "B", "C"]
            .iter()
            .map(|s| Value::from(*s))
            .collect();
        let table = single_column(&values, &[Identical]);
        assert_eq!(
            spans_of(&table),
            vec![MergeSpan::new(0, 1), MergeSpan::new(2, 4)]
        );
    }

    #[test]
    fn test_vertical_empty_treats_null_as_empty() {
        let values = vec![
            Value::from(""),
            Value::Null,
            Value::from("A"),
            Value::from(""),
            Value::from(""),
        ];
        let table = single_column(&values, &[Empty]);
        assert_eq!(
            spans_of(&table),
            vec![MergeSpan::new(0, 1), MergeSpan::new(3, 4)]
        );
    }

    #[test]
    fn test_vertical_compares_formatted_text() {
        let values = vec![Value::Int(3), Value::Float(3.0), Value::from(" 3.00 ")];
        let mut table = single_column(&values, &[Identical]);
        table.columns[0].format = "decimal:2".to_string();
        assert_eq!(spans_of(&table), vec![MergeSpan::new(0, 2)]);
    }

    #[test]
    fn test_vertical_missing_field_is_boundary() {
        let mut table = single_column(&[Value::from("A"), Value::from("A")], &[Identical]);
        table.rows.insert(1, Data::new());
        table.rows.push(Data::new().with("v", "A"));
        assert_eq!(spans_of(&table), vec![MergeSpan::new(2, 3)]);
    }

    #[test]
    fn test_vertical_row_veto() {
        let values: Vec<Value> = ["A", "A", "A", "A", "A"]
            .iter()
            .map(|s| Value::from(*s))
            .collect();
        let table = single_column(&values, &[Identical]).with_row_options(
            2,
            RowOptions {
                mergeable: Some(false),
                ..Default::default()
            },
        );
        assert_eq!(
            spans_of(&table),
            vec![MergeSpan::new(0, 1), MergeSpan::new(3, 4)]
        );
    }

    #[test]
    fn test_vertical_row_with_own_rules_is_boundary() {
        let values: Vec<Value> = ["A", "A", "A"].iter().map(|s| Value::from(*s)).collect();
        let table = single_column(&values, &[Identical]).with_row_options(
            1,
            RowOptions {
                merge: Some(MergeRules::horizontal(&[Identical])),
                ..Default::default()
            },
        );
        assert!(spans_of(&table).is_empty());
    }

    #[test]
    fn test_cell_veto_only_affects_its_column() {
        let columns = vec![
            Column::new("a", "A").with_merge(MergeRules::vertical(&[Identical])),
            Column::new("b", "B").with_merge(MergeRules::vertical(&[Identical])),
        ];
        let rows = (0..4).map(|_| Data::new().with("a", "x").with("b", "y")).collect();
        let table = Table::new(columns, rows).with_cell_options(
            0,
            1,
            CellOptions {
                mergeable: Some(false),
                ..Default::default()
            },
        );
        let grid = grid_of(&table);
        let leaves = table.leaves();
        assert_eq!(
            vertical_spans(&table, 0, leaves[0], &grid),
            vec![MergeSpan::new(2, 3)]
        );
        assert_eq!(
            vertical_spans(&table, 1, leaves[1], &grid),
            vec![MergeSpan::new(0, 3)]
        );
    }

    #[test]
    fn test_horizontal_runs_group_identical_sets() {
        let h = |c: &[MergeCondition]| MergeRules::horizontal(c);
        let columns = vec![
            Column::new("a", "A").with_merge(h(&[Identical])),
            Column::new("b", "B").with_merge(h(&[Identical])),
            Column::new("c", "C").with_merge(h(&[Identical, Empty])),
            Column::new("d", "D").with_merge(h(&[Empty, Identical])),
            Column::new("e", "E"),
            Column::new("f", "F").with_merge(h(&[Empty])),
            Column::new("g", "G").with_merge(MergeRules::vertical(&[Identical])),
        ];
        let leaves: Vec<&Column> = columns.iter().collect();
        assert_eq!(horizontal_runs(&leaves), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn test_horizontal_column_level_merges() {
        let h = MergeRules::horizontal(&[Identical]);
        let columns = vec![
            Column::new("id", "Id"),
            Column::new("q1", "Q1").with_merge(h.clone()),
            Column::new("q2", "Q2").with_merge(h.clone()),
            Column::new("q3", "Q3").with_merge(h),
        ];
        let rows = vec![
            Data::new().with("id", 1).with("q1", "n/a").with("q2", "n/a").with("q3", "n/a"),
            Data::new().with("id", 2).with("q1", "5").with("q2", "7").with("q3", "7"),
            Data::new().with("id", 3).with("q1", "5").with("q2", "6").with("q3", "7"),
        ];
        let sheet = render(&Table::new(columns, rows));
        assert_eq!(
            sheet.merged_ranges(),
            &[CellRange::new(2, 2, 4, 2), CellRange::new(3, 3, 4, 3)]
        );
    }

    #[test]
    fn test_horizontal_row_override() {
        let columns = vec![
            Column::new("a", "A"),
            Column::new("b", "B"),
            Column::new("c", "C"),
        ];
        let rows = vec![
            Data::new().with("a", "").with("b", "").with("c", "x"),
            Data::new().with("a", "").with("b", "").with("c", ""),
        ];
        let table = Table::new(columns, rows).with_row_options(
            1,
            RowOptions {
                merge: Some(MergeRules::horizontal(&[Empty])),
                ..Default::default()
            },
        );
        let sheet = render(&table);
        assert_eq!(sheet.merged_ranges(), &[CellRange::new(1, 3, 3, 3)]);
    }

    #[test]
    fn test_horizontal_row_override_honours_cell_veto() {
        let columns = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|name| Column::new(name, &name.to_uppercase()))
            .collect();
        let mut row = Data::new();
        for name in ["a", "b", "c", "d", "e"] {
            row.insert(name, "");
        }
        let table = Table::new(columns, vec![row])
            .with_row_options(
                0,
                RowOptions {
                    merge: Some(MergeRules::horizontal(&[Empty])),
                    ..Default::default()
                },
            )
            .with_cell_options(
                2,
                0,
                CellOptions {
                    mergeable: Some(false),
                    ..Default::default()
                },
            );
        let sheet = render(&table);
        assert_eq!(
            sheet.merged_ranges(),
            &[CellRange::new(1, 2, 2, 2), CellRange::new(4, 2, 5, 2)]
        );
    }

    #[test]
    fn test_horizontal_cell_veto() {
        let h = MergeRules::horizontal(&[Identical]);
        let columns = vec![
            Column::new("a", "A").with_merge(h.clone()),
            Column::new("b", "B").with_merge(h.clone()),
            Column::new("c", "C").with_merge(h.clone()),
            Column::new("d", "D").with_merge(h),
        ];
        let rows = vec![Data::new().with("a", "x").with("b", "x").with("c", "x").with("d", "x")];
        let table = Table::new(columns, rows).with_cell_options(
            2,
            0,
            CellOptions {
                mergeable: Some(false),
                ..Default::default()
            },
        );
        let sheet = render(&table);
        assert_eq!(sheet.merged_ranges(), &[CellRange::new(1, 2, 2, 2)]);
    }

    #[test]
    fn test_horizontal_skips_cells_merged_vertically() {
        let both = MergeRules {
            vertical: vec![Identical],
            horizontal: vec![Identical],
        };
        let columns = vec![
            Column::new("a", "A").with_merge(both.clone()),
            Column::new("b", "B").with_merge(both),
        ];
        let rows = vec![
            Data::new().with("a", "x").with("b", "y"),
            Data::new().with("a", "x").with("b", "z"),
            Data::new().with("a", "w").with("b", "w"),
        ];
        let sheet = render(&Table::new(columns, rows));
        assert_eq!(
            sheet.merged_ranges(),
            &[CellRange::new(1, 2, 1, 3), CellRange::new(1, 4, 2, 4)]
        );
    }
}
