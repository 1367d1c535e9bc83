//! Detailed documentation for the table definition format and output types.
//!
//! This module contains reference documentation for the JSON input accepted
//! by the `table-render-rs` binary and for the files it can produce.

/// # Table Definition
///
/// The input is a single JSON object:
///
/// ```json
/// {
///   "sheet_name": "Orders",
///   "write_header": true,
///   "sort_by": "ordered_at",
///   "columns": [
///     {"name": "region", "label": "Region", "merge": {"vertical": ["identical"]}},
///     {"label": "Amount", "children": [
///       {"name": "net", "label": "Net", "format": "decimal:2"},
///       {"name": "gross", "label": "Gross", "format": "decimal:2"}
///     ]},
///     {"name": "ordered_at", "label": "Ordered", "format": "date:%d.%m.%Y"}
///   ],
///   "rows": [
///     {"region": "North", "net": 10, "gross": 12.5, "ordered_at": "2024-05-01"}
///   ],
///   "row_options": {"0": {"style": {"bold": true}}},
///   "cell_options": [{"column": 1, "row": 0, "mergeable": false}]
/// }
/// ```
///
/// ## `columns`
///
/// A tree of columns. A column with `children` is a group: it only contributes
/// a header cell spanning its leaves. Leaves are written left to right in
/// depth-first order. Fields:
///
/// - `name` : key of the value in each row.
/// - `path` : list of keys into nested objects, used instead of `name`.
/// - `label` : header text.
/// - `format` : see `table_definition::format_specs`.
/// - `merge` : `{"vertical": [...], "horizontal": [...]}` with conditions
///   `identical` (equal trimmed text) and `empty` (both trimmed texts empty).
/// - `style`, `borders` : see below.
///
/// ## `row_options` / `cell_options`
///
/// Overrides addressed by 0-based data-row index (header rows are not
/// counted) and, for cells, 0-based leaf-column index. Both accept `style`,
/// `borders` and `mergeable`; rows also accept `merge`, whose non-empty
/// `horizontal` list replaces the columns' own horizontal rules for that row.
///
/// ## `style`
///
/// `bold`, `italic`, `underline` (`single`, `double`, `single_accounting`,
/// `double_accounting`), `font_color` and `background_color` (`#RRGGBB`),
/// `font_size`, `font_family`, `alignment` (`left`, `center`, `right`, `top`,
/// `middle`, `bottom`, `center_middle`).
///
/// A cell's style is the first one found in cell options, row options and the
/// column.
///
/// ## `borders`
///
/// `left`, `right`, `top`, `bottom`, each `{"style": "thin"}` with styles
/// `none`, `thin`, `medium`, `dashed`, `dotted`, `thick`, `double`. An `inner`
/// object gives the edges between cells of the same column (or row). Column
/// borders are drawn first, then row borders, then the bottom line of the
/// header, then cell borders; later layers replace earlier ones side by side.
pub mod table_definition {
    /// Value format specs (`kind[:argument]`)
    ///
    /// - `text` : the value as text.
    /// - `date:<strftime>` : timestamps or `YYYY-MM-DD[ HH:MM:SS]` strings.
    /// - `decimal:<n>` : fixed number of fraction digits (default 2, at most 255).
    /// - `percent:<n>` : value x 100 with a `%` sign (default 0 digits, at most 255).
    /// - `join:<separator>` : joins a list.
    /// - `bool:<yes>/<no>` : labels for true and false.
    /// - `upper`, `lower`, `trim` : text transforms.
    ///
    /// A value that does not fit its format is written unchanged, with a warning.
    pub mod format_specs {}
}

/// # Types of Output
///
/// ## `xlsx`
///
/// A workbook with a single worksheet, including merges, styles and borders.
///
/// ## `csv`
///
/// The used range as comma-separated values. Merged cells keep their text in
/// the top-left cell only; styles and borders are dropped.
pub mod output_types {
    /// Documentation for xlsx output format
    pub mod xlsx {
        //! XLSX output
    }

    /// Documentation for csv output format
    pub mod csv {
        //! CSV output
    }
}
