use rust_xlsxwriter::{
    Color as XlsxColor, ColNum, Format, FormatAlign, FormatBorder, FormatUnderline, RowNum,
    Workbook, Worksheet,
};

use super::ExportError;
use crate::backend::memory::CellBorders;
use crate::backend::MemorySheet;
use crate::border::{Border, BorderStyle};
use crate::data::Value;
use crate::style::{Alignment, Style, Underline};

/// Writes every value, merge, style and border of `sheet` into `worksheet`.
///
/// Merges are written first. Cells covered by a merge other than its top-left
/// anchor are written blank so that only the anchor's value shows.
pub fn write_worksheet(sheet: &MemorySheet, worksheet: &mut Worksheet) -> Result<(), ExportError> {
    if !sheet.name().is_empty() {
        worksheet.set_name(sheet.name())?;
    }

    for range in sheet.merged_ranges() {
        let format = cell_format(sheet, range.start_col, range.start_row).unwrap_or_default();
        worksheet.merge_range(
            (range.start_row - 1) as RowNum,
            (range.start_col - 1) as ColNum,
            (range.end_row - 1) as RowNum,
            (range.end_col - 1) as ColNum,
            "",
            &format,
        )?;
    }

    let (max_col, max_row) = sheet.dimensions();
    for row in 1..=max_row {
        for col in 1..=max_col {
            let format = cell_format(sheet, col, row);
            let anchor = sheet
                .merged_range_at(col, row)
                .map(|m| m.start_col == col && m.start_row == row);
            let value = match anchor {
                Some(false) => None,
                _ => sheet.value(col, row),
            };
            write_cell(worksheet, col, row, value, format)?;
        }
    }
    Ok(())
}

/// Builds a single-sheet workbook from `sheet` and returns the XLSX bytes.
pub fn save_to_buffer(sheet: &MemorySheet) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    write_worksheet(sheet, worksheet)?;
    Ok(workbook.save_to_buffer()?)
}

fn write_cell(
    worksheet: &mut Worksheet,
    col: u32,
    row: u32,
    value: Option<&Value>,
    format: Option<Format>,
) -> Result<(), ExportError> {
    let (row, col) = ((row - 1) as RowNum, (col - 1) as ColNum);
    let format = match (value, format) {
        (None | Some(Value::Null), None) => return Ok(()),
        (_, format) => format.unwrap_or_default(),
    };
    match value {
        None | Some(Value::Null) => {
            worksheet.write_blank(row, col, &format)?;
        }
        Some(Value::Int(n)) => {
            worksheet.write_number_with_format(row, col, *n as f64, &format)?;
        }
        Some(Value::Float(n)) => {
            worksheet.write_number_with_format(row, col, *n, &format)?;
        }
        Some(Value::Bool(b)) => {
            worksheet.write_boolean_with_format(row, col, *b, &format)?;
        }
        Some(other) => {
            worksheet.write_string_with_format(row, col, other.to_string(), &format)?;
        }
    }
    Ok(())
}

/// The `Format` of one cell, `None` when it has neither a style nor a border.
fn cell_format(sheet: &MemorySheet, col: u32, row: u32) -> Option<Format> {
    let style = sheet.style(col, row);
    let borders = sheet.borders(col, row);
    if style.is_none() && borders.is_none() {
        return None;
    }
    let mut format = style.map(style_format).unwrap_or_default();
    if let Some(borders) = borders {
        format = apply_borders(format, borders);
    }
    Some(format)
}

fn style_format(style: &Style) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if style.italic {
        format = format.set_italic();
    }
    if let Some(underline) = style.underline {
        format = format.set_underline(match underline {
            Underline::Single => FormatUnderline::Single,
            Underline::Double => FormatUnderline::Double,
            Underline::SingleAccounting => FormatUnderline::SingleAccounting,
            Underline::DoubleAccounting => FormatUnderline::DoubleAccounting,
        });
    }
    if let Some(color) = style.font_color {
        format = format.set_font_color(XlsxColor::RGB(color.0));
    }
    if let Some(color) = style.background_color {
        format = format.set_background_color(XlsxColor::RGB(color.0));
    }
    if let Some(size) = style.font_size {
        format = format.set_font_size(size);
    }
    if let Some(family) = &style.font_family {
        format = format.set_font_name(family);
    }
    match style.alignment {
        Some(Alignment::Left) => format = format.set_align(FormatAlign::Left),
        Some(Alignment::Center) => format = format.set_align(FormatAlign::Center),
        Some(Alignment::Right) => format = format.set_align(FormatAlign::Right),
        Some(Alignment::Top) => format = format.set_align(FormatAlign::Top),
        Some(Alignment::Middle) => format = format.set_align(FormatAlign::VerticalCenter),
        Some(Alignment::Bottom) => format = format.set_align(FormatAlign::Bottom),
        Some(Alignment::CenterMiddle) => {
            format = format
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
        }
        None => {}
    }
    format
}

fn apply_borders(mut format: Format, borders: &CellBorders) -> Format {
    if let Some(border) = borders.left {
        format = format.set_border_left(border_kind(border));
    }
    if let Some(border) = borders.right {
        format = format.set_border_right(border_kind(border));
    }
    if let Some(border) = borders.top {
        format = format.set_border_top(border_kind(border));
    }
    if let Some(border) = borders.bottom {
        format = format.set_border_bottom(border_kind(border));
    }
    format
}

fn border_kind(border: Border) -> FormatBorder {
    match border.style {
        BorderStyle::None => FormatBorder::None,
        BorderStyle::Thin => FormatBorder::Thin,
        BorderStyle::Medium => FormatBorder::Medium,
        BorderStyle::Dashed => FormatBorder::Dashed,
        BorderStyle::Dotted => FormatBorder::Dotted,
        BorderStyle::Thick => FormatBorder::Thick,
        BorderStyle::Double => FormatBorder::Double,
    }
}
