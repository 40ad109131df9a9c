//! 比較結果のExcel出力
//!
//! テーブル種別ごとに1シートを作り、比較結果を書き出す。

use std::collections::BTreeMap;
use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::compare::TableComparison;
use crate::error::Result;
use crate::types::TableKind;

const HEADERS: [&str; 8] = [
    "Contingency",
    "Resulting Issue",
    "Value (left)",
    "Value (right)",
    "Percent (left)",
    "Percent (right)",
    "Delta %",
    "Status",
];

/// 比較結果をExcelワークブックのバッファに生成する
pub fn comparison_to_buffer(results: &BTreeMap<TableKind, TableComparison>) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let title_format = Format::new().set_bold().set_font_size(12.0);
    let header_format = Format::new()
        .set_bold()
        .set_font_size(9.0)
        .set_font_color(Color::RGB(0x555555))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));
    let number_format = Format::new().set_num_format("0.00");

    for (kind, comparison) in results {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(kind.label())?;
        write_comparison_sheet(worksheet, comparison, &title_format, &header_format, &number_format)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// 比較結果をExcelファイルとして保存する
pub fn write_comparison(path: &Path, results: &BTreeMap<TableKind, TableComparison>) -> Result<()> {
    let buffer = comparison_to_buffer(results)?;
    std::fs::write(path, buffer)?;
    Ok(())
}

fn write_comparison_sheet(
    worksheet: &mut Worksheet,
    comparison: &TableComparison,
    title_format: &Format,
    header_format: &Format,
    number_format: &Format,
) -> Result<()> {
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M");
    let title = format!(
        "{} vs {} (generated {})",
        comparison.sheet_left, comparison.sheet_right, generated
    );
    worksheet.write_string_with_format(0, 0, &title, title_format)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(2, col as u16, *header, header_format)?;
    }

    for (i, row) in comparison.rows.iter().enumerate() {
        let r = 3 + i as u32;
        worksheet.write_string(r, 0, &row.contingency)?;
        worksheet.write_string(r, 1, &row.issue)?;
        write_optional_number(worksheet, r, 2, row.value_left, number_format)?;
        write_optional_number(worksheet, r, 3, row.value_right, number_format)?;
        write_optional_number(worksheet, r, 4, row.percent_left, number_format)?;
        write_optional_number(worksheet, r, 5, row.percent_right, number_format)?;
        write_optional_number(worksheet, r, 6, row.delta_percent, number_format)?;
        worksheet.write_string(r, 7, row.status.label())?;
    }

    worksheet.set_column_width(0, 28)?;
    worksheet.set_column_width(1, 44)?;
    for col in 2..=6u16 {
        worksheet.set_column_width(col, 13)?;
    }
    worksheet.set_column_width(7, 13)?;

    Ok(())
}

fn write_optional_number(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
    format: &Format,
) -> Result<()> {
    if let Some(v) = value {
        worksheet.write_number_with_format(row, col, v, format)?;
    }
    Ok(())
}
