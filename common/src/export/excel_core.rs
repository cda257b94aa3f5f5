//! Excel生成（共通ライブラリ）
//!
//! 1シートにヘッダー行 + エントリ行。先頭行を固定してオートフィルタを付ける。

use super::{export_row, EXPORT_COLUMNS};
use crate::types::ReviewEntry;
use rust_xlsxwriter::*;

/// 列幅（EXPORT_COLUMNS と同じ順）
const COLUMN_WIDTHS: [f64; 9] = [48.0, 24.0, 24.0, 32.0, 12.0, 40.0, 24.0, 12.0, 12.0];

/// Excelをバッファに生成
///
/// # Arguments
/// * `entries` - 出力するエントリ（表示順）
/// * `sheet_name` - シート名
pub fn generate_excel_buffer(entries: &[&ReviewEntry], sheet_name: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_align(FormatAlign::Top)
        .set_text_wrap();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, (header, width)) in EXPORT_COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        worksheet.set_column_width(col, width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet.write_string_with_format(0, col, *header, &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }

    for (i, entry) in entries.iter().enumerate() {
        let row = i as u32 + 1;
        for (col, value) in export_row(entry).iter().enumerate() {
            worksheet.write_string_with_format(row, col as u16, *value, &value_format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }
    }

    let last_col = (EXPORT_COLUMNS.len() - 1) as u16;
    worksheet.autofilter(0, 0, entries.len() as u32, last_col)
        .map_err(|e| format!("オートフィルタ設定エラー: {}", e))?;
    worksheet.set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    workbook.save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_excel_buffer() {
        let entry = ReviewEntry {
            title: "Book".into(),
            author: "Author".into(),
            ..Default::default()
        };
        let buffer = generate_excel_buffer(&[&entry], "Reviews").unwrap();
        // xlsx はzipコンテナ
        assert_eq!(&buffer[..2], b"PK");
    }

    #[test]
    fn test_generate_excel_empty() {
        let buffer = generate_excel_buffer(&[], "Reviews").unwrap();
        assert!(!buffer.is_empty());
    }

    #[test]
    fn test_invalid_sheet_name() {
        let result = generate_excel_buffer(&[], "bad[name]");
        assert!(result.unwrap_err().contains("シート名設定エラー"));
    }
}
