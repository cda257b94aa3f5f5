//! CSV / Excel 出力（CLI版）

use crate::error::{PhilReviewsError, Result};
use philreviews_common::export::csv::write_csv;
use philreviews_common::export::excel_core::generate_excel_buffer;
use philreviews_common::ReviewEntry;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// 出力ファイル名（拡張子なし）
pub const EXPORT_STEM: &str = "philreviews";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
    #[default]
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use csv, excel, or both", s)),
        }
    }
}

/// 出力先がディレクトリなら `{stem}.{ext}`、ファイルならその拡張子を差し替える
fn output_path_for_format(output: &Path, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", EXPORT_STEM, extension))
    } else {
        output.with_extension(extension)
    }
}

pub fn write_csv_file(entries: &[&ReviewEntry], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, entries.iter().copied())?;
    Ok(())
}

pub fn write_excel_file(entries: &[&ReviewEntry], path: &Path, sheet_name: &str) -> Result<()> {
    let buffer = generate_excel_buffer(entries, sheet_name).map_err(PhilReviewsError::ExcelGeneration)?;
    std::fs::write(path, buffer)?;
    Ok(())
}

/// 指定形式で出力し、書き出したファイルを返す
pub fn export_entries(
    entries: &[&ReviewEntry],
    format: ExportFormat,
    output: &Path,
) -> Result<Vec<PathBuf>> {
    if output.extension().is_none() {
        std::fs::create_dir_all(output)?;
    }

    let mut written = Vec::new();
    if matches!(format, ExportFormat::Csv | ExportFormat::Both) {
        let path = output_path_for_format(output, "csv");
        println!("- CSVを生成中...");
        write_csv_file(entries, &path)?;
        println!("✔ CSV出力: {}", path.display());
        written.push(path);
    }
    if matches!(format, ExportFormat::Excel | ExportFormat::Both) {
        let path = output_path_for_format(output, "xlsx");
        println!("- Excelを生成中...");
        write_excel_file(entries, &path, "Reviews")?;
        println!("✔ Excel出力: {}", path.display());
        written.push(path);
    }
    Ok(written)
}
