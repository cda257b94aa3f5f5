//! エクスポート（CSV / Excel）
//!
//! CLIのビルド・エクスポートから使う共通部分。列の並びは両形式で共通。

pub mod csv;

#[cfg(feature = "excel")]
pub mod excel_core;

use crate::types::ReviewEntry;

/// エクスポート列（ヘッダー名）
pub const EXPORT_COLUMNS: [&str; 9] = [
    "title", "author", "reviewer", "journal", "date", "link", "doi", "access", "type",
];

/// 列名に対応する値（未知の列は空）
pub fn export_value<'a>(entry: &'a ReviewEntry, column: &str) -> &'a str {
    match column {
        "title" => &entry.title,
        "author" => &entry.author,
        "reviewer" => &entry.reviewer,
        "journal" => &entry.journal,
        "date" => &entry.date,
        "link" => entry.link.as_deref().unwrap_or(""),
        "doi" => entry.doi().unwrap_or(""),
        "access" => &entry.access,
        "type" => entry.entry_type(),
        _ => "",
    }
}

/// 1行分の値
pub fn export_row(entry: &ReviewEntry) -> [&str; 9] {
    EXPORT_COLUMNS.map(|column| export_value(entry, column))
}
