//! CSV出力
//!
//! 区切り文字・ダブルクォート・改行を含む値だけをクォートする。行末は CRLF。

use super::{export_row, EXPORT_COLUMNS};
use crate::error::{Error, Result};
use crate::types::ReviewEntry;
use csv::{Terminator, Writer, WriterBuilder};
use std::io::Write;

fn csv_writer<W: Write>(writer: W) -> Writer<W> {
    WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(writer)
}

fn write_rows<'a, W, I>(wtr: &mut Writer<W>, entries: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ReviewEntry>,
{
    wtr.write_record(EXPORT_COLUMNS)?;
    let mut count = 0;
    for entry in entries {
        wtr.write_record(export_row(entry))?;
        count += 1;
    }
    wtr.flush()?;
    Ok(count)
}

/// ヘッダー付きでCSVを書き出す
pub fn write_csv<'a, W, I>(writer: &mut W, entries: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ReviewEntry>,
{
    let mut wtr = csv_writer(writer);
    write_rows(&mut wtr, entries)
}

/// CSVを文字列で取得
pub fn to_csv_string<'a, I>(entries: I) -> Result<String>
where
    I: IntoIterator<Item = &'a ReviewEntry>,
{
    let mut wtr = csv_writer(Vec::new());
    write_rows(&mut wtr, entries)?;
    let buffer = wtr.into_inner().map_err(|e| Error::Export(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| Error::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes_only_when_needed() {
        let entry = ReviewEntry {
            title: "say \"hi\"".into(),
            author: "Line\nBreak".into(),
            reviewer: "plain".into(),
            ..Default::default()
        };
        let csv = to_csv_string([&entry]).unwrap();
        let row = csv.split_once("\r\n").map(|(_, rest)| rest).unwrap();
        assert!(row.starts_with("\"say \"\"hi\"\"\",\"Line\nBreak\",plain,"));
    }

    #[test]
    fn test_write_csv_counts_rows() {
        let entries = vec![ReviewEntry::default(); 3];
        let mut buffer = Vec::new();
        assert_eq!(write_csv(&mut buffer, &entries).unwrap(), 3);
        assert_eq!(String::from_utf8(buffer).unwrap().matches("\r\n").count(), 4);
    }

    #[test]
    fn test_to_csv_string() {
        let entries = vec![
            ReviewEntry {
                title: "Ethics, Again".into(),
                author: "Mill".into(),
                journal: "Mind".into(),
                date: "2010-01-01".into(),
                link: Some("https://example.org".into()),
                ..Default::default()
            },
            ReviewEntry {
                title: "Second".into(),
                entry_type: Some("symposium".into()),
                ..Default::default()
            },
        ];
        let csv = to_csv_string(&entries).unwrap();
        let lines: Vec<_> = csv.split("\r\n").collect();
        assert_eq!(lines[0], "title,author,reviewer,journal,date,link,doi,access,type");
        assert_eq!(lines[1], "\"Ethics, Again\",Mill,,Mind,2010-01-01,https://example.org,,,review");
        assert_eq!(lines[2], "Second,,,,,,,,symposium");
        assert_eq!(lines[3], "");
    }
}
