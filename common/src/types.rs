//! 書評エントリの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - ReviewEntry: データセットの1レコード（読み込み後は不変）
//! - SortKey: ソート・表示に使うフィールドの列挙

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// `type` 未指定時の値
pub const TYPE_REVIEW: &str = "review";
/// シンポジウム寄稿
pub const TYPE_SYMPOSIUM: &str = "symposium";

/// 既知のエントリ種別
pub const ENTRY_TYPES: [&str; 2] = [TYPE_REVIEW, TYPE_SYMPOSIUM];

const DOI_RESOLVER: &str = "https://doi.org/";

/// 書評エントリ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewEntry {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,

    #[serde(deserialize_with = "null_as_empty")]
    pub author: String,

    #[serde(deserialize_with = "null_as_empty")]
    pub reviewer: String,

    #[serde(deserialize_with = "null_as_empty")]
    pub journal: String,

    /// ISO形式の日付（先頭4文字が年）
    #[serde(deserialize_with = "null_as_empty")]
    pub date: String,

    /// "open" / "restricted" など
    #[serde(deserialize_with = "null_as_empty")]
    pub access: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subfield: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subfield2: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub symposium_group: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// 空文字列をNoneとして扱う
fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl ReviewEntry {
    /// エントリ種別（未指定は "review"）
    pub fn entry_type(&self) -> &str {
        non_empty(&self.entry_type).unwrap_or(TYPE_REVIEW)
    }

    pub fn is_symposium(&self) -> bool {
        self.entry_type() == TYPE_SYMPOSIUM
    }

    /// 日付の先頭4文字から年を取り出す
    pub fn year(&self) -> Option<i32> {
        let head = self.date.get(..4)?;
        if !head.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        head.parse().ok()
    }

    pub fn summary_text(&self) -> Option<&str> {
        non_empty(&self.summary)
    }

    pub fn doi(&self) -> Option<&str> {
        non_empty(&self.doi)
    }

    /// 表示用リンク（linkが空ならDOIから生成）
    pub fn effective_link(&self) -> Option<String> {
        if let Some(link) = non_empty(&self.link) {
            return Some(link.to_string());
        }
        self.doi().map(|doi| format!("{}{}", DOI_RESOLVER, doi))
    }

    /// 主・副サブフィールド（空は除外）
    pub fn subfields(&self) -> impl Iterator<Item = &str> {
        non_empty(&self.subfield)
            .into_iter()
            .chain(non_empty(&self.subfield2))
    }

    pub fn symposium_group(&self) -> Option<&str> {
        non_empty(&self.symposium_group)
    }
}

/// ソート可能なフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Title,
    Author,
    Reviewer,
    Journal,
    Date,
    Access,
    Type,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Title,
        SortKey::Author,
        SortKey::Reviewer,
        SortKey::Journal,
        SortKey::Date,
        SortKey::Access,
        SortKey::Type,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Reviewer => "reviewer",
            SortKey::Journal => "journal",
            SortKey::Date => "date",
            SortKey::Access => "access",
            SortKey::Type => "type",
        }
    }

    /// 列見出し
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Title => "Book",
            SortKey::Author => "Author",
            SortKey::Reviewer => "Reviewer",
            SortKey::Journal => "Journal",
            SortKey::Date => "Date",
            SortKey::Access => "Access",
            SortKey::Type => "Type",
        }
    }

    /// エントリから該当フィールドの文字列を取り出す
    pub fn value<'a>(&self, entry: &'a ReviewEntry) -> &'a str {
        match self {
            SortKey::Title => &entry.title,
            SortKey::Author => &entry.author,
            SortKey::Reviewer => &entry.reviewer,
            SortKey::Journal => &entry.journal,
            SortKey::Date => &entry.date,
            SortKey::Access => &entry.access,
            SortKey::Type => entry.entry_type(),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown sort key: {}", s))
    }
}
