//! 絞り込みエンジン
//!
//! (データセット, フィルタ値) → 条件を全て満たすエントリのインデックス。
//! 副作用なし、部分一致は大文字小文字を区別しない。

use crate::facet::Facet;
use crate::subfield::subfield_label;
use crate::types::ReviewEntry;
use serde::{Deserialize, Serialize};

/// テキスト系フィルタの値
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    /// 全体検索
    pub query: String,
    pub title: String,
    pub author: String,
    pub reviewer: String,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    /// 完全一致（大文字小文字無視）
    pub access: String,
    /// 完全一致
    pub entry_type: String,
}

impl Filters {
    pub fn has_year_bound(&self) -> bool {
        self.year_from.is_some() || self.year_to.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 年の入力値をパース（数値でなければNone）
pub fn parse_year(input: &str) -> Option<i32> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// 全体検索の対象文字列（小文字化済み）
pub fn search_blob(entry: &ReviewEntry) -> String {
    let mut parts = vec![
        entry.title.as_str(),
        entry.author.as_str(),
        entry.reviewer.as_str(),
        entry.journal.as_str(),
        entry.date.as_str(),
    ];
    parts.extend(entry.subfields().filter_map(|code| subfield_label(code)));
    parts.join(" ").to_lowercase()
}

/// 1回の絞り込みに使う述語。検索語はあらかじめ小文字化しておく
pub struct EntryFilter<'a> {
    query: String,
    title: String,
    author: String,
    reviewer: String,
    access: String,
    entry_type: &'a str,
    year_from: Option<i32>,
    year_to: Option<i32>,
    journals: &'a Facet,
    subfields: &'a Facet,
}

impl<'a> EntryFilter<'a> {
    pub fn new(filters: &'a Filters, journals: &'a Facet, subfields: &'a Facet) -> Self {
        Self {
            query: filters.query.trim().to_lowercase(),
            title: filters.title.trim().to_lowercase(),
            author: filters.author.trim().to_lowercase(),
            reviewer: filters.reviewer.trim().to_lowercase(),
            access: filters.access.trim().to_lowercase(),
            entry_type: filters.entry_type.trim(),
            year_from: filters.year_from,
            year_to: filters.year_to,
            journals,
            subfields,
        }
    }

    pub fn matches(&self, entry: &ReviewEntry) -> bool {
        if !self.query.is_empty() && !search_blob(entry).contains(&self.query) {
            return false;
        }

        if !contains_folded(&entry.title, &self.title)
            || !contains_folded(&entry.author, &self.author)
            || !contains_folded(&entry.reviewer, &self.reviewer)
        {
            return false;
        }

        // ファセット候補は前後の空白を落として作っている
        if !self.journals.allows(entry.journal.trim()) {
            return false;
        }

        // 主・副どちらかが選択されていれば通過
        if !self.subfields.is_all() && !entry.subfields().any(|s| self.subfields.is_selected(s)) {
            return false;
        }

        if !self.access.is_empty() && entry.access.trim().to_lowercase() != self.access {
            return false;
        }

        if !self.entry_type.is_empty() && entry.entry_type() != self.entry_type {
            return false;
        }

        self.matches_year(entry)
    }

    fn matches_year(&self, entry: &ReviewEntry) -> bool {
        if self.year_from.is_none() && self.year_to.is_none() {
            return true;
        }
        let Some(year) = entry.year() else {
            return false;
        };
        self.year_from.map_or(true, |from| year >= from) && self.year_to.map_or(true, |to| year <= to)
    }
}

/// 空の検索語は常に一致
fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

/// 条件を満たすエントリのインデックスを元の順序で返す
pub fn apply_filters(
    entries: &[ReviewEntry],
    filters: &Filters,
    journals: &Facet,
    subfields: &Facet,
) -> Vec<usize> {
    let predicate = EntryFilter::new(filters, journals, subfields);
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| predicate.matches(entry))
        .map(|(i, _)| i)
        .collect()
}
