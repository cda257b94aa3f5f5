//! カタログ（読み込み済みデータセット）
//!
//! 起動時に1回だけ読み込み、以後は不変。ファセット候補や
//! 出典一覧などの派生データもここで一度だけ計算する。

use crate::error::Result;
use crate::subfield::{subfield_codes, SUBFIELDS};
use crate::types::ReviewEntry;
use std::collections::{BTreeSet, HashMap};

/// 年が1件も取れないときの範囲
pub const FALLBACK_YEAR_RANGE: (i32, i32) = (2000, 2026);

/// 読み込み済みデータセット
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<ReviewEntry>,
    journals: Vec<String>,
}

impl Catalog {
    pub fn new(entries: Vec<ReviewEntry>) -> Self {
        let journals: BTreeSet<String> = entries
            .iter()
            .map(|e| e.journal.trim())
            .filter(|j| !j.is_empty())
            .map(str::to_string)
            .collect();
        tracing::debug!(entries = entries.len(), journals = journals.len(), "catalog loaded");
        Self {
            entries,
            journals: journals.into_iter().collect(),
        }
    }

    /// JSON配列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<ReviewEntry> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    /// JSONファイルから読み込み（非WASM環境のみ）
    #[cfg(not(feature = "wasm"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn entries(&self) -> &[ReviewEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&ReviewEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// ジャーナル一覧（重複なし・名前順）
    pub fn journals(&self) -> &[String] {
        &self.journals
    }

    pub fn has_journal(&self, name: &str) -> bool {
        self.journals.binary_search_by(|j| j.as_str().cmp(name)).is_ok()
    }

    /// サブフィールドのファセット候補（分類表の順）
    pub fn subfield_codes(&self) -> Vec<String> {
        subfield_codes()
    }

    /// アクセス種別の候補（小文字化・重複なし・名前順）
    pub fn access_values(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| e.access.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 年の最小・最大（取れなければ既定値）
    pub fn year_bounds(&self) -> (i32, i32) {
        let mut years = self.entries.iter().filter_map(ReviewEntry::year);
        let Some(first) = years.next() else {
            return FALLBACK_YEAR_RANGE;
        };
        years.fold((first, first), |(min, max), y| (min.min(y), max.max(y)))
    }

    /// 出典ごとの件数（件数の多い順、同数は名前順）
    pub fn source_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in &self.entries {
            let journal = entry.journal.trim();
            if !journal.is_empty() {
                *counts.entry(journal).or_default() += 1;
            }
        }
        let mut sources: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(name, count)| (name.to_string(), count))
            .collect();
        sources.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        sources
    }

    /// サブフィールドごとの件数（主・副どちらも数える、分類表の順）
    pub fn subfield_counts(&self) -> Vec<(&'static str, usize)> {
        SUBFIELDS
            .iter()
            .map(|s| {
                let count = self
                    .entries
                    .iter()
                    .filter(|e| e.subfields().any(|code| code == s.code))
                    .count();
                (s.code, count)
            })
            .collect()
    }

    /// 同じシンポジウムに属する他の寄稿（データセット順）
    pub fn symposium_contributions(&self, index: usize) -> Vec<usize> {
        let Some(group) = self.entry(index).and_then(ReviewEntry::symposium_group) else {
            return Vec::new();
        };
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, e)| *i != index && e.symposium_group() == Some(group))
            .map(|(i, _)| i)
            .collect()
    }
}
