//! ソートエンジン
//!
//! 常にフィールドの文字列表現で比較する（日付もISO文字列のまま辞書順）。

use crate::types::{ReviewEntry, SortKey};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// ソート方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// 列見出しの矢印
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown sort direction: {}. Use asc or desc", s)),
        }
    }
}

/// ソート状態（デフォルトは日付の降順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// 新しいキーを選んだときの初期方向
    pub fn initial_direction(key: SortKey) -> SortDirection {
        if key == SortKey::Date {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    /// 列見出しクリック: 同じキーなら方向反転、別キーなら初期方向
    pub fn click(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = Self::initial_direction(key);
        }
    }

    /// URL表現 "{key}-{direction}"
    pub fn to_token(&self) -> String {
        format!("{}-{}", self.key.as_str(), self.direction.as_str())
    }

    /// "{key}-{direction}" をパース。トークンがちょうど2つでなければNone
    pub fn from_token(token: &str) -> Option<Self> {
        let parts: Vec<&str> = token.split('-').collect();
        let [key, direction] = parts.as_slice() else {
            return None;
        };
        Some(Self {
            key: key.parse().ok()?,
            direction: direction.parse().ok()?,
        })
    }
}

/// 照合キー: 分解してダイアクリティカルマークを落とし小文字化
fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// ロケールを考慮した文字列比較（アクセント違い → 大文字小文字 → 元の文字列の順で決着）
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// 2エントリの比較（昇順基準）
pub fn compare_entries(a: &ReviewEntry, b: &ReviewEntry, key: SortKey) -> Ordering {
    collate(key.value(a), key.value(b))
}

/// インデックス列を安定ソート
pub fn sort_indices(entries: &[ReviewEntry], indices: &mut [usize], sort: SortState) {
    indices.sort_by(|&a, &b| {
        let ordering = compare_entries(&entries[a], &entries[b], sort.key);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
