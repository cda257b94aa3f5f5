//! 複数選択ファセット（ジャーナル / サブフィールド）
//!
//! 全選択 = フィルタなし、空選択 = 何も表示しない、という規約を持つ。

use std::collections::HashSet;

/// ファセットの状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facet {
    /// 全候補（表示順）
    values: Vec<String>,
    /// 選択中の値（valuesの部分集合）
    selected: HashSet<String>,
}

impl Facet {
    /// 候補一覧から全選択状態で作成（重複は先勝ちで除去）
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let values: Vec<String> = values
            .into_iter()
            .map(Into::into)
            .filter(|v| seen.insert(v.clone()))
            .collect();
        let selected = values.iter().cloned().collect();
        Self { values, selected }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// 選択中の値（候補順）
    pub fn selected_values(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter(|v| self.selected.contains(*v))
            .map(String::as_str)
            .collect()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.contains(value)
    }

    pub fn is_all(&self) -> bool {
        self.selected.len() == self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// 絞り込みが効いているか（全選択以外）
    pub fn is_active(&self) -> bool {
        !self.is_all()
    }

    /// 値がフィルタを通過するか
    pub fn allows(&self, value: &str) -> bool {
        self.is_all() || self.selected.contains(value)
    }

    pub fn select_all(&mut self) {
        self.selected = self.values.iter().cloned().collect();
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
    }

    /// 1件の選択を反転（未知の値は無視）
    pub fn toggle(&mut self, value: &str) -> bool {
        if !self.contains(value) {
            return false;
        }
        if !self.selected.remove(value) {
            self.selected.insert(value.to_string());
        }
        true
    }

    /// 1件だけ選択
    pub fn select_only(&mut self, value: &str) -> bool {
        if !self.contains(value) {
            return false;
        }
        self.selected.clear();
        self.selected.insert(value.to_string());
        true
    }

    /// 選択を置き換える。未知の値は捨て、採用した件数を返す
    pub fn set_selected<'a, I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let known: HashSet<String> = values
            .into_iter()
            .filter(|v| self.contains(v))
            .map(str::to_string)
            .collect();
        let count = known.len();
        self.selected = known;
        count
    }

    /// 選択状態の要約ラベル
    ///
    /// `noun` は "journals" などの複数形、`display` は値の表示変換。
    pub fn summary_label<F>(&self, noun: &str, display: F) -> String
    where
        F: Fn(&str) -> String,
    {
        if self.is_all() {
            return format!("All {}", noun);
        }
        let selected = self.selected_values();
        match selected.as_slice() {
            [] => format!("No {} selected", noun),
            [only] => display(*only),
            [first, second] => format!("{}, {}", display(*first), display(*second)),
            [first, rest @ ..] => format!("{} +{} more", display(*first), rest.len()),
        }
    }
}
