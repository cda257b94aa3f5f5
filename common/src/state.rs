//! 表示状態とアクション
//!
//! UIイベントは全て `Action` に変換し、`apply_action` で状態を更新する。
//! 状態から表示用の射影（絞り込み → ソート → ページ分割）を `project` で導出する。

use crate::catalog::Catalog;
use crate::facet::Facet;
use crate::filter::{apply_filters, Filters};
use crate::paginate::{
    clamp_page, is_allowed_page_size, page_range, page_window, total_pages, PageItem,
    DEFAULT_PAGE_SIZE,
};
use crate::sort::{sort_indices, SortState};
use crate::types::SortKey;
use std::ops::Range;

/// テキスト入力欄
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Query,
    Title,
    Author,
    Reviewer,
}

/// ファセット操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetAction {
    SelectAll,
    SelectNone,
    Toggle(String),
}

/// 対象ファセット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    Journal,
    Subfield,
}

/// ユーザー操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetText(TextField, String),
    SetYearFrom(Option<i32>),
    SetYearTo(Option<i32>),
    SetAccess(String),
    SetType(String),
    Facet(FacetKind, FacetAction),
    SortBy(SortKey),
    GoToPage(usize),
    SetPageSize(usize),
    /// 絞り込み後リスト上の絶対位置
    ToggleRow(usize),
    ClearFilters,
    /// 著者名リンク
    ShowAuthor(String),
    /// 書評者名リンク
    ShowReviewer(String),
    /// 出典カード
    ShowJournal(String),
}

impl Action {
    /// URLへ反映すべき操作か（行の展開・折りたたみだけは反映しない）
    pub fn syncs_url(&self) -> bool {
        !matches!(self, Action::ToggleRow(_))
    }

    /// テキスト欄の値を書き換える操作か（保留中の入力は捨てる）
    pub fn overwrites_text(&self) -> bool {
        matches!(
            self,
            Action::ClearFilters
                | Action::ShowAuthor(_)
                | Action::ShowReviewer(_)
                | Action::ShowJournal(_)
        )
    }

    /// 絞り込み結果や並び順が変わりうる操作か
    fn reshapes_results(&self) -> bool {
        !matches!(
            self,
            Action::ToggleRow(_) | Action::GoToPage(_) | Action::SetPageSize(_)
        )
    }
}

/// 表示状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub filters: Filters,
    pub journals: Facet,
    pub subfields: Facet,
    pub sort: SortState,
    /// 1始まり
    pub page: usize,
    pub page_size: usize,
    /// 展開中の行（絞り込み後リスト上の絶対位置）
    pub expanded: Option<usize>,
}

impl ViewState {
    /// デフォルト状態（ファセット全選択・日付降順・1ページ目）
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            filters: Filters::default(),
            journals: Facet::new(catalog.journals().iter().cloned()),
            subfields: Facet::new(catalog.subfield_codes()),
            sort: SortState::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            expanded: None,
        }
    }

    pub fn facet(&self, kind: FacetKind) -> &Facet {
        match kind {
            FacetKind::Journal => &self.journals,
            FacetKind::Subfield => &self.subfields,
        }
    }

    pub fn facet_mut(&mut self, kind: FacetKind) -> &mut Facet {
        match kind {
            FacetKind::Journal => &mut self.journals,
            FacetKind::Subfield => &mut self.subfields,
        }
    }

    /// 何らかの絞り込みが効いているか
    pub fn is_filtered(&self) -> bool {
        !self.filters.is_empty() || self.journals.is_active() || self.subfields.is_active()
    }

    /// フィルタとファセットを既定に戻す（ソートとページサイズは保持）
    pub fn clear_filters(&mut self) {
        self.filters = Filters::default();
        self.journals.select_all();
        self.subfields.select_all();
        self.page = 1;
        self.expanded = None;
    }

    /// 操作を適用する
    pub fn apply(&mut self, catalog: &Catalog, action: Action) {
        let reshapes = action.reshapes_results();
        match action {
            Action::SetText(field, value) => {
                let target = match field {
                    TextField::Query => &mut self.filters.query,
                    TextField::Title => &mut self.filters.title,
                    TextField::Author => &mut self.filters.author,
                    TextField::Reviewer => &mut self.filters.reviewer,
                };
                *target = value;
            }
            Action::SetYearFrom(year) => self.filters.year_from = year,
            Action::SetYearTo(year) => self.filters.year_to = year,
            Action::SetAccess(access) => self.filters.access = access,
            Action::SetType(entry_type) => self.filters.entry_type = entry_type,
            Action::Facet(kind, facet_action) => {
                let facet = self.facet_mut(kind);
                match facet_action {
                    FacetAction::SelectAll => facet.select_all(),
                    FacetAction::SelectNone => facet.select_none(),
                    FacetAction::Toggle(value) => {
                        facet.toggle(&value);
                    }
                }
            }
            Action::SortBy(key) => self.sort.click(key),
            Action::GoToPage(page) => self.page = page,
            Action::SetPageSize(size) => {
                if is_allowed_page_size(size) {
                    self.page_size = size;
                    self.page = 1;
                }
            }
            Action::ToggleRow(index) => {
                self.expanded = if self.expanded == Some(index) { None } else { Some(index) };
            }
            Action::ClearFilters => self.clear_filters(),
            Action::ShowAuthor(name) => {
                self.clear_filters();
                self.filters.author = name;
            }
            Action::ShowReviewer(name) => {
                self.clear_filters();
                self.filters.reviewer = name;
            }
            Action::ShowJournal(name) => {
                self.clear_filters();
                self.journals.select_only(&name);
            }
        }

        if reshapes {
            // 絞り込み結果が入れ替わると展開位置は別の行を指すので閉じる
            self.expanded = None;
        }
        self.clamp_page(catalog);
    }

    /// 現在の絞り込み件数に合わせてページを収める
    pub fn clamp_page(&mut self, catalog: &Catalog) {
        let count = self.filtered_indices(catalog).len();
        self.page = clamp_page(self.page, total_pages(count, self.page_size));
    }

    fn filtered_indices(&self, catalog: &Catalog) -> Vec<usize> {
        apply_filters(catalog.entries(), &self.filters, &self.journals, &self.subfields)
    }
}

/// 純粋関数版の状態遷移
pub fn apply_action(catalog: &Catalog, state: &ViewState, action: Action) -> ViewState {
    let mut next = state.clone();
    next.apply(catalog, action);
    next
}

/// 表示用の射影
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// データセット全件数
    pub total: usize,
    /// 絞り込み・ソート済みのエントリインデックス
    pub filtered: Vec<usize>,
    /// 収めた後の現在ページ
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl Projection {
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    /// 現在ページの範囲（絞り込み後リスト上の位置）
    pub fn page_range(&self) -> Range<usize> {
        page_range(self.filtered.len(), self.page, self.page_size)
    }

    /// 現在ページに表示するエントリインデックス
    pub fn page_indices(&self) -> &[usize] {
        &self.filtered[self.page_range()]
    }

    pub fn window(&self) -> Vec<PageItem> {
        page_window(self.page, self.total_pages)
    }

    /// 件数表示
    pub fn summary(&self) -> String {
        let count = self.filtered.len();
        if count == 0 {
            return format!("Showing 0 of {}", self.total);
        }
        let range = self.page_range();
        let mut text = format!("Showing {}–{} of {}", range.start + 1, range.end, count);
        if count != self.total {
            text.push_str(&format!(" (filtered from {})", self.total));
        }
        text
    }
}

/// 絞り込み → ソート → ページ分割
pub fn project(catalog: &Catalog, state: &ViewState) -> Projection {
    let mut filtered = state.filtered_indices(catalog);
    sort_indices(catalog.entries(), &mut filtered, state.sort);
    let total_pages = total_pages(filtered.len(), state.page_size);
    let page = clamp_page(state.page, total_pages);
    tracing::debug!(
        filtered = filtered.len(),
        total = catalog.len(),
        page,
        total_pages,
        "projection"
    );
    Projection {
        total: catalog.len(),
        filtered,
        page,
        page_size: state.page_size,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReviewEntry;

    fn catalog(n: usize) -> Catalog {
        let entries = (0..n)
            .map(|i| ReviewEntry {
                title: format!("Book {:03}", i),
                author: if i % 2 == 0 { "Thomas Hobbes".into() } else { "John Locke".into() },
                reviewer: format!("Reviewer {}", i % 3),
                journal: if i % 2 == 0 { "Ethics".into() } else { "Mind".into() },
                date: format!("{}-01-01", 2000 + (i % 20)),
                access: "open".into(),
                ..Default::default()
            })
            .collect();
        Catalog::new(entries)
    }

    #[test]
    fn test_default_state() {
        let catalog = catalog(10);
        let state = ViewState::new(&catalog);
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
        assert!(!state.is_filtered());
        assert_eq!(project(&catalog, &state).filtered_count(), 10);
    }

    #[test]
    fn test_pagination_scenario() {
        let catalog = catalog(50);
        let mut state = ViewState::new(&catalog);
        state.apply(&catalog, Action::SetPageSize(25));
        state.sort = SortState::new(SortKey::Title, crate::sort::SortDirection::Asc);

        let projection = project(&catalog, &state);
        assert_eq!(projection.total_pages, 2);
        assert_eq!(projection.page_range(), 0..25);

        state.apply(&catalog, Action::GoToPage(2));
        let projection = project(&catalog, &state);
        assert_eq!(projection.page_range(), 25..50);
        assert_eq!(projection.page_indices().len(), 25);
    }

    #[test]
    fn test_filter_clamps_page_down() {
        let catalog = catalog(120);
        let mut state = ViewState::new(&catalog);
        state.apply(&catalog, Action::SetPageSize(25));
        state.apply(&catalog, Action::GoToPage(5));
        assert_eq!(state.page, 5);

        state.apply(&catalog, Action::SetText(TextField::Author, "hobbes".into()));
        // 60件 → 3ページ
        assert_eq!(state.page, 3);

        state.apply(&catalog, Action::SetText(TextField::Query, "nothing matches".into()));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_go_to_page_out_of_range_is_clamped() {
        let catalog = catalog(30);
        let mut state = ViewState::new(&catalog);
        state.apply(&catalog, Action::GoToPage(0));
        assert_eq!(state.page, 1);
        state.apply(&catalog, Action::GoToPage(99));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let catalog = catalog(120);
        let mut state = ViewState::new(&catalog);
        state.apply(&catalog, Action::GoToPage(2));
        state.apply(&catalog, Action::SetPageSize(25));
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 25);

        state.apply(&catalog, Action::SetPageSize(33));
        assert_eq!(state.page_size, 25);
    }

    #[test]
    fn test_toggle_row_is_mutually_exclusive() {
        let catalog = catalog(10);
        let mut state = ViewState::new(&catalog);
        state.apply(&catalog, Action::ToggleRow(3));
        assert_eq!(state.expanded, Some(3));
        state.apply(&catalog, Action::ToggleRow(5));
        assert_eq!(state.expanded, Some(5));
        state.apply(&catalog, Action::ToggleRow(5));
        assert_eq!(state.expanded, None);
    }

    #[test]
    fn test_expansion_collapses_when_results_change() {
        let catalog = catalog(10);
        let mut state = ViewState::new(&catalog);
        state.apply(&catalog, Action::ToggleRow(2));
        state.apply(&catalog, Action::SortBy(SortKey::Title));
        assert_eq!(state.expanded, None);

        state.apply(&catalog, Action::ToggleRow(2));
        state.apply(&catalog, Action::GoToPage(1));
        assert_eq!(state.expanded, Some(2));
    }

    #[test]
    fn test_clear_filters_restores_everything() {
        let catalog = catalog(60);
        let mut state = ViewState::new(&catalog);
        state.apply(&catalog, Action::SetText(TextField::Query, "locke".into()));
        state.apply(&catalog, Action::Facet(FacetKind::Subfield, FacetAction::SelectNone));
        state.apply(&catalog, Action::SetYearFrom(Some(2005)));
        state.apply(&catalog, Action::ToggleRow(0));
        state.apply(&catalog, Action::SortBy(SortKey::Reviewer));
        assert!(state.is_filtered());

        state.apply(&catalog, Action::ClearFilters);
        let projection = project(&catalog, &state);
        assert_eq!(projection.filtered_count(), projection.total);
        assert_eq!(state.page, 1);
        assert_eq!(state.expanded, None);
        assert_eq!(state.sort.key, SortKey::Reviewer);
        assert!(!state.is_filtered());
    }

    #[test]
    fn test_show_author_shortcut() {
        let catalog = catalog(10);
        let mut state = ViewState::new(&catalog);
        state.apply(&catalog, Action::SetText(TextField::Query, "book 001".into()));
        state.apply(&catalog, Action::ShowAuthor("John Locke".into()));
        assert_eq!(state.filters.query, "");
        assert_eq!(state.filters.author, "John Locke");
        assert_eq!(project(&catalog, &state).filtered_count(), 5);
    }

    #[test]
    fn test_show_journal_shortcut() {
        let catalog = catalog(10);
        let mut state = ViewState::new(&catalog);
        state.apply(&catalog, Action::ToggleRow(1));
        state.apply(&catalog, Action::ShowJournal("Mind".into()));
        assert_eq!(state.journals.selected_values(), vec!["Mind"]);
        assert_eq!(state.expanded, None);
        let projection = project(&catalog, &state);
        assert!(projection
            .filtered
            .iter()
            .all(|&i| catalog.entries()[i].journal == "Mind"));
    }

    #[test]
    fn test_facet_actions() {
        let catalog = catalog(10);
        let mut state = ViewState::new(&catalog);
        state.apply(&catalog, Action::Facet(FacetKind::Journal, FacetAction::SelectNone));
        assert_eq!(project(&catalog, &state).filtered_count(), 0);
        assert_eq!(project(&catalog, &state).summary(), "Showing 0 of 10");

        state.apply(&catalog, Action::Facet(FacetKind::Journal, FacetAction::Toggle("Ethics".into())));
        assert_eq!(project(&catalog, &state).filtered_count(), 5);

        state.apply(&catalog, Action::Facet(FacetKind::Journal, FacetAction::Toggle("Mind".into())));
        assert!(!state.journals.is_active());
        assert_eq!(project(&catalog, &state).filtered_count(), 10);
    }

    #[test]
    fn test_summary_text() {
        let catalog = catalog(60);
        let mut state = ViewState::new(&catalog);
        state.apply(&catalog, Action::SetPageSize(25));
        state.apply(&catalog, Action::GoToPage(2));
        assert_eq!(project(&catalog, &state).summary(), "Showing 26–50 of 60");

        state.apply(&catalog, Action::SetText(TextField::Author, "locke".into()));
        assert_eq!(
            project(&catalog, &state).summary(),
            "Showing 26–30 of 30 (filtered from 60)"
        );
    }

    #[test]
    fn test_apply_action_is_pure() {
        let catalog = catalog(10);
        let state = ViewState::new(&catalog);
        let next = apply_action(&catalog, &state, Action::SortBy(SortKey::Title));
        assert_eq!(state.sort, SortState::default());
        assert_eq!(next.sort.key, SortKey::Title);
    }

    #[test]
    fn test_overwrites_text() {
        assert!(Action::ClearFilters.overwrites_text());
        assert!(Action::ShowJournal("Mind".into()).overwrites_text());
        assert!(!Action::SetText(TextField::Query, "x".into()).overwrites_text());
        assert!(!Action::GoToPage(2).overwrites_text());
    }

    #[test]
    fn test_show_journal_ignores_stray_whitespace() {
        let catalog = Catalog::from_json(
            r#"[{"title": "A", "journal": "Mind "}, {"title": "B", "journal": "Ethics"}]"#,
        )
        .unwrap();
        assert_eq!(catalog.source_counts(), vec![("Ethics".to_string(), 1), ("Mind".to_string(), 1)]);

        let state = apply_action(&catalog, &ViewState::new(&catalog), Action::ShowJournal("Mind".into()));
        assert_eq!(project(&catalog, &state).filtered_count(), 1);

        let restored = crate::url::decode_fragment(&catalog, "journals=Mind");
        assert_eq!(project(&catalog, &restored).filtered_count(), 1);
    }

    #[test]
    fn test_syncs_url() {
        assert!(!Action::ToggleRow(1).syncs_url());
        assert!(Action::GoToPage(2).syncs_url());
        assert!(Action::ClearFilters.syncs_url());
    }
}
