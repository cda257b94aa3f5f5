//! 対話式ブラウズ
//!
//! メニューで選んだ操作を `Action` に変換して状態に適用し、毎回表を描き直す。

use crate::error::{PhilReviewsError, Result};
use crate::table::format_page;
use dialoguer::{Input, Select};
use philreviews_common::{
    encode_fragment, project, Action, Catalog, FacetAction, FacetKind, SortKey, TextField,
    ViewState, PAGE_SIZES,
};

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    NextPage,
    PrevPage,
    Search,
    Author,
    Reviewer,
    Journal,
    Sort,
    PageSize,
    Expand,
    Clear,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 11] = [
        MenuItem::NextPage,
        MenuItem::PrevPage,
        MenuItem::Search,
        MenuItem::Author,
        MenuItem::Reviewer,
        MenuItem::Journal,
        MenuItem::Sort,
        MenuItem::PageSize,
        MenuItem::Expand,
        MenuItem::Clear,
        MenuItem::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::NextPage => "次のページ",
            MenuItem::PrevPage => "前のページ",
            MenuItem::Search => "全文検索",
            MenuItem::Author => "著者で絞り込み",
            MenuItem::Reviewer => "書評者で絞り込み",
            MenuItem::Journal => "ジャーナルを選ぶ",
            MenuItem::Sort => "並び替え",
            MenuItem::PageSize => "ページサイズ",
            MenuItem::Expand => "行の詳細を開く/閉じる",
            MenuItem::Clear => "絞り込みを解除",
            MenuItem::Quit => "終了",
        }
    }
}

/// 入力不要なメニュー項目をそのまま操作に変換
pub fn direct_action(item: MenuItem, state: &ViewState) -> Option<Action> {
    match item {
        MenuItem::NextPage => Some(Action::GoToPage(state.page + 1)),
        MenuItem::PrevPage => Some(Action::GoToPage(state.page.saturating_sub(1).max(1))),
        MenuItem::Clear => Some(Action::ClearFilters),
        _ => None,
    }
}

fn prompt_err(e: dialoguer::Error) -> PhilReviewsError {
    PhilReviewsError::Prompt(e.to_string())
}

fn prompt_text(prompt: &str, current: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)
}

fn prompt_select(prompt: &str, items: &[String], default: usize) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(prompt_err)
}

/// 入力を伴う操作を組み立てる（キャンセル扱いは None）
fn prompt_action(item: MenuItem, catalog: &Catalog, state: &ViewState) -> Result<Option<Action>> {
    let action = match item {
        MenuItem::Search => Some(Action::SetText(
            TextField::Query,
            prompt_text("検索語", &state.filters.query)?.trim().to_string(),
        )),
        MenuItem::Author => Some(Action::SetText(
            TextField::Author,
            prompt_text("著者", &state.filters.author)?.trim().to_string(),
        )),
        MenuItem::Reviewer => Some(Action::SetText(
            TextField::Reviewer,
            prompt_text("書評者", &state.filters.reviewer)?.trim().to_string(),
        )),
        MenuItem::Journal => {
            let mut items = vec!["(すべて)".to_string()];
            items.extend(catalog.journals().iter().cloned());
            match prompt_select("ジャーナル", &items, 0)? {
                0 => Some(Action::Facet(FacetKind::Journal, FacetAction::SelectAll)),
                i => Some(Action::ShowJournal(items[i].clone())),
            }
        }
        MenuItem::Sort => {
            let items: Vec<String> = SortKey::ALL
                .iter()
                .map(|key| {
                    let arrow = if state.sort.key == *key { state.sort.direction.arrow() } else { "" };
                    format!("{} {}", key.label(), arrow).trim_end().to_string()
                })
                .collect();
            let current = SortKey::ALL.iter().position(|k| *k == state.sort.key).unwrap_or(0);
            let i = prompt_select("並び替え（同じ列で方向反転）", &items, current)?;
            Some(Action::SortBy(SortKey::ALL[i]))
        }
        MenuItem::PageSize => {
            let items: Vec<String> = PAGE_SIZES.iter().map(|s| s.to_string()).collect();
            let current = PAGE_SIZES.iter().position(|s| *s == state.page_size).unwrap_or(0);
            let i = prompt_select("ページサイズ", &items, current)?;
            Some(Action::SetPageSize(PAGE_SIZES[i]))
        }
        MenuItem::Expand => {
            let input = prompt_text("行番号", "")?;
            input
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n >= 1)
                .map(|n| Action::ToggleRow(n - 1))
        }
        _ => direct_action(item, state),
    };
    Ok(action)
}

/// 対話ループ
pub fn run_browse(catalog: &Catalog, initial: ViewState) -> Result<()> {
    let mut state = initial;
    let labels: Vec<String> = MenuItem::ALL.iter().map(|m| m.label().to_string()).collect();

    loop {
        let projection = project(catalog, &state);
        println!("\n{}\n", format_page(catalog, &projection, &state));

        let choice = prompt_select("操作", &labels, 0)?;
        let item = MenuItem::ALL[choice];
        if item == MenuItem::Quit {
            break;
        }

        if let Some(action) = prompt_action(item, catalog, &state)? {
            tracing::debug!(?action, "browse action");
            state.apply(catalog, action);
        }
    }

    let fragment = encode_fragment(&state);
    if !fragment.is_empty() {
        println!("URL: #{}", fragment);
    }
    Ok(())
}
