//! コマンドラインの検索条件
//!
//! URLフラグメントと同じ書式を受け付け、個別フラグで上書きする。

use crate::error::{PhilReviewsError, Result};
use clap::Args;
use philreviews_common::filter::parse_year;
use philreviews_common::paginate::is_allowed_page_size;
use philreviews_common::types::ENTRY_TYPES;
use philreviews_common::{
    decode_fragment, Action, Catalog, FacetAction, FacetKind, SortState, TextField, ViewState,
    DEFAULT_PAGE_SIZE,
};

#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// URLフラグメント（例: "q=hobbes&sort=title-asc"）
    pub fragment: Option<String>,

    /// 全文検索
    #[arg(short, long)]
    pub q: Option<String>,

    /// 書名
    #[arg(long)]
    pub title: Option<String>,

    /// 著者
    #[arg(long)]
    pub author: Option<String>,

    /// 書評者
    #[arg(long)]
    pub reviewer: Option<String>,

    /// ジャーナル（複数指定可）
    #[arg(short, long = "journal")]
    pub journals: Vec<String>,

    /// サブフィールドコード（複数指定可）
    #[arg(long = "subfield")]
    pub subfields: Vec<String>,

    /// 年の範囲 "FROM-TO"（片側省略可）
    #[arg(short, long)]
    pub year: Option<String>,

    /// アクセス種別 (open/restricted)
    #[arg(long)]
    pub access: Option<String>,

    /// 種別 (review/symposium)
    #[arg(long = "type")]
    pub entry_type: Option<String>,

    /// ソート "KEY-DIRECTION"（例: date-desc）
    #[arg(short, long)]
    pub sort: Option<String>,

    /// ページ番号（1始まり）
    #[arg(short, long)]
    pub page: Option<usize>,

    /// ページサイズ (25/50/100)
    #[arg(long)]
    pub size: Option<usize>,
}

/// フラグメント → 個別フラグの順に適用した表示状態
///
/// フラグメント側の不正値は黙って捨てるが、フラグで明示された不正値はエラーにする。
pub fn build_state(catalog: &Catalog, args: &QueryArgs) -> Result<ViewState> {
    let mut state = decode_fragment(catalog, args.fragment.as_deref().unwrap_or(""));

    let texts = [
        (TextField::Query, &args.q),
        (TextField::Title, &args.title),
        (TextField::Author, &args.author),
        (TextField::Reviewer, &args.reviewer),
    ];
    for (field, value) in texts {
        if let Some(value) = value {
            state.apply(catalog, Action::SetText(field, value.trim().to_string()));
        }
    }

    if !args.journals.is_empty() {
        select_facet(catalog, &mut state, FacetKind::Journal, &args.journals)?;
    }
    if !args.subfields.is_empty() {
        select_facet(catalog, &mut state, FacetKind::Subfield, &args.subfields)?;
    }

    if let Some(year) = &args.year {
        let (from, to) = year.split_once('-').unwrap_or((year.as_str(), year.as_str()));
        let (from, to) = (parse_year(from), parse_year(to));
        if from.is_none() && to.is_none() {
            return Err(PhilReviewsError::InvalidQuery(format!("年の範囲: {}", year)));
        }
        state.apply(catalog, Action::SetYearFrom(from));
        state.apply(catalog, Action::SetYearTo(to));
    }

    if let Some(access) = &args.access {
        state.apply(catalog, Action::SetAccess(access.trim().to_string()));
    }
    if let Some(entry_type) = &args.entry_type {
        if !ENTRY_TYPES.contains(&entry_type.as_str()) {
            return Err(PhilReviewsError::InvalidQuery(format!(
                "種別: {} (review / symposium)",
                entry_type
            )));
        }
        state.apply(catalog, Action::SetType(entry_type.clone()));
    }

    if let Some(sort) = &args.sort {
        state.sort = SortState::from_token(sort)
            .ok_or_else(|| PhilReviewsError::InvalidQuery(format!("ソート: {} (例: date-desc)", sort)))?;
    }

    if let Some(size) = args.size {
        if !is_allowed_page_size(size) {
            return Err(PhilReviewsError::InvalidQuery(format!(
                "ページサイズ: {} (25 / 50 / 100)",
                size
            )));
        }
        state.apply(catalog, Action::SetPageSize(size));
    }
    if let Some(page) = args.page {
        state.apply(catalog, Action::GoToPage(page.max(1)));
    }

    Ok(state)
}

/// 設定のページサイズを既定値として使う版
///
/// フラグメントにもフラグにもサイズが無いときだけ差し替え、ページ番号は保つ。
pub fn build_state_with_page_size(
    catalog: &Catalog,
    args: &QueryArgs,
    default_size: usize,
) -> Result<ViewState> {
    let mut state = build_state(catalog, args)?;
    if args.size.is_none()
        && state.page_size == DEFAULT_PAGE_SIZE
        && default_size != DEFAULT_PAGE_SIZE
        && is_allowed_page_size(default_size)
    {
        let page = state.page;
        state.apply(catalog, Action::SetPageSize(default_size));
        state.apply(catalog, Action::GoToPage(page));
    }
    Ok(state)
}

fn select_facet(
    catalog: &Catalog,
    state: &mut ViewState,
    kind: FacetKind,
    values: &[String],
) -> Result<()> {
    let unknown: Vec<&str> = values
        .iter()
        .map(String::as_str)
        .filter(|v| !state.facet(kind).contains(v))
        .collect();
    if !unknown.is_empty() {
        return Err(PhilReviewsError::InvalidQuery(format!("不明な値: {}", unknown.join(", "))));
    }

    state.apply(catalog, Action::Facet(kind, FacetAction::SelectNone));
    for value in values {
        if !state.facet(kind).is_selected(value) {
            state.apply(catalog, Action::Facet(kind, FacetAction::Toggle(value.clone())));
        }
    }
    Ok(())
}
