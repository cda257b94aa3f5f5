//! 表示用ビューモデル
//!
//! Leptos クライアントと CLI の両方がここで作った値をそのまま描画する。

use crate::catalog::Catalog;
use crate::sort::SortState;
use crate::state::{Projection, ViewState};
use crate::subfield::display_subfield;
use crate::types::{ReviewEntry, SortKey};

/// 小さなラベル（アクセス種別・種別・サブフィールド）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub class: String,
}

impl Badge {
    fn new(label: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            class: class.into(),
        }
    }
}

/// 外部リンク（クリック時に計測パスを送る）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundLink {
    pub href: String,
    pub title: String,
    pub analytics_path: String,
}

impl OutboundLink {
    pub fn for_entry(entry: &ReviewEntry) -> Option<Self> {
        let href = entry.effective_link()?;
        Some(Self {
            href,
            title: entry.title.clone(),
            analytics_path: analytics_path(&entry.title),
        })
    }
}

/// テーブルの1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// 絞り込み後リスト上の絶対位置（展開トグルのキー）
    pub position: usize,
    /// データセット上のインデックス
    pub entry_index: usize,
    pub title: String,
    pub author: String,
    pub reviewer: String,
    pub journal: String,
    pub date: String,
    /// Access 列
    pub access: Option<Badge>,
    /// Type 列（シンポジウムのみ）
    pub entry_type: Option<Badge>,
    pub expanded: bool,
}

/// 展開行の中身
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DetailView {
    pub summary: Option<String>,
    pub link: Option<OutboundLink>,
    pub subfields: Vec<Badge>,
    pub contributions: Vec<ContributionView>,
}

impl DetailView {
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.link.is_none()
            && self.subfields.is_empty()
            && self.contributions.is_empty()
    }
}

/// シンポジウムの他の寄稿
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionView {
    pub title: String,
    pub author: String,
    pub reviewer: String,
    pub link: Option<OutboundLink>,
}

/// ソート可能な列見出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortHeader {
    pub key: SortKey,
    pub label: &'static str,
    /// 現在のソート列なら方向の矢印
    pub indicator: Option<&'static str>,
}

/// 列見出し一覧
pub fn sort_headers(sort: SortState) -> Vec<SortHeader> {
    SortKey::ALL
        .iter()
        .map(|&key| SortHeader {
            key,
            label: key.label(),
            indicator: (sort.key == key).then(|| sort.direction.arrow()),
        })
        .collect()
}

/// 表の列数（ソート可能な列がそのまま並ぶ）
pub const COLUMN_COUNT: usize = SortKey::ALL.len();

/// Access 列のバッジ
pub fn access_badge(entry: &ReviewEntry) -> Option<Badge> {
    let access = entry.access.trim();
    (!access.is_empty())
        .then(|| Badge::new(capitalize(access), format!("badge badge-{}", slugify(access))))
}

/// Type 列のバッジ
pub fn type_badge(entry: &ReviewEntry) -> Option<Badge> {
    entry
        .is_symposium()
        .then(|| Badge::new("Symposium", "badge badge-symposium"))
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 現在ページの行
pub fn page_rows(catalog: &Catalog, projection: &Projection, state: &ViewState) -> Vec<RowView> {
    let range = projection.page_range();
    projection
        .page_indices()
        .iter()
        .enumerate()
        .filter_map(|(offset, &entry_index)| {
            let entry = catalog.entry(entry_index)?;
            let position = range.start + offset;
            Some(RowView {
                position,
                entry_index,
                title: entry.title.clone(),
                author: entry.author.clone(),
                reviewer: entry.reviewer.clone(),
                journal: entry.journal.clone(),
                date: entry.date.clone(),
                access: access_badge(entry),
                entry_type: type_badge(entry),
                expanded: state.expanded == Some(position),
            })
        })
        .collect()
}

/// 展開行の内容。不明なインデックスなら空
pub fn detail_view(catalog: &Catalog, entry_index: usize) -> DetailView {
    let Some(entry) = catalog.entry(entry_index) else {
        return DetailView::default();
    };

    let subfields = entry
        .subfields()
        .map(|code| Badge::new(display_subfield(code), format!("subfield-badge subfield-{}", code)))
        .collect();

    let contributions = catalog
        .symposium_contributions(entry_index)
        .into_iter()
        .filter_map(|i| catalog.entry(i))
        .map(|other| ContributionView {
            title: other.title.clone(),
            author: other.author.clone(),
            reviewer: other.reviewer.clone(),
            link: OutboundLink::for_entry(other),
        })
        .collect();

    DetailView {
        summary: entry.summary_text().map(str::to_string),
        link: OutboundLink::for_entry(entry),
        subfields,
        contributions,
    }
}

/// 英数字以外の連続を `-` にまとめた小文字スラッグ
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// 外部リンククリックの計測パス
pub fn analytics_path(title: &str) -> String {
    format!("outbound/{}", slugify(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{project, Action};
    use crate::sort::SortDirection;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"[
            {"title": "Leviathan Revisited", "author": "Hobbes", "reviewer": "R1", "journal": "Mind",
             "date": "2012-05-01", "access": "open", "summary": "A close reading.",
             "link": "https://example.org/1", "subfield": "political", "subfield2": "history"},
            {"title": "On Liberty", "author": "Mill", "journal": "Ethics", "date": "2009-01-01",
             "access": "restricted", "doi": "10.1000/xyz"},
            {"title": "Symposium Part A", "author": "X", "journal": "Nous", "date": "2011",
             "type": "symposium", "symposium_group": "s1", "link": "https://example.org/a"},
            {"title": "Symposium Part B", "author": "Y", "journal": "Nous", "date": "2011",
             "type": "symposium", "symposium_group": "s1"}
        ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Leviathan: A Reading (2nd ed.)"), "leviathan-a-reading-2nd-ed");
        assert_eq!(slugify("  --Hello__World--  "), "hello-world");
        assert_eq!(slugify("Émile"), "mile");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_analytics_path() {
        assert_eq!(analytics_path("On Liberty"), "outbound/on-liberty");
    }

    #[test]
    fn test_page_rows_positions_and_expansion() {
        let catalog = catalog();
        let mut state = ViewState::new(&catalog);
        state.apply(&catalog, Action::SetPageSize(25));
        state.apply(&catalog, Action::ToggleRow(1));

        let projection = project(&catalog, &state);
        let rows = page_rows(&catalog, &projection, &state);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].title, "Leviathan Revisited");
        assert_eq!(rows.iter().map(|r| r.position).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert!(rows[1].expanded);
        assert!(!rows[0].expanded);
    }

    #[test]
    fn test_access_and_type_badges() {
        let catalog = catalog();
        let review = catalog.entry(0).unwrap();
        assert_eq!(access_badge(review).map(|b| b.label), Some("Open".to_string()));
        assert_eq!(type_badge(review), None);

        let symposium = catalog.entry(2).unwrap();
        assert_eq!(access_badge(symposium), None);
        assert_eq!(type_badge(symposium).map(|b| b.class), Some("badge badge-symposium".to_string()));
    }

    #[test]
    fn test_one_column_per_sort_header() {
        let headers = sort_headers(SortState::default());
        assert_eq!(headers.len(), COLUMN_COUNT);
        let keys: Vec<_> = headers.iter().map(|h| h.key).collect();
        assert_eq!(&keys[5..], &[SortKey::Access, SortKey::Type]);
    }

    #[test]
    fn test_detail_view() {
        let catalog = catalog();
        let detail = detail_view(&catalog, 0);
        assert_eq!(detail.summary.as_deref(), Some("A close reading."));
        assert_eq!(detail.link.as_ref().map(|l| l.href.as_str()), Some("https://example.org/1"));
        let labels: Vec<_> = detail.subfields.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Political & Social Philosophy", "History of Philosophy"]);
        assert!(detail.contributions.is_empty());
    }

    #[test]
    fn test_detail_view_doi_fallback() {
        let catalog = catalog();
        let detail = detail_view(&catalog, 1);
        assert_eq!(detail.summary, None);
        assert_eq!(
            detail.link.map(|l| l.href),
            Some("https://doi.org/10.1000/xyz".to_string())
        );
    }

    #[test]
    fn test_detail_view_symposium_contributions() {
        let catalog = catalog();
        let detail = detail_view(&catalog, 3);
        assert_eq!(detail.contributions.len(), 1);
        let other = &detail.contributions[0];
        assert_eq!(other.title, "Symposium Part A");
        assert_eq!(
            other.link.as_ref().map(|l| l.analytics_path.as_str()),
            Some("outbound/symposium-part-a")
        );
        assert!(detail_view(&catalog, 99).is_empty());
    }

    #[test]
    fn test_sort_headers_mark_current() {
        let headers = sort_headers(SortState::new(SortKey::Title, SortDirection::Asc));
        let marked: Vec<_> = headers.iter().filter(|h| h.indicator.is_some()).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].key, SortKey::Title);
        assert_eq!(marked[0].indicator, Some("▲"));
    }
}
