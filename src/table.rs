//! ターミナル表示（表・ページャー・展開行）

use philreviews_common::render::{detail_view, page_rows, Badge, RowView};
use philreviews_common::{Catalog, PageItem, Projection, ViewState};

const TITLE_WIDTH: usize = 40;
const NAME_WIDTH: usize = 20;
const JOURNAL_WIDTH: usize = 28;
const DATE_WIDTH: usize = 10;
const BADGE_WIDTH: usize = 10;

/// 表示幅に合わせて切り詰め、右を空白で埋める
fn fit(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count <= width {
        format!("{}{}", value, " ".repeat(width - count))
    } else {
        let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn badge_label(badge: Option<&Badge>) -> &str {
    badge.map(|b| b.label.as_str()).unwrap_or("")
}

fn format_row(row: &RowView) -> String {
    let marker = if row.expanded { "▾" } else { " " };
    format!(
        "{} {:>4}  {}  {}  {}  {}  {}  {}  {}",
        marker,
        row.position + 1,
        fit(&row.date, DATE_WIDTH),
        fit(&row.title, TITLE_WIDTH),
        fit(&row.author, NAME_WIDTH),
        fit(&row.reviewer, NAME_WIDTH),
        fit(&row.journal, JOURNAL_WIDTH),
        fit(badge_label(row.access.as_ref()), BADGE_WIDTH),
        badge_label(row.entry_type.as_ref())
    )
    .trim_end()
    .to_string()
}

fn format_detail(catalog: &Catalog, entry_index: usize) -> Vec<String> {
    let detail = detail_view(catalog, entry_index);
    if detail.is_empty() {
        return vec!["      (詳細なし)".to_string()];
    }
    let mut lines = Vec::new();
    if let Some(summary) = &detail.summary {
        lines.push(format!("      {}", summary));
    }
    if let Some(link) = &detail.link {
        lines.push(format!("      → {}", link.href));
    }
    if !detail.subfields.is_empty() {
        let labels: Vec<_> = detail.subfields.iter().map(|b| b.label.as_str()).collect();
        lines.push(format!("      [{}]", labels.join("] [")));
    }
    for contribution in &detail.contributions {
        let href = contribution.link.as_ref().map(|l| l.href.as_str()).unwrap_or("-");
        lines.push(format!("      ・{} ({})", contribution.title, href));
    }
    lines
}

/// ページャー表示 "1 … 4 [5] 6 … 10"
pub fn format_page_window(items: &[PageItem]) -> String {
    items
        .iter()
        .map(|item| match item {
            PageItem::Page { number, current: true } => format!("[{}]", number),
            PageItem::Page { number, .. } => number.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// 現在ページの表（見出し・行・展開行・件数・ページャー）
pub fn format_page(catalog: &Catalog, projection: &Projection, state: &ViewState) -> String {
    let mut lines = vec![format!(
        "       {}  {}  {}  {}  {}  {}  Type",
        fit("Date", DATE_WIDTH),
        fit("Book", TITLE_WIDTH),
        fit("Author", NAME_WIDTH),
        fit("Reviewer", NAME_WIDTH),
        fit("Journal", JOURNAL_WIDTH),
        fit("Access", BADGE_WIDTH),
    )
    .trim_end()
    .to_string()];

    for row in page_rows(catalog, projection, state) {
        lines.push(format_row(&row));
        if row.expanded {
            lines.extend(format_detail(catalog, row.entry_index));
        }
    }

    lines.push(String::new());
    lines.push(projection.summary());
    if projection.total_pages > 1 {
        lines.push(format!("Pages: {}", format_page_window(&projection.window())));
    }
    lines.join("\n")
}
