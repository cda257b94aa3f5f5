//! 書評テーブル（ソート可能な見出し・行・展開行）

use crate::analytics::track_outbound;
use leptos::prelude::*;
use philreviews_common::render::{sort_headers, Badge, OutboundLink, COLUMN_COUNT};
use philreviews_common::{detail_view, page_rows, Action, Catalog, Projection, RowView, ViewState};

#[component]
pub fn ReviewTable<F>(
    catalog: StoredValue<Catalog>,
    projection: Memo<Projection>,
    state: RwSignal<ViewState>,
    dispatch: F,
) -> impl IntoView
where
    F: Fn(Action) + 'static + Clone + Send + Sync,
{
    let headers = {
        let dispatch = dispatch.clone();
        move || {
            let sort = state.with(|s| s.sort);
            sort_headers(sort)
                .into_iter()
                .map(|header| {
                    let dispatch = dispatch.clone();
                    let key = header.key;
                    view! {
                        <th
                            class="sortable"
                            class:sorted=header.indicator.is_some()
                            data-sort=key.as_str()
                            on:click=move |_| dispatch(Action::SortBy(key))
                        >
                            {header.label}
                            {header.indicator.map(|arrow| view! { <span class="sort-indicator">{arrow}</span> })}
                        </th>
                    }
                })
                .collect_view()
        }
    };

    let rows = move || {
        let p = projection.get();
        let rows = state.with(|s| catalog.with_value(|c| page_rows(c, &p, s)));
        if rows.is_empty() {
            return view! {
                <tr class="empty-row">
                    <td colspan=COLUMN_COUNT.to_string()>"No reviews match the current filters."</td>
                </tr>
            }
            .into_any();
        }
        rows.into_iter()
            .map(|row| view! { <ReviewRow catalog=catalog row=row dispatch=dispatch.clone() /> })
            .collect_view()
            .into_any()
    };

    view! {
        <table class="review-table">
            <thead>
                <tr>{headers}</tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

#[component]
fn ReviewRow<F>(catalog: StoredValue<Catalog>, row: RowView, dispatch: F) -> impl IntoView
where
    F: Fn(Action) + 'static + Clone + Send + Sync,
{
    let position = row.position;
    let detail = row
        .expanded
        .then(|| catalog.with_value(|c| detail_view(c, row.entry_index)));

    let name_link = |name: String, action: fn(String) -> Action| {
        if name.is_empty() {
            return view! { <span></span> }.into_any();
        }
        let dispatch = dispatch.clone();
        let target = name.clone();
        view! {
            <a
                href="#"
                class="name-link"
                on:click=move |ev| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    dispatch(action(target.clone()));
                }
            >
                {name}
            </a>
        }
        .into_any()
    };

    view! {
        <tr
            class="review-row"
            class:expanded=row.expanded
            on:click={
                let dispatch = dispatch.clone();
                move |_| dispatch(Action::ToggleRow(position))
            }
        >
            <td class="col-title">{row.title.clone()}</td>
            <td class="col-author">{name_link(row.author.clone(), Action::ShowAuthor)}</td>
            <td class="col-reviewer">{name_link(row.reviewer.clone(), Action::ShowReviewer)}</td>
            <td class="col-journal">{row.journal.clone()}</td>
            <td class="col-date">{row.date.clone()}</td>
            <td class="col-access">{badge_view(row.access.clone())}</td>
            <td class="col-type">{badge_view(row.entry_type.clone())}</td>
        </tr>
        {detail.map(|detail| {
            view! {
                <tr class="detail-row">
                    <td colspan=COLUMN_COUNT.to_string()>
                        {detail.is_empty().then(|| view! { <p class="no-details">"No further details."</p> })}
                        {detail.summary.map(|summary| view! { <p class="summary">{summary}</p> })}
                        {detail.link.map(|link| view! { <OutboundAnchor link=link text="Read review" /> })}
                        <div class="subfields">
                            {detail
                                .subfields
                                .into_iter()
                                .map(|badge| view! { <span class=badge.class>{badge.label}</span> })
                                .collect_view()}
                        </div>
                        {(!detail.contributions.is_empty()).then(|| view! {
                            <div class="contributions">
                                <h4>"Other contributions"</h4>
                                <ul>
                                    {detail
                                        .contributions
                                        .into_iter()
                                        .map(|c| {
                                            let byline = [c.author, c.reviewer]
                                                .into_iter()
                                                .filter(|s| !s.is_empty())
                                                .collect::<Vec<_>>()
                                                .join(" / ");
                                            let title = c.title.clone();
                                            view! {
                                                <li>
                                                    {match c.link {
                                                        Some(link) => view! { <OutboundAnchor link=link text=title /> }.into_any(),
                                                        None => view! { <span>{title}</span> }.into_any(),
                                                    }}
                                                    {(!byline.is_empty()).then(|| view! { <span class="byline">{format!(" ({})", byline)}</span> })}
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                </ul>
                            </div>
                        })}
                    </td>
                </tr>
            }
        })}
    }
}

fn badge_view(badge: Option<Badge>) -> impl IntoView {
    badge.map(|badge| view! { <span class=badge.class>{badge.label}</span> })
}

/// 外部リンク（クリックを計測に送る）
#[component]
fn OutboundAnchor(link: OutboundLink, #[prop(into)] text: String) -> impl IntoView {
    let OutboundLink { href, title, analytics_path } = link;
    view! {
        <a
            href=href
            target="_blank"
            rel="noopener noreferrer"
            class="outbound-link"
            on:click=move |ev| {
                ev.stop_propagation();
                track_outbound(&analytics_path, &title);
            }
        >
            {text}
        </a>
    }
}
