//! ページャーと件数表示

use leptos::prelude::*;
use philreviews_common::{Action, PageItem, Projection, ViewState, PAGE_SIZES};

#[component]
pub fn Pagination<F>(
    projection: Memo<Projection>,
    state: RwSignal<ViewState>,
    dispatch: F,
) -> impl IntoView
where
    F: Fn(Action) + 'static + Clone + Send + Sync,
{
    let pages = {
        let dispatch = dispatch.clone();
        move || {
            let p = projection.get();
            let (current, total) = (p.page, p.total_pages);
            let step = |target: usize, label: &'static str, disabled: bool| {
                let dispatch = dispatch.clone();
                view! {
                    <button
                        class="page-btn"
                        disabled=disabled
                        on:click=move |_| dispatch(Action::GoToPage(target))
                    >
                        {label}
                    </button>
                }
            };

            let items = p
                .window()
                .into_iter()
                .map(|item| match item {
                    PageItem::Page { number, current } => {
                        let dispatch = dispatch.clone();
                        view! {
                            <button
                                class="page-btn"
                                class:current=current
                                data-page=number.to_string()
                                on:click=move |_| dispatch(Action::GoToPage(number))
                            >
                                {number}
                            </button>
                        }
                        .into_any()
                    }
                    PageItem::Ellipsis => view! { <span class="ellipsis">"…"</span> }.into_any(),
                })
                .collect_view();

            view! {
                {step(current.saturating_sub(1).max(1), "‹ Prev", current <= 1)}
                {items}
                {step((current + 1).min(total), "Next ›", current >= total)}
            }
        }
    };

    view! {
        <nav class="pagination">
            <span class="result-summary">{move || projection.with(Projection::summary)}</span>
            <div class="pages">{pages}</div>
            <label class="page-size">
                "Per page "
                <select
                    prop:value=move || state.with(|s| s.page_size.to_string())
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                            dispatch(Action::SetPageSize(size));
                        }
                    }
                >
                    {PAGE_SIZES
                        .iter()
                        .map(|size| view! { <option value=size.to_string()>{*size}</option> })
                        .collect_view()}
                </select>
            </label>
        </nav>
    }
}
