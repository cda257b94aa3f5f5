//! 検索・絞り込みパネル
//!
//! テキスト欄は入力が止まってから反映する。それ以外のコントロールは即時反映。

use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use philreviews_common::filter::parse_year;
use philreviews_common::types::ENTRY_TYPES;
use philreviews_common::{Action, Catalog, TextDebouncers, TextField, ViewState, SEARCH_DEBOUNCE_MS};

fn text_value(state: &ViewState, field: TextField) -> String {
    let filters = &state.filters;
    match field {
        TextField::Query => filters.query.clone(),
        TextField::Title => filters.title.clone(),
        TextField::Author => filters.author.clone(),
        TextField::Reviewer => filters.reviewer.clone(),
    }
}

fn year_value(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_default()
}

#[component]
pub fn SearchPanel<F>(
    catalog: StoredValue<Catalog>,
    state: RwSignal<ViewState>,
    /// 保留中の入力（クリアや絞り込みショートカットで破棄される）
    debouncers: StoredValue<TextDebouncers>,
    dispatch: F,
) -> impl IntoView
where
    F: Fn(Action) + 'static + Clone + Send + Sync,
{
    let (min_year, max_year) = catalog.with_value(Catalog::year_bounds);
    let access_values = catalog.with_value(Catalog::access_values);
    let is_filtered = move || state.with(ViewState::is_filtered);

    view! {
        <div class="search-panel">
            <DebouncedInput
                field=TextField::Query
                id="search"
                label="Search"
                placeholder="Search title, author, reviewer, journal..."
                state=state
                debouncers=debouncers
                dispatch=dispatch.clone()
            />

            <div class="field-filters">
                <DebouncedInput field=TextField::Title id="filter-title" label="Book" placeholder="Title" state=state debouncers=debouncers dispatch=dispatch.clone() />
                <DebouncedInput field=TextField::Author id="filter-author" label="Author" placeholder="Author" state=state debouncers=debouncers dispatch=dispatch.clone() />
                <DebouncedInput field=TextField::Reviewer id="filter-reviewer" label="Reviewer" placeholder="Reviewer" state=state debouncers=debouncers dispatch=dispatch.clone() />
            </div>

            <div class="form-group year-range">
                <label for="year-from">"Year"</label>
                <input
                    type="number"
                    id="year-from"
                    min=min_year.to_string()
                    max=max_year.to_string()
                    placeholder=min_year.to_string()
                    prop:value=move || state.with(|s| year_value(s.filters.year_from))
                    on:change={
                        let dispatch = dispatch.clone();
                        move |ev| dispatch(Action::SetYearFrom(parse_year(&event_target_value(&ev))))
                    }
                />
                <span>"–"</span>
                <input
                    type="number"
                    id="year-to"
                    min=min_year.to_string()
                    max=max_year.to_string()
                    placeholder=max_year.to_string()
                    prop:value=move || state.with(|s| year_value(s.filters.year_to))
                    on:change={
                        let dispatch = dispatch.clone();
                        move |ev| dispatch(Action::SetYearTo(parse_year(&event_target_value(&ev))))
                    }
                />
            </div>

            <div class="form-group">
                <label for="filter-access">"Access"</label>
                <select
                    id="filter-access"
                    prop:value=move || state.with(|s| s.filters.access.clone())
                    on:change={
                        let dispatch = dispatch.clone();
                        move |ev| dispatch(Action::SetAccess(event_target_value(&ev)))
                    }
                >
                    <option value="">"All"</option>
                    {access_values
                        .into_iter()
                        .map(|access| view! { <option value=access.clone()>{access.clone()}</option> })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="filter-type">"Type"</label>
                <select
                    id="filter-type"
                    prop:value=move || state.with(|s| s.filters.entry_type.clone())
                    on:change={
                        let dispatch = dispatch.clone();
                        move |ev| dispatch(Action::SetType(event_target_value(&ev)))
                    }
                >
                    <option value="">"All"</option>
                    {ENTRY_TYPES
                        .iter()
                        .map(|t| view! { <option value=*t>{*t}</option> })
                        .collect_view()}
                </select>
            </div>

            <button
                class="btn btn-secondary"
                disabled=move || !is_filtered()
                on:click={
                    let dispatch = dispatch.clone();
                    move |_| dispatch(Action::ClearFilters)
                }
            >
                "Clear filters"
            </button>
        </div>
    }
}

/// 入力停止後に反映するテキスト欄
#[component]
fn DebouncedInput<F>(
    field: TextField,
    id: &'static str,
    label: &'static str,
    placeholder: &'static str,
    state: RwSignal<ViewState>,
    debouncers: StoredValue<TextDebouncers>,
    dispatch: F,
) -> impl IntoView
where
    F: Fn(Action) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                type="search"
                id=id
                placeholder=placeholder
                prop:value=move || state.with(|s| text_value(s, field))
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    let mut next = debouncers.get_value();
                    let token = next.schedule(field);
                    debouncers.set_value(next);

                    let dispatch = dispatch.clone();
                    spawn_local(async move {
                        TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
                        if debouncers.with_value(|d| d.is_current(field, token)) {
                            dispatch(Action::SetText(field, value));
                        }
                    });
                }
            />
        </div>
    }
}
