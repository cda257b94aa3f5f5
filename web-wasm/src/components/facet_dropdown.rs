//! ファセット（複数選択ドロップダウン）

use leptos::prelude::*;
use philreviews_common::subfield::display_subfield;
use philreviews_common::{Action, FacetAction, FacetKind, ViewState};

fn display_value(kind: FacetKind, value: &str) -> String {
    match kind {
        FacetKind::Journal => value.to_string(),
        FacetKind::Subfield => display_subfield(value),
    }
}

#[component]
pub fn FacetDropdown<F>(
    kind: FacetKind,
    /// 要約ラベルに使う複数形（"journals" など）
    noun: &'static str,
    state: RwSignal<ViewState>,
    dispatch: F,
) -> impl IntoView
where
    F: Fn(Action) + 'static + Clone + Send + Sync,
{
    let summary = move || {
        state.with(|s| s.facet(kind).summary_label(noun, |v: &str| display_value(kind, v)))
    };
    // 候補はカタログ読み込み時に確定している
    let values = state.with_untracked(|s| s.facet(kind).values().to_vec());

    view! {
        <details class="facet-dropdown" class:active=move || state.with(|s| s.facet(kind).is_active())>
            <summary>{summary}</summary>
            <div class="facet-actions">
                <button
                    class="btn btn-small"
                    on:click={
                        let dispatch = dispatch.clone();
                        move |_| dispatch(Action::Facet(kind, FacetAction::SelectAll))
                    }
                >
                    "Select all"
                </button>
                <button
                    class="btn btn-small"
                    on:click={
                        let dispatch = dispatch.clone();
                        move |_| dispatch(Action::Facet(kind, FacetAction::SelectNone))
                    }
                >
                    "Select none"
                </button>
            </div>
            <ul class="facet-options">
                {values
                    .into_iter()
                    .map(|value| {
                        let label = display_value(kind, &value);
                        let checked = {
                            let value = value.clone();
                            move || state.with(|s| s.facet(kind).is_selected(&value))
                        };
                        let on_change = {
                            let dispatch = dispatch.clone();
                            let value = value.clone();
                            move |_| dispatch(Action::Facet(kind, FacetAction::Toggle(value.clone())))
                        };
                        view! {
                            <li>
                                <label>
                                    <input type="checkbox" value=value prop:checked=checked on:change=on_change />
                                    {label}
                                </label>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </details>
    }
}
