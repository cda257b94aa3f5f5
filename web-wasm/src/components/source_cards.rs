//! 出典カード（クリックでそのジャーナルだけに絞る）

use leptos::prelude::*;
use philreviews_common::{Action, Catalog};

#[component]
pub fn SourceCards<F>(catalog: StoredValue<Catalog>, dispatch: F) -> impl IntoView
where
    F: Fn(Action) + 'static + Clone + Send + Sync,
{
    let sources = catalog.with_value(Catalog::source_counts);

    view! {
        <section class="sources">
            <h2>"Sources"</h2>
            <div class="source-grid">
                {sources
                    .into_iter()
                    .map(|(journal, count)| {
                        let dispatch = dispatch.clone();
                        let target = journal.clone();
                        let journal_attr = journal.clone();
                        view! {
                            <button
                                class="source-card"
                                data-journal=journal_attr
                                on:click=move |_| {
                                    dispatch(Action::ShowJournal(target.clone()));
                                    if let Some(window) = web_sys::window() {
                                        window.scroll_to_with_x_and_y(0.0, 0.0);
                                    }
                                }
                            >
                                <span class="source-name">{journal}</span>
                                <span class="source-count">{count}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
