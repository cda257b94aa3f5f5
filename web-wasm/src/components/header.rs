//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header(total: usize) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"PhilReviews"</h1>
            <p class="tagline">{format!("{} book reviews in philosophy", total)}</p>
        </header>
    }
}
