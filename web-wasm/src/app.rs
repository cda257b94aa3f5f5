//! メインアプリケーションコンポーネント

use crate::components::{
    facet_dropdown::FacetDropdown,
    header::Header,
    pagination::Pagination,
    review_table::ReviewTable,
    search_panel::SearchPanel,
    source_cards::SourceCards,
};
use crate::url_sync;
use leptos::prelude::*;
use philreviews_common::{
    decode_fragment, encode_fragment, project, Action, Catalog, FacetKind, TextDebouncers,
};

/// 埋め込みデータの要素ID
const DATA_ELEMENT_ID: &str = "reviews-data";

/// ページに埋め込まれたJSONからカタログを読み込む（失敗時は空）
fn load_catalog() -> Catalog {
    let json = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(DATA_ELEMENT_ID))
        .and_then(|el| el.text_content());
    let Some(json) = json else {
        web_sys::console::error_1(&format!("#{} が見つかりません", DATA_ELEMENT_ID).into());
        return Catalog::default();
    };
    match Catalog::from_json(&json) {
        Ok(catalog) => catalog,
        Err(e) => {
            web_sys::console::error_1(&format!("データ読み込み失敗: {}", e).into());
            Catalog::default()
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let catalog = StoredValue::new(load_catalog());
    let state = RwSignal::new(catalog.with_value(|c| decode_fragment(c, &url_sync::current_fragment())));

    let debouncers = StoredValue::new(TextDebouncers::default());

    // 全ての操作はここを通る
    let dispatch = move |action: Action| {
        let mut pending = debouncers.get_value();
        pending.settle(&action);
        debouncers.set_value(pending);

        let sync_url = action.syncs_url();
        catalog.with_value(|c| state.update(|s| s.apply(c, action)));
        if sync_url {
            state.with_untracked(|s| url_sync::replace_fragment(&encode_fragment(s)));
        }
    };

    url_sync::on_navigation(move |fragment| {
        let mut pending = debouncers.get_value();
        pending.cancel_all();
        debouncers.set_value(pending);
        state.set(catalog.with_value(|c| decode_fragment(c, &fragment)));
    });

    let projection = Memo::new(move |_| state.with(|s| catalog.with_value(|c| project(c, s))));
    let total = catalog.with_value(Catalog::len);

    view! {
        <div class="container">
            <Header total=total />

            <section class="filters">
                <SearchPanel catalog=catalog state=state debouncers=debouncers dispatch=dispatch />
                <div class="facets">
                    <FacetDropdown kind=FacetKind::Journal noun="journals" state=state dispatch=dispatch />
                    <FacetDropdown kind=FacetKind::Subfield noun="subfields" state=state dispatch=dispatch />
                </div>
            </section>

            <Pagination projection=projection state=state dispatch=dispatch />
            <ReviewTable catalog=catalog projection=projection state=state dispatch=dispatch />
            <Pagination projection=projection state=state dispatch=dispatch />

            <SourceCards catalog=catalog dispatch=dispatch />
        </div>
    }
}
