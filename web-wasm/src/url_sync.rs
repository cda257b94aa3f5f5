//! ロケーションハッシュとの同期
//!
//! 状態変更時は `history.replaceState` で置き換えるだけで履歴を積まない。
//! 戻る・進む（popstate / hashchange）ではハッシュから状態を読み直す。

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// 現在のハッシュ（`#` 付きのまま）
pub fn current_fragment() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// ハッシュを置き換える。空ならハッシュごと取り除く
pub fn replace_fragment(fragment: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let url = if fragment.is_empty() {
        let location = window.location();
        format!(
            "{}{}",
            location.pathname().unwrap_or_default(),
            location.search().unwrap_or_default()
        )
    } else {
        format!("#{}", fragment)
    };

    let result = window
        .history()
        .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(&url)));
    if let Err(e) = result {
        web_sys::console::error_2(&"URL更新失敗:".into(), &e);
    }
}

/// 戻る・進む・ハッシュ直接編集のたびに現在のハッシュを渡す
///
/// ページが生きている間ずっと必要なのでリスナーは解放しない。
pub fn on_navigation<F>(callback: F)
where
    F: Fn(String) + 'static,
{
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::<dyn Fn()>::new(move || callback(current_fragment()));
    for event in ["popstate", "hashchange"] {
        if let Err(e) = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            web_sys::console::error_2(&format!("{} リスナー登録失敗:", event).into(), &e);
        }
    }
    closure.forget();
}
