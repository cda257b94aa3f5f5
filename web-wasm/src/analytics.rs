//! 外部リンクのクリック計測
//!
//! ページに `goatcounter` が読み込まれていれば `goatcounter.count(...)` を呼ぶ。
//! 無ければ何もしない。

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub fn track_outbound(path: &str, title: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(counter) = Reflect::get(&window, &JsValue::from_str("goatcounter")) else {
        return;
    };
    if counter.is_undefined() || counter.is_null() {
        return;
    }
    let Some(count) = Reflect::get(&counter, &JsValue::from_str("count"))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
    else {
        return;
    };

    let payload = Object::new();
    let fields = [
        ("path", JsValue::from_str(path)),
        ("title", JsValue::from_str(title)),
        ("event", JsValue::TRUE),
    ];
    for (key, value) in fields {
        let _ = Reflect::set(&payload, &JsValue::from_str(key), &value);
    }

    if let Err(e) = count.call1(&counter, &payload) {
        web_sys::console::warn_2(&"goatcounter.count 失敗:".into(), &e);
    }
}
