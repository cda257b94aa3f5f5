//! URLフラグメントの符号化・復元
//!
//! `#q=...&journals=A,B&sort=title-asc&page=2` の形式。既定値の項目は出力しない。
//! 復元時は不正・未知の値を黙って捨て、既定値のまま残す。

use crate::catalog::Catalog;
use crate::filter::parse_year;
use crate::paginate::{is_allowed_page_size, DEFAULT_PAGE_SIZE};
use crate::sort::SortState;
use crate::state::ViewState;
use crate::subfield::is_known_subfield;
use crate::types::ENTRY_TYPES;
use std::borrow::Cow;

/// 状態をフラグメント文字列（先頭の `#` なし）に変換
pub fn encode_fragment(state: &ViewState) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();
    let filters = &state.filters;

    push_text(&mut params, "q", &filters.query);
    push_text(&mut params, "title", &filters.title);
    push_text(&mut params, "author", &filters.author);
    push_text(&mut params, "reviewer", &filters.reviewer);

    // 空選択は共有できないので全選択と同じく省略
    if state.subfields.is_active() && !state.subfields.is_empty() {
        params.push(("subfield", join_list(&state.subfields.selected_values())));
    }
    if state.journals.is_active() && !state.journals.is_empty() {
        params.push(("journals", join_list(&state.journals.selected_values())));
    }

    if filters.has_year_bound() {
        let bound = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_default();
        params.push(("year", format!("{}-{}", bound(filters.year_from), bound(filters.year_to))));
    }

    push_text(&mut params, "access", &filters.access);
    push_text(&mut params, "type", &filters.entry_type);

    if state.sort != SortState::default() {
        params.push(("sort", state.sort.to_token()));
    }
    if state.page > 1 {
        params.push(("page", state.page.to_string()));
    }
    if state.page_size != DEFAULT_PAGE_SIZE {
        params.push(("size", state.page_size.to_string()));
    }

    params
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

fn push_text(params: &mut Vec<(&'static str, String)>, key: &'static str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        params.push((key, urlencoding::encode(value).into_owned()));
    }
}

/// 各値を個別に符号化してカンマで連結（値に含まれるカンマは %2C になる）
fn join_list(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| urlencoding::encode(v).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced: Cow<str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };
    urlencoding::decode(&spaced).ok().map(Cow::into_owned)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(decode_component)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// フラグメントから状態を復元（既定状態に上書き）
pub fn decode_fragment(catalog: &Catalog, fragment: &str) -> ViewState {
    let mut state = ViewState::new(catalog);
    let fragment = fragment.trim_start_matches('#');

    for pair in fragment.split('&').filter(|p| !p.is_empty()) {
        let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "journals" | "subfield" => {
                let values = split_list(raw);
                let known: Vec<&str> = values
                    .iter()
                    .map(String::as_str)
                    .filter(|v| {
                        let ok = if key == "journals" {
                            catalog.has_journal(v)
                        } else {
                            is_known_subfield(v)
                        };
                        if !ok {
                            tracing::debug!(key, value = *v, "dropping unknown facet value");
                        }
                        ok
                    })
                    .collect();
                if known.is_empty() {
                    continue;
                }
                let facet = if key == "journals" { &mut state.journals } else { &mut state.subfields };
                facet.set_selected(known);
            }
            "year" => {
                let Some(value) = decode_component(raw) else { continue };
                let (from, to) = value.split_once('-').unwrap_or((value.as_str(), ""));
                state.filters.year_from = parse_year(from);
                state.filters.year_to = parse_year(to);
            }
            "sort" => {
                if let Some(sort) = decode_component(raw).as_deref().and_then(SortState::from_token) {
                    state.sort = sort;
                }
            }
            "page" => {
                if let Some(page) = decode_component(raw).and_then(|v| v.parse::<usize>().ok()) {
                    if page >= 1 {
                        state.page = page;
                    }
                }
            }
            "size" => {
                if let Some(size) = decode_component(raw).and_then(|v| v.parse::<usize>().ok()) {
                    if is_allowed_page_size(size) {
                        state.page_size = size;
                    }
                }
            }
            "type" => {
                if let Some(value) = decode_component(raw) {
                    if ENTRY_TYPES.contains(&value.as_str()) {
                        state.filters.entry_type = value;
                    }
                }
            }
            "q" | "title" | "author" | "reviewer" | "access" => {
                let Some(value) = decode_component(raw) else { continue };
                let target = match key {
                    "q" => &mut state.filters.query,
                    "title" => &mut state.filters.title,
                    "author" => &mut state.filters.author,
                    "reviewer" => &mut state.filters.reviewer,
                    _ => &mut state.filters.access,
                };
                *target = value.trim().to_string();
            }
            _ => tracing::debug!(key, "ignoring unknown fragment key"),
        }
    }

    state.clamp_page(catalog);
    state
}
