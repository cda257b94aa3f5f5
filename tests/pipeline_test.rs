//! 絞り込み → ソート → ページ分割の統合テスト
//!
//! データセットファイルから読み込み、コマンドラインと同じ経路で状態を組み立てる。

use philreviews::dataset::load_catalog;
use philreviews::query::{build_state, QueryArgs};
use philreviews_common::{
    decode_fragment, encode_fragment, project, Action, Catalog, FacetAction, FacetKind, SortKey,
    ViewState,
};
use tempfile::tempdir;

fn catalog_from(json: &str) -> Catalog {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("reviews.json");
    std::fs::write(&path, json).unwrap();
    load_catalog(&path).unwrap()
}

fn titles(catalog: &Catalog, state: &ViewState) -> Vec<String> {
    let projection = project(catalog, state);
    projection
        .page_indices()
        .iter()
        .map(|&i| catalog.entries()[i].title.clone())
        .collect()
}

#[test]
fn test_default_sort_is_newest_first() {
    let catalog = catalog_from(
        r#"[{"title": "Old", "date": "2009-01-01"}, {"title": "New", "date": "2012-05-01"}]"#,
    );
    let state = build_state(&catalog, &QueryArgs::default()).unwrap();
    assert_eq!(titles(&catalog, &state), vec!["New", "Old"]);
}

#[test]
fn test_global_search_matches_author() {
    let catalog = catalog_from(
        r#"[
            {"title": "Leviathan", "author": "Thomas HOBBES", "journal": "Mind", "date": "2010"},
            {"title": "Two Treatises", "author": "John Locke", "journal": "Mind", "date": "2011"}
        ]"#,
    );
    let args = QueryArgs { q: Some("hobbes".into()), ..Default::default() };
    let state = build_state(&catalog, &args).unwrap();
    assert_eq!(titles(&catalog, &state), vec!["Leviathan"]);
}

#[test]
fn test_year_range() {
    let catalog = catalog_from(
        r#"[
            {"title": "A", "date": "2009-03-01"},
            {"title": "B", "date": "2010-06-01"},
            {"title": "C", "date": "2012-01-01"}
        ]"#,
    );
    let args = QueryArgs { year: Some("2010-2011".into()), ..Default::default() };
    let state = build_state(&catalog, &args).unwrap();
    assert_eq!(titles(&catalog, &state), vec!["B"]);
}

#[test]
fn test_pages_of_twenty_five() {
    let entries: Vec<String> = (0..50)
        .map(|i| format!(r#"{{"title": "Book {:02}", "date": "2010"}}"#, i))
        .collect();
    let catalog = catalog_from(&format!("[{}]", entries.join(",")));

    let args = QueryArgs { sort: Some("title-asc".into()), size: Some(25), ..Default::default() };
    let mut state = build_state(&catalog, &args).unwrap();

    let projection = project(&catalog, &state);
    assert_eq!(projection.total_pages, 2);
    assert_eq!(projection.page_range(), 0..25);
    assert_eq!(titles(&catalog, &state).first().map(String::as_str), Some("Book 00"));

    state.apply(&catalog, Action::GoToPage(2));
    assert_eq!(project(&catalog, &state).page_range(), 25..50);
    assert_eq!(titles(&catalog, &state).last().map(String::as_str), Some("Book 49"));
}

#[test]
fn test_sort_toggle_twice_restores_order() {
    let catalog = catalog_from(
        r#"[{"title": "b", "date": "2010"}, {"title": "a", "date": "2011"}, {"title": "c", "date": "2012"}]"#,
    );
    let mut state = ViewState::new(&catalog);
    state.apply(&catalog, Action::SortBy(SortKey::Title));
    let before = titles(&catalog, &state);
    assert_eq!(before, vec!["a", "b", "c"]);

    state.apply(&catalog, Action::SortBy(SortKey::Title));
    assert_eq!(titles(&catalog, &state), vec!["c", "b", "a"]);
    state.apply(&catalog, Action::SortBy(SortKey::Title));
    assert_eq!(titles(&catalog, &state), before);
}

#[test]
fn test_selecting_every_journal_is_no_filter() {
    let catalog = catalog_from(
        r#"[{"title": "A", "journal": "Mind"}, {"title": "B", "journal": "Ethics"}, {"title": "C"}]"#,
    );
    let mut state = ViewState::new(&catalog);
    state.apply(&catalog, Action::Facet(FacetKind::Journal, FacetAction::SelectNone));
    for journal in catalog.journals().to_vec() {
        state.apply(&catalog, Action::Facet(FacetKind::Journal, FacetAction::Toggle(journal)));
    }
    assert_eq!(project(&catalog, &state).filtered_count(), 3);
    assert!(!encode_fragment(&state).contains("journals"));
}

#[test]
fn test_fragment_round_trip_drops_expansion() {
    let catalog = catalog_from(
        r#"[
            {"title": "A", "author": "Hobbes", "journal": "Mind", "date": "2010", "subfield": "ethics"},
            {"title": "B", "author": "Hobbes", "journal": "Ethics", "date": "2011", "subfield": "political"}
        ]"#,
    );
    let args = QueryArgs {
        author: Some("hobbes".into()),
        journals: vec!["Mind".into()],
        sort: Some("author-desc".into()),
        ..Default::default()
    };
    let mut state = build_state(&catalog, &args).unwrap();
    state.apply(&catalog, Action::ToggleRow(0));

    let restored = decode_fragment(&catalog, &encode_fragment(&state));
    assert_eq!(restored.filters, state.filters);
    assert_eq!(restored.sort, state.sort);
    assert_eq!(restored.page, state.page);
    assert_eq!(restored.journals, state.journals);
    assert_eq!(restored.expanded, None);
}
