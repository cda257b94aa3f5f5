//! UIコンポーネント

pub mod facet_dropdown;
pub mod header;
pub mod pagination;
pub mod review_table;
pub mod search_panel;
pub mod source_cards;
