//! PhilReviews Common Library
//!
//! CLIとWeb(WASM)で共有されるデータモデルと閲覧パイプライン
//! （絞り込み → ソート → ページ分割 → 表示用ビューモデル）

pub mod types;
pub mod error;
pub mod subfield;
pub mod catalog;
pub mod facet;
pub mod filter;
pub mod sort;
pub mod paginate;
pub mod state;
pub mod url;
pub mod debounce;
pub mod render;
pub mod export;

pub use types::{ReviewEntry, SortKey};
pub use error::{Error, Result};
pub use catalog::Catalog;
pub use facet::Facet;
pub use filter::{apply_filters, Filters};
pub use sort::{SortDirection, SortState};
pub use paginate::{PageItem, DEFAULT_PAGE_SIZE, PAGE_SIZES};
pub use state::{apply_action, project, Action, FacetAction, FacetKind, Projection, TextField, ViewState};
pub use url::{decode_fragment, encode_fragment};
pub use debounce::{DebounceToken, Debouncer, TextDebouncers, SEARCH_DEBOUNCE_MS};
pub use render::{detail_view, page_rows, DetailView, RowView};
