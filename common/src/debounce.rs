//! 入力のデバウンス
//!
//! タイマー自体は呼び出し側（WASMなら gloo のタイマー）が持つ。
//! ここでは世代番号だけを管理し、最後に予約されたものだけを有効とする。

use crate::state::{Action, TextField};

/// テキスト検索欄の待ち時間
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// 予約ごとに発行される世代トークン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceToken(u64);

#[derive(Debug, Clone, Copy, Default)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しい予約。以前のトークンは無効になる
    pub fn schedule(&mut self) -> DebounceToken {
        self.generation = self.generation.wrapping_add(1);
        DebounceToken(self.generation)
    }

    /// タイマー満了時に呼ぶ。最新の予約ならtrue
    pub fn is_current(&self, token: DebounceToken) -> bool {
        token.0 == self.generation
    }

    /// 保留中の予約を全て無効化
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// テキスト欄ごとのデバウンサ
///
/// 欄ごとに世代を持つので、別の欄への入力が保留中の入力を消すことはない。
#[derive(Debug, Clone, Copy, Default)]
pub struct TextDebouncers {
    fields: [Debouncer; 4],
}

impl TextDebouncers {
    fn slot(field: TextField) -> usize {
        match field {
            TextField::Query => 0,
            TextField::Title => 1,
            TextField::Author => 2,
            TextField::Reviewer => 3,
        }
    }

    pub fn schedule(&mut self, field: TextField) -> DebounceToken {
        self.fields[Self::slot(field)].schedule()
    }

    pub fn is_current(&self, field: TextField, token: DebounceToken) -> bool {
        self.fields[Self::slot(field)].is_current(token)
    }

    pub fn cancel_all(&mut self) {
        self.fields.iter_mut().for_each(Debouncer::cancel);
    }

    /// 操作の適用前に呼ぶ。テキスト欄を書き換える操作なら保留中の入力を捨てる
    pub fn settle(&mut self, action: &Action) {
        if action.overwrites_text() {
            self.cancel_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_last_token_fires() {
        let mut debouncer = Debouncer::new();
        let first = debouncer.schedule();
        let second = debouncer.schedule();
        let third = debouncer.schedule();

        assert!(!debouncer.is_current(first));
        assert!(!debouncer.is_current(second));
        assert!(debouncer.is_current(third));
    }

    #[test]
    fn test_cancel_invalidates_pending() {
        let mut debouncer = Debouncer::new();
        let token = debouncer.schedule();
        debouncer.cancel();
        assert!(!debouncer.is_current(token));

        let next = debouncer.schedule();
        assert!(debouncer.is_current(next));
    }

    #[test]
    fn test_fields_are_independent() {
        let mut debouncers = TextDebouncers::default();
        let query = debouncers.schedule(TextField::Query);
        let author = debouncers.schedule(TextField::Author);
        assert!(debouncers.is_current(TextField::Query, query));
        assert!(debouncers.is_current(TextField::Author, author));
    }

    #[test]
    fn test_clear_filters_drops_pending_text() {
        let mut debouncers = TextDebouncers::default();
        let token = debouncers.schedule(TextField::Query);

        debouncers.settle(&Action::GoToPage(2));
        assert!(debouncers.is_current(TextField::Query, token));

        debouncers.settle(&Action::ClearFilters);
        assert!(!debouncers.is_current(TextField::Query, token));

        let token = debouncers.schedule(TextField::Reviewer);
        debouncers.settle(&Action::ShowAuthor("Hobbes".into()));
        assert!(!debouncers.is_current(TextField::Reviewer, token));
    }
}
