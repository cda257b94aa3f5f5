//! サブフィールド分類表
//!
//! 分類コード → 表示名の固定テーブル。ファセットの選択肢はこの順序で並ぶ。

/// 分類表の1項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subfield {
    pub code: &'static str,
    pub label: &'static str,
}

pub const SUBFIELDS: &[Subfield] = &[
    Subfield { code: "ethics", label: "Ethics & Moral Philosophy" },
    Subfield { code: "applied-ethics", label: "Applied & Professional Ethics" },
    Subfield { code: "political", label: "Political & Social Philosophy" },
    Subfield { code: "legal", label: "Philosophy of Law" },
    Subfield { code: "epistemology", label: "Epistemology & Philosophy of Mind" },
    Subfield { code: "metaphysics", label: "Metaphysics & Logic" },
    Subfield { code: "science", label: "Philosophy of Science" },
    Subfield { code: "aesthetics", label: "Aesthetics & Philosophy of Art" },
    Subfield { code: "religion", label: "Philosophy of Religion & Theology" },
    Subfield { code: "history", label: "History of Philosophy" },
    Subfield { code: "ancient", label: "Ancient & Medieval Philosophy" },
    Subfield { code: "modern", label: "Early Modern Philosophy (17th-19th c.)" },
    Subfield { code: "continental", label: "Continental & Phenomenological" },
    Subfield { code: "feminist", label: "Feminist Philosophy" },
    Subfield { code: "non-western", label: "Non-Western & Comparative Philosophy" },
];

/// コードから表示名を取得
pub fn subfield_label(code: &str) -> Option<&'static str> {
    SUBFIELDS.iter().find(|s| s.code == code).map(|s| s.label)
}

pub fn is_known_subfield(code: &str) -> bool {
    subfield_label(code).is_some()
}

/// ファセット用のコード一覧（分類表の順）
pub fn subfield_codes() -> Vec<String> {
    SUBFIELDS.iter().map(|s| s.code.to_string()).collect()
}

/// 表示名（未知のコードはそのまま返す）
pub fn display_subfield(code: &str) -> String {
    subfield_label(code).unwrap_or(code).to_string()
}
