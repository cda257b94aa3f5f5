//! データセット検証
//!
//! 日付形式・必須項目・リンク・サブフィールドコード・重複を検査する。

use philreviews_common::subfield::is_known_subfield;
use philreviews_common::types::ENTRY_TYPES;
use philreviews_common::{Catalog, ReviewEntry};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// 検出した問題
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub index: usize,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "エラー",
            Severity::Warning => "警告",
        };
        write!(f, "[{}] #{}: {}", label, self.index, self.message)
    }
}

fn is_valid_date(date: &str) -> bool {
    lazy_static::lazy_static! {
        static ref DATE_RE: Regex = Regex::new(r"^\d{4}(-\d{2}(-\d{2})?)?$").unwrap();
    }
    DATE_RE.is_match(date)
}

fn is_http_link(link: &str) -> bool {
    lazy_static::lazy_static! {
        static ref LINK_RE: Regex = Regex::new(r"^https?://\S+$").unwrap();
    }
    LINK_RE.is_match(link)
}

fn check_entry(index: usize, entry: &ReviewEntry, issues: &mut Vec<Issue>) {
    let mut push = |severity, message: String| issues.push(Issue { index, severity, message });

    if entry.title.trim().is_empty() {
        push(Severity::Error, "書名が空".into());
    }
    if entry.date.trim().is_empty() {
        push(Severity::Warning, "日付が空".into());
    } else if !is_valid_date(entry.date.trim()) {
        push(Severity::Error, format!("日付の形式が不正: {}", entry.date));
    }
    if let Some(link) = entry.link.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        if !is_http_link(link) {
            push(Severity::Error, format!("リンクが http(s) ではない: {}", link));
        }
    }
    for code in entry.subfields() {
        if !is_known_subfield(code) {
            push(Severity::Warning, format!("不明なサブフィールド: {}", code));
        }
    }
    if !ENTRY_TYPES.contains(&entry.entry_type()) {
        push(Severity::Warning, format!("不明な種別: {}", entry.entry_type()));
    }
    if entry.is_symposium() && entry.symposium_group().is_none() {
        push(Severity::Warning, "シンポジウムに symposium_group が無い".into());
    }
}

/// 同じリンク・DOIを持つエントリを報告（2件目以降）
fn check_duplicates(catalog: &Catalog, issues: &mut Vec<Issue>) {
    let mut seen_links: HashMap<String, usize> = HashMap::new();
    let mut seen_dois: HashMap<String, usize> = HashMap::new();

    for (index, entry) in catalog.entries().iter().enumerate() {
        if let Some(link) = entry.link.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(first) = seen_links.insert(link.to_string(), index) {
                issues.push(Issue {
                    index,
                    severity: Severity::Error,
                    message: format!("リンクが #{} と重複: {}", first, link),
                });
            }
        }
        if let Some(doi) = entry.doi() {
            if let Some(first) = seen_dois.insert(doi.to_lowercase(), index) {
                issues.push(Issue {
                    index,
                    severity: Severity::Error,
                    message: format!("DOIが #{} と重複: {}", first, doi),
                });
            }
        }
    }
}

/// カタログ全体を検査
pub fn check_catalog(catalog: &Catalog) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (index, entry) in catalog.entries().iter().enumerate() {
        check_entry(index, entry, &mut issues);
    }
    check_duplicates(catalog, &mut issues);
    issues.sort_by_key(|issue| issue.index);
    issues
}

pub fn error_count(issues: &[Issue]) -> usize {
    issues.iter().filter(|i| i.severity == Severity::Error).count()
}
