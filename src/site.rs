//! 静的サイト生成
//!
//! index.html（データ埋め込み済みのページ枠）と CSV / Excel を出力ディレクトリに書き出す。
//! 画面の描画は WASM クライアントが埋め込みJSONを読んで行う。

use crate::dataset::{dataset_version, embedded_json};
use crate::error::{PhilReviewsError, Result};
use crate::export::{write_csv_file, write_excel_file, EXPORT_STEM};
use philreviews_common::subfield::SUBFIELDS;
use philreviews_common::Catalog;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// ページ生成オプション
#[derive(Debug, Clone)]
pub struct SiteOptions {
    pub title: String,
    pub analytics_code: Option<String>,
    /// 生成日時（RFC 3339）
    pub generated_at: String,
}

/// 書き出したファイルとサイズ
#[derive(Debug, Default)]
pub struct BuildReport {
    pub version: String,
    pub files: Vec<(PathBuf, u64)>,
}

/// HTML属性・本文用のエスケープ
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `<script>` 内に置くJSON（`</` でスクリプトが閉じないようにする）
pub fn escape_script_json(json: &str) -> String {
    json.replace("</", "<\\/").replace("<!--", "<\\!--")
}

/// index.html を組み立てる
pub fn render_index(catalog: &Catalog, json: &str, version: &str, options: &SiteOptions) -> String {
    let title = escape_html(&options.title);
    let (min_year, max_year) = catalog.year_bounds();

    let mut sources = String::new();
    for (journal, count) in catalog.source_counts() {
        let _ = writeln!(
            sources,
            "        <li data-journal=\"{0}\">{0} <span class=\"source-count\">{1}</span></li>",
            escape_html(&journal),
            count
        );
    }

    let mut journals = String::new();
    for journal in catalog.journals() {
        let _ = writeln!(journals, "        <option value=\"{0}\">{0}</option>", escape_html(journal));
    }

    let mut subfields = String::new();
    for subfield in SUBFIELDS {
        let _ = writeln!(
            subfields,
            "        <option value=\"{}\">{}</option>",
            subfield.code,
            escape_html(subfield.label)
        );
    }

    let analytics = options
        .analytics_code
        .as_deref()
        .filter(|code| !code.trim().is_empty())
        .map(|code| {
            format!(
                "  <script data-goatcounter=\"https://{}.goatcounter.com/count\" async src=\"//gc.zgo.at/count.js\"></script>\n",
                escape_html(code.trim())
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta name="data-version" content="{version}">
  <meta name="generated-at" content="{generated_at}">
  <title>{title}</title>
  <link rel="stylesheet" href="static/style.css">
{analytics}</head>
<body data-min-year="{min_year}" data-max-year="{max_year}">
  <noscript>
    <h1>{title}</h1>
    <p>{total} reviews, {min_year}–{max_year}. Download the full list as <a href="{stem}.csv">CSV</a> or <a href="{stem}.xlsx">Excel</a>.</p>
    <ul class="sources">
{sources}    </ul>
  </noscript>
  <template id="journal-options">
{journals}  </template>
  <template id="subfield-options">
{subfields}  </template>
  <script type="application/json" id="reviews-data">{data}</script>
  <script type="module">
    import init from "./pkg/philreviews_wasm.js";
    init();
  </script>
</body>
</html>
"#,
        version = version,
        generated_at = escape_html(&options.generated_at),
        title = title,
        analytics = analytics,
        min_year = min_year,
        max_year = max_year,
        total = catalog.len(),
        stem = EXPORT_STEM,
        sources = sources,
        journals = journals,
        subfields = subfields,
        data = escape_script_json(json),
    )
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// サイト一式を書き出す
pub fn build_site(catalog: &Catalog, output_dir: &Path, options: &SiteOptions) -> Result<BuildReport> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| PhilReviewsError::Build(format!("{}: {}", output_dir.display(), e)))?;

    let json = embedded_json(catalog.entries())?;
    let version = dataset_version(&json);
    let mut report = BuildReport {
        version: version.clone(),
        files: Vec::new(),
    };

    let index_path = output_dir.join("index.html");
    std::fs::write(&index_path, render_index(catalog, &json, &version, options))?;
    report.files.push((index_path.clone(), file_size(&index_path)));

    let entries: Vec<_> = catalog.entries().iter().collect();

    let csv_path = output_dir.join(format!("{}.csv", EXPORT_STEM));
    write_csv_file(&entries, &csv_path)?;
    report.files.push((csv_path.clone(), file_size(&csv_path)));

    let xlsx_path = output_dir.join(format!("{}.xlsx", EXPORT_STEM));
    write_excel_file(&entries, &xlsx_path, "Reviews")?;
    report.files.push((xlsx_path.clone(), file_size(&xlsx_path)));

    tracing::debug!(version = %report.version, files = report.files.len(), "site built");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> SiteOptions {
        SiteOptions {
            title: "Phil <Reviews>".into(),
            analytics_code: None,
            generated_at: "2026-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"A & "B" <c>"#), "A &amp; &quot;B&quot; &lt;c&gt;");
    }

    #[test]
    fn test_escape_script_json() {
        assert_eq!(
            escape_script_json(r#"{"title":"</script><script>"}"#),
            r#"{"title":"<\/script><script>"}"#
        );
    }

    #[test]
    fn test_render_index() {
        let json = r#"[{"title":"A</script>","journal":"Mind & Brain","date":"2011-01-01"}]"#;
        let catalog = Catalog::from_json(json).unwrap();
        let html = render_index(&catalog, json, "abc123", &options());

        assert!(html.contains("<title>Phil &lt;Reviews&gt;</title>"));
        assert!(html.contains(r#"id="reviews-data">[{"title":"A<\/script>""#));
        assert!(html.contains(r#"data-journal="Mind &amp; Brain""#));
        assert!(html.contains(r#"data-min-year="2011""#));
        assert!(!html.contains("goatcounter"));
    }

    #[test]
    fn test_render_index_with_analytics() {
        let catalog = Catalog::default();
        let mut options = options();
        options.analytics_code = Some("philreviews".into());
        let html = render_index(&catalog, "[]", "v", &options);
        assert!(html.contains("https://philreviews.goatcounter.com/count"));
    }
}
