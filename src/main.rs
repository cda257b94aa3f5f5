use clap::Parser;
use philreviews::{browse, check, cli, config, dataset, error, export, query, site, table};
use cli::{Cli, Commands};
use config::Config;
use error::{PhilReviewsError, Result};
use philreviews_common::subfield::display_subfield;
use philreviews_common::{encode_fragment, project, Catalog};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn open_catalog(config: &Config, dataset: Option<&Path>) -> Result<Catalog> {
    let path = config.resolve_dataset(dataset)?;
    dataset::load_catalog(&path)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;
    let dataset = cli.dataset.as_deref();

    match cli.command {
        Commands::Build { output, title } => {
            println!("📚 philreviews - サイト生成\n");

            println!("[1/3] データセットを読み込み中...");
            let catalog = open_catalog(&config, dataset)?;
            println!("✔ {}件の書評を読み込み\n", catalog.len());

            println!("[2/3] 検証中...");
            let issues = check::check_catalog(&catalog);
            let errors = check::error_count(&issues);
            if errors > 0 {
                for issue in &issues {
                    println!("  {}", issue);
                }
                return Err(PhilReviewsError::InvalidDataset(format!("{}件のエラー", errors)));
            }
            println!("✔ 問題なし（警告 {}件）\n", issues.len());

            println!("[3/3] ページを書き出し中...");
            let output_dir = output.unwrap_or_else(|| config.output_dir.clone());
            let options = site::SiteOptions {
                title: title.unwrap_or_else(|| config.site_title.clone()),
                analytics_code: config.analytics_code.clone(),
                generated_at: chrono::Utc::now().to_rfc3339(),
            };
            let report = site::build_site(&catalog, &output_dir, &options)?;
            for (path, size) in &report.files {
                println!("  {} ({} bytes)", path.display(), size);
            }
            println!("✔ データバージョン: {}", report.version);

            println!("\n✅ 生成完了: {}", output_dir.display());
        }

        Commands::List { query } => {
            let catalog = open_catalog(&config, dataset)?;
            let state = query::build_state_with_page_size(&catalog, &query, config.default_page_size)?;
            let projection = project(&catalog, &state);
            println!("{}", table::format_page(&catalog, &projection, &state));
        }

        Commands::Url { query } => {
            let catalog = open_catalog(&config, dataset)?;
            let state = query::build_state(&catalog, &query)?;
            println!("#{}", encode_fragment(&state));
        }

        Commands::Stats => {
            let catalog = open_catalog(&config, dataset)?;
            let (min_year, max_year) = catalog.year_bounds();
            println!("書評: {}件", catalog.len());
            println!("年: {}–{}", min_year, max_year);
            println!("アクセス: {}", catalog.access_values().join(", "));

            println!("\nジャーナル:");
            for (journal, count) in catalog.source_counts() {
                println!("  {:>6}  {}", count, journal);
            }

            println!("\nサブフィールド:");
            for (code, count) in catalog.subfield_counts() {
                if count > 0 {
                    println!("  {:>6}  {}", count, display_subfield(code));
                }
            }
        }

        Commands::Check => {
            println!("🔍 philreviews - データ検証\n");
            let catalog = open_catalog(&config, dataset)?;
            let issues = check::check_catalog(&catalog);
            for issue in &issues {
                println!("  {}", issue);
            }
            let errors = check::error_count(&issues);
            if errors > 0 {
                return Err(PhilReviewsError::InvalidDataset(format!(
                    "{}件のエラー、{}件の警告",
                    errors,
                    issues.len() - errors
                )));
            }
            println!("\n✅ {}件を検証、警告 {}件", catalog.len(), issues.len());
        }

        Commands::Browse { query } => {
            let catalog = open_catalog(&config, dataset)?;
            let state = query::build_state_with_page_size(&catalog, &query, config.default_page_size)?;
            browse::run_browse(&catalog, state)?;
        }

        Commands::Export { query, format, output } => {
            println!("📄 philreviews - エクスポート\n");
            let catalog = open_catalog(&config, dataset)?;
            let state = query::build_state(&catalog, &query)?;
            let projection = project(&catalog, &state);

            let entries: Vec<_> = projection
                .filtered
                .iter()
                .filter_map(|&i| catalog.entry(i))
                .collect();
            println!("✔ {}件が条件に一致\n", entries.len());

            export::export_entries(&entries, format, &output)?;
            println!("\n✅ エクスポート完了");
        }

        Commands::Config { show, set_dataset, set_title, set_analytics } => {
            let mut config = config;
            let mut changed = false;

            if let Some(path) = set_dataset {
                config.dataset_path = Some(path);
                changed = true;
            }
            if let Some(title) = set_title {
                config.site_title = title;
                changed = true;
            }
            if let Some(code) = set_analytics {
                config.analytics_code = Some(code).filter(|c| !c.trim().is_empty());
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!(
                    "  データセット: {}",
                    config
                        .dataset_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                );
                println!("  タイトル: {}", config.site_title);
                println!("  ページサイズ: {}", config.default_page_size);
                println!("  出力先: {}", config.output_dir.display());
                println!(
                    "  アクセス解析: {}",
                    config.analytics_code.as_deref().unwrap_or("未設定")
                );
            }
        }
    }

    Ok(())
}
