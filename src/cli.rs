use crate::export::ExportFormat;
use crate::query::QueryArgs;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "philreviews")]
#[command(about = "哲学書評カタログのサイト生成・検索ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// データセットJSON（省略時は環境変数 → 設定ファイル）
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 静的サイト（index.html / CSV / Excel）を生成
    Build {
        /// 出力ディレクトリ（デフォルト: 設定の output_dir）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ページタイトル
        #[arg(long)]
        title: Option<String>,
    },

    /// 検索条件に合う書評を一覧表示
    List {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// 検索条件をURLフラグメントに変換
    Url {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// データセットの統計を表示
    Stats,

    /// データセットを検証
    Check,

    /// 対話式に検索・閲覧
    Browse {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// 検索結果をCSV/Excelに出力
    Export {
        #[command(flatten)]
        query: QueryArgs,

        /// 出力形式 (csv/excel/both)
        #[arg(short, long, default_value = "both")]
        format: ExportFormat,

        /// 出力先（ディレクトリまたはファイル）
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// 設定管理
    Config {
        /// 現在の設定を表示
        #[arg(long)]
        show: bool,

        /// データセットのパスを保存
        #[arg(long)]
        set_dataset: Option<PathBuf>,

        /// サイトタイトルを保存
        #[arg(long)]
        set_title: Option<String>,

        /// GoatCounter のサイトコードを保存
        #[arg(long)]
        set_analytics: Option<String>,
    },
}
