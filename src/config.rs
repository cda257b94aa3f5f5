use crate::error::{PhilReviewsError, Result};
use philreviews_common::paginate::{is_allowed_page_size, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// データセットパスを上書きする環境変数
pub const DATASET_ENV: &str = "PHILREVIEWS_DATASET";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset_path: Option<PathBuf>,
    pub site_title: String,
    pub default_page_size: usize,
    /// goatcounter のサイトコード（設定時のみ計測スクリプトを埋め込む）
    pub analytics_code: Option<String>,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: None,
            site_title: "PhilReviews".into(),
            default_page_size: DEFAULT_PAGE_SIZE,
            analytics_code: None,
            output_dir: PathBuf::from("docs"),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込む（無ければデフォルト）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&content)?;
        if !is_allowed_page_size(config.default_page_size) {
            return Err(PhilReviewsError::Config(format!(
                "default_page_size は 25 / 50 / 100 のいずれか: {}",
                config.default_page_size
            )));
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PhilReviewsError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("philreviews").join("config.json"))
    }

    /// データセットのパスを決める（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_dataset(&self, arg: Option<&Path>) -> Result<PathBuf> {
        let env = std::env::var(DATASET_ENV).ok().filter(|v| !v.trim().is_empty());
        self.resolve_dataset_with(arg, env.as_deref())
    }

    pub fn resolve_dataset_with(&self, arg: Option<&Path>, env: Option<&str>) -> Result<PathBuf> {
        if let Some(path) = arg {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = env {
            return Ok(PathBuf::from(path));
        }
        self.dataset_path
            .clone()
            .ok_or(PhilReviewsError::MissingDataset)
    }
}
