//! データセット読み込み

use crate::error::{PhilReviewsError, Result};
use philreviews_common::{Catalog, ReviewEntry};
use sha2::{Digest, Sha256};
use std::path::Path;

/// JSONファイルからカタログを読み込む
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(PhilReviewsError::FileNotFound(path.display().to_string()));
    }
    let catalog = Catalog::from_file(path).map_err(|e| match e {
        philreviews_common::Error::Json(e) => {
            PhilReviewsError::InvalidDataset(format!("{}: {}", path.display(), e))
        }
        other => other.into(),
    })?;
    tracing::info!(path = %path.display(), entries = catalog.len(), "dataset loaded");
    Ok(catalog)
}

/// ページに埋め込むJSON（正規化済み）
pub fn embedded_json(entries: &[ReviewEntry]) -> Result<String> {
    Ok(serde_json::to_string(entries)?)
}

/// データのバージョン（SHA-256 の先頭12桁）
pub fn dataset_version(json: &str) -> String {
    let digest = Sha256::digest(json.as_bytes());
    hex::encode(digest)[..12].to_string()
}
