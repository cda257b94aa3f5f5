use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhilReviewsError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("データセットが指定されていません。`--dataset PATH`、環境変数 PHILREVIEWS_DATASET、または `philreviews config --set-dataset PATH` で指定してください")]
    MissingDataset,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("データセットが不正: {0}")]
    InvalidDataset(String),

    #[error("検索条件が不正: {0}")]
    InvalidQuery(String),

    #[error("サイト生成エラー: {0}")]
    Build(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] philreviews_common::Error),
}

pub type Result<T> = std::result::Result<T, PhilReviewsError>;
