//! # API 設定
//!
//! 環境変数から API サーバーの設定を読み込む。

use std::env;

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// 静的アセットのディレクトリ
    pub static_dir: String,
    /// ドキュメントテーブル名
    pub table_name: String,
    /// ストア認証情報の JSON blob（`DOCSTORE_CREDENTIALS`、未設定なら None）
    ///
    /// パースは起動時に行い、欠落・不正でもサーバーは起動する
    /// （ストアハンドルが Unconfigured になる）。
    pub store_credentials: Option<String>,
}

impl ApiConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("API_PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .expect("API_PORT は有効なポート番号である必要があります"),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
            table_name: env::var("DOCUMENTS_TABLE_NAME")
                .unwrap_or_else(|_| "documents".to_string()),
            store_credentials: env::var("DOCSTORE_CREDENTIALS").ok(),
        })
    }
}
