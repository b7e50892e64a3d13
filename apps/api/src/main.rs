//! # DocBoard API サーバー
//!
//! マネージドドキュメントストア（DynamoDB）への薄い REST ファサード。
//!
//! ## 役割
//!
//! `documents` テーブルへの CRUD を 4 つのエンドポイントで公開する:
//!
//! - **作成**: `POST /api/documents`
//! - **一覧**: `GET /api/documents`
//! - **更新**: `PUT /api/documents/{id}`
//! - **削除**: `DELETE /api/documents/{id}`
//!
//! 各ハンドラはリクエストごとにストアへ 1 回だけラウンドトリップする。
//! キャッシュ・リトライ・バリデーションは持たない。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | No | ポート番号（デフォルト: `3001`） |
//! | `STATIC_DIR` | No | 静的アセットディレクトリ（デフォルト: `public`） |
//! | `DOCUMENTS_TABLE_NAME` | No | テーブル名（デフォルト: `documents`） |
//! | `DOCSTORE_CREDENTIALS` | No* | ストア認証情報の JSON blob |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! \* `DOCSTORE_CREDENTIALS` が欠落・不正でもサーバーは起動するが、
//! ストア依存の全リクエストが設定エラー（500）を返す。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p docboard-api
//!
//! # 本番環境（環境変数を直接指定）
//! DOCSTORE_CREDENTIALS='{"access_key_id":...}' cargo run -p docboard-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use docboard_api::{
    app_builder::build_app,
    config::ApiConfig,
    store::StoreHandle,
};
use docboard_infra::{
    dynamodb::{self, StoreCredentials},
    repository::document_repository::DynamoDbDocumentRepository,
};
use docboard_shared::observability::{LogFormat, init_tracing};
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    init_tracing(LogFormat::from_env());

    // 設定読み込み
    let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!("API サーバーを起動します: {}:{}", config.host, config.port);

    // ストアハンドル構築（log-and-continue: 失敗しても起動は継続する）
    let store = init_store(&config).await;
    if !store.is_ready() {
        tracing::warn!("ストア未構成のまま起動します。ストア依存のリクエストは失敗します");
    }

    // ルーター構築
    let app = build_app(&config.static_dir, store);

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// 認証情報からストアハンドルを構築する
///
/// 認証情報の欠落・パース失敗・テーブル作成失敗はいずれも致命的エラーに
/// せず、ログを残して [`StoreHandle::Unconfigured`] を返す。
async fn init_store(config: &ApiConfig) -> StoreHandle {
    let Some(raw) = &config.store_credentials else {
        tracing::error!("DOCSTORE_CREDENTIALS が設定されていません");
        return StoreHandle::Unconfigured;
    };

    let credentials = match StoreCredentials::from_json(raw) {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("DOCSTORE_CREDENTIALS のパースに失敗しました: {}", e);
            return StoreHandle::Unconfigured;
        }
    };

    let client = dynamodb::create_client(&credentials).await;

    if let Err(e) = dynamodb::ensure_documents_table(&client, &config.table_name).await {
        tracing::error!("テーブル '{}' の準備に失敗しました: {}", config.table_name, e);
        return StoreHandle::Unconfigured;
    }

    tracing::info!("ドキュメントストアに接続しました: テーブル '{}'", config.table_name);

    StoreHandle::Ready(Arc::new(DynamoDbDocumentRepository::new(
        client,
        config.table_name.clone(),
    )))
}
