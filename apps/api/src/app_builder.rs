//! # アプリケーション構築
//!
//! DI（ストアハンドル・State）の初期化とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    handler::{
        DocumentState,
        create_document,
        delete_document,
        health_check,
        list_documents,
        update_document,
    },
    store::StoreHandle,
};

/// 任意オリジンを許可する CORS レイヤー
///
/// このサービスは認証を持たない公開 API のため、全オリジン・全メソッド・
/// 全ヘッダを許可する。
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// DI コンテナの構築とルーター定義を行う
///
/// 構築済みのストアハンドルを受け取り、State → Router の順に組み立てる。
/// ルートに一致しないパスは静的アセットディレクトリにフォールバックし、
/// `GET /` は `index.html` に解決される。
pub fn build_app(static_dir: &str, store: StoreHandle) -> Router {
    let document_state = Arc::new(DocumentState { store });

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/documents",
            get(list_documents).post(create_document),
        )
        .route(
            "/api/documents/{id}",
            put(update_document).delete(delete_document),
        )
        .with_state(document_state)
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
