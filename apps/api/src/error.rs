//! # API エラー定義
//!
//! API 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラー契約
//!
//! 失敗レスポンスのボディは常に `{"error": "<メッセージ>"}`。
//! クライアントはステータスコードとメッセージテキストのみで失敗を判断する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use docboard_shared::ErrorResponse;
use thiserror::Error;

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リソースが見つからない
    #[error("ドキュメントが見つかりません: {0}")]
    NotFound(String),

    /// ストアハンドルが未構成
    ///
    /// 起動時に認証情報が欠落・不正だった場合、ストア依存の
    /// 全リクエストがこのエラーになる。
    #[error("document store is not configured")]
    StoreUnconfigured,

    /// ストアエラー
    #[error(transparent)]
    Store(#[from] docboard_infra::InfraError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::StoreUnconfigured => {
                tracing::error!("ストアが未構成の状態でリクエストを受信しました");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Store(e) => {
                tracing::error!(span_trace = %e.span_trace(), "ストアエラー: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_not_foundは404とerrorボディに変換される() {
        let response = ApiError::NotFound("doc-1".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "ドキュメントが見つかりません: doc-1");
    }

    #[tokio::test]
    async fn test_store_unconfiguredは500に変換される() {
        let response = ApiError::StoreUnconfigured.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "document store is not configured");
    }

    #[tokio::test]
    async fn test_storeエラーは500とメッセージテキストに変換される() {
        let err = ApiError::Store(docboard_infra::InfraError::dynamo_db("接続失敗"));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "DynamoDB エラー: 接続失敗");
    }
}
