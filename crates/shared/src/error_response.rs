//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API 層の責務（shared に axum 依存を入れない）
//! - レスポンス形状は `{"error": "<メッセージ>"}` の 1 フィールドのみ。
//!   クライアントは HTTP ステータスとこのメッセージだけで失敗を判断する

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// 失敗したリクエストはすべてこの形式のボディを返す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// エラーメッセージからレスポンスを作成する
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
