//! # ドキュメントハンドラ
//!
//! `documents` コレクションへの CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `POST /api/documents` - ドキュメント作成
//! - `GET /api/documents` - 全ドキュメント取得
//! - `PUT /api/documents/{id}` - ドキュメント更新（3 フィールド全上書き）
//! - `DELETE /api/documents/{id}` - ドキュメント削除（冪等）
//!
//! ## 契約
//!
//! - 本文フィールドはバリデーションしない。欠落フィールドは空文字列として受理する
//! - 全ハンドラはストアハンドルを検査してから 1 回だけストアを呼ぶ。
//!   キャッシュや中間状態は持たない

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use docboard_infra::repository::{Document, DocumentFields};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, store::StoreHandle};


/// ドキュメント API の共有状態
pub struct DocumentState {
    pub store: StoreHandle,
}

// --- リクエスト/レスポンス型 ---

/// 作成・更新リクエストボディ
///
/// 3 フィールドとも省略可能。省略時は空文字列として保存する。
#[derive(Debug, Deserialize)]
pub struct DocumentPayload {
    #[serde(default)]
    pub topic:   String,
    #[serde(default)]
    pub writer:  String,
    #[serde(default)]
    pub content: String,
}

impl From<DocumentPayload> for DocumentFields {
    fn from(payload: DocumentPayload) -> Self {
        Self {
            topic:   payload.topic,
            writer:  payload.writer,
            content: payload.content,
        }
    }
}

/// ドキュメントレスポンス DTO
#[derive(Debug, Serialize)]
pub struct DocumentDto {
    pub id:      String,
    pub topic:   String,
    pub writer:  String,
    pub content: String,
}

impl From<Document> for DocumentDto {
    fn from(document: Document) -> Self {
        Self {
            id:      document.id,
            topic:   document.topic,
            writer:  document.writer,
            content: document.content,
        }
    }
}

/// 削除レスポンス
#[derive(Debug, Serialize)]
pub struct DeleteDocumentResponse {
    pub message: String,
}

// --- ハンドラ ---

/// POST /api/documents
///
/// ドキュメントを新規作成する。
///
/// ## レスポンス
///
/// - `201 Created`: 採番された id を含むドキュメント
/// - `500 Internal Server Error`: ストア障害またはストア未構成
#[tracing::instrument(skip_all)]
pub async fn create_document(
    State(state): State<Arc<DocumentState>>,
    Json(payload): Json<DocumentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let repository = state.store.ready()?;

    let document = repository.insert(payload.into()).await?;
    tracing::debug!(id = %document.id, "ドキュメントを保存しました");

    Ok((StatusCode::CREATED, Json(DocumentDto::from(document))))
}

/// GET /api/documents
///
/// 全ドキュメントを取得する。順序はストア依存で保証しない。
///
/// ## レスポンス
///
/// - `200 OK`: ドキュメントの配列（空コレクションは `[]`）
/// - `500 Internal Server Error`: ストア障害またはストア未構成
#[tracing::instrument(skip_all)]
pub async fn list_documents(
    State(state): State<Arc<DocumentState>>,
) -> Result<impl IntoResponse, ApiError> {
    let repository = state.store.ready()?;

    let documents = repository.find_all().await?;
    tracing::debug!(count = documents.len(), "ドキュメントを取得しました");

    let dtos: Vec<DocumentDto> = documents.into_iter().map(DocumentDto::from).collect();
    Ok((StatusCode::OK, Json(dtos)))
}

/// PUT /api/documents/{id}
///
/// ドキュメントの 3 フィールドを全上書きする。
///
/// 存在確認を先に行い、存在しない id は 404 を返す
/// （ストアの create-on-update セマンティクスを API 契約に漏らさない）。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後のドキュメント
/// - `404 Not Found`: id に一致するドキュメントがない
/// - `500 Internal Server Error`: ストア障害またはストア未構成
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_document(
    State(state): State<Arc<DocumentState>>,
    Path(id): Path<String>,
    Json(payload): Json<DocumentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let repository = state.store.ready()?;

    if repository.find_by_id(&id).await?.is_none() {
        return Err(ApiError::NotFound(id));
    }

    let document = Document {
        id,
        topic: payload.topic,
        writer: payload.writer,
        content: payload.content,
    };
    repository.update(&document).await?;

    Ok((StatusCode::OK, Json(DocumentDto::from(document))))
}

/// DELETE /api/documents/{id}
///
/// ドキュメントを削除する。存在しない id でも成功する（冪等削除）。
///
/// ## レスポンス
///
/// - `200 OK`: `{"message": "Document deleted successfully"}`
/// - `500 Internal Server Error`: ストア障害またはストア未構成
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_document(
    State(state): State<Arc<DocumentState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let repository = state.store.ready()?;

    repository.delete(&id).await?;

    Ok((
        StatusCode::OK,
        Json(DeleteDocumentResponse {
            message: "Document deleted successfully".to_string(),
        }),
    ))
}
