//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、永続化はリポジトリに委譲

pub mod document;
pub mod health;

pub use document::{
    DocumentState,
    create_document,
    delete_document,
    list_documents,
    update_document,
};
pub use health::health_check;
