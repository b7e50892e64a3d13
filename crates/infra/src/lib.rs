//! # DocBoard インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトとその具体的な実装を提供する。
//! ドキュメントストア（DynamoDB）の詳細をカプセル化し、API 層を
//! インフラの変更から保護する。
//!
//! ## 責務
//!
//! - **ストア接続**: DynamoDB クライアントの構築と認証情報のパース
//! - **テーブル管理**: `documents` テーブルの冪等な作成
//! - **リポジトリ実装**: [`repository::DocumentRepository`] の DynamoDB 実装
//!
//! ## モジュール構成
//!
//! - [`dynamodb`] - DynamoDB 接続管理と認証情報
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと実装
//! - [`mock`] - テスト用インメモリ実装（`test-utils` feature）

pub mod dynamodb;
pub mod error;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::InfraError;
