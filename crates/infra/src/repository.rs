//! # リポジトリ
//!
//! ドキュメント永続化のトレイトと実装を提供する。

pub mod document_repository;

pub use document_repository::{Document, DocumentFields, DocumentRepository};
