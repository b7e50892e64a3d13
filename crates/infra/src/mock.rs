//! # テスト用モックリポジトリ
//!
//! ハンドラテスト・統合テストで使用するインメモリリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! docboard-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::InfraError,
    repository::{Document, DocumentFields, DocumentRepository},
};

// ===== InMemoryDocumentRepository =====

/// インメモリ実装の DocumentRepository
///
/// DynamoDB 実装と同じ契約（UUID v7 採番、冪等削除、全上書き更新）を
/// `Vec` 上で再現する。
#[derive(Clone, Default)]
pub struct InMemoryDocumentRepository {
    documents: Arc<Mutex<Vec<Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// テストの事前条件として既存ドキュメントを投入する
    pub fn add_document(&self, document: Document) {
        self.documents.lock().unwrap().push(document);
    }

    /// 現在保持しているドキュメント数
    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn insert(&self, fields: DocumentFields) -> Result<Document, InfraError> {
        let document = Document {
            id:      Uuid::now_v7().to_string(),
            topic:   fields.topic,
            writer:  fields.writer,
            content: fields.content,
        };
        self.documents.lock().unwrap().push(document.clone());
        Ok(document)
    }

    async fn find_all(&self) -> Result<Vec<Document>, InfraError> {
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, InfraError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == id)
            .cloned())
    }

    async fn update(&self, document: &Document) -> Result<(), InfraError> {
        let mut documents = self.documents.lock().unwrap();
        match documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document.clone(),
            // DynamoDB の PutItem と同じ create-or-replace セマンティクス
            None => documents.push(document.clone()),
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), InfraError> {
        self.documents.lock().unwrap().retain(|d| d.id != id);
        Ok(())
    }
}

// ===== FailingDocumentRepository =====

/// 全操作が失敗するリポジトリ
///
/// ストア障害時のエラーパス（HTTP 500 への変換）を検証するためのスタブ。
#[derive(Clone, Default)]
pub struct FailingDocumentRepository;

impl FailingDocumentRepository {
    fn error() -> InfraError {
        InfraError::dynamo_db("ストアに接続できません")
    }
}

#[async_trait]
impl DocumentRepository for FailingDocumentRepository {
    async fn insert(&self, _fields: DocumentFields) -> Result<Document, InfraError> {
        Err(Self::error())
    }

    async fn find_all(&self) -> Result<Vec<Document>, InfraError> {
        Err(Self::error())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Document>, InfraError> {
        Err(Self::error())
    }

    async fn update(&self, _document: &Document) -> Result<(), InfraError> {
        Err(Self::error())
    }

    async fn delete(&self, _id: &str) -> Result<(), InfraError> {
        Err(Self::error())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fields(topic: &str, writer: &str, content: &str) -> DocumentFields {
        DocumentFields {
            topic:   topic.to_string(),
            writer:  writer.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insertで採番されたidが返る() {
        let sut = InMemoryDocumentRepository::new();

        let document = sut.insert(fields("A", "B", "C")).await.unwrap();

        assert!(!document.id.is_empty());
        assert_eq!(document.topic, "A");
        assert_eq!(sut.len(), 1);
    }

    #[tokio::test]
    async fn test_insertごとに異なるidが採番される() {
        let sut = InMemoryDocumentRepository::new();

        let first = sut.insert(fields("A", "B", "C")).await.unwrap();
        let second = sut.insert(fields("A", "B", "C")).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_find_allで空のストアは空のvecを返す() {
        let sut = InMemoryDocumentRepository::new();

        let documents = sut.find_all().await.unwrap();

        assert_eq!(documents, Vec::<Document>::new());
    }

    #[tokio::test]
    async fn test_find_by_idで存在しないidはnoneを返す() {
        let sut = InMemoryDocumentRepository::new();

        let found = sut.find_by_id("missing").await.unwrap();

        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_updateで本文フィールドが全上書きされる() {
        let sut = InMemoryDocumentRepository::new();
        let document = sut.insert(fields("A", "B", "C")).await.unwrap();

        sut.update(&Document {
            id:      document.id.clone(),
            topic:   "X".to_string(),
            writer:  "B".to_string(),
            content: "C".to_string(),
        })
        .await
        .unwrap();

        let found = sut.find_by_id(&document.id).await.unwrap().unwrap();
        assert_eq!(found.topic, "X");
        assert_eq!(found.writer, "B");
    }

    #[tokio::test]
    async fn test_deleteは存在しないidでも成功する() {
        let sut = InMemoryDocumentRepository::new();

        sut.delete("missing").await.unwrap();

        assert!(sut.is_empty());
    }

    #[tokio::test]
    async fn test_deleteで対象のドキュメントだけが消える() {
        let sut = InMemoryDocumentRepository::new();
        let first = sut.insert(fields("A", "B", "C")).await.unwrap();
        let second = sut.insert(fields("D", "E", "F")).await.unwrap();

        sut.delete(&first.id).await.unwrap();

        let remaining = sut.find_all().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, second.id);
    }

    #[tokio::test]
    async fn test_failing_repositoryは全操作でエラーを返す() {
        let sut = FailingDocumentRepository;

        let document = Document {
            id:      "x".to_string(),
            topic:   "A".to_string(),
            writer:  "B".to_string(),
            content: "C".to_string(),
        };

        assert!(sut.insert(fields("A", "B", "C")).await.is_err());
        assert!(sut.find_all().await.is_err());
        assert!(sut.find_by_id("x").await.is_err());
        assert!(sut.update(&document).await.is_err());
        assert!(sut.delete("x").await.is_err());
    }
}
