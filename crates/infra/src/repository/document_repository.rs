//! # DocumentRepository
//!
//! ドキュメントの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **DynamoDB**: `documents` テーブルに格納、PK = `id`
//! - **ID 採番**: DynamoDB はパーティションキーを呼び出し側が与えるため、
//!   ストアクライアント層（このリポジトリ）が UUID v7 を採番する
//! - **全件取得**: Scan を `LastEvaluatedKey` でページングしながら全件集める。
//!   コレクション全体を返す API 契約のため、アプリ層のページネーションは持たない
//! - **上書き更新**: 更新は 3 フィールドの全上書き（PutItem）。存在確認は
//!   ユースケース側（API 層）の責務

use std::{collections::HashMap, future::Future};

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, types::AttributeValue};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::InfraError;

/// 永続化されたドキュメント
///
/// `id` はストア側で採番された不変の識別子。3 つの本文フィールドは
/// 契約上は型なしの自由テキストで、バリデーションされない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id:      String,
    pub topic:   String,
    pub writer:  String,
    pub content: String,
}

/// ドキュメントの本文フィールド（ID なし）
///
/// 作成時・更新時にクライアントから渡される 3 フィールド。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFields {
    pub topic:   String,
    pub writer:  String,
    pub content: String,
}

/// ドキュメントリポジトリトレイト
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// ドキュメントを新規作成し、採番済みの ID を含めて返す
    async fn insert(&self, fields: DocumentFields) -> Result<Document, InfraError>;

    /// 全ドキュメントを取得する（順序はストア依存）
    async fn find_all(&self) -> Result<Vec<Document>, InfraError>;

    /// ID でドキュメントを取得する
    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, InfraError>;

    /// ドキュメントの本文フィールドを全上書きする
    async fn update(&self, document: &Document) -> Result<(), InfraError>;

    /// ドキュメントを削除する（存在しない ID でも成功する冪等削除）
    async fn delete(&self, id: &str) -> Result<(), InfraError>;
}

/// DynamoDB 実装の DocumentRepository
pub struct DynamoDbDocumentRepository {
    client:     Client,
    table_name: String,
}

impl DynamoDbDocumentRepository {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// Document を DynamoDB アイテムに変換する
    fn to_item(document: &Document) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();
        item.insert(
            "id".to_string(),
            AttributeValue::S(document.id.clone()),
        );
        item.insert(
            "topic".to_string(),
            AttributeValue::S(document.topic.clone()),
        );
        item.insert(
            "writer".to_string(),
            AttributeValue::S(document.writer.clone()),
        );
        item.insert(
            "content".to_string(),
            AttributeValue::S(document.content.clone()),
        );
        item
    }
}

#[async_trait]
impl DocumentRepository for DynamoDbDocumentRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, fields: DocumentFields) -> Result<Document, InfraError> {
        let document = Document {
            id:      Uuid::now_v7().to_string(),
            topic:   fields.topic,
            writer:  fields.writer,
            content: fields.content,
        };

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(Self::to_item(&document)))
            .send()
            .await
            .map_err(|e| InfraError::dynamo_db(format!("ドキュメントの保存に失敗: {e}")))?;

        Ok(document)
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Document>, InfraError> {
        let client = &self.client;
        let table_name = &self.table_name;

        scan_all_pages(move |exclusive_start_key| async move {
            let output = client
                .scan()
                .table_name(table_name)
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .map_err(|e| InfraError::dynamo_db(format!("ドキュメントの取得に失敗: {e}")))?;

            Ok(ScanPage {
                items:              output.items().to_vec(),
                last_evaluated_key: output.last_evaluated_key().cloned(),
            })
        })
        .await
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, InfraError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| InfraError::dynamo_db(format!("ドキュメントの取得に失敗: {e}")))?;

        output.item().map(convert_item_to_document).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %document.id))]
    async fn update(&self, document: &Document) -> Result<(), InfraError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(Self::to_item(document)))
            .send()
            .await
            .map_err(|e| InfraError::dynamo_db(format!("ドキュメントの更新に失敗: {e}")))?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &str) -> Result<(), InfraError> {
        // DeleteItem は存在しないキーでも成功する（冪等削除）
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| InfraError::dynamo_db(format!("ドキュメントの削除に失敗: {e}")))?;

        Ok(())
    }
}

/// Scan 1 ページ分の結果
struct ScanPage {
    items:              Vec<HashMap<String, AttributeValue>>,
    last_evaluated_key: Option<HashMap<String, AttributeValue>>,
}

/// Scan を `LastEvaluatedKey` でページングしながら全件集める
///
/// Scan は 1 回で全件返すとは限らない。`fetch_page` に前ページの
/// `LastEvaluatedKey` を渡しながら、キーが尽きるまで呼び続ける。
async fn scan_all_pages<F, Fut>(mut fetch_page: F) -> Result<Vec<Document>, InfraError>
where
    F: FnMut(Option<HashMap<String, AttributeValue>>) -> Fut,
    Fut: Future<Output = Result<ScanPage, InfraError>>,
{
    let mut documents = Vec::new();
    let mut exclusive_start_key: Option<HashMap<String, AttributeValue>> = None;

    loop {
        let page = fetch_page(exclusive_start_key.take()).await?;

        for item in &page.items {
            documents.push(convert_item_to_document(item)?);
        }

        match page.last_evaluated_key {
            Some(key) => exclusive_start_key = Some(key),
            None => break,
        }
    }

    Ok(documents)
}

/// DynamoDB アイテムを Document に変換する
fn convert_item_to_document(
    item: &HashMap<String, AttributeValue>,
) -> Result<Document, InfraError> {
    Ok(Document {
        id:      get_s(item, "id")?,
        topic:   get_s(item, "topic")?,
        writer:  get_s(item, "writer")?,
        content: get_s(item, "content")?,
    })
}

/// DynamoDB アイテムから文字列属性を取得する
fn get_s(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, InfraError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| InfraError::dynamo_db(format!("属性 '{key}' が見つかりません")))
}
