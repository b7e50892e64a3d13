//! # DynamoDB 接続管理
//!
//! Amazon DynamoDB への接続管理と認証情報のパースを行う。
//!
//! ## 設計方針
//!
//! - **認証情報**: 環境変数に入った JSON blob（[`StoreCredentials`]）からパース
//! - **ローカル開発**: `endpoint_url` を設定して DynamoDB Local に接続
//! - **テーブル自動作成**: アプリケーション起動時にテーブルが存在しなければ作成（冪等）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use docboard_infra::dynamodb;
//!
//! async fn setup(raw: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = dynamodb::StoreCredentials::from_json(raw)?;
//!     let client = dynamodb::create_client(&credentials).await;
//!     dynamodb::ensure_documents_table(&client, "documents").await?;
//!     Ok(())
//! }
//! ```

use aws_sdk_dynamodb::{
    Client,
    types::{
        AttributeDefinition,
        BillingMode,
        KeySchemaElement,
        KeyType,
        ScalarAttributeType,
    },
};
use serde::Deserialize;

use crate::InfraError;

/// ドキュメントストアの認証情報
///
/// 環境変数 `DOCSTORE_CREDENTIALS` に JSON としてシリアライズされた状態で渡される。
///
/// ```json
/// {
///   "access_key_id": "...",
///   "secret_access_key": "...",
///   "region": "ap-northeast-1",
///   "endpoint_url": "http://localhost:18000"
/// }
/// ```
///
/// `endpoint_url` は DynamoDB Local 使用時のみ設定し、未設定で AWS デフォルトに接続する。
#[derive(Clone, Deserialize)]
pub struct StoreCredentials {
    pub access_key_id:     String,
    pub secret_access_key: String,
    pub region:            String,
    #[serde(default)]
    pub endpoint_url:      Option<String>,
}

impl StoreCredentials {
    /// JSON 文字列から認証情報をパースする
    pub fn from_json(raw: &str) -> Result<Self, InfraError> {
        serde_json::from_str(raw)
            .map_err(|e| InfraError::credentials(format!("認証情報のパースに失敗: {e}")))
    }
}

// secret_access_key をログに漏らさないため Debug は手動実装
impl std::fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

/// DynamoDB クライアントを作成する
///
/// パース済みの認証情報から静的クレデンシャルプロバイダ付きの
/// クライアントを構築する。`endpoint_url` が設定されていれば
/// DynamoDB Local 等のカスタムエンドポイントに向ける。
pub async fn create_client(credentials: &StoreCredentials) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(credentials.region.clone()))
        .credentials_provider(aws_sdk_dynamodb::config::Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            "docstore-credentials",
        ));

    if let Some(endpoint) = &credentials.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let config = loader.load().await;

    Client::new(&config)
}

/// ドキュメントテーブルが存在しなければ作成する（冪等）
///
/// テーブルスキーマ:
/// - PK: `id` (String) — ドキュメント ID（UUID v7）
///
/// # 引数
///
/// * `client` - DynamoDB クライアント
/// * `table_name` - テーブル名
pub async fn ensure_documents_table(client: &Client, table_name: &str) -> Result<(), InfraError> {
    // テーブルの存在確認
    match client.describe_table().table_name(table_name).send().await {
        Ok(_) => {
            tracing::debug!("テーブル '{}' は既に存在します", table_name);
            return Ok(());
        }
        Err(err) => {
            // ResourceNotFoundException の場合のみテーブル作成に進む
            let service_err = err.as_service_error();
            if !service_err
                .map(|e| e.is_resource_not_found_exception())
                .unwrap_or(false)
            {
                return Err(InfraError::dynamo_db(format!(
                    "テーブル '{}' の確認に失敗: {}",
                    table_name, err
                )));
            }
        }
    }

    // テーブル作成
    tracing::info!("テーブル '{}' を作成します", table_name);

    let create_result = client
        .create_table()
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("id")
                .key_type(KeyType::Hash)
                .build()
                .map_err(|e| InfraError::dynamo_db(format!("KeySchema 構築エラー: {}", e)))?,
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("id")
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(|e| {
                    InfraError::dynamo_db(format!("AttributeDefinition 構築エラー: {}", e))
                })?,
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    match create_result {
        Ok(_) => {}
        Err(err) => {
            // ResourceInUseException は並行呼び出し時に発生しうる（テーブルが作成中）
            // この場合は冪等として成功扱いにする
            let is_resource_in_use = err
                .as_service_error()
                .map(|e| e.is_resource_in_use_exception())
                .unwrap_or(false);
            if !is_resource_in_use {
                return Err(InfraError::dynamo_db(format!(
                    "テーブル '{}' の作成に失敗: {}",
                    table_name, err
                )));
            }
            tracing::debug!(
                "テーブル '{}' は既に作成中または存在します（ResourceInUseException）",
                table_name
            );
            return Ok(());
        }
    }

    tracing::info!("テーブル '{}' を作成しました", table_name);

    Ok(())
}
