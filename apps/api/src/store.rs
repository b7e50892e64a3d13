//! # ストアハンドル
//!
//! 起動時に一度だけ構築され、ハンドラに注入されるドキュメントストアへの参照。
//!
//! ## 設計方針
//!
//! 認証情報が欠落・不正でもサーバーは起動する（log-and-continue）。
//! その場合ハンドルは [`Unconfigured`](StoreHandle::Unconfigured) となり、
//! ストア依存のハンドラは呼び出し前にこれを検査して型付きの
//! 設定エラーレスポンスを返す。暗黙の null ハンドルは存在しない。

use std::sync::Arc;

use docboard_infra::repository::DocumentRepository;

use crate::error::ApiError;

/// ドキュメントストアへのハンドル
#[derive(Clone)]
pub enum StoreHandle {
    /// ストアに接続済み
    Ready(Arc<dyn DocumentRepository>),
    /// 認証情報の欠落・不正により未構成
    Unconfigured,
}

impl StoreHandle {
    /// 接続済みリポジトリを取り出す
    ///
    /// 未構成の場合は [`ApiError::StoreUnconfigured`] を返す。
    /// 各ハンドラはストア操作の前に必ずこれを呼ぶ。
    pub fn ready(&self) -> Result<&Arc<dyn DocumentRepository>, ApiError> {
        match self {
            StoreHandle::Ready(repository) => Ok(repository),
            StoreHandle::Unconfigured => Err(ApiError::StoreUnconfigured),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, StoreHandle::Ready(_))
    }
}

#[cfg(test)]
mod tests {
    use docboard_infra::mock::InMemoryDocumentRepository;

    use super::*;

    #[test]
    fn test_readyでリポジトリが取り出せる() {
        let sut = StoreHandle::Ready(Arc::new(InMemoryDocumentRepository::new()));

        assert!(sut.ready().is_ok());
        assert!(sut.is_ready());
    }

    #[test]
    fn test_unconfiguredでstore_unconfiguredエラーになる() {
        let sut = StoreHandle::Unconfigured;

        assert!(matches!(sut.ready(), Err(ApiError::StoreUnconfigured)));
        assert!(!sut.is_ready());
    }
}
