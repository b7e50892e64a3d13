//! # DocBoard API ライブラリクレート
//!
//! 統合テストからルーター構築・ハンドラを利用できるよう、
//! バイナリ（`main.rs`）と実装を分離する。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod store;
