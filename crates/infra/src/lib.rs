//! # Kaiwa インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトとその PostgreSQL 実装、および
//! メール送信の抽象化を提供する。外部システムの詳細をカプセル化し、
//! ドメイン層と判定ロジックをインフラの変更から保護する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理
//! - **リポジトリ実装**: ユーザー・会話・メッセージ・プロフィール・
//!   通知ログの永続化操作
//! - **メール送信**: SMTP / SES / Noop の送信実装と、BAN 通知の
//!   ディスパッチ抽象
//!
//! ## 依存関係
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`notification`] - メール送信とディスパッチの抽象化
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//! - [`mock`] - テスト用インメモリ実装（`test-utils` feature）

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod repository;

pub use error::InfraError;
