//! # リポジトリ
//!
//! 永続化操作のトレイト定義と PostgreSQL 実装。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: ユースケース層はトレイトにのみ依存し、
//!   データベースなしでテスト可能にする
//! - **読み取り中心**: この通知サブシステムは Web アプリケーション本体の
//!   テーブルを参照する。書き込みはプロフィールと通知ログのみ
//! - **実行時バインドのクエリ**: 行構造体（`FromRow`）で取得し、
//!   ドメインの `from_db` コンストラクタで復元する

pub mod conversation_repository;
pub mod message_repository;
pub mod notification_log_repository;
pub mod profile_repository;
pub mod user_repository;

pub use conversation_repository::{ConversationRepository, PostgresConversationRepository};
pub use message_repository::{MessageRepository, PostgresMessageRepository};
pub use notification_log_repository::{
    NotificationLog,
    NotificationLogRepository,
    PostgresNotificationLogRepository,
};
pub use profile_repository::{PostgresProfileRepository, ProfileRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
