//! # Kaiwa ドメイン層
//!
//! 通知サブシステムの中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは DDD（ドメイン駆動設計）の原則に従い、以下を提供する:
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: User,
//!   Conversation, Message）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: Email,
//!   GivenName）
//! - **純粋な判定ロジック**: BAN 状態変化の判定（[`profile`]）と
//!   通知イベントのモデル（[`notification`]）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、メール送信）には一切依存しない。
//! これにより、判定ロジックはデータベースなしでテスト可能になる。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`user`] - ユーザーエンティティとメールアドレス
//! - [`conversation`] - 会話（2 者間スレッド）とメッセージ
//! - [`profile`] - ユーザープロフィールと BAN 状態変化の判定
//! - [`notification`] - 通知イベントとメールメッセージ
//! - [`clock`] - テスト可能な時刻プロバイダ

#[macro_use]
mod macros;

pub mod clock;
pub mod conversation;
pub mod error;
pub mod notification;
pub mod profile;
pub mod user;
pub mod value_objects;

pub use error::DomainError;
