//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **3 つの実装**: SMTP（Mailpit 開発用）、SES（本番用）、Noop（テスト用）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択
//! - **判定と配送の分離**: BAN 状態変化の判定結果は
//!   [`BanEmailDispatcher`] 経由で配送に変換され、判定ロジックは
//!   配送手段を知らない

mod noop;
mod ses;
mod smtp;

use async_trait::async_trait;
use kaiwa_domain::notification::{EmailMessage, NotificationError, NotificationTarget};
pub use noop::NoopNotificationSender;
pub use ses::SesNotificationSender;
pub use smtp::SmtpNotificationSender;

/// メール送信トレイト
///
/// 通知基盤の中核。メール送信の具体的な方法を抽象化する。
/// SMTP / SES / Noop の 3 実装を環境変数で切り替える。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}

/// BAN 通知ディスパッチトレイト
///
/// BAN 状態変化の判定結果をメール配送に変換する抽象。
/// fire-and-forget: 失敗してもエラーを返さない（実装側でログに記録する）。
/// 判定ロジック側はこのトレイトにのみ依存し、配送の詳細
/// （テンプレート、送信バックエンド、キュー）から切り離される。
#[async_trait]
pub trait BanEmailDispatcher: Send + Sync {
    /// BAN 通知メールの配送を依頼する
    async fn enqueue_ban_email(&self, target: &NotificationTarget);

    /// BAN 解除通知メールの配送を依頼する
    async fn enqueue_unban_email(&self, target: &NotificationTarget);
}
