//! # ユースケース層
//!
//! 通知ワーカーのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと送信器を `Arc<dyn Trait>` で外部から注入
//! - **判定と配送の分離**: BAN 状態変化の判定はドメイン層の純粋関数、
//!   配送への変換はユースケース層、実際の送信は通知サービスが担当
//!
//! ## モジュール構成
//!
//! - [`ban_status`]: プロフィール保存フックと BAN 通知のディスパッチ
//! - [`unread_digest`]: 未読メッセージダイジェストのスキャン
//! - [`notification`]: テンプレートレンダリングと通知サービス

pub mod ban_status;
pub mod notification;
pub mod unread_digest;

pub use ban_status::BanStatusUseCaseImpl;
pub use notification::{NotificationService, TemplateRenderer};
pub use unread_digest::{DigestSummary, UnreadDigestUseCaseImpl};
