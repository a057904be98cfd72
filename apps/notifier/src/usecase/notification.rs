//! # 通知の生成と送信
//!
//! 通知イベントからメールを生成し、送信し、結果を記録する。
//!
//! - [`TemplateRenderer`]: tera テンプレートで HTML / plaintext を生成
//! - [`NotificationService`]: レンダリング → 送信 → ログ記録を統合

mod service;
mod template_renderer;

pub use service::NotificationService;
pub use template_renderer::TemplateRenderer;
