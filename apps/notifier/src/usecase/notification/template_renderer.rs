//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールを HTML/plaintext 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名もここで決める**: 通知イベント 1 種類につき件名パターン 1 つ
//! - **アプリケーションリンク**: `base_url` をテンプレートに渡す

use kaiwa_domain::notification::{EmailMessage, Notification, NotificationError};
use tera::{Context, Tera};

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、`Notification` から
/// `EmailMessage` を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "unread_digest.html",
                    include_str!("../../../templates/notifications/unread_digest.html"),
                ),
                (
                    "unread_digest.txt",
                    include_str!("../../../templates/notifications/unread_digest.txt"),
                ),
                (
                    "user_banned.html",
                    include_str!("../../../templates/notifications/user_banned.html"),
                ),
                (
                    "user_banned.txt",
                    include_str!("../../../templates/notifications/user_banned.txt"),
                ),
                (
                    "user_unbanned.html",
                    include_str!("../../../templates/notifications/user_unbanned.html"),
                ),
                (
                    "user_unbanned.txt",
                    include_str!("../../../templates/notifications/user_unbanned.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 通知イベントからメールメッセージを生成する
    ///
    /// # 引数
    ///
    /// - `notification`: 通知イベント
    /// - `base_url`: アプリケーションのベース URL（例: `http://localhost:5173`）
    pub fn render(
        &self,
        notification: &Notification,
        base_url: &str,
    ) -> Result<EmailMessage, NotificationError> {
        let (template_name, subject, context) = build_template_params(notification, base_url);

        let html_body = self
            .engine
            .render(&format!("{template_name}.html"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let text_body = self
            .engine
            .render(&format!("{template_name}.txt"), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(EmailMessage {
            to: notification.recipient_email().to_string(),
            subject,
            html_body,
            text_body,
        })
    }
}

/// テンプレート名、件名、コンテキストを構築する
fn build_template_params(
    notification: &Notification,
    base_url: &str,
) -> (&'static str, String, Context) {
    let target = notification.target();

    let mut context = Context::new();
    context.insert("given_name", target.given_name.as_str());
    context.insert("family_name", target.family_name.as_str());
    context.insert("base_url", base_url);

    match notification {
        Notification::UnreadMessages { unread_count, .. } => {
            context.insert("unread_count", unread_count);
            (
                "unread_digest",
                format!("[Kaiwa] 新着メッセージが {unread_count} 件あります"),
                context,
            )
        }
        Notification::UserBanned { .. } => (
            "user_banned",
            "[Kaiwa] アカウント停止のお知らせ".to_string(),
            context,
        ),
        Notification::UserUnbanned { .. } => (
            "user_unbanned",
            "[Kaiwa] アカウント停止解除のお知らせ".to_string(),
            context,
        ),
    }
}
