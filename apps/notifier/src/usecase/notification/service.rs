//! # 通知サービス
//!
//! テンプレートレンダリング → メール送信 → ログ記録を統合するサービス。
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: `notify()` は送信失敗してもエラーを返さない
//! - **ログ記録**: 成功・失敗どちらも `notification_logs` テーブルに記録
//! - **依存性注入**: `NotificationSender` と `NotificationLogRepository` は
//!   trait で抽象化

use std::sync::Arc;

use async_trait::async_trait;
use kaiwa_domain::{
    clock::Clock,
    notification::{Notification, NotificationLogId, NotificationTarget},
};
use kaiwa_infra::{
    notification::{BanEmailDispatcher, NotificationSender},
    repository::{NotificationLog, NotificationLogRepository},
};
use kaiwa_shared::{event_log::event, log_business_event};

use super::TemplateRenderer;

/// 通知サービス
///
/// 通知イベントからメール生成・送信・記録までの全体フローを統合する。
/// `notify()` は fire-and-forget で、送信失敗してもエラーを返さない。
pub struct NotificationService {
    sender: Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
    log_repo: Arc<dyn NotificationLogRepository>,
    clock: Arc<dyn Clock>,
    base_url: String,
}

impl NotificationService {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        template_renderer: TemplateRenderer,
        log_repo: Arc<dyn NotificationLogRepository>,
        clock: Arc<dyn Clock>,
        base_url: String,
    ) -> Self {
        Self {
            sender,
            template_renderer,
            log_repo,
            clock,
            base_url,
        }
    }

    /// 通知を送信する（fire-and-forget）
    ///
    /// テンプレートレンダリング → メール送信 → ログ記録を行う。
    /// いずれのステップで失敗してもエラーを返さない（ログ出力のみ）。
    ///
    /// # 戻り値
    ///
    /// メールが実際に送信されたかどうか。呼び出し元の集計用で、
    /// false の場合も処理は正常に続行してよい。
    pub async fn notify(&self, notification: &Notification) -> bool {
        let event_type = notification.event_type();
        let event_type_str: &str = event_type.into();
        let recipient_email = notification.recipient_email().to_string();

        // テンプレートレンダリング
        let email = match self.template_renderer.render(notification, &self.base_url) {
            Ok(email) => email,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    event_type = event_type_str,
                    "通知テンプレートのレンダリングに失敗"
                );
                return false;
            }
        };

        let subject = email.subject.clone();

        // メール送信
        let (sent, status, error_message) = match self.sender.send_email(&email).await {
            Ok(()) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_SENT,
                    event.entity_type = event::entity_type::NOTIFICATION_LOG,
                    event.result = event::result::SUCCESS,
                    notification.event_type = event_type_str,
                    notification.recipient = %recipient_email,
                    "通知メール送信成功"
                );
                (true, "sent".to_string(), None)
            }
            Err(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.entity_type = event::entity_type::NOTIFICATION_LOG,
                    event.result = event::result::FAILURE,
                    notification.event_type = event_type_str,
                    notification.recipient = %recipient_email,
                    error = %e,
                    "通知メール送信失敗"
                );
                (false, "failed".to_string(), Some(e.to_string()))
            }
        };

        // 通知ログ記録
        let log = NotificationLog {
            id: NotificationLogId::new(),
            event_type: event_type_str.to_string(),
            recipient_email,
            subject,
            status,
            error_message,
            sent_at: self.clock.now(),
        };

        if let Err(e) = self.log_repo.insert(&log).await {
            tracing::error!(
                error = %e,
                "通知ログの記録に失敗"
            );
        }

        sent
    }
}

/// BAN 状態変化の判定結果を実際のメール配送に変換する実装
///
/// 判定ロジック側は `BanEmailDispatcher` にのみ依存するため、
/// 将来キュー経由の非同期配送に差し替える場合もこの実装を
/// 置き換えるだけでよい。
#[async_trait]
impl BanEmailDispatcher for NotificationService {
    async fn enqueue_ban_email(&self, target: &NotificationTarget) {
        self.notify(&Notification::UserBanned {
            target: target.clone(),
        })
        .await;
    }

    async fn enqueue_unban_email(&self, target: &NotificationTarget) {
        self.notify(&Notification::UserUnbanned {
            target: target.clone(),
        })
        .await;
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use kaiwa_domain::{
        clock::FixedClock,
        user::Email,
        value_objects::{FamilyName, GivenName},
    };
    use kaiwa_infra::mock::{MockNotificationLogRepository, MockNotificationSender};
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_service(
        sender: MockNotificationSender,
        log_repo: MockNotificationLogRepository,
    ) -> NotificationService {
        let template_renderer = TemplateRenderer::new().unwrap();
        let clock = FixedClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        NotificationService::new(
            Arc::new(sender),
            template_renderer,
            Arc::new(log_repo),
            Arc::new(clock),
            "http://localhost:5173".to_string(),
        )
    }

    fn make_target() -> NotificationTarget {
        NotificationTarget {
            email:       Email::new("suzuki@example.com").unwrap(),
            given_name:  GivenName::new("一郎").unwrap(),
            family_name: FamilyName::new("鈴木").unwrap(),
        }
    }

    fn make_notification() -> Notification {
        Notification::UnreadMessages {
            target:       make_target(),
            unread_count: 3,
        }
    }

    #[tokio::test]
    async fn test_送信成功時にlog_repoにstatus_sentで記録する() {
        let sender = MockNotificationSender::new();
        let log_repo = MockNotificationLogRepository::new();
        let service = make_service(sender.clone(), log_repo.clone());

        let sent = service.notify(&make_notification()).await;

        assert!(sent);
        let logs = log_repo.logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, "sent");
        assert!(logs[0].error_message.is_none());
        assert_eq!(logs[0].event_type, "unread_messages");
        assert_eq!(logs[0].recipient_email, "suzuki@example.com");
        assert_eq!(
            logs[0].sent_at,
            DateTime::from_timestamp(1_700_000_000, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_送信失敗時にlog_repoにstatus_failedで記録する() {
        let sender = MockNotificationSender::new();
        sender.fail_for("suzuki@example.com");
        let log_repo = MockNotificationLogRepository::new();
        let service = make_service(sender, log_repo.clone());

        let sent = service.notify(&make_notification()).await;

        assert!(!sent);
        let logs = log_repo.logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, "failed");
        assert!(logs[0].error_message.is_some());
    }

    #[tokio::test]
    async fn test_senderが送信メッセージを記録する() {
        let sender = MockNotificationSender::new();
        let log_repo = MockNotificationLogRepository::new();
        let service = make_service(sender.clone(), log_repo);

        service.notify(&make_notification()).await;

        let sent = sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "suzuki@example.com");
        assert_eq!(sent[0].subject, "[Kaiwa] 新着メッセージが 3 件あります");
    }

    #[tokio::test]
    async fn test_dispatcherとしてban通知メールを送信する() {
        let sender = MockNotificationSender::new();
        let log_repo = MockNotificationLogRepository::new();
        let service = make_service(sender.clone(), log_repo.clone());

        service.enqueue_ban_email(&make_target()).await;

        let sent = sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "[Kaiwa] アカウント停止のお知らせ");
        assert_eq!(log_repo.logs()[0].event_type, "user_banned");
    }

    #[tokio::test]
    async fn test_dispatcherとしてban解除通知メールを送信する() {
        let sender = MockNotificationSender::new();
        let log_repo = MockNotificationLogRepository::new();
        let service = make_service(sender.clone(), log_repo.clone());

        service.enqueue_unban_email(&make_target()).await;

        let sent = sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "[Kaiwa] アカウント停止解除のお知らせ");
        assert_eq!(log_repo.logs()[0].event_type, "user_unbanned");
    }
}
