//! # 未読メッセージダイジェスト
//!
//! 全ユーザーをスキャンし、未読メッセージがあるユーザーにのみ
//! 件数入りのメールを送信するユースケース。
//!
//! ## 設計方針
//!
//! - **未読数の定義**: ユーザーが参加する各会話について、相手参加者が
//!   送信したメッセージ数を合計する。既読管理テーブルは持たない
//! - **部分失敗の分離**: あるユーザーへの送信失敗は記録するのみで、
//!   残りのユーザーの処理を中断しない
//! - **会話行を独立にカウント**: 同じユーザーペアの会話行が複数ある
//!   場合もマージせず、各行の未読数をそのまま合算する

use std::sync::Arc;

use kaiwa_domain::{
    notification::{Notification, NotificationTarget},
    user::UserId,
};
use kaiwa_infra::repository::{ConversationRepository, MessageRepository, UserRepository};
use kaiwa_shared::{event_log::event, log_business_event};

use super::notification::NotificationService;
use crate::error::NotifierError;

/// ダイジェスト実行結果のサマリ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestSummary {
    /// スキャンしたユーザー数
    pub users_scanned: usize,
    /// 送信に成功した通知数
    pub notifications_sent: usize,
}

/// 未読メッセージダイジェストユースケース
///
/// 外部スケジューラから定期的に起動されることを想定した単発スキャン。
/// 同一ユーザーに対する並行実行は想定しない（起動間隔で直列化する）。
pub struct UnreadDigestUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
    conversation_repository: Arc<dyn ConversationRepository>,
    message_repository: Arc<dyn MessageRepository>,
    notification_service: Arc<NotificationService>,
}

impl UnreadDigestUseCaseImpl {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        conversation_repository: Arc<dyn ConversationRepository>,
        message_repository: Arc<dyn MessageRepository>,
        notification_service: Arc<NotificationService>,
    ) -> Self {
        Self {
            user_repository,
            conversation_repository,
            message_repository,
            notification_service,
        }
    }

    /// 全ユーザーをスキャンし、未読があるユーザーに通知を送る
    ///
    /// 1. 全ユーザーを取得
    /// 2. ユーザーごとに参加中の会話を列挙し、未読数を合算
    /// 3. 未読数が 1 以上のユーザーにのみ通知を送信
    ///
    /// 送信の失敗は通知サービスが記録し、スキャンは続行する。
    /// リポジトリのエラーのみ呼び出し元に伝播する。
    pub async fn run(&self) -> Result<DigestSummary, NotifierError> {
        let users = self.user_repository.find_all().await?;

        let mut summary = DigestSummary {
            users_scanned: 0,
            notifications_sent: 0,
        };

        for user in users {
            summary.users_scanned += 1;

            let unread_count = self.count_unread(user.id()).await?;
            if unread_count == 0 {
                continue;
            }

            let notification = Notification::UnreadMessages {
                target: NotificationTarget::from_user(&user),
                unread_count,
            };

            if self.notification_service.notify(&notification).await {
                summary.notifications_sent += 1;
            }
        }

        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::DIGEST_COMPLETED,
            event.result = event::result::SUCCESS,
            digest.users_scanned = summary.users_scanned,
            digest.notifications_sent = summary.notifications_sent,
            "未読ダイジェストのスキャン完了"
        );

        Ok(summary)
    }

    /// 指定ユーザーの未読メッセージ数を会話横断で合算する
    async fn count_unread(&self, user_id: &UserId) -> Result<i64, NotifierError> {
        let conversations = self
            .conversation_repository
            .find_by_participant(user_id)
            .await?;

        let mut total = 0;
        for conversation in &conversations {
            // 相手が解決できない会話行は集計対象外
            let Some(other) = conversation.other_participant(user_id) else {
                continue;
            };

            total += self
                .message_repository
                .count_by_sender(conversation.id(), other)
                .await?;
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use kaiwa_domain::{
        clock::FixedClock,
        conversation::{Conversation, ConversationId, Message, MessageId},
        user::{Email, User, UserId},
        value_objects::{FamilyName, GivenName, MessageBody},
    };
    use kaiwa_infra::mock::{
        MockConversationRepository,
        MockMessageRepository,
        MockNotificationLogRepository,
        MockNotificationSender,
        MockUserRepository,
    };
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::usecase::notification::TemplateRenderer;

    // フィクスチャとヘルパー

    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn make_user(email: &str, now: DateTime<Utc>) -> User {
        User::new(
            UserId::new(),
            Email::new(email).unwrap(),
            GivenName::new("太郎").unwrap(),
            FamilyName::new("山田").unwrap(),
            now,
        )
    }

    fn make_conversation(a: &User, b: &User, now: DateTime<Utc>) -> Conversation {
        Conversation::new(ConversationId::new(), a.id().clone(), b.id().clone(), now).unwrap()
    }

    fn make_message(conversation: &Conversation, sender: &User, now: DateTime<Utc>) -> Message {
        Message::new(
            MessageId::new(),
            conversation.id().clone(),
            sender.id().clone(),
            MessageBody::new("テストメッセージ").unwrap(),
            now,
        )
    }

    /// モック一式と SUT を組み立てるテストセットアップ
    struct DigestTestSetup {
        sut: UnreadDigestUseCaseImpl,
        user_repo: MockUserRepository,
        conversation_repo: MockConversationRepository,
        message_repo: MockMessageRepository,
        sender: MockNotificationSender,
    }

    fn setup() -> DigestTestSetup {
        let user_repo = MockUserRepository::new();
        let conversation_repo = MockConversationRepository::new();
        let message_repo = MockMessageRepository::new();
        let sender = MockNotificationSender::new();
        let log_repo = MockNotificationLogRepository::new();

        let service = NotificationService::new(
            Arc::new(sender.clone()),
            TemplateRenderer::new().unwrap(),
            Arc::new(log_repo),
            Arc::new(FixedClock::new(
                DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            )),
            "http://localhost:5173".to_string(),
        );

        let sut = UnreadDigestUseCaseImpl::new(
            Arc::new(user_repo.clone()),
            Arc::new(conversation_repo.clone()),
            Arc::new(message_repo.clone()),
            Arc::new(service),
        );

        DigestTestSetup {
            sut,
            user_repo,
            conversation_repo,
            message_repo,
            sender,
        }
    }

    // テスト

    #[rstest]
    #[tokio::test]
    async fn test_会話のないユーザーにはメールを送らない(now: DateTime<Utc>) {
        let s = setup();
        s.user_repo.add_user(make_user("alone@example.com", now));

        let summary = s.sut.run().await.unwrap();

        assert_eq!(s.sender.sent_emails().len(), 0);
        assert_eq!(
            summary,
            DigestSummary {
                users_scanned: 1,
                notifications_sent: 0,
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_自分が全メッセージを送った会話は未読0件(now: DateTime<Utc>) {
        let s = setup();
        let alice = make_user("alice@example.com", now);
        let bob = make_user("bob@example.com", now);
        let conversation = make_conversation(&alice, &bob, now);

        s.user_repo.add_user(alice.clone());
        s.conversation_repo.add_conversation(conversation.clone());
        // alice 自身の送信のみ
        s.message_repo.add_message(make_message(&conversation, &alice, now));
        s.message_repo.add_message(make_message(&conversation, &alice, now));

        s.sut.run().await.unwrap();

        assert_eq!(s.sender.sent_emails().len(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn test_未読があるユーザーにのみ件数入りメールを1通送る(
        now: DateTime<Utc>,
    ) {
        let s = setup();
        let alice = make_user("alice@example.com", now);
        let bob = make_user("bob@example.com", now);
        let carol = make_user("carol@example.com", now);

        // alice-bob は bob から 2 通、alice-carol は 0 通
        let with_bob = make_conversation(&alice, &bob, now);
        let with_carol = make_conversation(&alice, &carol, now);
        s.user_repo.add_user(alice.clone());
        s.user_repo.add_user(bob.clone());
        s.conversation_repo.add_conversation(with_bob.clone());
        s.conversation_repo.add_conversation(with_carol);
        s.message_repo.add_message(make_message(&with_bob, &bob, now));
        s.message_repo.add_message(make_message(&with_bob, &bob, now));

        let summary = s.sut.run().await.unwrap();

        // bob 自身は alice の送信を受け取っていないため、メールは alice 宛の 1 通だけ
        let sent = s.sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "alice@example.com");
        assert!(sent[0].subject.contains('2'));
        assert!(sent[0].text_body.contains('2'));
        assert_eq!(
            summary,
            DigestSummary {
                users_scanned: 2,
                notifications_sent: 1,
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_複数の会話の未読を合算する(now: DateTime<Utc>) {
        let s = setup();
        let alice = make_user("alice@example.com", now);
        let bob = make_user("bob@example.com", now);
        let carol = make_user("carol@example.com", now);

        let with_bob = make_conversation(&alice, &bob, now);
        let with_carol = make_conversation(&alice, &carol, now);
        s.user_repo.add_user(alice.clone());
        s.conversation_repo.add_conversation(with_bob.clone());
        s.conversation_repo.add_conversation(with_carol.clone());
        s.message_repo.add_message(make_message(&with_bob, &bob, now));
        s.message_repo.add_message(make_message(&with_carol, &carol, now));
        s.message_repo.add_message(make_message(&with_carol, &carol, now));

        s.sut.run().await.unwrap();

        let sent = s.sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].subject.contains('3'));
    }

    #[rstest]
    #[tokio::test]
    async fn test_同じペアの会話行は独立にカウントする(now: DateTime<Utc>) {
        let s = setup();
        let alice = make_user("alice@example.com", now);
        let bob = make_user("bob@example.com", now);

        // 同じ alice-bob ペアに会話行が 2 つ存在するケース
        let first = make_conversation(&alice, &bob, now);
        let second = make_conversation(&alice, &bob, now);
        s.user_repo.add_user(alice.clone());
        s.conversation_repo.add_conversation(first.clone());
        s.conversation_repo.add_conversation(second.clone());
        s.message_repo.add_message(make_message(&first, &bob, now));
        s.message_repo.add_message(make_message(&second, &bob, now));

        s.sut.run().await.unwrap();

        let sent = s.sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].subject.contains('2'));
    }

    #[rstest]
    #[tokio::test]
    async fn test_1ユーザーへの送信失敗が他のユーザーを止めない(
        now: DateTime<Utc>,
    ) {
        let s = setup();
        let alice = make_user("alice@example.com", now);
        let bob = make_user("bob@example.com", now);

        // 両者に相手からの未読があり、alice への送信だけ失敗する
        let conversation = make_conversation(&alice, &bob, now);
        s.user_repo.add_user(alice.clone());
        s.user_repo.add_user(bob.clone());
        s.conversation_repo.add_conversation(conversation.clone());
        s.message_repo.add_message(make_message(&conversation, &bob, now));
        s.message_repo.add_message(make_message(&conversation, &alice, now));
        s.sender.fail_for("alice@example.com");

        let summary = s.sut.run().await.unwrap();

        let sent = s.sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "bob@example.com");
        assert_eq!(
            summary,
            DigestSummary {
                users_scanned: 2,
                notifications_sent: 1,
            }
        );
    }
}
