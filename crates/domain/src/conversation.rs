//! # 会話とメッセージ
//!
//! 2 者間のチャットスレッドを表現するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`Conversation`] | 会話 | 2 ユーザー間のメッセージスレッド |
//! | [`Message`] | メッセージ | 会話に属する 1 通の発言 |
//!
//! ## 設計方針
//!
//! - **参加者は順不同のペア**: 検索時は participant_1 / participant_2 の
//!   どちら側かを区別しない
//! - **不変条件をコンストラクタで強制**: 参加者が同一ユーザーの会話は
//!   生成できない
//! - **メッセージは不変**: 作成後の編集操作を提供しない
//!
//! ## 未読数の定義
//!
//! ユーザー U の会話 C における未読数は「C のメッセージのうち、
//! 相手参加者が送信したものの件数」とする。U 自身が送信した
//! メッセージは未読数に含まれない。

use chrono::{DateTime, Utc};

use crate::{DomainError, user::UserId, value_objects::MessageBody};

define_uuid_id! {
    /// 会話 ID（一意識別子）
    pub struct ConversationId;
}

define_uuid_id! {
    /// メッセージ ID（一意識別子）
    pub struct MessageId;
}

/// 会話エンティティ
///
/// 2 ユーザー間のメッセージスレッドを表現する。
///
/// # 不変条件
///
/// - `participant_1` と `participant_2` は異なるユーザー
///
/// 同じユーザーペアに対して複数の会話行が存在しうる。その場合、
/// 未読数の集計では各行を独立した会話として扱う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    id: ConversationId,
    participant_1: UserId,
    participant_2: UserId,
    created_at: DateTime<Utc>,
}

impl Conversation {
    /// 新しい会話を作成する
    ///
    /// # エラー
    ///
    /// 参加者が同一ユーザーの場合は `DomainError::Validation` を返す。
    pub fn new(
        id: ConversationId,
        participant_1: UserId,
        participant_2: UserId,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if participant_1 == participant_2 {
            return Err(DomainError::Validation(
                "会話の参加者は異なるユーザーである必要があります".to_string(),
            ));
        }

        Ok(Self {
            id,
            participant_1,
            participant_2,
            created_at: now,
        })
    }

    /// 既存のデータから会話を復元する（データベースから取得時）
    pub fn from_db(
        id: ConversationId,
        participant_1: UserId,
        participant_2: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            participant_1,
            participant_2,
            created_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn participant_1(&self) -> &UserId {
        &self.participant_1
    }

    pub fn participant_2(&self) -> &UserId {
        &self.participant_2
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // ビジネスロジックメソッド

    /// 指定ユーザーがこの会話の参加者か判定する
    pub fn involves(&self, user_id: &UserId) -> bool {
        &self.participant_1 == user_id || &self.participant_2 == user_id
    }

    /// 指定ユーザーから見た相手参加者を返す
    ///
    /// 指定ユーザーがこの会話の参加者でない場合は `None` を返す。
    pub fn other_participant(&self, user_id: &UserId) -> Option<&UserId> {
        if &self.participant_1 == user_id {
            Some(&self.participant_2)
        } else if &self.participant_2 == user_id {
            Some(&self.participant_1)
        } else {
            None
        }
    }
}

/// メッセージエンティティ
///
/// 会話に属する 1 通の発言を表現する。作成後は不変。
///
/// # 不変条件
///
/// - `sender_id` は所属する会話の参加者のいずれか
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    conversation_id: ConversationId,
    sender_id: UserId,
    body: MessageBody,
    created_at: DateTime<Utc>,
}

impl Message {
    /// 新しいメッセージを作成する
    pub fn new(
        id: MessageId,
        conversation_id: ConversationId,
        sender_id: UserId,
        body: MessageBody,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            body,
            created_at: now,
        }
    }

    /// 既存のデータからメッセージを復元する（データベースから取得時）
    pub fn from_db(
        id: MessageId,
        conversation_id: ConversationId,
        sender_id: UserId,
        body: MessageBody,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            body,
            created_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    pub fn sender_id(&self) -> &UserId {
        &self.sender_id
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    // Conversation のテスト

    #[rstest]
    fn test_異なる参加者の会話は作成できる(now: DateTime<Utc>) {
        let result = Conversation::new(ConversationId::new(), UserId::new(), UserId::new(), now);
        assert!(result.is_ok());
    }

    #[rstest]
    fn test_同一参加者の会話は作成できない(now: DateTime<Utc>) {
        let user = UserId::new();
        let result = Conversation::new(ConversationId::new(), user.clone(), user, now);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[rstest]
    fn test_participant_1から見た相手はparticipant_2(now: DateTime<Utc>) {
        let alice = UserId::new();
        let bob = UserId::new();
        let conversation =
            Conversation::new(ConversationId::new(), alice.clone(), bob.clone(), now).unwrap();

        assert_eq!(conversation.other_participant(&alice), Some(&bob));
    }

    #[rstest]
    fn test_participant_2から見た相手はparticipant_1(now: DateTime<Utc>) {
        let alice = UserId::new();
        let bob = UserId::new();
        let conversation =
            Conversation::new(ConversationId::new(), alice.clone(), bob.clone(), now).unwrap();

        assert_eq!(conversation.other_participant(&bob), Some(&alice));
    }

    #[rstest]
    fn test_参加者でないユーザーから見た相手はいない(now: DateTime<Utc>) {
        let conversation =
            Conversation::new(ConversationId::new(), UserId::new(), UserId::new(), now).unwrap();
        let outsider = UserId::new();

        assert_eq!(conversation.other_participant(&outsider), None);
        assert!(!conversation.involves(&outsider));
    }

    #[rstest]
    fn test_involvesは両方の参加者に対してtrueを返す(now: DateTime<Utc>) {
        let alice = UserId::new();
        let bob = UserId::new();
        let conversation =
            Conversation::new(ConversationId::new(), alice.clone(), bob.clone(), now).unwrap();

        assert!(conversation.involves(&alice));
        assert!(conversation.involves(&bob));
    }

    // Message のテスト

    #[rstest]
    fn test_メッセージは作成時の属性を保持する(now: DateTime<Utc>) {
        let conversation_id = ConversationId::new();
        let sender = UserId::new();
        let message = Message::new(
            MessageId::new(),
            conversation_id.clone(),
            sender.clone(),
            MessageBody::new("こんにちは").unwrap(),
            now,
        );

        assert_eq!(message.conversation_id(), &conversation_id);
        assert_eq!(message.sender_id(), &sender);
        assert_eq!(message.body().as_str(), "こんにちは");
        assert_eq!(message.created_at(), now);
    }
}
