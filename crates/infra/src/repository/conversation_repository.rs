//! # ConversationRepository
//!
//! 会話情報の読み取りを担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **参加者は順不同**: `participant_1` / `participant_2` のどちら側に
//!   格納されていても同じ条件でヒットする
//! - **行を独立に返す**: 同じユーザーペアの会話行が複数あっても
//!   マージしない（未読数の集計では各行を独立にカウントする）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kaiwa_domain::{
    conversation::{Conversation, ConversationId},
    user::UserId,
};
use sqlx::PgPool;

use crate::error::InfraError;

/// 会話リポジトリトレイト
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// 指定ユーザーが参加しているすべての会話を取得する
    ///
    /// どちら側の参加者として格納されているかは区別しない。
    async fn find_by_participant(&self, user_id: &UserId)
    -> Result<Vec<Conversation>, InfraError>;
}

/// conversations テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct ConversationRow {
    id:            uuid::Uuid,
    participant_1: uuid::Uuid,
    participant_2: uuid::Uuid,
    created_at:    DateTime<Utc>,
}

impl ConversationRow {
    fn into_conversation(self) -> Conversation {
        Conversation::from_db(
            ConversationId::from_uuid(self.id),
            UserId::from_uuid(self.participant_1),
            UserId::from_uuid(self.participant_2),
            self.created_at,
        )
    }
}

/// PostgreSQL 実装の ConversationRepository
#[derive(Debug, Clone)]
pub struct PostgresConversationRepository {
    pool: PgPool,
}

impl PostgresConversationRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
    async fn find_by_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Conversation>, InfraError> {
        let rows = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT
                id,
                participant_1,
                participant_2,
                created_at
            FROM conversations
            WHERE participant_1 = $1 OR participant_2 = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(ConversationRow::into_conversation)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresConversationRepository>();
    }
}
