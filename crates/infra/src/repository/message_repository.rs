//! # MessageRepository
//!
//! メッセージの集計を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **COUNT のみ**: 未読ダイジェストはメッセージ本文を必要としないため、
//!   件数の集計だけを提供する

use async_trait::async_trait;
use kaiwa_domain::{conversation::ConversationId, user::UserId};
use sqlx::PgPool;

use crate::error::InfraError;

/// メッセージリポジトリトレイト
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// 指定会話内で、指定ユーザーが送信したメッセージ数を返す
    ///
    /// 未読数の定義（相手参加者が送信したメッセージの件数）の
    /// 基礎となる集計。
    async fn count_by_sender(
        &self,
        conversation_id: &ConversationId,
        sender_id: &UserId,
    ) -> Result<i64, InfraError>;
}

/// PostgreSQL 実装の MessageRepository
#[derive(Debug, Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn count_by_sender(
        &self,
        conversation_id: &ConversationId,
        sender_id: &UserId,
    ) -> Result<i64, InfraError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM messages
            WHERE conversation_id = $1 AND sender_id = $2
            "#,
        )
        .bind(conversation_id.as_uuid())
        .bind(sender_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
