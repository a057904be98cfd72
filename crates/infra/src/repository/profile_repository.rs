//! # ProfileRepository
//!
//! ユーザープロフィールの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ユーザーを JOIN で同時取得**: BAN 状態変化の判定は通知先
//!   （メールアドレスと姓名）を必要とするため、プロフィール取得時に
//!   ユーザーも復元する（N+1 の回避）
//! - **INSERT / UPDATE を分離**: キーの有無（`ProfileKey`）が
//!   どちらの操作かを決める

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kaiwa_domain::{
    profile::{ProfileId, UserProfile},
    user::{Email, User, UserId},
    value_objects::{FamilyName, GivenName},
};
use sqlx::PgPool;

use crate::error::InfraError;

/// プロフィールリポジトリトレイト
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// ID でプロフィールを検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(profile))`: プロフィールが見つかった場合
    /// - `Ok(None)`: プロフィールが見つからない場合（正常系。
    ///   既存キーの初回保存などで発生しうる）
    /// - `Err(_)`: データベースエラー
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<UserProfile>, InfraError>;

    /// プロフィールを挿入する
    ///
    /// キーが割り当て済み（`Persisted`）のプロフィールを渡すこと。
    async fn insert(&self, profile: &UserProfile) -> Result<(), InfraError>;

    /// プロフィールを更新する
    async fn update(&self, profile: &UserProfile) -> Result<(), InfraError>;
}

/// user_profiles と users を JOIN した行
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id:              uuid::Uuid,
    is_banned:       bool,
    updated_at:      DateTime<Utc>,
    user_id:         uuid::Uuid,
    email:           String,
    given_name:      String,
    family_name:     String,
    user_created_at: DateTime<Utc>,
}

impl ProfileRow {
    /// 行をドメインモデルに復元する
    fn into_profile(self) -> Result<UserProfile, InfraError> {
        let user = User::from_db(
            UserId::from_uuid(self.user_id),
            Email::new(&self.email).map_err(|e| InfraError::unexpected(e.to_string()))?,
            GivenName::new(&self.given_name).map_err(|e| InfraError::unexpected(e.to_string()))?,
            FamilyName::new(&self.family_name)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            self.user_created_at,
        );

        Ok(UserProfile::from_db(
            ProfileId::from_uuid(self.id),
            user,
            self.is_banned,
            self.updated_at,
        ))
    }
}

/// PostgreSQL 実装の ProfileRepository
#[derive(Debug, Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 書き込み対象のキーを取り出す
///
/// 未保存プロフィールを書き込みメソッドに渡すのは呼び出し側の誤り。
fn persisted_id(profile: &UserProfile) -> Result<&ProfileId, InfraError> {
    profile
        .id()
        .ok_or_else(|| InfraError::unexpected("未保存プロフィールは書き込めません".to_string()))
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<UserProfile>, InfraError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                p.id,
                p.is_banned,
                p.updated_at,
                u.id AS user_id,
                u.email,
                u.given_name,
                u.family_name,
                u.created_at AS user_created_at
            FROM user_profiles p
            INNER JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProfileRow::into_profile).transpose()
    }

    async fn insert(&self, profile: &UserProfile) -> Result<(), InfraError> {
        let id = persisted_id(profile)?;

        sqlx::query(
            r#"
            INSERT INTO user_profiles (id, user_id, is_banned, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id.as_uuid())
        .bind(profile.user().id().as_uuid())
        .bind(profile.is_banned())
        .bind(profile.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, profile: &UserProfile) -> Result<(), InfraError> {
        let id = persisted_id(profile)?;

        sqlx::query(
            r#"
            UPDATE user_profiles
            SET is_banned = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(profile.is_banned())
        .bind(profile.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresProfileRepository>();
    }
}
