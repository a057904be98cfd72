//! # UserRepository
//!
//! ユーザー情報の読み取りを担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **読み取り専用**: ユーザーの作成・更新は Web アプリケーション本体の
//!   管轄であり、通知サブシステムは参照のみ行う
//! - **全件走査**: 未読ダイジェストはすべてのユーザーを対象にスキャンする

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kaiwa_domain::{
   user::{Email, User, UserId},
   value_objects::{FamilyName, GivenName},
};
use sqlx::PgPool;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
///
/// ユーザー情報の読み取り操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait UserRepository: Send + Sync {
   /// 全ユーザーを取得する
   ///
   /// 未読ダイジェストのスキャン対象。登録順に返す。
   async fn find_all(&self) -> Result<Vec<User>, InfraError>;
}

/// users テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
   id:          uuid::Uuid,
   email:       String,
   given_name:  String,
   family_name: String,
   created_at:  DateTime<Utc>,
}

impl UserRow {
   /// 行をドメインモデルに復元する
   fn into_user(self) -> Result<User, InfraError> {
      Ok(User::from_db(
         UserId::from_uuid(self.id),
         Email::new(&self.email).map_err(|e| InfraError::unexpected(e.to_string()))?,
         GivenName::new(&self.given_name).map_err(|e| InfraError::unexpected(e.to_string()))?,
         FamilyName::new(&self.family_name).map_err(|e| InfraError::unexpected(e.to_string()))?,
         self.created_at,
      ))
   }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
   pool: PgPool,
}

impl PostgresUserRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
   async fn find_all(&self) -> Result<Vec<User>, InfraError> {
      let rows = sqlx::query_as::<_, UserRow>(
         r#"
            SELECT
                id,
                email,
                given_name,
                family_name,
                created_at
            FROM users
            ORDER BY created_at
            "#,
      )
      .fetch_all(&self.pool)
      .await?;

      rows.into_iter().map(UserRow::into_user).collect()
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_トレイトはsendとsyncを実装している() {
      fn assert_send_sync<T: Send + Sync>() {}
      assert_send_sync::<PostgresUserRepository>();
   }
}
