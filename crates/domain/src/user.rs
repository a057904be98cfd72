//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`User`] | ユーザー | 通知の宛先となるアカウント |
//! | [`Email`] | メールアドレス | 通知メールの送信先 |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: UserId は UUID をラップし、型安全性を確保
//! - **不変性**: エンティティフィールドは不変、認証・更新系の操作は
//!   このサブシステムの管轄外
//! - **バリデーション**: 値オブジェクトの生成時に検証ロジックを実行
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use kaiwa_domain::{
//!     user::{Email, User, UserId},
//!     value_objects::{FamilyName, GivenName},
//! };
//!
//! let user = User::new(
//!     UserId::new(),
//!     Email::new("user@example.com")?,
//!     GivenName::new("太郎")?,
//!     FamilyName::new("山田")?,
//!     chrono::Utc::now(),
//! );
//!
//! assert_eq!(user.email().as_str(), "user@example.com");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};

use crate::{
    DomainError,
    value_objects::{FamilyName, GivenName},
};

define_uuid_id! {
    /// ユーザー ID（一意識別子）
    ///
    /// UUID v7 を使用し、生成順にソート可能。
    /// Newtype パターンで型安全性を確保。
    pub struct UserId;
}

/// メールアドレス（値オブジェクト）
///
/// RFC 5322 に準拠した形式を要求する。
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `@` を含む
    /// - 最大 255 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        // 基本的な構造検証: local@domain の形式であること
        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは255文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーエンティティ
///
/// 通知の宛先となるアカウントを表現する。認証情報やプロフィール画像などは
/// 別サブシステムで管理され、ここでは通知に必要な属性のみを持つ。
///
/// # 不変条件
///
/// - `email` はシステム内で一意
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    given_name: GivenName,
    family_name: FamilyName,
    created_at: DateTime<Utc>,
}

impl User {
    /// 新しいユーザーを作成する
    ///
    /// # 引数
    ///
    /// - `id`: ユーザー ID
    /// - `email`: メールアドレス
    /// - `given_name`: 名
    /// - `family_name`: 姓
    /// - `now`: 現在日時（呼び出し元から注入）
    pub fn new(
        id: UserId,
        email: Email,
        given_name: GivenName,
        family_name: FamilyName,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            given_name,
            family_name,
            created_at: now,
        }
    }

    /// 既存のデータからユーザーを復元する（データベースから取得時）
    pub fn from_db(
        id: UserId,
        email: Email,
        given_name: GivenName,
        family_name: FamilyName,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            given_name,
            family_name,
            created_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn given_name(&self) -> &GivenName {
        &self.given_name
    }

    pub fn family_name(&self) -> &FamilyName {
        &self.family_name
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

    // フィクスチャ

    /// テスト用の固定タイムスタンプ
    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[fixture]
    fn user(now: DateTime<Utc>) -> User {
        User::new(
            UserId::new(),
            Email::new("user@example.com").unwrap(),
            GivenName::new("太郎").unwrap(),
            FamilyName::new("山田").unwrap(),
            now,
        )
    }

    // Email のテスト

    #[test]
    fn test_メールアドレスは正常な形式を受け入れる() {
        assert!(Email::new("user@example.com").is_ok());
    }

    #[rstest]
    #[case("", "空文字列")]
    #[case("no-at-sign", "@記号なし")]
    #[case("@", "@のみ")]
    #[case("@example.com", "ローカル部分が空")]
    #[case("user@", "ドメイン部分が空")]
    #[case(&format!("{}@example.com", "a".repeat(256)), "255文字超過")]
    fn test_メールアドレスは不正な形式を拒否する(
        #[case] input: &str,
        #[case] _reason: &str,
    ) {
        assert!(Email::new(input).is_err());
    }

    // User のテスト

    #[rstest]
    fn test_新規ユーザーのcreated_atは注入された値と一致する(
        now: DateTime<Utc>,
        user: User,
    ) {
        assert_eq!(user.created_at(), now);
    }

    #[rstest]
    fn test_ユーザーから通知に必要な属性を取得できる(user: User) {
        assert_eq!(user.email().as_str(), "user@example.com");
        assert_eq!(user.given_name().as_str(), "太郎");
        assert_eq!(user.family_name().as_str(), "山田");
    }

    #[rstest]
    fn test_from_dbは渡された値をそのまま保持する(now: DateTime<Utc>) {
        let id = UserId::new();
        let user = User::from_db(
            id.clone(),
            Email::new("restore@example.com").unwrap(),
            GivenName::new("花子").unwrap(),
            FamilyName::new("佐藤").unwrap(),
            now,
        );

        assert_eq!(user.id(), &id);
        assert_eq!(user.created_at(), now);
    }
}
