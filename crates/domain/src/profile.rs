//! # ユーザープロフィールと BAN 状態変化の判定
//!
//! プロフィールエンティティと、保存時の BAN 状態変化を判定する
//! 純粋なロジックを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`UserProfile`] | ユーザープロフィール | ユーザーと 1:1、BAN フラグを保持 |
//! | [`ProfileKey`] | プロフィールキー | 未保存 / 保存済みを型で区別 |
//! | [`BanStatusChange`] | BAN 状態変化 | 保存時の判定結果（通知要否） |
//!
//! ## 設計方針
//!
//! - **「主キーが null」を和型で表現**: `ProfileKey::Unsaved` /
//!   `ProfileKey::Persisted(ProfileId)` により null チェックを排除
//! - **判定は純粋関数**: [`UserProfile::ban_status_change`] は
//!   (キーの有無, 直前の状態, 両者の BAN フラグ) のみから結果が決まり、
//!   副作用を持たない。メール送信は呼び出し元が判定結果を変換して行う
//! - **ユーザーを内包**: 通知先の解決に追加の検索を要しないよう、
//!   プロフィールは対応するユーザーエンティティを内包する

use chrono::{DateTime, Utc};

use crate::{
    notification::NotificationTarget,
    user::User,
};

define_uuid_id! {
    /// プロフィール ID（一意識別子）
    ///
    /// user_profiles テーブルの主キー。UUID v7 を使用。
    pub struct ProfileId;
}

/// プロフィールキー
///
/// 永続化前のレコードには主キーが存在しないことを型で表現する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileKey {
    /// 未保存（初回 INSERT 前）
    Unsaved,
    /// 保存済み
    Persisted(ProfileId),
}

impl ProfileKey {
    /// 保存済みか判定する
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted(_))
    }
}

/// BAN 状態変化の判定結果
///
/// [`UserProfile::ban_status_change`] の戻り値。`NoAction` 以外の
/// バリアントは、ちょうど 1 回のメールディスパッチに変換される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BanStatusChange {
    /// 状態変化なし（通知不要）
    NoAction,
    /// BAN された（BAN 通知を送る）
    Banned(NotificationTarget),
    /// BAN 解除された（解除通知を送る）
    Unbanned(NotificationTarget),
}

/// ユーザープロフィールエンティティ
///
/// ユーザーと 1:1 で対応し、BAN フラグを保持する。
/// 通知サブシステムが参照する属性のみを持つ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    key: ProfileKey,
    user: User,
    is_banned: bool,
    updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// 新しい未保存プロフィールを作成する
    ///
    /// # 不変条件
    ///
    /// - 作成時のキーは `Unsaved`
    /// - 作成時の BAN フラグは false
    pub fn new(user: User, now: DateTime<Utc>) -> Self {
        Self {
            key: ProfileKey::Unsaved,
            user,
            is_banned: false,
            updated_at: now,
        }
    }

    /// 既存のデータからプロフィールを復元する（データベースから取得時）
    pub fn from_db(id: ProfileId, user: User, is_banned: bool, updated_at: DateTime<Utc>) -> Self {
        Self {
            key: ProfileKey::Persisted(id),
            user,
            is_banned,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn key(&self) -> &ProfileKey {
        &self.key
    }

    /// 保存済みの場合のみプロフィール ID を返す
    pub fn id(&self) -> Option<&ProfileId> {
        match &self.key {
            ProfileKey::Unsaved => None,
            ProfileKey::Persisted(id) => Some(id),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn is_banned(&self) -> bool {
        self.is_banned
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // 状態遷移メソッド

    /// 初回 INSERT 後にキーを割り当てた新しいインスタンスを返す
    pub fn persisted(self, id: ProfileId) -> Self {
        Self {
            key: ProfileKey::Persisted(id),
            ..self
        }
    }

    /// BAN フラグを変更した新しいインスタンスを返す
    pub fn with_ban_flag(self, is_banned: bool, now: DateTime<Utc>) -> Self {
        Self {
            is_banned,
            updated_at: now,
            ..self
        }
    }

    // ビジネスロジックメソッド

    /// 直前の状態と比較して BAN 状態の変化を判定する
    ///
    /// `self` は保存しようとしている状態、`previous` は永続化層から
    /// 取得した直前の行（存在しなければ `None`）。判定は以下の順に
    /// 打ち切られる:
    ///
    /// 1. 未保存レコード → `NoAction`（比較対象の「直前の状態」が
    ///    そもそも存在しない。呼び出し元は検索自体を省略してよい）
    /// 2. 直前の行が見つからない → `NoAction`（既存キーの初回保存は
    ///    正常系として扱う）
    /// 3. BAN フラグが変化していない → `NoAction`
    /// 4. 変化している → BAN なら `Banned`、解除なら `Unbanned`
    ///
    /// 純粋関数: 同じ入力に対して常に同じ結果を返し、副作用を持たない。
    pub fn ban_status_change(&self, previous: Option<&UserProfile>) -> BanStatusChange {
        if !self.key.is_persisted() {
            return BanStatusChange::NoAction;
        }

        let Some(previous) = previous else {
            return BanStatusChange::NoAction;
        };

        if previous.is_banned == self.is_banned {
            return BanStatusChange::NoAction;
        }

        let target = NotificationTarget::from_user(&self.user);
        if self.is_banned {
            BanStatusChange::Banned(target)
        } else {
            BanStatusChange::Unbanned(target)
        }
    }
}
