//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`Notification`] | 通知イベント | 3 種類: 未読メッセージ、BAN、BAN 解除 |
//! | [`NotificationEventType`] | 通知イベント種別 | notification_logs への記録用 |
//! | [`NotificationTarget`] | 通知先 | メールアドレスと姓名のセット |
//!
//! ## 設計方針
//!
//! - **enum による通知イベント**: 各バリアントが通知メール 1 種類に対応
//! - **fire-and-forget**: 通知送信の失敗は呼び出し元の処理に影響しない
//! - **テンプレート分離**: 通知イベントとメール生成は分離
//!   （TemplateRenderer は notifier アプリ側）

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::{
    user::{Email, User},
    value_objects::{FamilyName, GivenName},
};

define_uuid_id! {
    /// 通知ログ ID（一意識別子）
    ///
    /// notification_logs テーブルの主キー。UUID v7 を使用。
    pub struct NotificationLogId;
}

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),

    /// 通知ログの記録に失敗
    #[error("通知ログの記録に失敗: {0}")]
    LogFailed(String),
}

/// 通知イベント種別
///
/// notification_logs テーブルの `event_type` カラムに格納される値。
/// snake_case でシリアライズされる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationEventType {
    /// 未読メッセージダイジェスト: 定期スキャンで未読があったユーザーに送信
    UnreadMessages,
    /// BAN 通知: プロフィールの BAN フラグが false → true に変化したとき
    UserBanned,
    /// BAN 解除通知: プロフィールの BAN フラグが true → false に変化したとき
    UserUnbanned,
}

/// 通知先
///
/// 通知メールの宛先と、本文の宛名に使う姓名のセット。
/// ユーザーエンティティから必要な属性だけを切り出して持ち運ぶ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTarget {
    pub email:       Email,
    pub given_name:  GivenName,
    pub family_name: FamilyName,
}

impl NotificationTarget {
    /// ユーザーエンティティから通知先を作成する
    pub fn from_user(user: &User) -> Self {
        Self {
            email:       user.email().clone(),
            given_name:  user.given_name().clone(),
            family_name: user.family_name().clone(),
        }
    }
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// 通知イベント
///
/// 各バリアントが通知メール 1 種類に対応する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// 未読メッセージダイジェスト: 未読数とともに本人へ送信
    UnreadMessages {
        target:       NotificationTarget,
        unread_count: i64,
    },
    /// BAN 通知: BAN された本人へ送信
    UserBanned { target: NotificationTarget },
    /// BAN 解除通知: BAN 解除された本人へ送信
    UserUnbanned { target: NotificationTarget },
}

impl Notification {
    /// 通知イベント種別を返す
    pub fn event_type(&self) -> NotificationEventType {
        match self {
            Self::UnreadMessages { .. } => NotificationEventType::UnreadMessages,
            Self::UserBanned { .. } => NotificationEventType::UserBanned,
            Self::UserUnbanned { .. } => NotificationEventType::UserUnbanned,
        }
    }

    /// 通知先を返す
    pub fn target(&self) -> &NotificationTarget {
        match self {
            Self::UnreadMessages { target, .. }
            | Self::UserBanned { target }
            | Self::UserUnbanned { target } => target,
        }
    }

    /// 受信者のメールアドレスを返す
    pub fn recipient_email(&self) -> &str {
        self.target().email.as_str()
    }
}
