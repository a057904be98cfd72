//! # 通知ワーカーエラー定義
//!
//! ユースケース層から呼び出し元に伝播するエラーを定義する。
//! メール送信の失敗はここには現れない（通知サービスが fire-and-forget で
//! ログに記録する）ため、伝播するのは永続化層のエラーのみ。

use thiserror::Error;

/// 通知ワーカーで発生するエラー
#[derive(Debug, Error)]
pub enum NotifierError {
   /// データベースエラー
   ///
   /// リポジトリ操作の失敗。スキャンや保存フックを中断させる。
   #[error("データベースエラー: {0}")]
   Database(#[from] kaiwa_infra::InfraError),
}
