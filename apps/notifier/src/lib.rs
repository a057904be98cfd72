//! # Kaiwa 通知ワーカー
//!
//! チャットアプリケーション本体のデータベースを参照し、メール通知を
//! 送信するワーカー。2 つの独立した通知経路を持つ:
//!
//! - **未読メッセージダイジェスト**: 全ユーザーをスキャンし、未読が
//!   あるユーザーにのみ件数入りのメールを送信する（バイナリの
//!   エントリーポイント。外部スケジューラから定期起動される）
//! - **BAN 状態変化通知**: プロフィール保存時のフックとして、直前の
//!   状態と比較して BAN / BAN 解除のメールを送信する（ライブラリとして
//!   Web アプリケーション本体の保存経路から呼び出される）
//!
//! ## モジュール構成
//!
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - ワーカー固有のエラー定義
//! - [`usecase`] - 通知ユースケースと通知サービス

pub mod config;
pub mod error;
pub mod usecase;
