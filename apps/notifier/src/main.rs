//! # 通知ワーカーのエントリーポイント
//!
//! 未読メッセージダイジェストのスキャンを 1 回実行して終了する。
//! 定期実行は外部スケジューラ（cron / CronJob）が担い、起動間隔で
//! 実行が直列化されることを前提とする。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `NOTIFICATION_BACKEND` | No | `smtp` / `ses` / `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` | No | SMTP ホスト（デフォルト: `localhost`） |
//! | `SMTP_PORT` | No | SMTP ポート（デフォルト: `1025`） |
//! | `NOTIFICATION_FROM_ADDRESS` | No | 送信元メールアドレス |
//! | `NOTIFICATION_BASE_URL` | No | メール内リンクのベース URL |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（Mailpit に送信）
//! NOTIFICATION_BACKEND=smtp cargo run -p kaiwa-notifier
//!
//! # 本番環境（SES 経由）
//! NOTIFICATION_BACKEND=ses DATABASE_URL=postgres://... cargo run -p kaiwa-notifier --release
//! ```

use std::sync::Arc;

use kaiwa_domain::clock::SystemClock;
use kaiwa_infra::{
   db,
   notification::{
      NoopNotificationSender,
      NotificationSender,
      SesNotificationSender,
      SmtpNotificationSender,
   },
   repository::{
      PostgresConversationRepository,
      PostgresMessageRepository,
      PostgresNotificationLogRepository,
      PostgresUserRepository,
   },
};
use kaiwa_notifier::{
   config::{NotificationConfig, NotifierConfig},
   usecase::{NotificationService, TemplateRenderer, UnreadDigestUseCaseImpl},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 通知ワーカーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   tracing_subscriber::registry()
      .with(
         tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,kaiwa=debug".into()),
      )
      .with(tracing_subscriber::fmt::layer())
      .init();

   // 設定読み込み
   let config = NotifierConfig::from_env();

   tracing::info!(
      backend = %config.notification.backend,
      "通知ワーカーを起動します"
   );

   // データベース接続プールを作成
   let pool = db::create_pool(&config.database_url).await?;
   tracing::info!("データベースに接続しました");

   // 送信バックエンドを構築
   let sender = build_sender(&config.notification).await;

   // 依存コンポーネントを初期化
   let notification_service = NotificationService::new(
      sender,
      TemplateRenderer::new()?,
      Arc::new(PostgresNotificationLogRepository::new(pool.clone())),
      Arc::new(SystemClock),
      config.notification.base_url.clone(),
   );

   let digest = UnreadDigestUseCaseImpl::new(
      Arc::new(PostgresUserRepository::new(pool.clone())),
      Arc::new(PostgresConversationRepository::new(pool.clone())),
      Arc::new(PostgresMessageRepository::new(pool.clone())),
      Arc::new(notification_service),
   );

   // 未読ダイジェストのスキャンを 1 回実行
   let summary = digest.run().await?;

   tracing::info!(
      users_scanned = summary.users_scanned,
      notifications_sent = summary.notifications_sent,
      "通知ワーカーを終了します"
   );

   Ok(())
}

/// 環境変数の設定に応じて送信バックエンドを構築する
async fn build_sender(config: &NotificationConfig) -> Arc<dyn NotificationSender> {
   match config.backend.as_str() {
      "smtp" => Arc::new(SmtpNotificationSender::new(
         &config.smtp_host,
         config.smtp_port,
         config.from_address.clone(),
      )),
      "ses" => {
         let aws_config = aws_config::load_from_env().await;
         Arc::new(SesNotificationSender::new(
            aws_sdk_sesv2::Client::new(&aws_config),
            config.from_address.clone(),
         ))
      }
      _ => Arc::new(NoopNotificationSender),
   }
}
