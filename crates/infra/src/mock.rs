//! # テスト用モック実装
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! kaiwa-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
   collections::HashSet,
   sync::{Arc, Mutex},
};

use async_trait::async_trait;
use kaiwa_domain::{
   conversation::{Conversation, ConversationId, Message},
   notification::{EmailMessage, NotificationError, NotificationTarget},
   profile::{ProfileId, UserProfile},
   user::{User, UserId},
};

use crate::{
   error::InfraError,
   notification::{BanEmailDispatcher, NotificationSender},
   repository::{
      ConversationRepository,
      MessageRepository,
      NotificationLog,
      NotificationLogRepository,
      ProfileRepository,
      UserRepository,
   },
};

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
   users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
   pub fn new() -> Self {
      Self {
         users: Arc::new(Mutex::new(Vec::new())),
      }
   }

   pub fn add_user(&self, user: User) {
      self.users.lock().unwrap().push(user);
   }
}

#[async_trait]
impl UserRepository for MockUserRepository {
   async fn find_all(&self) -> Result<Vec<User>, InfraError> {
      Ok(self.users.lock().unwrap().clone())
   }
}

// ===== MockConversationRepository =====

#[derive(Clone, Default)]
pub struct MockConversationRepository {
   conversations: Arc<Mutex<Vec<Conversation>>>,
}

impl MockConversationRepository {
   pub fn new() -> Self {
      Self {
         conversations: Arc::new(Mutex::new(Vec::new())),
      }
   }

   pub fn add_conversation(&self, conversation: Conversation) {
      self.conversations.lock().unwrap().push(conversation);
   }
}

#[async_trait]
impl ConversationRepository for MockConversationRepository {
   async fn find_by_participant(
      &self,
      user_id: &UserId,
   ) -> Result<Vec<Conversation>, InfraError> {
      Ok(self
         .conversations
         .lock()
         .unwrap()
         .iter()
         .filter(|c| c.involves(user_id))
         .cloned()
         .collect())
   }
}

// ===== MockMessageRepository =====

#[derive(Clone, Default)]
pub struct MockMessageRepository {
   messages: Arc<Mutex<Vec<Message>>>,
}

impl MockMessageRepository {
   pub fn new() -> Self {
      Self {
         messages: Arc::new(Mutex::new(Vec::new())),
      }
   }

   pub fn add_message(&self, message: Message) {
      self.messages.lock().unwrap().push(message);
   }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
   async fn count_by_sender(
      &self,
      conversation_id: &ConversationId,
      sender_id: &UserId,
   ) -> Result<i64, InfraError> {
      let count = self
         .messages
         .lock()
         .unwrap()
         .iter()
         .filter(|m| m.conversation_id() == conversation_id && m.sender_id() == sender_id)
         .count();
      Ok(count as i64)
   }
}

// ===== MockProfileRepository =====

/// テスト用のモック ProfileRepository
///
/// `find_by_id` の呼び出し回数を記録する。未保存プロフィールの保存時に
/// 検索が省略されることの検証に使用する。
#[derive(Clone, Default)]
pub struct MockProfileRepository {
   profiles:         Arc<Mutex<Vec<UserProfile>>>,
   find_by_id_calls: Arc<Mutex<usize>>,
}

impl MockProfileRepository {
   pub fn new() -> Self {
      Self {
         profiles:         Arc::new(Mutex::new(Vec::new())),
         find_by_id_calls: Arc::new(Mutex::new(0)),
      }
   }

   pub fn add_profile(&self, profile: UserProfile) {
      self.profiles.lock().unwrap().push(profile);
   }

   /// 保存されているプロフィールのスナップショットを返す
   pub fn profiles(&self) -> Vec<UserProfile> {
      self.profiles.lock().unwrap().clone()
   }

   /// `find_by_id` が呼ばれた回数を返す
   pub fn find_by_id_calls(&self) -> usize {
      *self.find_by_id_calls.lock().unwrap()
   }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
   async fn find_by_id(&self, id: &ProfileId) -> Result<Option<UserProfile>, InfraError> {
      *self.find_by_id_calls.lock().unwrap() += 1;
      Ok(self
         .profiles
         .lock()
         .unwrap()
         .iter()
         .find(|p| p.id() == Some(id))
         .cloned())
   }

   async fn insert(&self, profile: &UserProfile) -> Result<(), InfraError> {
      let mut profiles = self.profiles.lock().unwrap();
      profiles.push(profile.clone());
      Ok(())
   }

   async fn update(&self, profile: &UserProfile) -> Result<(), InfraError> {
      let mut profiles = self.profiles.lock().unwrap();
      if let Some(pos) = profiles.iter().position(|p| p.id() == profile.id()) {
         profiles[pos] = profile.clone();
      }
      Ok(())
   }
}

// ===== MockNotificationLogRepository =====

#[derive(Clone, Default)]
pub struct MockNotificationLogRepository {
   logs: Arc<Mutex<Vec<NotificationLog>>>,
}

impl MockNotificationLogRepository {
   pub fn new() -> Self {
      Self {
         logs: Arc::new(Mutex::new(Vec::new())),
      }
   }

   /// 記録されたログのスナップショットを返す
   pub fn logs(&self) -> Vec<NotificationLog> {
      self.logs.lock().unwrap().clone()
   }
}

#[async_trait]
impl NotificationLogRepository for MockNotificationLogRepository {
   async fn insert(&self, log: &NotificationLog) -> Result<(), InfraError> {
      self.logs.lock().unwrap().push(log.clone());
      Ok(())
   }
}

// ===== MockNotificationSender =====

/// テスト用のモック NotificationSender
///
/// 送信されたメールを記録する。`fail_for` で指定した宛先への送信は
/// `SendFailed` を返し、部分失敗のテストに使用できる。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
   sent:            Arc<Mutex<Vec<EmailMessage>>>,
   fail_recipients: Arc<Mutex<HashSet<String>>>,
}

impl MockNotificationSender {
   pub fn new() -> Self {
      Self {
         sent:            Arc::new(Mutex::new(Vec::new())),
         fail_recipients: Arc::new(Mutex::new(HashSet::new())),
      }
   }

   /// 指定した宛先への送信を失敗させる
   pub fn fail_for(&self, recipient: impl Into<String>) {
      self.fail_recipients.lock().unwrap().insert(recipient.into());
   }

   /// 送信されたメールのスナップショットを返す
   pub fn sent_emails(&self) -> Vec<EmailMessage> {
      self.sent.lock().unwrap().clone()
   }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
   async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
      if self.fail_recipients.lock().unwrap().contains(&email.to) {
         return Err(NotificationError::SendFailed(format!(
            "モック送信失敗: {}",
            email.to
         )));
      }
      self.sent.lock().unwrap().push(email.clone());
      Ok(())
   }
}

// ===== MockBanEmailDispatcher =====

/// テスト用のモック BanEmailDispatcher
///
/// 依頼された配送を種別ごとに記録する。
#[derive(Clone, Default)]
pub struct MockBanEmailDispatcher {
   ban_calls:   Arc<Mutex<Vec<NotificationTarget>>>,
   unban_calls: Arc<Mutex<Vec<NotificationTarget>>>,
}

impl MockBanEmailDispatcher {
   pub fn new() -> Self {
      Self {
         ban_calls:   Arc::new(Mutex::new(Vec::new())),
         unban_calls: Arc::new(Mutex::new(Vec::new())),
      }
   }

   /// BAN 通知の配送依頼のスナップショットを返す
   pub fn ban_calls(&self) -> Vec<NotificationTarget> {
      self.ban_calls.lock().unwrap().clone()
   }

   /// BAN 解除通知の配送依頼のスナップショットを返す
   pub fn unban_calls(&self) -> Vec<NotificationTarget> {
      self.unban_calls.lock().unwrap().clone()
   }
}

#[async_trait]
impl BanEmailDispatcher for MockBanEmailDispatcher {
   async fn enqueue_ban_email(&self, target: &NotificationTarget) {
      self.ban_calls.lock().unwrap().push(target.clone());
   }

   async fn enqueue_unban_email(&self, target: &NotificationTarget) {
      self.unban_calls.lock().unwrap().push(target.clone());
   }
}
