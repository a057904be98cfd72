//! # BAN 状態変化の保存フック
//!
//! プロフィール保存時に直前の状態と比較し、BAN / BAN 解除の通知を
//! ディスパッチするユースケース。
//!
//! ## 設計方針
//!
//! - **判定はドメイン層**: [`UserProfile::ban_status_change`] が純粋関数として
//!   判定し、このユースケースは検索・保存・配送への変換のみ行う
//! - **検索は保存済みの場合のみ**: 未保存プロフィールには比較対象が
//!   存在しないため、直前行の検索自体を省略する
//! - **配送は判定結果 1 件につき最大 1 回**: `NoAction` 以外の結果だけが
//!   ディスパッチに変換される

use std::sync::Arc;

use kaiwa_domain::profile::{BanStatusChange, ProfileId, UserProfile};
use kaiwa_infra::{notification::BanEmailDispatcher, repository::ProfileRepository};

use crate::error::NotifierError;

/// BAN 状態変化ユースケース
///
/// Web アプリケーション本体のプロフィール保存経路から呼び出される。
pub struct BanStatusUseCaseImpl {
    profile_repository: Arc<dyn ProfileRepository>,
    dispatcher: Arc<dyn BanEmailDispatcher>,
}

impl BanStatusUseCaseImpl {
    pub fn new(
        profile_repository: Arc<dyn ProfileRepository>,
        dispatcher: Arc<dyn BanEmailDispatcher>,
    ) -> Self {
        Self {
            profile_repository,
            dispatcher,
        }
    }

    /// プロフィールを保存し、BAN 状態の変化に応じて通知を依頼する
    ///
    /// 1. 保存済みの場合のみ直前の行を検索
    /// 2. 保存しようとしている状態と比較して変化を判定
    /// 3. 保存（未保存ならキーを割り当てて INSERT、保存済みなら UPDATE）
    /// 4. 判定結果を最大 1 回のディスパッチに変換
    ///
    /// 直前の行が見つからないのは正常系（`NoAction`）であり、
    /// エラーとして扱わない。
    pub async fn save(
        &self,
        profile: UserProfile,
    ) -> Result<(UserProfile, BanStatusChange), NotifierError> {
        let previous = match profile.id() {
            Some(id) => self.profile_repository.find_by_id(id).await?,
            None => None,
        };

        let change = profile.ban_status_change(previous.as_ref());

        let saved = match profile.id() {
            Some(_) => {
                self.profile_repository.update(&profile).await?;
                profile
            }
            None => {
                let profile = profile.persisted(ProfileId::new());
                self.profile_repository.insert(&profile).await?;
                profile
            }
        };

        match &change {
            BanStatusChange::NoAction => {}
            BanStatusChange::Banned(target) => {
                self.dispatcher.enqueue_ban_email(target).await;
            }
            BanStatusChange::Unbanned(target) => {
                self.dispatcher.enqueue_unban_email(target).await;
            }
        }

        Ok((saved, change))
    }
}
