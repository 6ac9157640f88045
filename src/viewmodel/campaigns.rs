//! Campaign view-model. Campaigns are not cached; callers get the server's
//! data back directly and only the `loading`/`error` flags are tracked.

use std::sync::{Arc, Mutex};

use crate::domain::campaign::{Campaign, NewCampaign, UpdateCampaign};
use crate::domain::types::{CampaignId, TenantId};
use crate::repository::{CampaignReader, CampaignWriter};
use crate::services::campaigns as campaign_service;
use crate::services::{ErrorKind, ServiceError, ServiceResult};
use crate::viewmodel::{CancelToken, OpState, lock};

pub struct CampaignsViewModel<R: ?Sized> {
    repo: Arc<R>,
    tenant_id: TenantId,
    state: Mutex<OpState>,
    cancel: CancelToken,
}

impl<R> CampaignsViewModel<R>
where
    R: CampaignReader + CampaignWriter + ?Sized,
{
    pub fn new(repo: Arc<R>, tenant_id: TenantId) -> Self {
        Self::with_cancel_token(repo, tenant_id, CancelToken::new())
    }

    pub fn with_cancel_token(repo: Arc<R>, tenant_id: TenantId, cancel: CancelToken) -> Self {
        Self {
            repo,
            tenant_id,
            state: Mutex::new(OpState::default()),
            cancel,
        }
    }

    fn begin(&self) -> ServiceResult<()> {
        lock(&self.state).start(&self.cancel)
    }

    fn settle<T>(&self, result: ServiceResult<T>) -> ServiceResult<T> {
        lock(&self.state).finish(&result);
        result
    }

    pub async fn fetch_all(&self) -> ServiceResult<Vec<Campaign>> {
        self.begin()?;
        let result = self
            .cancel
            .run(campaign_service::list_campaigns(
                self.repo.as_ref(),
                &self.tenant_id,
            ))
            .await;
        self.settle(result)
    }

    pub async fn fetch_by_id(&self, campaign_id: &CampaignId) -> ServiceResult<Campaign> {
        self.begin()?;
        let result = self
            .cancel
            .run(campaign_service::get_campaign(
                self.repo.as_ref(),
                campaign_id,
                &self.tenant_id,
            ))
            .await;
        self.settle(result)
    }

    pub async fn create(&self, new_campaign: &NewCampaign) -> ServiceResult<Campaign> {
        self.begin()?;
        let result = if new_campaign.tenant_id == self.tenant_id {
            self.cancel
                .run(campaign_service::create_campaign(
                    self.repo.as_ref(),
                    new_campaign,
                ))
                .await
        } else {
            Err(ServiceError::Validation(format!(
                "Campaign belongs to tenant {}, not to the current session",
                new_campaign.tenant_id
            )))
        };
        self.settle(result)
    }

    pub async fn update(
        &self,
        campaign_id: &CampaignId,
        updates: &UpdateCampaign,
    ) -> ServiceResult<Campaign> {
        self.begin()?;
        let result = self
            .cancel
            .run(campaign_service::update_campaign(
                self.repo.as_ref(),
                campaign_id,
                &self.tenant_id,
                updates,
            ))
            .await;
        self.settle(result)
    }

    pub async fn remove(&self, campaign_id: &CampaignId) -> ServiceResult<()> {
        self.begin()?;
        let result = self
            .cancel
            .run(campaign_service::delete_campaign(
                self.repo.as_ref(),
                campaign_id,
                &self.tenant_id,
            ))
            .await;
        self.settle(result)
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).is_loading()
    }

    pub fn error(&self) -> Option<ServiceError> {
        lock(&self.state).error()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        lock(&self.state).error_kind()
    }

    pub fn clear_error(&self) {
        lock(&self.state).clear_error();
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}
