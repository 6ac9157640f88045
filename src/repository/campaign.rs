use async_trait::async_trait;
use reqwest::Method;

use crate::domain::campaign::{Campaign, NewCampaign, UpdateCampaign};
use crate::domain::types::{CampaignId, TenantId};
use crate::dto::campaigns::{CreateCampaignRequest, TenantScope, UpdateCampaignRequest};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CampaignReader, CampaignWriter, HttpRepository};

pub const CREATE_CAMPAIGN: &str = "/campaigns/create";

pub fn tenant_campaigns_path(tenant_id: &TenantId) -> String {
    format!("/campaigns/tenant/{tenant_id}")
}

pub fn campaign_by_id_path(campaign_id: &CampaignId) -> String {
    format!("/campaigns/get/{campaign_id}")
}

pub fn update_campaign_path(campaign_id: &CampaignId) -> String {
    format!("/campaigns/update/{campaign_id}")
}

pub fn delete_campaign_path(campaign_id: &CampaignId) -> String {
    format!("/campaigns/delete/{campaign_id}")
}

#[async_trait]
impl CampaignReader for HttpRepository {
    async fn list_campaigns(&self, tenant_id: &TenantId) -> RepositoryResult<Vec<Campaign>> {
        self.api.get(&tenant_campaigns_path(tenant_id)).await
    }

    // The backend reads the tenant from the body, even on GET.
    async fn get_campaign_by_id(
        &self,
        campaign_id: &CampaignId,
        tenant_id: &TenantId,
    ) -> RepositoryResult<Option<Campaign>> {
        let result = self
            .api
            .send_json(
                Method::GET,
                &campaign_by_id_path(campaign_id),
                &TenantScope::from(tenant_id),
            )
            .await;

        match result {
            Ok(campaign) => Ok(Some(campaign)),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl CampaignWriter for HttpRepository {
    async fn create_campaign(&self, new_campaign: &NewCampaign) -> RepositoryResult<Campaign> {
        self.api
            .post(CREATE_CAMPAIGN, &CreateCampaignRequest::from(new_campaign))
            .await
    }

    async fn update_campaign(
        &self,
        campaign_id: &CampaignId,
        tenant_id: &TenantId,
        updates: &UpdateCampaign,
    ) -> RepositoryResult<Campaign> {
        self.api
            .put(
                &update_campaign_path(campaign_id),
                &UpdateCampaignRequest::new(tenant_id, updates),
            )
            .await
    }

    async fn delete_campaign(
        &self,
        campaign_id: &CampaignId,
        tenant_id: &TenantId,
    ) -> RepositoryResult<()> {
        self.api
            .send_discarding(
                Method::DELETE,
                &delete_campaign_path(campaign_id),
                Some(&TenantScope::from(tenant_id)),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_paths() {
        let tenant = TenantId::new("acme").expect("valid");
        let campaign = CampaignId::new("c-9").expect("valid");

        assert_eq!(tenant_campaigns_path(&tenant), "/campaigns/tenant/acme");
        assert_eq!(campaign_by_id_path(&campaign), "/campaigns/get/c-9");
        assert_eq!(update_campaign_path(&campaign), "/campaigns/update/c-9");
        assert_eq!(delete_campaign_path(&campaign), "/campaigns/delete/c-9");
    }
}
