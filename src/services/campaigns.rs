//! Campaign scheduling operations.

use crate::domain::campaign::{Campaign, NewCampaign, UpdateCampaign};
use crate::domain::types::{CampaignId, TenantId};
use crate::repository::errors::RepositoryError;
use crate::repository::{CampaignReader, CampaignWriter};
use crate::services::{ServiceError, ServiceResult};

pub async fn list_campaigns<R>(repo: &R, tenant_id: &TenantId) -> ServiceResult<Vec<Campaign>>
where
    R: CampaignReader + ?Sized,
{
    repo.list_campaigns(tenant_id).await.map_err(|err| {
        log::error!("Failed to load campaigns of tenant {tenant_id}: {err}");
        ServiceError::from(err)
    })
}

pub async fn get_campaign<R>(
    repo: &R,
    campaign_id: &CampaignId,
    tenant_id: &TenantId,
) -> ServiceResult<Campaign>
where
    R: CampaignReader + ?Sized,
{
    repo.get_campaign_by_id(campaign_id, tenant_id)
        .await
        .map_err(|err| {
            log::error!("Failed to load campaign {campaign_id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or_else(|| ServiceError::NotFound(format!("Campaign {campaign_id} not found")))
}

pub async fn create_campaign<R>(repo: &R, new_campaign: &NewCampaign) -> ServiceResult<Campaign>
where
    R: CampaignWriter + ?Sized,
{
    repo.create_campaign(new_campaign).await.map_err(|err| {
        log::error!(
            "Failed to create campaign for template {}: {err}",
            new_campaign.template_id
        );
        ServiceError::from(err)
    })
}

pub async fn update_campaign<R>(
    repo: &R,
    campaign_id: &CampaignId,
    tenant_id: &TenantId,
    updates: &UpdateCampaign,
) -> ServiceResult<Campaign>
where
    R: CampaignWriter + ?Sized,
{
    repo.update_campaign(campaign_id, tenant_id, updates)
        .await
        .map_err(|err| {
            log::error!("Failed to update campaign {campaign_id}: {err}");
            ServiceError::from(err)
        })
}

/// Deletes a campaign; an already deleted campaign is not an error.
pub async fn delete_campaign<R>(
    repo: &R,
    campaign_id: &CampaignId,
    tenant_id: &TenantId,
) -> ServiceResult<()>
where
    R: CampaignWriter + ?Sized,
{
    match repo.delete_campaign(campaign_id, tenant_id).await {
        Ok(()) | Err(RepositoryError::NotFound(_)) => Ok(()),
        Err(err) => {
            log::error!("Failed to delete campaign {campaign_id}: {err}");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::ErrorKind;

    fn tenant() -> TenantId {
        TenantId::new("acme").expect("valid tenant")
    }

    #[tokio::test]
    async fn missing_campaign_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_campaign_by_id()
            .withf(|campaign_id, tenant_id| {
                campaign_id.as_str() == "c-1" && tenant_id.as_str() == "acme"
            })
            .times(1)
            .returning(|_, _| Ok(None));

        let err = get_campaign(&repo, &CampaignId::new("c-1").expect("valid"), &tenant())
            .await
            .expect_err("missing campaign");

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn deleting_a_deleted_campaign_succeeds() {
        let mut repo = MockRepository::new();
        repo.expect_delete_campaign()
            .times(1)
            .returning(|_, _| Err(RepositoryError::NotFound("gone".to_string())));

        delete_campaign(&repo, &CampaignId::new("c-1").expect("valid"), &tenant())
            .await
            .expect("idempotent delete");
    }
}
