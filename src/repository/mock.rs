//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::auth::{
    AdditionalSignupPayload, AuthSession, LoginCredentials, SignupPayload, User,
};
use crate::domain::campaign::{Campaign, NewCampaign, UpdateCampaign};
use crate::domain::lead::{DashboardLeads, Lead, LeadStatus, NewLead, UpdateLead};
use crate::domain::template::{EmailTemplate, NewEmailTemplate};
use crate::domain::types::{CampaignId, LeadId, TenantId};
use crate::dto::leads::BulkResponse;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AuthGateway, CampaignReader, CampaignWriter, LeadReader, LeadWriter, TemplateReader,
    TemplateWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl LeadReader for Repository {
        async fn list_tenant_leads(&self, tenant_id: &TenantId) -> RepositoryResult<Vec<Lead>>;
        async fn get_lead_by_id(
            &self,
            lead_id: &LeadId,
            tenant_id: &TenantId,
        ) -> RepositoryResult<Option<Lead>>;
        async fn get_dashboard_leads(&self, tenant_id: &TenantId) -> RepositoryResult<DashboardLeads>;
    }

    #[async_trait]
    impl LeadWriter for Repository {
        async fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
        async fn update_lead(&self, lead_id: &LeadId, updates: &UpdateLead) -> RepositoryResult<Lead>;
        async fn update_lead_status(
            &self,
            lead_id: &LeadId,
            status: LeadStatus,
        ) -> RepositoryResult<Lead>;
        async fn delete_lead(&self, lead_id: &LeadId, tenant_id: &TenantId) -> RepositoryResult<()>;
        async fn bulk_delete_leads(
            &self,
            tenant_id: &TenantId,
            lead_ids: &[LeadId],
        ) -> RepositoryResult<BulkResponse>;
        async fn bulk_update_lead_status(
            &self,
            tenant_id: &TenantId,
            lead_ids: &[LeadId],
            status: LeadStatus,
        ) -> RepositoryResult<BulkResponse>;
    }

    #[async_trait]
    impl CampaignReader for Repository {
        async fn list_campaigns(&self, tenant_id: &TenantId) -> RepositoryResult<Vec<Campaign>>;
        async fn get_campaign_by_id(
            &self,
            campaign_id: &CampaignId,
            tenant_id: &TenantId,
        ) -> RepositoryResult<Option<Campaign>>;
    }

    #[async_trait]
    impl CampaignWriter for Repository {
        async fn create_campaign(&self, new_campaign: &NewCampaign) -> RepositoryResult<Campaign>;
        async fn update_campaign(
            &self,
            campaign_id: &CampaignId,
            tenant_id: &TenantId,
            updates: &UpdateCampaign,
        ) -> RepositoryResult<Campaign>;
        async fn delete_campaign(
            &self,
            campaign_id: &CampaignId,
            tenant_id: &TenantId,
        ) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl TemplateReader for Repository {
        async fn list_templates(&self, tenant_id: &TenantId) -> RepositoryResult<Vec<EmailTemplate>>;
    }

    #[async_trait]
    impl TemplateWriter for Repository {
        async fn create_template(
            &self,
            template: &NewEmailTemplate,
        ) -> RepositoryResult<EmailTemplate>;
    }

    #[async_trait]
    impl AuthGateway for Repository {
        async fn login(&self, credentials: &LoginCredentials) -> RepositoryResult<AuthSession>;
        async fn signup(&self, payload: &SignupPayload) -> RepositoryResult<AuthSession>;
        async fn complete_additional_signup(
            &self,
            tenant_id: &TenantId,
            payload: &AdditionalSignupPayload,
        ) -> RepositoryResult<User>;
    }
}
