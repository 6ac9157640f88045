use async_trait::async_trait;

use crate::domain::lead::{DashboardLeads, Lead, LeadStatus, NewLead, UpdateLead};
use crate::domain::types::{LeadId, TenantId};
use crate::dto::leads::{
    BulkDeleteRequest, BulkResponse, BulkStatusRequest, CreateLeadRequest, DashboardQuery,
    UpdateLeadRequest, UpdateStatusRequest,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{HttpRepository, LeadReader, LeadWriter};

pub const LEADS: &str = "/leads";
pub const DASHBOARD: &str = "/leads/dashboard/leads";
pub const BULK_DELETE: &str = "/leads/leads/bulk-delete";
pub const BULK_STATUS: &str = "/leads/leads/bulk-status";

pub fn tenant_leads_path(tenant_id: &TenantId) -> String {
    format!("/leads/tenant/{tenant_id}")
}

pub fn lead_by_id_path(lead_id: &LeadId) -> String {
    format!("/leads/lead/{lead_id}")
}

pub fn lead_path(lead_id: &LeadId) -> String {
    format!("/leads/{lead_id}")
}

pub fn lead_status_path(lead_id: &LeadId) -> String {
    format!("/leads/{lead_id}/status")
}

#[async_trait]
impl LeadReader for HttpRepository {
    async fn list_tenant_leads(&self, tenant_id: &TenantId) -> RepositoryResult<Vec<Lead>> {
        self.api.get(&tenant_leads_path(tenant_id)).await
    }

    // The endpoint is not tenant-scoped on the wire; the tenant only scopes
    // the caller's cache.
    async fn get_lead_by_id(
        &self,
        lead_id: &LeadId,
        _tenant_id: &TenantId,
    ) -> RepositoryResult<Option<Lead>> {
        self.api.get_optional(&lead_by_id_path(lead_id)).await
    }

    async fn get_dashboard_leads(&self, tenant_id: &TenantId) -> RepositoryResult<DashboardLeads> {
        let query = DashboardQuery {
            tenant_id: tenant_id.as_str(),
        };
        self.api.get_with_query(DASHBOARD, &query).await
    }
}

#[async_trait]
impl LeadWriter for HttpRepository {
    async fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        self.api
            .post(LEADS, &CreateLeadRequest::from(new_lead))
            .await
    }

    async fn update_lead(&self, lead_id: &LeadId, updates: &UpdateLead) -> RepositoryResult<Lead> {
        self.api
            .put(&lead_path(lead_id), &UpdateLeadRequest::from(updates))
            .await
    }

    async fn update_lead_status(
        &self,
        lead_id: &LeadId,
        status: LeadStatus,
    ) -> RepositoryResult<Lead> {
        self.api
            .patch(&lead_status_path(lead_id), &UpdateStatusRequest { status })
            .await
    }

    async fn delete_lead(&self, lead_id: &LeadId, _tenant_id: &TenantId) -> RepositoryResult<()> {
        self.api.delete(&lead_path(lead_id)).await
    }

    async fn bulk_delete_leads(
        &self,
        tenant_id: &TenantId,
        lead_ids: &[LeadId],
    ) -> RepositoryResult<BulkResponse> {
        self.api
            .post(BULK_DELETE, &BulkDeleteRequest::new(tenant_id, lead_ids))
            .await
    }

    async fn bulk_update_lead_status(
        &self,
        tenant_id: &TenantId,
        lead_ids: &[LeadId],
        status: LeadStatus,
    ) -> RepositoryResult<BulkResponse> {
        self.api
            .patch(
                BULK_STATUS,
                &BulkStatusRequest::new(tenant_id, lead_ids, status),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_the_api_layout() {
        let tenant = TenantId::new("t-1").expect("valid");
        let lead = LeadId::new("42").expect("valid");

        assert_eq!(tenant_leads_path(&tenant), "/leads/tenant/t-1");
        assert_eq!(lead_by_id_path(&lead), "/leads/lead/42");
        assert_eq!(lead_path(&lead), "/leads/42");
        assert_eq!(lead_status_path(&lead), "/leads/42/status");
    }
}
