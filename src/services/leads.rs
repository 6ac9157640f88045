//! Lead lifecycle operations: CRUD, status changes, bulk mutations and the
//! dashboard aggregate.

use crate::domain::lead::{BulkOutcome, DashboardLeads, Lead, LeadStatus, NewLead, UpdateLead};
use crate::domain::types::{LeadId, TenantId};
use crate::dto::leads::BulkResponse;
use crate::repository::errors::RepositoryError;
use crate::repository::{LeadReader, LeadWriter};
use crate::services::{ServiceError, ServiceResult};

/// Removes duplicate ids, keeping the first occurrence of each.
pub fn distinct_ids(ids: &[LeadId]) -> Vec<LeadId> {
    let mut distinct: Vec<LeadId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !distinct.contains(id) {
            distinct.push(id.clone());
        }
    }
    distinct
}

fn bulk_selection(ids: &[LeadId]) -> ServiceResult<Vec<LeadId>> {
    let distinct = distinct_ids(ids);
    if distinct.is_empty() {
        return Err(ServiceError::Validation(
            "Select at least one lead".to_string(),
        ));
    }
    Ok(distinct)
}

fn outcome(response: BulkResponse, requested: usize) -> BulkOutcome {
    BulkOutcome {
        message: response.message,
        requested,
        affected: response.count,
    }
}

/// Loads every lead of the tenant.
pub async fn list_tenant_leads<R>(repo: &R, tenant_id: &TenantId) -> ServiceResult<Vec<Lead>>
where
    R: LeadReader + ?Sized,
{
    repo.list_tenant_leads(tenant_id).await.map_err(|err| {
        log::error!("Failed to load leads of tenant {tenant_id}: {err}");
        ServiceError::from(err)
    })
}

/// Loads a single lead, failing with `NotFound` when it does not exist.
pub async fn get_lead<R>(repo: &R, lead_id: &LeadId, tenant_id: &TenantId) -> ServiceResult<Lead>
where
    R: LeadReader + ?Sized,
{
    repo.get_lead_by_id(lead_id, tenant_id)
        .await
        .map_err(|err| {
            log::error!("Failed to load lead {lead_id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or_else(|| ServiceError::NotFound(format!("Lead {lead_id} not found")))
}

/// Fetches the dashboard aggregate for the tenant.
pub async fn get_dashboard_leads<R>(
    repo: &R,
    tenant_id: &TenantId,
) -> ServiceResult<DashboardLeads>
where
    R: LeadReader + ?Sized,
{
    repo.get_dashboard_leads(tenant_id).await.map_err(|err| {
        log::error!("Failed to load dashboard of tenant {tenant_id}: {err}");
        ServiceError::from(err)
    })
}

/// Persists a new lead. The backend must assign an id.
pub async fn create_lead<R>(repo: &R, new_lead: &NewLead) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    let lead = repo.create_lead(new_lead).await.map_err(|err| {
        log::error!("Failed to create lead: {err}");
        ServiceError::from(err)
    })?;

    if lead.id.is_none() {
        log::error!("Created lead for {} came back without an id", new_lead.company_name);
        return Err(ServiceError::Server(
            "Created lead is missing an id".to_string(),
        ));
    }

    Ok(lead)
}

pub async fn update_lead<R>(repo: &R, lead_id: &LeadId, updates: &UpdateLead) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    if updates.is_empty() {
        return Err(ServiceError::Validation("Nothing to update".to_string()));
    }

    repo.update_lead(lead_id, updates).await.map_err(|err| {
        log::error!("Failed to update lead {lead_id}: {err}");
        ServiceError::from(err)
    })
}

pub async fn update_lead_status<R>(
    repo: &R,
    lead_id: &LeadId,
    status: LeadStatus,
) -> ServiceResult<Lead>
where
    R: LeadWriter + ?Sized,
{
    repo.update_lead_status(lead_id, status)
        .await
        .map_err(|err| {
            log::error!("Failed to set status {status} on lead {lead_id}: {err}");
            ServiceError::from(err)
        })
}

/// Deletes a lead. Returns `false` when the backend no longer had it, which
/// is not an error.
pub async fn delete_lead<R>(repo: &R, lead_id: &LeadId, tenant_id: &TenantId) -> ServiceResult<bool>
where
    R: LeadWriter + ?Sized,
{
    match repo.delete_lead(lead_id, tenant_id).await {
        Ok(()) => Ok(true),
        Err(RepositoryError::NotFound(_)) => {
            log::info!("Lead {lead_id} was already absent");
            Ok(false)
        }
        Err(err) => {
            log::error!("Failed to delete lead {lead_id}: {err}");
            Err(err.into())
        }
    }
}

/// Deletes the selected leads in one round trip.
pub async fn bulk_delete_leads<R>(
    repo: &R,
    tenant_id: &TenantId,
    lead_ids: &[LeadId],
) -> ServiceResult<BulkOutcome>
where
    R: LeadWriter + ?Sized,
{
    let lead_ids = bulk_selection(lead_ids)?;

    let response = repo
        .bulk_delete_leads(tenant_id, &lead_ids)
        .await
        .map_err(|err| {
            log::error!("Failed to bulk delete {} leads: {err}", lead_ids.len());
            ServiceError::from(err)
        })?;

    let outcome = outcome(response, lead_ids.len());
    if !outcome.is_complete() {
        log::warn!(
            "Bulk delete affected {} of {} leads",
            outcome.affected,
            outcome.requested
        );
    }
    Ok(outcome)
}

/// Moves the selected leads to `status` in one round trip.
pub async fn bulk_update_lead_status<R>(
    repo: &R,
    tenant_id: &TenantId,
    lead_ids: &[LeadId],
    status: LeadStatus,
) -> ServiceResult<BulkOutcome>
where
    R: LeadWriter + ?Sized,
{
    let lead_ids = bulk_selection(lead_ids)?;

    let response = repo
        .bulk_update_lead_status(tenant_id, &lead_ids, status)
        .await
        .map_err(|err| {
            log::error!("Failed to bulk update {} leads to {status}: {err}", lead_ids.len());
            ServiceError::from(err)
        })?;

    let outcome = outcome(response, lead_ids.len());
    if !outcome.is_complete() {
        log::warn!(
            "Bulk status update affected {} of {} leads",
            outcome.affected,
            outcome.requested
        );
    }
    Ok(outcome)
}

/// Result of importing a batch of leads one by one.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Leads the backend created, including those created before an abort.
    pub created: Vec<Lead>,
    /// Position in the input batch and the reason the row was rejected.
    pub failed: Vec<(usize, ServiceError)>,
    /// Why the import stopped before the last row, if it did.
    pub aborted: Option<ServiceError>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.aborted.is_none()
    }

    /// Records the outcome of row `index` and returns whether the import
    /// should go on. Authorization failures would fail every remaining row
    /// and cancellation stops the batch; other rejections only skip the row.
    pub fn record(&mut self, index: usize, result: ServiceResult<Lead>) -> bool {
        match result {
            Ok(lead) => {
                self.created.push(lead);
                true
            }
            Err(err @ (ServiceError::Unauthorized(_) | ServiceError::Cancelled)) => {
                self.aborted = Some(err);
                false
            }
            Err(err) => {
                self.failed.push((index, err));
                true
            }
        }
    }

    pub fn log_summary(&self) {
        match &self.aborted {
            Some(reason) => log::warn!(
                "Import stopped after {} created, {} rejected: {reason}",
                self.created.len(),
                self.failed.len()
            ),
            None => log::info!(
                "Imported {} leads, {} rejected",
                self.created.len(),
                self.failed.len()
            ),
        }
    }
}
