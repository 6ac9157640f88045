//! Tenant-bound lead cache with mutation operations.
//!
//! Every operation performs its remote call first and reconciles the cache
//! only on success; on failure the cache is untouched and the error is
//! recorded. Overlapping calls are not serialized: the last one to finish
//! decides `loading` and `error`, and calls on overlapping ids race.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::domain::lead::{
    BulkOutcome, DashboardLeads, Lead, LeadFilter, LeadStats, LeadStatus, NewLead, UpdateLead,
};
use crate::domain::types::{LeadId, TenantId};
use crate::repository::{LeadReader, LeadWriter};
use crate::services::export::write_leads_csv;
use crate::services::leads::{self as lead_service, ImportReport, distinct_ids};
use crate::services::{ErrorKind, ServiceError, ServiceResult};
use crate::viewmodel::{CancelToken, OpState, lock};

#[derive(Debug)]
struct LeadsState {
    tenant_id: TenantId,
    /// Bumped on every tenant switch so late replies for the previous tenant
    /// are discarded.
    generation: u64,
    leads: Vec<Lead>,
    op: OpState,
}

/// Tenant and generation captured when an operation starts.
struct Ticket {
    tenant_id: TenantId,
    generation: u64,
}

pub struct LeadsViewModel<R: ?Sized> {
    repo: Arc<R>,
    state: Mutex<LeadsState>,
    cancel: CancelToken,
}

impl<R> LeadsViewModel<R>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    pub fn new(repo: Arc<R>, tenant_id: TenantId) -> Self {
        Self::with_cancel_token(repo, tenant_id, CancelToken::new())
    }

    /// Builds a view-model whose in-flight calls are aborted when `cancel`
    /// fires.
    pub fn with_cancel_token(repo: Arc<R>, tenant_id: TenantId, cancel: CancelToken) -> Self {
        Self {
            repo,
            state: Mutex::new(LeadsState {
                tenant_id,
                generation: 0,
                leads: Vec::new(),
                op: OpState::default(),
            }),
            cancel,
        }
    }

    fn begin(&self) -> ServiceResult<Ticket> {
        let mut state = lock(&self.state);
        state.op.start(&self.cancel)?;
        Ok(Ticket {
            tenant_id: state.tenant_id.clone(),
            generation: state.generation,
        })
    }

    /// Records the outcome of an operation and, on success, applies `apply`
    /// to the cache. Cancelled and superseded operations leave the cache and
    /// error untouched.
    fn settle<T>(
        &self,
        ticket: &Ticket,
        result: ServiceResult<T>,
        apply: impl FnOnce(&mut Vec<Lead>, &T),
    ) -> ServiceResult<T> {
        let mut state = lock(&self.state);
        if state.generation != ticket.generation {
            return Err(ServiceError::Cancelled);
        }
        state.op.finish(&result);
        if let Ok(value) = &result {
            apply(&mut state.leads, value);
        }
        result
    }

    /// Replaces the cache with every lead of the tenant.
    pub async fn fetch_leads(&self) -> ServiceResult<Vec<Lead>> {
        let ticket = self.begin()?;
        let result = self
            .cancel
            .run(lead_service::list_tenant_leads(
                self.repo.as_ref(),
                &ticket.tenant_id,
            ))
            .await;
        self.settle(&ticket, result, |leads, fetched| {
            leads.clone_from(fetched);
        })
    }

    /// Loads one lead and refreshes its cached copy if there is one.
    pub async fn fetch_lead(&self, lead_id: &LeadId) -> ServiceResult<Lead> {
        let ticket = self.begin()?;
        let result = self
            .cancel
            .run(lead_service::get_lead(
                self.repo.as_ref(),
                lead_id,
                &ticket.tenant_id,
            ))
            .await;
        self.settle(&ticket, result, |leads, updated| replace_entry(leads, updated))
    }

    /// Reads the dashboard aggregate without touching the cache.
    pub async fn fetch_dashboard_leads(&self) -> ServiceResult<DashboardLeads> {
        let ticket = self.begin()?;
        let result = self
            .cancel
            .run(lead_service::get_dashboard_leads(
                self.repo.as_ref(),
                &ticket.tenant_id,
            ))
            .await;
        self.settle(&ticket, result, |_, _| {})
    }

    /// Creates the lead and appends the server's copy to the cache.
    pub async fn create_lead(&self, new_lead: &NewLead) -> ServiceResult<Lead> {
        let ticket = self.begin()?;
        let result = if new_lead.tenant_id == ticket.tenant_id {
            self.cancel
                .run(lead_service::create_lead(self.repo.as_ref(), new_lead))
                .await
        } else {
            Err(foreign_tenant(&new_lead.tenant_id))
        };
        self.settle(&ticket, result, |leads, created| {
            leads.push(created.clone());
        })
    }

    /// Applies a partial update; the cached entry is replaced by the server's
    /// copy. An id absent from the cache leaves the cache as it is.
    pub async fn update_lead(&self, lead_id: &LeadId, updates: &UpdateLead) -> ServiceResult<Lead> {
        let ticket = self.begin()?;
        let result = self
            .cancel
            .run(lead_service::update_lead(self.repo.as_ref(), lead_id, updates))
            .await;
        self.settle(&ticket, result, |leads, updated| replace_entry(leads, updated))
    }

    pub async fn update_lead_status(
        &self,
        lead_id: &LeadId,
        status: LeadStatus,
    ) -> ServiceResult<Lead> {
        let ticket = self.begin()?;
        let result = self
            .cancel
            .run(lead_service::update_lead_status(
                self.repo.as_ref(),
                lead_id,
                status,
            ))
            .await;
        self.settle(&ticket, result, |leads, updated| replace_entry(leads, updated))
    }

    /// Deletes the lead within the session tenant and drops it from the
    /// cache. A lead the backend no longer has counts as deleted.
    pub async fn delete_lead(&self, lead_id: &LeadId) -> ServiceResult<()> {
        let ticket = self.begin()?;
        let result = self
            .cancel
            .run(lead_service::delete_lead(
                self.repo.as_ref(),
                lead_id,
                &ticket.tenant_id,
            ))
            .await;
        self.settle(&ticket, result, |leads, _| {
            leads.retain(|lead| !lead.has_id(lead_id));
        })
        .map(|_| ())
    }

    /// Deletes the selected leads in one request.
    ///
    /// When the server reports fewer (or more) affected leads than were
    /// requested the cache is rebuilt from the backend instead of guessing
    /// which ids were removed; the returned outcome is then incomplete.
    pub async fn bulk_delete(&self, lead_ids: &[LeadId]) -> ServiceResult<BulkOutcome> {
        let ticket = self.begin()?;
        let result = self
            .cancel
            .run(lead_service::bulk_delete_leads(
                self.repo.as_ref(),
                &ticket.tenant_id,
                lead_ids,
            ))
            .await;

        match result {
            Ok(outcome) if outcome.is_complete() => {
                let targets = distinct_ids(lead_ids);
                self.settle(&ticket, Ok(outcome), |leads, _| {
                    leads.retain(|lead| !is_targeted(lead, &targets));
                })
            }
            Ok(outcome) => self.reconcile(&ticket, outcome).await,
            Err(err) => self.settle(&ticket, Err(err), |_, _| {}),
        }
    }

    /// Moves the selected leads to `status` in one request. Reconciliation
    /// follows the same rules as [`LeadsViewModel::bulk_delete`].
    pub async fn bulk_update_status(
        &self,
        lead_ids: &[LeadId],
        status: LeadStatus,
    ) -> ServiceResult<BulkOutcome> {
        let ticket = self.begin()?;
        let result = self
            .cancel
            .run(lead_service::bulk_update_lead_status(
                self.repo.as_ref(),
                &ticket.tenant_id,
                lead_ids,
                status,
            ))
            .await;

        match result {
            Ok(outcome) if outcome.is_complete() => {
                let targets = distinct_ids(lead_ids);
                self.settle(&ticket, Ok(outcome), |leads, _| {
                    leads
                        .iter_mut()
                        .filter(|lead| is_targeted(lead, &targets))
                        .for_each(|lead| lead.status = status);
                })
            }
            Ok(outcome) => self.reconcile(&ticket, outcome).await,
            Err(err) => self.settle(&ticket, Err(err), |_, _| {}),
        }
    }

    async fn reconcile(&self, ticket: &Ticket, outcome: BulkOutcome) -> ServiceResult<BulkOutcome> {
        log::info!(
            "Reloading leads of tenant {} after a partial bulk operation",
            ticket.tenant_id
        );
        let refreshed = self
            .cancel
            .run(lead_service::list_tenant_leads(
                self.repo.as_ref(),
                &ticket.tenant_id,
            ))
            .await;
        match refreshed {
            Ok(fresh) => self.settle(ticket, Ok(outcome), move |leads, _| *leads = fresh),
            Err(err) => self.settle(ticket, Err(err), |_, _| {}),
        }
    }

    /// Creates the leads one after another, appending each created lead to
    /// the cache as soon as the backend confirms it. Rows rejected by the
    /// backend are listed in the report.
    ///
    /// An authorization failure, a cancellation or a tenant switch stops the
    /// batch. The report is still returned with `aborted` set, and the leads
    /// created before the stop stay in it.
    pub async fn import_leads(&self, new_leads: &[NewLead]) -> ServiceResult<ImportReport> {
        let ticket = self.begin()?;
        if let Some(foreign) = new_leads
            .iter()
            .find(|lead| lead.tenant_id != ticket.tenant_id)
        {
            return self.settle(&ticket, Err(foreign_tenant(&foreign.tenant_id)), |_, _| {});
        }

        let mut report = ImportReport::default();
        for (index, new_lead) in new_leads.iter().enumerate() {
            if !self.is_current(&ticket) {
                report.aborted = Some(ServiceError::Cancelled);
                break;
            }
            let result = self
                .cancel
                .run(lead_service::create_lead(self.repo.as_ref(), new_lead))
                .await;
            if let Ok(created) = &result {
                self.append_if_current(&ticket, created);
            }
            if !report.record(index, result) {
                break;
            }
        }
        report.log_summary();

        let mut state = lock(&self.state);
        if state.generation != ticket.generation {
            report.aborted.get_or_insert(ServiceError::Cancelled);
            return Ok(report);
        }
        let outcome = report.aborted.clone().map_or(Ok(()), Err);
        state.op.finish(&outcome);
        Ok(report)
    }

    fn is_current(&self, ticket: &Ticket) -> bool {
        lock(&self.state).generation == ticket.generation
    }

    fn append_if_current(&self, ticket: &Ticket, created: &Lead) {
        let mut state = lock(&self.state);
        if state.generation == ticket.generation {
            state.leads.push(created.clone());
        }
    }

    /// Rebinds the view-model to another tenant. The cache and error are
    /// cleared and replies to calls started before the switch are dropped.
    pub fn switch_tenant(&self, tenant_id: TenantId) {
        let mut state = lock(&self.state);
        if state.tenant_id == tenant_id {
            return;
        }
        log::debug!("Switching lead cache from {} to {tenant_id}", state.tenant_id);
        state.tenant_id = tenant_id;
        state.generation += 1;
        state.leads.clear();
        state.op.reset();
    }

    pub fn tenant_id(&self) -> TenantId {
        lock(&self.state).tenant_id.clone()
    }

    pub fn leads(&self) -> Vec<Lead> {
        lock(&self.state).leads.clone()
    }

    pub fn lead(&self, lead_id: &LeadId) -> Option<Lead> {
        lock(&self.state)
            .leads
            .iter()
            .find(|lead| lead.has_id(lead_id))
            .cloned()
    }

    pub fn leads_by_status(&self, status: LeadStatus) -> Vec<Lead> {
        self.filter(&LeadFilter::new().status(status))
    }

    pub fn filter(&self, filter: &LeadFilter) -> Vec<Lead> {
        lock(&self.state)
            .leads
            .iter()
            .filter(|lead| filter.matches(lead))
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> LeadStats {
        LeadStats::from_leads(&lock(&self.state).leads)
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).op.is_loading()
    }

    pub fn error(&self) -> Option<ServiceError> {
        lock(&self.state).op.error()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        lock(&self.state).op.error_kind()
    }

    pub fn clear_error(&self) {
        lock(&self.state).op.clear_error();
    }

    /// Writes the cached leads as CSV.
    pub fn export_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let leads = self.leads();
        write_leads_csv(writer, &leads)
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Aborts in-flight calls. Every later call fails with
    /// [`ServiceError::Cancelled`].
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

fn replace_entry(leads: &mut [Lead], updated: &Lead) {
    let Some(id) = updated.id.as_ref() else {
        return;
    };
    if let Some(entry) = leads.iter_mut().find(|lead| lead.has_id(id)) {
        *entry = updated.clone();
    }
}

fn is_targeted(lead: &Lead, targets: &[LeadId]) -> bool {
    lead.id.as_ref().is_some_and(|id| targets.contains(id))
}

fn foreign_tenant(tenant_id: &TenantId) -> ServiceError {
    ServiceError::Validation(format!(
        "Lead belongs to tenant {tenant_id}, not to the current session"
    ))
}
