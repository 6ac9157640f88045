//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tokio::net::TcpListener;
use tokio::sync::Notify;

use leadgen_crm::domain::lead::{
    DashboardLeads, DashboardStats, Lead, LeadStatus, NewLead, UpdateLead,
};
use leadgen_crm::domain::types::{LeadId, TenantId};
use leadgen_crm::dto::leads::BulkResponse;
use leadgen_crm::models::config::ClientConfig;
use leadgen_crm::repository::errors::{RepositoryError, RepositoryResult};
use leadgen_crm::repository::{LeadReader, LeadWriter};

pub fn tenant(raw: &str) -> TenantId {
    TenantId::new(raw).expect("valid tenant id")
}

pub fn lead_id(raw: &str) -> LeadId {
    LeadId::new(raw).expect("valid lead id")
}

/// Lead store keyed by tenant, behaving like the backend: ids are assigned on
/// create and bulk operations report how many leads they actually touched.
#[derive(Default)]
pub struct InMemoryRepository {
    leads: Mutex<HashMap<TenantId, Vec<Lead>>>,
    next_id: AtomicU64,
    /// When set, tenant listings wait for a permit before answering.
    gate: Option<Arc<Notify>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// Seeds a lead directly, bypassing the API.
    pub fn seed(&self, tenant_id: &TenantId, company: &str, status: LeadStatus) -> LeadId {
        let id = self.assign_id();
        let lead = Lead {
            id: Some(id.clone()),
            company_name: company.to_string(),
            contact_name: format!("{company} contact"),
            contact_email: format!("hello@{}.com", company.to_lowercase()),
            contact_phone: None,
            status,
        };
        self.leads
            .lock()
            .expect("store lock")
            .entry(tenant_id.clone())
            .or_default()
            .push(lead);
        id
    }

    pub fn stored(&self, tenant_id: &TenantId) -> Vec<Lead> {
        self.leads
            .lock()
            .expect("store lock")
            .get(tenant_id)
            .cloned()
            .unwrap_or_default()
    }

    fn assign_id(&self) -> LeadId {
        let next = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        lead_id(&next.to_string())
    }

    fn modify(&self, id: &LeadId, change: impl FnOnce(&mut Lead)) -> RepositoryResult<Lead> {
        let mut store = self.leads.lock().expect("store lock");
        let lead = store
            .values_mut()
            .flat_map(|leads| leads.iter_mut())
            .find(|lead| lead.has_id(id))
            .ok_or_else(|| RepositoryError::NotFound("Lead not found".to_string()))?;
        change(lead);
        Ok(lead.clone())
    }
}

#[async_trait]
impl LeadReader for InMemoryRepository {
    async fn list_tenant_leads(&self, tenant_id: &TenantId) -> RepositoryResult<Vec<Lead>> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(self.stored(tenant_id))
    }

    async fn get_lead_by_id(
        &self,
        lead_id: &LeadId,
        tenant_id: &TenantId,
    ) -> RepositoryResult<Option<Lead>> {
        Ok(self
            .stored(tenant_id)
            .into_iter()
            .find(|lead| lead.has_id(lead_id)))
    }

    async fn get_dashboard_leads(&self, tenant_id: &TenantId) -> RepositoryResult<DashboardLeads> {
        let leads = self.stored(tenant_id);
        let count = |status: LeadStatus| leads.iter().filter(|l| l.status == status).count() as u64;
        Ok(DashboardLeads {
            stats: DashboardStats {
                interested: count(LeadStatus::Interested),
                follow_up: count(LeadStatus::FollowUp),
                high_priority: count(LeadStatus::ImmediateAction),
            },
            leads,
        })
    }
}

#[async_trait]
impl LeadWriter for InMemoryRepository {
    async fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        let lead = Lead {
            id: Some(self.assign_id()),
            company_name: new_lead.company_name.as_str().to_string(),
            contact_name: new_lead.contact_name.as_str().to_string(),
            contact_email: new_lead.contact_email.as_str().to_string(),
            contact_phone: new_lead
                .contact_phone
                .as_ref()
                .map(|phone| phone.as_str().to_string()),
            status: LeadStatus::Interested,
        };
        self.leads
            .lock()
            .expect("store lock")
            .entry(new_lead.tenant_id.clone())
            .or_default()
            .push(lead.clone());
        Ok(lead)
    }

    async fn update_lead(&self, lead_id: &LeadId, updates: &UpdateLead) -> RepositoryResult<Lead> {
        self.modify(lead_id, |lead| {
            if let Some(name) = &updates.company_name {
                lead.company_name = name.as_str().to_string();
            }
            if let Some(name) = &updates.contact_name {
                lead.contact_name = name.as_str().to_string();
            }
            if let Some(email) = &updates.contact_email {
                lead.contact_email = email.as_str().to_string();
            }
            if let Some(phone) = &updates.contact_phone {
                lead.contact_phone = Some(phone.as_str().to_string());
            }
        })
    }

    async fn update_lead_status(
        &self,
        lead_id: &LeadId,
        status: LeadStatus,
    ) -> RepositoryResult<Lead> {
        self.modify(lead_id, |lead| lead.status = status)
    }

    async fn delete_lead(&self, lead_id: &LeadId, tenant_id: &TenantId) -> RepositoryResult<()> {
        let mut store = self.leads.lock().expect("store lock");
        let leads = store.entry(tenant_id.clone()).or_default();
        let before = leads.len();
        leads.retain(|lead| !lead.has_id(lead_id));
        if leads.len() == before {
            return Err(RepositoryError::NotFound("Lead not found".to_string()));
        }
        Ok(())
    }

    async fn bulk_delete_leads(
        &self,
        tenant_id: &TenantId,
        lead_ids: &[LeadId],
    ) -> RepositoryResult<BulkResponse> {
        let mut store = self.leads.lock().expect("store lock");
        let leads = store.entry(tenant_id.clone()).or_default();
        let before = leads.len();
        leads.retain(|lead| !lead.id.as_ref().is_some_and(|id| lead_ids.contains(id)));
        Ok(BulkResponse {
            message: "Leads deleted successfully".to_string(),
            count: (before - leads.len()) as u64,
        })
    }

    async fn bulk_update_lead_status(
        &self,
        tenant_id: &TenantId,
        lead_ids: &[LeadId],
        status: LeadStatus,
    ) -> RepositoryResult<BulkResponse> {
        let mut store = self.leads.lock().expect("store lock");
        let mut count = 0;
        for lead in store.entry(tenant_id.clone()).or_default().iter_mut() {
            if lead.id.as_ref().is_some_and(|id| lead_ids.contains(id)) {
                lead.status = status;
                count += 1;
            }
        }
        Ok(BulkResponse {
            message: "Lead statuses updated".to_string(),
            count,
        })
    }
}

/// Request captured by [`StubServer`].
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string.
    pub target: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

type Responder = dyn Fn(&RecordedRequest) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    respond: Arc<Responder>,
}

async fn answer(
    State(stub): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = RecordedRequest {
        method: method.to_string(),
        target: uri
            .path_and_query()
            .map_or_else(|| uri.path().to_string(), ToString::to_string),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    let (status, payload) = (stub.respond)(&request);
    stub.requests.lock().expect("requests lock").push(request);

    let status = StatusCode::from_u16(status).expect("valid status code");
    (status, [(header::CONTENT_TYPE, "application/json")], payload).into_response()
}

/// Local HTTP server answering every request through `respond` and
/// recording what it received.
pub struct StubServer {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let router = Router::new().fallback(answer).with_state(StubState {
            requests: requests.clone(),
            respond: Arc::new(respond),
        });
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub server");
        });

        Self { addr, requests }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: format!("http://{}", self.addr),
            timeout_ms: 2_000,
            ..ClientConfig::default()
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests()
            .pop()
            .expect("the stub received a request")
    }
}
