//! Request and response bodies of the `/leads` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::lead::{LeadStatus, NewLead, UpdateLead};
use crate::domain::types::{LeadId, TenantId};

/// Body of `POST /leads`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest<'a> {
    pub tenant_id: &'a str,
    pub company_name: &'a str,
    pub contact_email: &'a str,
    pub contact_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<&'a str>,
}

impl<'a> From<&'a NewLead> for CreateLeadRequest<'a> {
    fn from(lead: &'a NewLead) -> Self {
        Self {
            tenant_id: lead.tenant_id.as_str(),
            company_name: lead.company_name.as_str(),
            contact_email: lead.contact_email.as_str(),
            contact_name: lead.contact_name.as_str(),
            contact_phone: lead.contact_phone.as_ref().map(|phone| phone.as_str()),
        }
    }
}

/// Body of `PUT /leads/{leadId}`; absent fields are omitted.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'a Map<String, Value>>,
}

impl<'a> From<&'a UpdateLead> for UpdateLeadRequest<'a> {
    fn from(update: &'a UpdateLead) -> Self {
        Self {
            company_name: update.company_name.as_ref().map(|v| v.as_str()),
            contact_email: update.contact_email.as_ref().map(|v| v.as_str()),
            contact_name: update.contact_name.as_ref().map(|v| v.as_str()),
            contact_phone: update.contact_phone.as_ref().map(|v| v.as_str()),
            metadata: update.metadata.as_ref(),
        }
    }
}

/// Body of `PATCH /leads/{leadId}/status`.
#[derive(Debug, Serialize, PartialEq)]
pub struct UpdateStatusRequest {
    pub status: LeadStatus,
}

/// Query string of `GET /leads/dashboard/leads`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery<'a> {
    pub tenant_id: &'a str,
}

/// Body of `POST /leads/leads/bulk-delete`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest<'a> {
    pub tenant_id: &'a str,
    pub lead_ids: Vec<&'a str>,
}

impl<'a> BulkDeleteRequest<'a> {
    pub fn new(tenant_id: &'a TenantId, lead_ids: &'a [LeadId]) -> Self {
        Self {
            tenant_id: tenant_id.as_str(),
            lead_ids: lead_ids.iter().map(LeadId::as_str).collect(),
        }
    }
}

/// Body of `PATCH /leads/leads/bulk-status`.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusRequest<'a> {
    pub tenant_id: &'a str,
    pub lead_ids: Vec<&'a str>,
    pub status: LeadStatus,
}

impl<'a> BulkStatusRequest<'a> {
    pub fn new(tenant_id: &'a TenantId, lead_ids: &'a [LeadId], status: LeadStatus) -> Self {
        Self {
            tenant_id: tenant_id.as_str(),
            lead_ids: lead_ids.iter().map(LeadId::as_str).collect(),
            status,
        }
    }
}

/// Aggregate reply of both bulk endpoints.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct BulkResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CompanyName, ContactEmail, ContactName, PhoneNumber};
    use serde_json::json;

    #[test]
    fn create_request_uses_camel_case_and_skips_missing_phone() {
        let lead = NewLead::new(
            TenantId::new("t-1").expect("valid"),
            CompanyName::new("Acme").expect("valid"),
            ContactName::new("Jane").expect("valid"),
            ContactEmail::new("jane@acme.io").expect("valid"),
            None,
        );
        let body = serde_json::to_value(CreateLeadRequest::from(&lead)).expect("serialize");
        assert_eq!(
            body,
            json!({
                "tenantId": "t-1",
                "companyName": "Acme",
                "contactEmail": "jane@acme.io",
                "contactName": "Jane",
            })
        );

        let lead = NewLead {
            contact_phone: Some(PhoneNumber::new("+14155552671").expect("valid")),
            ..lead
        };
        let body = serde_json::to_value(CreateLeadRequest::from(&lead)).expect("serialize");
        assert_eq!(body["contactPhone"], json!("+14155552671"));
    }

    #[test]
    fn update_request_only_carries_present_fields() {
        let update = UpdateLead {
            contact_name: Some(ContactName::new("John").expect("valid")),
            ..UpdateLead::default()
        };
        let body = serde_json::to_value(UpdateLeadRequest::from(&update)).expect("serialize");
        assert_eq!(body, json!({ "contactName": "John" }));
    }

    #[test]
    fn bulk_status_request_shape() {
        let tenant = TenantId::new("t-1").expect("valid");
        let ids = vec![LeadId::new("1").expect("valid"), LeadId::new("2").expect("valid")];
        let body = serde_json::to_value(BulkStatusRequest::new(
            &tenant,
            &ids,
            LeadStatus::FollowUp,
        ))
        .expect("serialize");
        assert_eq!(
            body,
            json!({ "tenantId": "t-1", "leadIds": ["1", "2"], "status": "FOLLOW_UP" })
        );
    }

    #[test]
    fn bulk_response_tolerates_missing_message() {
        let resp: BulkResponse = serde_json::from_str(r#"{"count": 3}"#).expect("valid");
        assert_eq!(resp.count, 3);
        assert!(resp.message.is_empty());
    }
}
