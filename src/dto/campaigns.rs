//! Request bodies of the `/campaigns` endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::campaign::{NewCampaign, UpdateCampaign};
use crate::domain::types::TenantId;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest<'a> {
    pub tenant_id: &'a str,
    pub template_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a NewCampaign> for CreateCampaignRequest<'a> {
    fn from(campaign: &'a NewCampaign) -> Self {
        Self {
            tenant_id: campaign.tenant_id.as_str(),
            template_id: campaign.template_id.as_str(),
            scheduled_at: campaign.scheduled_at,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaignRequest<'a> {
    pub tenant_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl<'a> UpdateCampaignRequest<'a> {
    pub fn new(tenant_id: &'a TenantId, update: &UpdateCampaign) -> Self {
        Self {
            tenant_id: tenant_id.as_str(),
            scheduled_at: update.scheduled_at,
        }
    }
}

/// Tenant scope sent in the body of campaign reads and deletes.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TenantScope<'a> {
    pub tenant_id: &'a str,
}

impl<'a> From<&'a TenantId> for TenantScope<'a> {
    fn from(tenant_id: &'a TenantId) -> Self {
        Self {
            tenant_id: tenant_id.as_str(),
        }
    }
}
