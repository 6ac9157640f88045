use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CampaignId, TemplateId, TenantId};

/// Scheduled email campaign built from a template.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: CampaignId,
    pub tenant_id: TenantId,
    pub template_id: TemplateId,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCampaign {
    pub tenant_id: TenantId,
    pub template_id: TemplateId,
    pub scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateCampaign {
    pub scheduled_at: Option<DateTime<Utc>>,
}
