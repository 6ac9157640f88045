use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::campaign::{NewCampaign, UpdateCampaign};
use crate::domain::types::{TemplateId, TenantId};
use crate::forms::{FormError, non_blank};

#[derive(Debug, Deserialize)]
/// Form data for scheduling a campaign from a template.
pub struct CampaignForm {
    pub template_id: String,
    /// RFC 3339 timestamp; blank means "not scheduled".
    #[serde(default)]
    pub scheduled_at: Option<String>,
}

fn parse_schedule(value: Option<String>) -> Result<Option<DateTime<Utc>>, FormError> {
    non_blank(value)
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|ts| ts.with_timezone(&Utc))
                .map_err(|_| FormError::InvalidTimestamp)
        })
        .transpose()
}

impl CampaignForm {
    pub fn into_new_campaign(self, tenant_id: TenantId) -> Result<NewCampaign, FormError> {
        Ok(NewCampaign {
            tenant_id,
            template_id: TemplateId::new(self.template_id)
                .map_err(|_| FormError::InvalidTemplateId)?,
            scheduled_at: parse_schedule(self.scheduled_at)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RescheduleCampaignForm {
    #[serde(default)]
    pub scheduled_at: Option<String>,
}

impl TryFrom<RescheduleCampaignForm> for UpdateCampaign {
    type Error = FormError;

    fn try_from(form: RescheduleCampaignForm) -> Result<Self, Self::Error> {
        Ok(Self {
            scheduled_at: parse_schedule(form.scheduled_at)?,
        })
    }
}
