use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ContactEmail, TemplateBody, TemplateId, TemplateName, TemplateSubject, TenantId,
};

/// Placeholder that can be substituted into a template body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVariable {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// Email template as stored by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailTemplate {
    pub id: TemplateId,
    pub tenant_id: TenantId,
    pub name: String,
    pub subject: String,
    pub body: String,
    pub from: String,
    pub to: String,
    #[serde(default, alias = "variable")]
    pub variables: Vec<TemplateVariable>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewEmailTemplate {
    pub tenant_id: TenantId,
    pub name: TemplateName,
    pub subject: TemplateSubject,
    pub body: TemplateBody,
    pub from: ContactEmail,
    /// Recipient expression, usually a placeholder such as `{{lead.email}}`.
    pub to: String,
    pub variables: Vec<TemplateVariable>,
}
