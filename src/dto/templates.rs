//! Request bodies of the `/templates` endpoints.

use serde::Serialize;

use crate::domain::template::{NewEmailTemplate, TemplateVariable};

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest<'a> {
    pub tenant_id: &'a str,
    pub name: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
    pub from: &'a str,
    pub to: &'a str,
    #[serde(rename = "variable", skip_serializing_if = "Option::is_none")]
    pub variables: Option<&'a [TemplateVariable]>,
}

impl<'a> From<&'a NewEmailTemplate> for CreateTemplateRequest<'a> {
    fn from(template: &'a NewEmailTemplate) -> Self {
        Self {
            tenant_id: template.tenant_id.as_str(),
            name: template.name.as_str(),
            subject: template.subject.as_str(),
            body: template.body.as_str(),
            from: template.from.as_str(),
            to: template.to.as_str(),
            variables: (!template.variables.is_empty()).then_some(template.variables.as_slice()),
        }
    }
}
