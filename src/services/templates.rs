//! E-mail template operations.

use crate::domain::template::{EmailTemplate, NewEmailTemplate};
use crate::domain::types::TenantId;
use crate::repository::{TemplateReader, TemplateWriter};
use crate::services::{ServiceError, ServiceResult};

pub async fn list_templates<R>(repo: &R, tenant_id: &TenantId) -> ServiceResult<Vec<EmailTemplate>>
where
    R: TemplateReader + ?Sized,
{
    repo.list_templates(tenant_id).await.map_err(|err| {
        log::error!("Failed to load templates of tenant {tenant_id}: {err}");
        ServiceError::from(err)
    })
}

pub async fn create_template<R>(repo: &R, template: &NewEmailTemplate) -> ServiceResult<EmailTemplate>
where
    R: TemplateWriter + ?Sized,
{
    repo.create_template(template).await.map_err(|err| {
        log::error!("Failed to create template {}: {err}", template.name);
        ServiceError::from(err)
    })
}
