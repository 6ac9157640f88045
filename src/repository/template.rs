use async_trait::async_trait;

use crate::domain::template::{EmailTemplate, NewEmailTemplate};
use crate::domain::types::TenantId;
use crate::dto::templates::CreateTemplateRequest;
use crate::repository::errors::RepositoryResult;
use crate::repository::{HttpRepository, TemplateReader, TemplateWriter};

pub const CREATE_TEMPLATE: &str = "/templates/create";

pub fn tenant_templates_path(tenant_id: &TenantId) -> String {
    format!("/templates/tenant/{tenant_id}")
}

#[async_trait]
impl TemplateReader for HttpRepository {
    async fn list_templates(&self, tenant_id: &TenantId) -> RepositoryResult<Vec<EmailTemplate>> {
        self.api.get(&tenant_templates_path(tenant_id)).await
    }
}

#[async_trait]
impl TemplateWriter for HttpRepository {
    async fn create_template(
        &self,
        template: &NewEmailTemplate,
    ) -> RepositoryResult<EmailTemplate> {
        self.api
            .post(CREATE_TEMPLATE, &CreateTemplateRequest::from(template))
            .await
    }
}
