//! Cached list of a tenant's e-mail templates.

use std::sync::{Arc, Mutex};

use crate::domain::template::{EmailTemplate, NewEmailTemplate};
use crate::domain::types::{TemplateId, TenantId};
use crate::repository::{TemplateReader, TemplateWriter};
use crate::services::templates as template_service;
use crate::services::{ErrorKind, ServiceError, ServiceResult};
use crate::viewmodel::{CancelToken, OpState, lock};

#[derive(Debug, Default)]
struct TemplatesState {
    templates: Vec<EmailTemplate>,
    op: OpState,
}

pub struct TemplatesViewModel<R: ?Sized> {
    repo: Arc<R>,
    tenant_id: TenantId,
    state: Mutex<TemplatesState>,
    cancel: CancelToken,
}

impl<R> TemplatesViewModel<R>
where
    R: TemplateReader + TemplateWriter + ?Sized,
{
    pub fn new(repo: Arc<R>, tenant_id: TenantId) -> Self {
        Self::with_cancel_token(repo, tenant_id, CancelToken::new())
    }

    pub fn with_cancel_token(repo: Arc<R>, tenant_id: TenantId, cancel: CancelToken) -> Self {
        Self {
            repo,
            tenant_id,
            state: Mutex::new(TemplatesState::default()),
            cancel,
        }
    }

    fn begin(&self) -> ServiceResult<()> {
        lock(&self.state).op.start(&self.cancel)
    }

    fn settle<T>(
        &self,
        result: ServiceResult<T>,
        apply: impl FnOnce(&mut Vec<EmailTemplate>, &T),
    ) -> ServiceResult<T> {
        let mut state = lock(&self.state);
        state.op.finish(&result);
        if let Ok(value) = &result {
            apply(&mut state.templates, value);
        }
        result
    }

    /// Replaces the cache with the tenant's templates.
    pub async fn load(&self) -> ServiceResult<Vec<EmailTemplate>> {
        self.begin()?;
        let result = self
            .cancel
            .run(template_service::list_templates(
                self.repo.as_ref(),
                &self.tenant_id,
            ))
            .await;
        self.settle(result, |templates, fetched| templates.clone_from(fetched))
    }

    /// Creates a template and puts it first in the cache.
    pub async fn create_template(&self, template: &NewEmailTemplate) -> ServiceResult<EmailTemplate> {
        self.begin()?;
        let result = if template.tenant_id == self.tenant_id {
            self.cancel
                .run(template_service::create_template(
                    self.repo.as_ref(),
                    template,
                ))
                .await
        } else {
            Err(ServiceError::Validation(format!(
                "Template belongs to tenant {}, not to the current session",
                template.tenant_id
            )))
        };
        self.settle(result, |templates, created| {
            templates.insert(0, created.clone());
        })
    }

    pub fn templates(&self) -> Vec<EmailTemplate> {
        lock(&self.state).templates.clone()
    }

    pub fn template(&self, template_id: &TemplateId) -> Option<EmailTemplate> {
        lock(&self.state)
            .templates
            .iter()
            .find(|template| &template.id == template_id)
            .cloned()
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

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}
