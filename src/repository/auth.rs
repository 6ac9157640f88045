use async_trait::async_trait;

use crate::domain::auth::{
    AdditionalSignupPayload, AuthSession, LoginCredentials, SignupPayload, User,
};
use crate::domain::types::TenantId;
use crate::dto::auth::{
    AdditionalSignupRequest, AuthResponse, LoginRequest, SignupRequest, UserResponse,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{AuthGateway, HttpRepository};

pub const LOGIN: &str = "/auth/login";
pub const SIGNUP: &str = "/tenants/create";

pub fn additional_setup_path(tenant_id: &TenantId) -> String {
    format!("/tenant/{tenant_id}/additional-setup")
}

#[async_trait]
impl AuthGateway for HttpRepository {
    async fn login(&self, credentials: &LoginCredentials) -> RepositoryResult<AuthSession> {
        let response: AuthResponse = self
            .api
            .post(LOGIN, &LoginRequest::from(credentials))
            .await?;
        Ok(response.into())
    }

    async fn signup(&self, payload: &SignupPayload) -> RepositoryResult<AuthSession> {
        let response: AuthResponse = self
            .api
            .post(SIGNUP, &SignupRequest::from(payload))
            .await?;
        Ok(response.into())
    }

    async fn complete_additional_signup(
        &self,
        tenant_id: &TenantId,
        payload: &AdditionalSignupPayload,
    ) -> RepositoryResult<User> {
        let response: UserResponse = self
            .api
            .post(
                &additional_setup_path(tenant_id),
                &AdditionalSignupRequest::from(payload),
            )
            .await?;
        Ok(response.user)
    }
}
