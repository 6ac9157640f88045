//! Login and tenant signup.

use crate::domain::auth::{
    AdditionalSignupPayload, AuthSession, LoginCredentials, SignupPayload, User,
};
use crate::domain::types::TenantId;
use crate::repository::AuthGateway;
use crate::services::{ServiceError, ServiceResult};

pub async fn login<R>(repo: &R, credentials: &LoginCredentials) -> ServiceResult<AuthSession>
where
    R: AuthGateway + ?Sized,
{
    let session = repo.login(credentials).await.map_err(|err| {
        log::error!("Login failed for {}: {err}", credentials.email);
        ServiceError::from(err)
    })?;
    log::info!("User {} logged in", session.user.id);
    Ok(session)
}

pub async fn signup<R>(repo: &R, payload: &SignupPayload) -> ServiceResult<AuthSession>
where
    R: AuthGateway + ?Sized,
{
    let session = repo.signup(payload).await.map_err(|err| {
        log::error!("Signup failed for {}: {err}", payload.email);
        ServiceError::from(err)
    })?;
    log::info!("Tenant created for {}", payload.company_name);
    Ok(session)
}

pub async fn complete_additional_signup<R>(
    repo: &R,
    tenant_id: &TenantId,
    payload: &AdditionalSignupPayload,
) -> ServiceResult<User>
where
    R: AuthGateway + ?Sized,
{
    repo.complete_additional_signup(tenant_id, payload)
        .await
        .map_err(|err| {
            log::error!("Failed to complete setup of tenant {tenant_id}: {err}");
            ServiceError::from(err)
        })
}
