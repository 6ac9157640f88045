//! Request and response bodies of the authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::auth::{
    AdditionalSignupPayload, AuthSession, LoginCredentials, SignupPayload, Tenant, User,
};

#[derive(Debug, Serialize, PartialEq)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for LoginRequest<'a> {
    fn from(credentials: &'a LoginCredentials) -> Self {
        Self {
            email: credentials.email.as_str(),
            password: credentials.password.as_str(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub company_name: &'a str,
    pub company_size: &'a str,
    pub industry: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<&'a str>,
}

impl<'a> From<&'a SignupPayload> for SignupRequest<'a> {
    fn from(payload: &'a SignupPayload) -> Self {
        Self {
            name: &payload.name,
            email: &payload.email,
            password: &payload.password,
            company_name: &payload.company_name,
            company_size: &payload.company_size,
            industry: &payload.industry,
            website: payload.website.as_deref(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalSignupRequest<'a> {
    pub product_description: &'a str,
    pub target_market: &'a str,
    pub role: &'a str,
    pub hear_about_us: &'a str,
    pub primary_goal: &'a str,
}

impl<'a> From<&'a AdditionalSignupPayload> for AdditionalSignupRequest<'a> {
    fn from(payload: &'a AdditionalSignupPayload) -> Self {
        Self {
            product_description: &payload.product_description,
            target_market: &payload.target_market,
            role: &payload.role,
            hear_about_us: &payload.hear_about_us,
            primary_goal: &payload.primary_goal,
        }
    }
}

/// Reply of `POST /auth/login` and `POST /tenants/create`.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    #[serde(default)]
    pub tenant: Option<Tenant>,
    pub token: String,
}

impl From<AuthResponse> for AuthSession {
    fn from(resp: AuthResponse) -> Self {
        Self {
            user: resp.user,
            tenant: resp.tenant,
            token: resp.token,
        }
    }
}

/// Reply of `POST /tenant/{tenantId}/additional-setup`.
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub user: User,
}
