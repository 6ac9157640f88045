use serde::{Deserialize, Serialize};

use crate::domain::types::{TenantId, UserId};

/// Subscription plan of a dashboard user.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Starter,
    Growth,
    Pro,
    Enterprise,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub plan: Plan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    #[serde(default)]
    pub plan: Option<String>,
}

/// Authenticated user with the bearer token issued for it.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthSession {
    pub user: User,
    pub tenant: Option<Tenant>,
    pub token: String,
}

impl AuthSession {
    /// Tenant the session operates on: the explicit tenant when the backend
    /// returned one, otherwise the tenant recorded on the user.
    pub fn tenant_id(&self) -> Option<&TenantId> {
        self.tenant
            .as_ref()
            .map(|tenant| &tenant.id)
            .or(self.user.tenant_id.as_ref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Personal and company details collected by the first signup step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignupPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    pub company_name: String,
    pub company_size: String,
    pub industry: String,
    pub website: Option<String>,
}

/// Answers collected by the follow-up onboarding step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdditionalSignupPayload {
    pub product_description: String,
    pub target_market: String,
    pub role: String,
    pub hear_about_us: String,
    pub primary_goal: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(tenant: Option<&str>) -> User {
        User {
            id: UserId::new("u-1").expect("valid id"),
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            plan: Plan::Pro,
            tenant_id: tenant.map(|t| TenantId::new(t).expect("valid id")),
        }
    }

    #[test]
    fn session_prefers_explicit_tenant() {
        let session = AuthSession {
            user: user(Some("from-user")),
            tenant: Some(Tenant {
                id: TenantId::new("explicit").expect("valid id"),
                name: "Acme".to_string(),
                plan: None,
            }),
            token: "t".to_string(),
        };
        assert_eq!(session.tenant_id().map(TenantId::as_str), Some("explicit"));

        let session = AuthSession {
            tenant: None,
            ..session
        };
        assert_eq!(session.tenant_id().map(TenantId::as_str), Some("from-user"));
    }

    #[test]
    fn user_plan_defaults_to_free() {
        let user: User =
            serde_json::from_str(r#"{"id":"1","name":"A","email":"a@b.c"}"#).expect("valid user");
        assert_eq!(user.plan, Plan::Free);
        assert_eq!(user.tenant_id, None);
    }
}
