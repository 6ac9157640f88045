//! Authentication state shared with the transport.

use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::auth::{
    AdditionalSignupPayload, AuthSession, LoginCredentials, SignupPayload, User,
};
use crate::domain::types::TenantId;
use crate::repository::AuthGateway;
use crate::services::auth as auth_service;
use crate::services::{ErrorKind, ServiceError, ServiceResult};
use crate::transport::ApiClient;
use crate::viewmodel::{CancelToken, OpState, lock};

#[derive(Debug, Default)]
struct SessionSlot {
    auth: Option<AuthSession>,
    /// Configured token used until somebody signs in.
    fallback_token: Option<String>,
}

/// Shared holder of the signed-in session. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionSlot>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionSlot> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionSlot> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> Option<AuthSession> {
        self.read().auth.clone()
    }

    pub fn set(&self, session: AuthSession) {
        self.write().auth = Some(session);
    }

    /// Ends the session. The configured token is dropped as well, so no
    /// credentials are sent until the next sign-in.
    pub fn clear(&self) {
        *self.write() = SessionSlot::default();
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().auth.is_some()
    }

    /// Token of the signed-in user, else the configured one.
    pub fn token(&self) -> Option<String> {
        let slot = self.read();
        slot.auth
            .as_ref()
            .map(|session| session.token.clone())
            .or_else(|| slot.fallback_token.clone())
    }

    pub fn tenant_id(&self) -> Option<TenantId> {
        self.read()
            .auth
            .as_ref()
            .and_then(|session| session.tenant_id().cloned())
    }

    /// Wires the session into `api`: requests carry its token, or
    /// `fallback_token` while nobody is signed in, and a `401 Unauthorized`
    /// response ends the session.
    pub fn attach(&self, api: ApiClient, fallback_token: Option<String>) -> ApiClient {
        self.write().fallback_token = fallback_token;
        let tokens = self.clone();
        let teardown = self.clone();
        api.with_token_provider(move || tokens.token())
            .with_unauthorized_hook(move || teardown.clear())
    }
}

pub struct AuthViewModel<R: ?Sized> {
    repo: Arc<R>,
    session: Session,
    state: Mutex<OpState>,
    cancel: CancelToken,
}

impl<R> AuthViewModel<R>
where
    R: AuthGateway + ?Sized,
{
    pub fn new(repo: Arc<R>, session: Session) -> Self {
        Self {
            repo,
            session,
            state: Mutex::new(OpState::default()),
            cancel: CancelToken::new(),
        }
    }

    fn begin(&self) -> ServiceResult<()> {
        lock(&self.state).start(&self.cancel)
    }

    fn settle<T>(&self, result: ServiceResult<T>) -> ServiceResult<T> {
        lock(&self.state).finish(&result);
        result
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> ServiceResult<AuthSession> {
        self.begin()?;
        let result = self
            .cancel
            .run(auth_service::login(self.repo.as_ref(), credentials))
            .await;
        if let Ok(session) = &result {
            self.session.set(session.clone());
        }
        self.settle(result)
    }

    pub async fn signup(&self, payload: &SignupPayload) -> ServiceResult<AuthSession> {
        self.begin()?;
        let result = self
            .cancel
            .run(auth_service::signup(self.repo.as_ref(), payload))
            .await;
        if let Ok(session) = &result {
            self.session.set(session.clone());
        }
        self.settle(result)
    }

    /// Sends the onboarding answers for the signed-in tenant and stores the
    /// updated user in the session.
    pub async fn complete_additional_signup(
        &self,
        payload: &AdditionalSignupPayload,
    ) -> ServiceResult<User> {
        self.begin()?;
        let result = match self.session.tenant_id() {
            Some(tenant_id) => {
                self.cancel
                    .run(auth_service::complete_additional_signup(
                        self.repo.as_ref(),
                        &tenant_id,
                        payload,
                    ))
                    .await
            }
            None => Err(ServiceError::Unauthorized(
                "Sign in before completing the setup".to_string(),
            )),
        };
        if let (Ok(user), Some(mut current)) = (&result, self.session.current()) {
            current.user = user.clone();
            self.session.set(current);
        }
        self.settle(result)
    }

    pub fn logout(&self) {
        self.session.clear();
        lock(&self.state).clear_error();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).is_loading()
    }

    pub fn error(&self) -> Option<ServiceError> {
        lock(&self.state).error()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        lock(&self.state).error_kind()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}
