//! Stateful, tenant-bound front ends over the services. Each view-model keeps
//! its cache and `loading`/`error` flags behind a mutex that is never held
//! across an `.await`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::services::{ErrorKind, ServiceError, ServiceResult};

pub mod auth;
pub mod campaigns;
pub mod cancel;
pub mod leads;
pub mod templates;

pub use cancel::CancelToken;

/// Locks view-model state, recovering the guard if a panicking thread
/// poisoned the mutex.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// `loading` flag and last error of a view-model. The last operation to
/// finish decides both.
#[derive(Debug, Default)]
pub(crate) struct OpState {
    loading: bool,
    error: Option<ServiceError>,
}

impl OpState {
    /// Marks an operation as started unless `cancel` already fired.
    pub(crate) fn start(&mut self, cancel: &CancelToken) -> ServiceResult<()> {
        if cancel.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }
        self.loading = true;
        Ok(())
    }

    /// Success clears the error, a cancellation keeps the previous one.
    pub(crate) fn finish<T>(&mut self, result: &ServiceResult<T>) {
        self.loading = false;
        match result {
            Ok(_) => self.error = None,
            Err(ServiceError::Cancelled) => {}
            Err(err) => self.error = Some(err.clone()),
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn error(&self) -> Option<ServiceError> {
        self.error.clone()
    }

    pub(crate) fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(ServiceError::kind)
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }
}
