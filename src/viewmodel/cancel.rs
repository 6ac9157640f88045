use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::services::{ServiceError, ServiceResult};

/// Cancellation flag shared between a view-model and whoever owns its
/// lifecycle. Once cancelled it stays cancelled.
#[derive(Clone, Debug)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }

    /// Drives `operation` to completion unless the token is cancelled first.
    /// A cancellation observed before, during or right after the operation
    /// yields [`ServiceError::Cancelled`].
    pub async fn run<F, T>(&self, operation: F) -> ServiceResult<T>
    where
        F: Future<Output = ServiceResult<T>>,
    {
        if self.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }

        let result = tokio::select! {
            biased;
            _ = self.cancelled() => Err(ServiceError::Cancelled),
            result = operation => result,
        };

        if self.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn run_returns_result_when_not_cancelled() {
        let token = CancelToken::new();
        let value = token.run(async { Ok(7) }).await;
        assert_eq!(value, Ok(7));
    }

    #[tokio::test]
    async fn cancelled_token_short_circuits() {
        let token = CancelToken::new();
        token.cancel();
        let value: ServiceResult<()> = token
            .run(async { Err(ServiceError::Network("polled".to_string())) })
            .await;
        assert_eq!(value, Err(ServiceError::Cancelled));
    }

    #[tokio::test]
    async fn cancel_interrupts_pending_operation() {
        let token = CancelToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let value: ServiceResult<()> = token
            .run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            })
            .await;

        assert_eq!(value, Err(ServiceError::Cancelled));
        assert!(token.is_cancelled());
    }
}
