use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::ApiError;

/// Cancelled when the page that started a request goes away.
/// Results that arrive afterwards are turned into [`ApiError::Cancelled`]
/// so callers drop them instead of writing into disposed state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub async fn run<T, F>(&self, request: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        if self.is_cancelled() {
            return Err(ApiError::Cancelled);
        }
        let result = request.await;
        if self.is_cancelled() {
            Err(ApiError::Cancelled)
        } else {
            result
        }
    }
}

/// Keeps polls from overlapping: a tick that finds the previous poll
/// still in flight is skipped.
#[derive(Debug, Clone, Default)]
pub struct PollGate {
    busy: Arc<AtomicBool>,
}

/// Held for the duration of one poll; releases the gate on drop.
#[derive(Debug)]
pub struct PollTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for PollTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

impl PollGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_enter(&self) -> Option<PollTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| PollTicket {
                busy: self.busy.clone(),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_result_after_cancel_is_discarded() {
        let token = CancelToken::new();
        let inner = token.clone();
        let result = token
            .run(async move {
                inner.cancel();
                Ok::<_, ApiError>(5)
            })
            .await;
        assert_eq!(result, Err(ApiError::Cancelled));
    }

    #[tokio::test]
    async fn test_live_token_passes_result_through() {
        let token = CancelToken::new();
        assert_eq!(token.run(async { Ok::<_, ApiError>(5) }).await, Ok(5));
        let err = token
            .run(async { Err::<i64, _>(ApiError::Network("down".into())) })
            .await;
        assert_eq!(err, Err(ApiError::Network("down".into())));
    }

    #[tokio::test]
    async fn test_cancelled_token_skips_request() {
        let token = CancelToken::new();
        token.cancel();
        let mut ran = false;
        let result = token
            .run(async {
                ran = true;
                Ok::<_, ApiError>(())
            })
            .await;
        assert_eq!(result, Err(ApiError::Cancelled));
        assert!(!ran);
    }

    #[test]
    fn test_gate_skips_overlapping_polls() {
        let gate = PollGate::new();
        let first = gate.try_enter();
        assert!(first.is_some());
        assert!(gate.is_busy());
        assert!(gate.try_enter().is_none());

        drop(first);
        assert!(!gate.is_busy());
        assert!(gate.try_enter().is_some());
    }
}
