//! Per-request timeout and external cancellation

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::error::{AuthError, CventError};

/// Why a bounded request did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupted {
    TimedOut(Duration),
    Cancelled,
}

/// Run `fut` until it completes, `timeout` elapses, or `cancel` fires.
/// Cancellation is checked first, so an already-cancelled token never starts the request.
pub async fn bounded<F>(fut: F, timeout: Duration, cancel: &CancellationToken) -> Result<F::Output, Interrupted>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Interrupted::Cancelled),
        outcome = tokio::time::timeout(timeout, fut) => outcome.map_err(|_| Interrupted::TimedOut(timeout)),
    }
}

impl From<Interrupted> for CventError {
    fn from(interrupted: Interrupted) -> Self {
        match interrupted {
            Interrupted::TimedOut(after) => CventError::Timeout(after),
            Interrupted::Cancelled => CventError::Cancelled,
        }
    }
}

impl From<Interrupted> for AuthError {
    fn from(interrupted: Interrupted) -> Self {
        match interrupted {
            Interrupted::TimedOut(after) => AuthError::Timeout(after),
            Interrupted::Cancelled => AuthError::Cancelled,
        }
    }
}
