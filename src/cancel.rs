//! Cooperative Cancellation
//!
//! Next-Closure (C5) checks a cancellation token at the top of each step;
//! the simplification engine (C8) checks at the start of each candidate
//! pick (spec.md §5). On cancellation, the caller gets
//! [`FcaError::Cancelled`][crate::error::FcaError::Cancelled] and no
//! partial state is left observable.
//!
//! Modeled on a query-timeout controller: an atomic flag shared across
//! threads via a cheap handle, but without a built-in deadline — the core
//! contract is cancellation, not wall-clock timeouts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{FcaError, FcaResult};

/// A cooperative cancellation flag, cheaply cloneable.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns `Err(Cancelled)` if cancellation has been requested.
    pub fn check(&self) -> FcaResult<()> {
        if self.is_cancelled() {
            Err(FcaError::Cancelled)
        } else {
            Ok(())
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// A handle that can be used to cancel from another thread.
    pub fn handle(&self) -> CancelHandle {
        CancelHandle {
            cancelled: Arc::clone(&self.cancelled),
        }
    }
}

/// Cross-thread handle to cancel an in-flight operation.
#[derive(Clone)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_not_cancelled() {
        let token = CancelToken::new();
        assert!(token.check().is_ok());
        assert!(!token.is_cancelled());
    }

    #[test]
    fn cancel_is_observed() {
        let token = CancelToken::new();
        token.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(token.check(), Err(FcaError::Cancelled)));
    }

    #[test]
    fn handle_cancels_original() {
        let token = CancelToken::new();
        let handle = token.handle();
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(handle.is_cancelled());
    }
}
