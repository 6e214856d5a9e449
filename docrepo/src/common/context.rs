use crate::errors::{ErrorKind, RepoError, RepoResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A cancellation token threaded through every repository operation.
///
/// # Purpose
/// Carries per-call cancellation and deadline state so that an in-flight
/// operation can be abandoned by the caller instead of being pinned to an
/// execution context fixed at repository construction. Operations check the
/// token on entry and between store round trips.
///
/// # Characteristics
/// - **Cheap to clone**: All clones share the same flag through `Arc`
/// - **Thread-safe**: The cancel flag is an atomic; cancelling from another
///   thread is race-free
/// - **Deadline-aware**: An optional deadline cancels the token implicitly
///   once it has passed
///
/// # Usage
/// ```rust,ignore
/// use docrepo::common::CancelToken;
///
/// let ctx = CancelToken::none();
/// let doc = repo.get(&id, &ctx)?;
///
/// let ctx = CancelToken::with_timeout(Duration::from_secs(2));
/// let all = repo.filter(None, &FilterOptions::new(), &ctx)?;
/// ```
#[derive(Clone)]
pub struct CancelToken {
    inner: Arc<CancelTokenInner>,
}

struct CancelTokenInner {
    cancelled: AtomicBool,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Creates a token that is never cancelled implicitly.
    pub fn none() -> Self {
        CancelToken {
            inner: Arc::new(CancelTokenInner {
                cancelled: AtomicBool::new(false),
                deadline: None,
            }),
        }
    }

    /// Creates a token that cancels itself once `timeout` has elapsed.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Duration after which the token reports cancellation
    pub fn with_timeout(timeout: Duration) -> Self {
        CancelToken {
            inner: Arc::new(CancelTokenInner {
                cancelled: AtomicBool::new(false),
                deadline: Some(Instant::now() + timeout),
            }),
        }
    }

    /// Cancels the token. All clones observe the cancellation.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
    }

    /// Checks whether the token has been cancelled or its deadline passed.
    pub fn is_cancelled(&self) -> bool {
        if self.inner.cancelled.load(Ordering::SeqCst) {
            return true;
        }
        match self.inner.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    /// Fails with [ErrorKind::OperationCancelled] if the token is cancelled.
    ///
    /// # Returns
    /// * `Ok(())` - The operation may proceed
    /// * `Err(RepoError)` - The token was cancelled or timed out
    pub fn ensure_active(&self) -> RepoResult<()> {
        if self.is_cancelled() {
            log::debug!("Operation aborted by cancellation token");
            return Err(RepoError::new(
                "Operation cancelled",
                ErrorKind::OperationCancelled,
            ));
        }
        Ok(())
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        CancelToken::none()
    }
}
