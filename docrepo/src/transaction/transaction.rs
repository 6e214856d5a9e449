use crate::errors::{ErrorKind, RepoError, RepoResult};
use crate::store::{StoreClient, StoreSession};
use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};

/// A transaction scoping exactly one write call.
///
/// # Purpose
/// Wraps a store write session so that the session is released on every
/// exit path. [Transaction::commit] and [Transaction::abort] consume the
/// transaction; if neither runs (an early `?` return, a panic), the `Drop`
/// implementation aborts the session. No session ever leaks across calls.
///
/// # Usage
/// ```rust,ignore
/// let tx = Transaction::begin(&client)?;
/// match collection.insert(document) {
///     Ok(id) => {
///         tx.commit()?;
///         Ok(id)
///     }
///     Err(e) => {
///         tx.abort()?;
///         Err(e)
///     }
/// }
/// ```
pub struct Transaction {
    session: StoreSession,
    finished: AtomicBool,
}

impl Transaction {
    /// Begins a transaction by starting a new session on the client.
    ///
    /// # Returns
    /// * `Ok(Transaction)` - An active transaction
    /// * `Err(RepoError)` - [ErrorKind::Transaction] if the session could
    ///   not be started; the underlying failure is preserved as the cause
    pub fn begin(client: &StoreClient) -> RepoResult<Self> {
        match client.start_session() {
            Ok(session) => Ok(Transaction {
                session,
                finished: AtomicBool::new(false),
            }),
            Err(e) => {
                log::error!("Failed to start session: {}", e);
                Err(RepoError::new_with_cause(
                    "Failed to start session",
                    ErrorKind::Transaction,
                    e,
                ))
            }
        }
    }

    /// Commits the transaction, making the write durable.
    ///
    /// # Returns
    /// * `Ok(())` - The write is committed and the session released
    /// * `Err(RepoError)` - [ErrorKind::Transaction] if the commit failed
    pub fn commit(self) -> RepoResult<()> {
        self.finished.store(true, Ordering::SeqCst);
        match self.session.commit() {
            Ok(()) => Ok(()),
            Err(e) => {
                log::error!("Failed to commit session: {}", e);
                Err(RepoError::new_with_cause(
                    "Failed to commit session",
                    ErrorKind::Transaction,
                    e,
                ))
            }
        }
    }

    /// Aborts the transaction, restoring the pre-call state.
    pub fn abort(self) -> RepoResult<()> {
        self.finished.store(true, Ordering::SeqCst);
        self.session.abort()
    }
}

impl Debug for Transaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("finished", &self.finished.load(Ordering::SeqCst))
            .finish()
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if !self.finished.load(Ordering::SeqCst) {
            log::debug!("Transaction dropped without commit; aborting");
            if let Err(e) = self.session.abort() {
                log::error!("Failed to abort dropped transaction: {}", e);
            }
        }
    }
}
