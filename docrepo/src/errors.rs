use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use std::sync::Arc;

/// Error kinds for repository and store operations.
///
/// Each kind describes one category of failure, enabling precise error
/// handling at the call site. The repository never logs-and-swallows or
/// retries; every failure is returned to the caller carrying one of these
/// kinds.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// The store was unreachable when the client was constructed. Fatal for
    /// the client instance; not recoverable by this crate.
    Connection,
    /// A session could not be started or committed.
    Transaction,
    /// An insert failed inside a transaction.
    Write,
    /// A find, count, or result-decode operation failed.
    Query,
    /// A filter or partial-update capability failed to translate itself
    /// into a native query/mutation value.
    Filter,
    /// An object could not be mapped to or from its document form.
    ObjectMapping,
    /// A caller-supplied identifier could not be parsed into the store's
    /// native id encoding.
    InvalidId,
    /// No document matched a single-result lookup.
    NotFound,
    /// The operation's cancellation token was cancelled or its deadline
    /// passed.
    OperationCancelled,
    /// The operation is not valid in the current context.
    InvalidOperation,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Connection => write!(f, "Connection error"),
            ErrorKind::Transaction => write!(f, "Transaction error"),
            ErrorKind::Write => write!(f, "Write error"),
            ErrorKind::Query => write!(f, "Query error"),
            ErrorKind::Filter => write!(f, "Filter error"),
            ErrorKind::ObjectMapping => write!(f, "Object mapping error"),
            ErrorKind::InvalidId => write!(f, "Invalid id"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::OperationCancelled => write!(f, "Operation cancelled"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
        }
    }
}

/// The error type for all fallible operations in this crate.
///
/// A `RepoError` carries a human-readable message, an [ErrorKind] for
/// programmatic matching, an optional cause forming an error chain, and a
/// backtrace captured where the error was created.
///
/// # Type alias
///
/// The [RepoResult] alias is equivalent to `Result<T, RepoError>` and is
/// used throughout the codebase.
///
/// # Examples
///
/// ```rust,ignore
/// use docrepo::errors::{ErrorKind, RepoError, RepoResult};
///
/// fn lookup() -> RepoResult<()> {
///     Err(RepoError::new("no such document", ErrorKind::NotFound))
/// }
/// ```
#[derive(Clone)]
pub struct RepoError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<RepoError>>,
    backtrace: Arc<Backtrace>,
}

impl RepoError {
    /// Creates a new `RepoError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        RepoError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Creates a new `RepoError` with a cause error.
    ///
    /// This creates an error chain where the cause is preserved for
    /// debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    /// * `cause` - The underlying error that caused this error
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: RepoError) -> Self {
        RepoError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&RepoError> {
        self.cause.as_deref()
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A specialized `Result` type for repository operations.
pub type RepoResult<T> = Result<T, RepoError>;
