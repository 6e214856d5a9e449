/// Configuration for a document store client.
///
/// # Purpose
/// Carries the connection URI (and nothing else) as an explicit value passed
/// into the client constructor. Configuration is consumed exactly once at
/// connect time; clients never re-read it per call and never consult the
/// process environment.
///
/// # Usage
/// ```rust,ignore
/// use docrepo::store::{InMemoryClient, StoreConfig};
///
/// let config = StoreConfig::new("memory://test");
/// let client = InMemoryClient::connect(&config)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    uri: String,
}

impl StoreConfig {
    /// Creates a configuration with the given connection URI.
    pub fn new<S: Into<String>>(uri: S) -> Self {
        StoreConfig { uri: uri.into() }
    }

    /// Returns the connection URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }
}
