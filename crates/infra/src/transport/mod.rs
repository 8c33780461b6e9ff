//! Authenticated transport for the hosted collection API
//!
//! Provides the reqwest-backed implementation of the core
//! `CollectionTransport` port plus the token seam callers plug their
//! credential machinery into. Sign-in itself (device code, browser OAuth)
//! is outside this workspace — construct one transport per session with an
//! [`AccessTokenProvider`] and pass it explicitly; nothing here holds
//! ambient global state.

pub mod graph;

use std::time::Duration;

use async_trait::async_trait;
use graphfeed_domain::Result;

pub use graph::GraphTransport;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Provides bearer tokens for collection API calls.
///
/// Token refresh, caching, and expiry are the provider's concern; the
/// transport asks for a token per request and attaches whatever it gets.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Retrieve a bearer token to authorize the next API call.
    async fn access_token(&self) -> Result<String>;
}

/// Fixed-token provider for tests and callers that manage tokens
/// externally.
#[derive(Clone)]
pub struct StaticAccessToken {
    token: String,
}

impl StaticAccessToken {
    /// Wrap an already-acquired token.
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticAccessToken {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// Transport configuration.
///
/// Timeout policy lives here — the paged engine enforces none of its own.
#[derive(Debug, Clone)]
pub struct GraphTransportConfig {
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for GraphTransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("graphfeed/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}
