//! Transport port interface
//!
//! Defines the seam between the cursor-following engine and whatever
//! performs the actual HTTP calls. The production implementation lives in
//! `graphfeed-infra`; tests substitute scripted mocks.

use async_trait::async_trait;
use graphfeed_domain::Result;
use serde::Deserialize;

/// One response page from a collection endpoint.
///
/// Presence of the next-link field is the sole continuation signal — a page
/// with no cursor is the last page, regardless of how many records it holds.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    /// Raw records in server order.
    pub value: Vec<serde_json::Value>,
    /// Opaque continuation cursor, replayed verbatim to fetch the next page.
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// Authenticated transport for paged collection requests.
///
/// Implementations attach bearer credentials, own timeout policy, and must
/// be safe for concurrent use by independent logical requests. Token
/// refresh, if any, is the transport's concern.
#[async_trait]
pub trait CollectionTransport: Send + Sync {
    /// Issue the first request of a chain against `path` with the resolved
    /// query parameters and extra headers.
    async fn fetch_page(
        &self,
        path: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<RawPage>;

    /// Follow a continuation cursor. The link is replayed verbatim — query
    /// parameters are never re-derived from it. The extra headers from the
    /// originating request must be sent again.
    async fn fetch_next(&self, next_link: &str, headers: &[(String, String)]) -> Result<RawPage>;
}
