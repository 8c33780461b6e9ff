//! Paged query client
//!
//! Executes one resolved query against a collection endpoint, following
//! continuation cursors strictly sequentially until exhaustion or a
//! caller-supplied limit.

use std::sync::Arc;

use graphfeed_domain::{Collection, GraphFeedError, QuerySpec, Result};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::ports::CollectionTransport;
use crate::query;

/// Cursor-following client over an authenticated transport.
///
/// Holds no state besides the transport; construct one per session and pass
/// it explicitly. Independent calls may run concurrently — within a single
/// call, page N+1's request is unknown until page N's response arrives, so
/// pages are always fetched one at a time.
#[derive(Clone)]
pub struct PagedQueryClient {
    transport: Arc<dyn CollectionTransport>,
}

impl PagedQueryClient {
    /// Create a new client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn CollectionTransport>) -> Self {
        Self { transport }
    }

    /// Fetch every record the resolved query matches, raw.
    ///
    /// This is the identity-normalization case: records pass through exactly
    /// as the endpoint returned them.
    pub async fn fetch_all(&self, collection: Collection, spec: QuerySpec) -> Result<Vec<Value>> {
        self.fetch_all_with(collection, spec, |record| Ok(record.clone())).await
    }

    /// Fetch every record the resolved query matches, applying `normalize`
    /// per record.
    ///
    /// The normalizer must be pure. A single failing record fails the whole
    /// call — no partial results, no silent drops; the caller may retry the
    /// entire call. No retries happen here: a retried page fetch must reuse
    /// the same cursor, so retry policy stays with the caller.
    #[instrument(skip_all, fields(collection = %collection))]
    pub async fn fetch_all_with<T, F>(
        &self,
        collection: Collection,
        spec: QuerySpec,
        normalize: F,
    ) -> Result<Vec<T>>
    where
        F: Fn(&Value) -> Result<T>,
    {
        let resolved = query::resolve(collection, &spec)?;

        let mut records: Vec<T> = Vec::new();
        if spec.total_limit == Some(0) {
            return Ok(records);
        }

        let mut cursor: Option<String> = None;
        let mut page_number = 0usize;

        loop {
            let page = match &cursor {
                None => {
                    self.transport
                        .fetch_page(resolved.path, &resolved.params, &resolved.headers)
                        .await?
                }
                Some(link) => {
                    // The cursor is opaque but must still be a fetchable URL.
                    Url::parse(link).map_err(|e| {
                        GraphFeedError::MalformedPage(format!(
                            "continuation cursor is not a valid URL: {e}"
                        ))
                    })?;
                    self.transport.fetch_next(link, &resolved.headers).await?
                }
            };

            page_number += 1;
            debug!(page_number, records = page.value.len(), "fetched page");

            for record in &page.value {
                records.push(normalize(record)?);
                if spec.total_limit.is_some_and(|limit| records.len() >= limit) {
                    // Truncate the final page's contribution; later pages
                    // are never requested.
                    debug!(page_number, total = records.len(), "total limit reached");
                    return Ok(records);
                }
            }

            match page.next_link {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        debug!(pages = page_number, total = records.len(), "collection drained");
        Ok(records)
    }
}
