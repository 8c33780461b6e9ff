//! Message normalization
//!
//! The message view is the identity function on the projection: typed
//! deserialization of the projected fields with zero transformation. The
//! read marker and the follow-up flag tri-state are consumed exactly as the
//! wire delivers them. Callers that want untyped records use
//! `PagedQueryClient::fetch_all` directly — that is the "no normalizer"
//! case.

use graphfeed_domain::{GraphFeedError, MessageView, Result};
use serde_json::Value;

/// Deserialize one raw message record into a [`MessageView`].
pub fn message_view(record: &Value) -> Result<MessageView> {
    serde_json::from_value(record.clone()).map_err(|e| GraphFeedError::Normalization {
        reason: format!("message record does not match the projection: {e}"),
        record: record.clone(),
    })
}
