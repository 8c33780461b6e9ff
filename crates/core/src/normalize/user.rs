//! User normalization
//!
//! Projects exactly the selected fields; no derivation.

use graphfeed_domain::{GraphFeedError, Result, UserView};
use serde_json::Value;

/// Deserialize one raw directory record into a [`UserView`].
pub fn user_view(record: &Value) -> Result<UserView> {
    serde_json::from_value(record.clone()).map_err(|e| GraphFeedError::Normalization {
        reason: format!("user record does not match the projection: {e}"),
        record: record.clone(),
    })
}
