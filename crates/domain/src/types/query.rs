//! Query specification types
//!
//! A [`QuerySpec`] describes one request against a paged collection: which
//! fields to project, how to order, how large each page may be, and how many
//! records to accumulate in total. It is constructed per call, consumed
//! once, and discarded.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::errors::{GraphFeedError, Result};

/// The remote collections this workspace can query.
///
/// Each kind maps to a fixed resource path and a declarative defaults entry
/// (field selection, ordering, page size, range policy) applied by the core
/// before request construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Calendar events within a date window (`me/calendarview`).
    CalendarView,
    /// Mail messages (`me/messages`).
    Messages,
    /// Directory users (`users`).
    Users,
}

impl Collection {
    /// Resource path relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::CalendarView => "me/calendarview",
            Self::Messages => "me/messages",
            Self::Users => "users",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CalendarView => "calendar view",
            Self::Messages => "messages",
            Self::Users => "users",
        };
        f.write_str(name)
    }
}

/// Sort direction for an [`Ordering`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl OrderDirection {
    /// Wire rendering used in the order-by parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A field name plus direction, rendered as `"<field> <ASC|DESC>"` on the
/// wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    /// Field to sort on, e.g. `receivedDateTime` or `start/dateTime`.
    pub field: String,
    /// Sort direction.
    pub direction: OrderDirection,
}

impl Ordering {
    /// Convenience constructor.
    pub fn new(field: impl Into<String>, direction: OrderDirection) -> Self {
        Self { field: field.into(), direction }
    }
}

/// Time-zone-qualified filter window.
///
/// The bounds are UTC instants; the display time zone travels separately on
/// the [`QuerySpec`] and is sent as a request header, not encoded into the
/// bound values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// Inclusive window start.
    pub start: DateTime<Utc>,
    /// Inclusive window end.
    pub end: DateTime<Utc>,
}

/// Immutable description of one paged query.
///
/// Absent fields fall back to the queried collection's defaults table. Use
/// [`QuerySpec::default`] for an entirely default query.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    /// Field names to project server-side; `None` uses the collection
    /// default.
    pub field_selection: Option<Vec<String>>,
    /// Explicit filter window; `None` lets range-bounded collections compute
    /// their policy default anchored to "now" in [`QuerySpec::time_zone`].
    pub filter_range: Option<DateRange>,
    /// Sort order; `None` uses the collection default.
    pub ordering: Option<Ordering>,
    /// Upper bound per network round trip; must be greater than zero when
    /// present.
    pub page_size_hint: Option<u32>,
    /// Cap on total records across all pages; `None` follows every cursor.
    pub total_limit: Option<usize>,
    /// Display time zone for range queries.
    pub time_zone: Tz,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            field_selection: None,
            filter_range: None,
            ordering: None,
            page_size_hint: None,
            total_limit: None,
            time_zone: Tz::UTC,
        }
    }
}

impl QuerySpec {
    /// Check the spec's preconditions before any network traffic.
    pub fn validate(&self) -> Result<()> {
        if self.page_size_hint == Some(0) {
            return Err(GraphFeedError::InvalidInput(
                "page_size_hint must be greater than zero".into(),
            ));
        }
        if let Some(range) = &self.filter_range {
            if range.end < range.start {
                return Err(GraphFeedError::InvalidInput(format!(
                    "filter range end {} precedes start {}",
                    range.end, range.start
                )));
            }
        }
        Ok(())
    }
}
