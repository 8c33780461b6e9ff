//! Query resolution
//!
//! Fills the absent fields of a [`QuerySpec`] from a declarative defaults
//! table — one entry per collection kind, applied uniformly before request
//! construction — and renders the fully resolved request parameters and
//! headers for the transport.

use chrono::{DateTime, Datelike, Duration, NaiveDate, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use graphfeed_domain::{
    Collection, DateRange, GraphFeedError, OrderDirection, QuerySpec, Result,
};

/// How a collection bounds its results in time when the caller supplies no
/// explicit filter range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePolicy {
    /// No time window.
    None,
    /// Sunday through Saturday of the current week, anchored to "now" in the
    /// caller's display time zone.
    CurrentWeek,
    /// First through last day of the current month, same anchoring.
    CurrentMonth,
}

/// Defaults table entry for one collection kind.
#[derive(Debug, Clone, Copy)]
pub struct CollectionDefaults {
    /// Server-side field projection.
    pub select: &'static [&'static str],
    /// Default sort field and direction.
    pub order_by: (&'static str, OrderDirection),
    /// Default per-page record cap.
    pub page_size: u32,
    /// Default time-window policy.
    pub range_policy: RangePolicy,
}

/// Look up the defaults entry for a collection kind.
#[must_use]
pub const fn defaults_for(collection: Collection) -> CollectionDefaults {
    match collection {
        Collection::CalendarView => CollectionDefaults {
            select: &["subject", "organizer", "start", "end", "bodyPreview", "body"],
            order_by: ("start/dateTime", OrderDirection::Asc),
            page_size: 25,
            range_policy: RangePolicy::CurrentWeek,
        },
        Collection::Messages => CollectionDefaults {
            select: &[
                "from",
                "sender",
                "isRead",
                "isDraft",
                "toRecipients",
                "ccRecipients",
                "bccRecipients",
                "replyTo",
                "flag",
                "receivedDateTime",
                "sentDateTime",
                "categories",
                "subject",
                "body",
                "bodyPreview",
                "hasAttachments",
                "importance",
                "webLink",
            ],
            order_by: ("receivedDateTime", OrderDirection::Desc),
            page_size: 10,
            range_policy: RangePolicy::None,
        },
        Collection::Users => CollectionDefaults {
            select: &[
                "displayName",
                "id",
                "mail",
                "givenName",
                "mobilePhone",
                "preferredLanguage",
                "surname",
                "userPrincipalName",
            ],
            order_by: ("displayName", OrderDirection::Asc),
            page_size: 25,
            range_policy: RangePolicy::None,
        },
    }
}

/// A fully resolved request: resource path, query pairs, and extra headers.
#[derive(Debug, Clone)]
pub struct ResolvedQuery {
    /// Resource path relative to the API base.
    pub path: &'static str,
    /// Query parameters in wire order.
    pub params: Vec<(String, String)>,
    /// Extra headers; for range queries this carries the display time zone.
    pub headers: Vec<(String, String)>,
}

/// Resolve a spec against its collection's defaults, anchored to the current
/// instant.
pub fn resolve(collection: Collection, spec: &QuerySpec) -> Result<ResolvedQuery> {
    resolve_at(collection, spec, Utc::now())
}

/// Resolution with an explicit anchor instant. Split out so the computed
/// default ranges are testable.
pub fn resolve_at(
    collection: Collection,
    spec: &QuerySpec,
    now: DateTime<Utc>,
) -> Result<ResolvedQuery> {
    spec.validate()?;

    let defaults = defaults_for(collection);

    let range = match spec.filter_range {
        Some(range) => Some(range),
        None => default_range(defaults.range_policy, now, spec.time_zone)?,
    };

    let mut params = Vec::new();
    let mut headers = Vec::new();

    if let Some(range) = range {
        params.push(("startDateTime".to_owned(), format_instant(range.start)));
        params.push(("endDateTime".to_owned(), format_instant(range.end)));
        headers.push((
            "Prefer".to_owned(),
            format!("outlook.timezone=\"{}\"", spec.time_zone.name()),
        ));
    }

    let select = match &spec.field_selection {
        Some(fields) => fields.join(","),
        None => defaults.select.join(","),
    };
    params.push(("$select".to_owned(), select));

    let order_by = match &spec.ordering {
        Some(ordering) => format!("{} {}", ordering.field, ordering.direction.as_str()),
        None => format!("{} {}", defaults.order_by.0, defaults.order_by.1.as_str()),
    };
    params.push(("$orderby".to_owned(), order_by));

    let page_size = spec.page_size_hint.unwrap_or(defaults.page_size);
    params.push(("$top".to_owned(), page_size.to_string()));

    Ok(ResolvedQuery { path: collection.path(), params, headers })
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-01-07T08:00:00.000Z`.
fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn default_range(policy: RangePolicy, now: DateTime<Utc>, tz: Tz) -> Result<Option<DateRange>> {
    let local = now.with_timezone(&tz);

    let (first_day, last_day) = match policy {
        RangePolicy::None => return Ok(None),
        RangePolicy::CurrentWeek => {
            let days_from_sunday =
                i64::from(local.weekday().num_days_from_sunday());
            let sunday = local.date_naive() - Duration::days(days_from_sunday);
            (sunday, sunday + Duration::days(6))
        }
        RangePolicy::CurrentMonth => {
            let first = first_of_month(local.year(), local.month())?;
            let next_month = if local.month() == 12 {
                first_of_month(local.year() + 1, 1)?
            } else {
                first_of_month(local.year(), local.month() + 1)?
            };
            (first, next_month - Duration::days(1))
        }
    };

    let start = local_instant(first_day, 0, 0, 0, 0, tz)?;
    let end = local_instant(last_day, 23, 59, 59, 999, tz)?;
    Ok(Some(DateRange { start, end }))
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        GraphFeedError::InvalidInput(format!("no first day for {year}-{month:02}"))
    })
}

/// Pin a local wall-clock value to an instant. Ambiguous local times (DST
/// fold) resolve to the earlier instant; skipped local times are rejected.
fn local_instant(
    date: NaiveDate,
    hour: u32,
    min: u32,
    sec: u32,
    milli: u32,
    tz: Tz,
) -> Result<DateTime<Utc>> {
    let wall_clock = date.and_hms_milli_opt(hour, min, sec, milli).ok_or_else(|| {
        GraphFeedError::InvalidInput(format!("invalid wall-clock time {hour}:{min}:{sec}"))
    })?;

    tz.from_local_datetime(&wall_clock)
        .earliest()
        .map(|zoned| zoned.with_timezone(&Utc))
        .ok_or_else(|| {
            GraphFeedError::InvalidInput(format!(
                "local time {wall_clock} does not exist in {}",
                tz.name()
            ))
        })
}
