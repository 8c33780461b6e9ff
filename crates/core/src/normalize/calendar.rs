//! Calendar event normalization

use chrono::{DateTime, Utc};
use graphfeed_domain::{CalendarEventView, GraphFeedError, Result};
use serde_json::Value;

// The feed carries no event lifecycle state; every event renders as created.
const DISPLAY_STATUS: &str = "Created";

/// Derive a [`CalendarEventView`] from one raw calendar record.
///
/// `start.dateTime` and `end.dateTime` are required derivations; anything
/// else degrades to an empty field. The organizer display name splits on the
/// first space — first token becomes the first name, second the last name,
/// and any further tokens are dropped.
pub fn calendar_event_view(record: &Value) -> Result<CalendarEventView> {
    let start = required_instant(record, "start")?;
    let end = required_instant(record, "end")?;

    let organizer_name = record
        .pointer("/organizer/emailAddress/name")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let mut tokens = organizer_name.split(' ');
    let organizer_first_name = tokens.next().unwrap_or_default().to_owned();
    let organizer_last_name = tokens.next().unwrap_or_default().to_owned();

    let description = record
        .get("bodyPreview")
        .and_then(Value::as_str)
        .filter(|preview| !preview.is_empty())
        .or_else(|| record.pointer("/body/content").and_then(Value::as_str))
        .unwrap_or_default()
        .to_owned();

    Ok(CalendarEventView {
        id: record.get("id").and_then(Value::as_str).map(str::to_owned),
        subject: record.get("subject").and_then(Value::as_str).unwrap_or_default().to_owned(),
        start,
        end,
        organizer_first_name,
        organizer_last_name,
        description,
        status: DISPLAY_STATUS.to_owned(),
    })
}

fn required_instant(record: &Value, field: &str) -> Result<DateTime<Utc>> {
    let raw = record
        .pointer(&format!("/{field}/dateTime"))
        .and_then(Value::as_str)
        .ok_or_else(|| GraphFeedError::Normalization {
            reason: format!("missing {field}.dateTime"),
            record: record.clone(),
        })?;

    parse_instant(raw).map_err(|cause| GraphFeedError::Normalization {
        reason: format!("invalid {field}.dateTime '{raw}': {cause}"),
        record: record.clone(),
    })
}

/// Parse an event timestamp, treating values without an explicit offset as
/// UTC (the endpoint is asked for UTC via the Prefer header).
fn parse_instant(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    let trimmed = value.trim();
    let has_explicit_offset = trimmed.ends_with('Z')
        || trimmed
            .rfind('T')
            .is_some_and(|idx| trimmed[idx + 1..].chars().any(|c| matches!(c, '+' | '-')));

    let candidate = if has_explicit_offset { trimmed.to_owned() } else { format!("{trimmed}Z") };

    DateTime::parse_from_rfc3339(&candidate)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}
