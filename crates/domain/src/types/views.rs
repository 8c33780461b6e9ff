//! Normalized view shapes and outbound payloads
//!
//! Views are what the paged query client hands to callers after
//! normalization. The message and user views are typed pass-throughs of the
//! projected wire fields; the calendar event view is derived (see the
//! normalization policies in `graphfeed-core`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display-ready calendar event derived from one raw record.
///
/// Never partially constructed: if a required derivation fails, the record's
/// normalization fails as a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventView {
    /// Upstream event id, when projected.
    pub id: Option<String>,
    /// Event subject; empty when the upstream field is absent.
    pub subject: String,
    /// Parsed start instant.
    pub start: DateTime<Utc>,
    /// Parsed end instant.
    pub end: DateTime<Utc>,
    /// First token of the organizer display name.
    pub organizer_first_name: String,
    /// Second token of the organizer display name; later tokens are dropped.
    pub organizer_last_name: String,
    /// Preview text, falling back to the full body, then empty.
    pub description: String,
    /// Display status. Always `"Created"` — the upstream feed does not carry
    /// event lifecycle state.
    pub status: String,
}

/// Read flag tri-state on a message, consumed as-is from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlagStatus {
    /// Flagged for follow-up.
    Flagged,
    /// Not flagged.
    NotFlagged,
    /// Follow-up completed.
    Complete,
}

/// Follow-up flag container as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageFlag {
    /// The flag tri-state.
    pub flag_status: Option<FlagStatus>,
}

/// Name/address pair used by organizers, senders, and recipients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAddress {
    /// Display name.
    pub name: Option<String>,
    /// SMTP address.
    pub address: Option<String>,
}

/// A single sender or recipient entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    /// The wrapped name/address pair.
    pub email_address: Option<EmailAddress>,
}

/// Message body with its content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    /// `text` or `html`.
    pub content_type: Option<String>,
    /// The body content.
    pub content: Option<String>,
}

/// Mail message view: the projected fields pass through unchanged.
///
/// This is the "no normalizer" case — deserialization only, no
/// transformation. `is_read` and `flag` are consumed exactly as the wire
/// delivers them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    /// Upstream message id, when projected.
    pub id: Option<String>,
    /// Author of the message.
    pub from: Option<Recipient>,
    /// Actual sender, which may differ from `from` for delegated mailboxes.
    pub sender: Option<Recipient>,
    /// Read/unread marker.
    pub is_read: Option<bool>,
    /// Draft marker.
    pub is_draft: Option<bool>,
    /// Primary recipients.
    pub to_recipients: Option<Vec<Recipient>>,
    /// Carbon-copy recipients.
    pub cc_recipients: Option<Vec<Recipient>>,
    /// Blind-carbon-copy recipients.
    pub bcc_recipients: Option<Vec<Recipient>>,
    /// Reply-to addresses.
    pub reply_to: Option<Vec<Recipient>>,
    /// Follow-up flag.
    pub flag: Option<MessageFlag>,
    /// Delivery timestamp, unparsed.
    pub received_date_time: Option<String>,
    /// Send timestamp, unparsed.
    pub sent_date_time: Option<String>,
    /// User-assigned categories.
    pub categories: Option<Vec<String>>,
    /// Subject line.
    pub subject: Option<String>,
    /// Full body.
    pub body: Option<ItemBody>,
    /// Short plain-text preview.
    pub body_preview: Option<String>,
    /// Whether attachments are present.
    pub has_attachments: Option<bool>,
    /// `low`, `normal`, or `high`.
    pub importance: Option<String>,
    /// Deep link into the hosted mail client.
    pub web_link: Option<String>,
}

/// Directory user view: exactly the selected fields, no derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// Directory object id.
    pub id: Option<String>,
    /// Full display name.
    pub display_name: Option<String>,
    /// Primary email address.
    pub mail: Option<String>,
    /// Given name.
    pub given_name: Option<String>,
    /// Family name.
    pub surname: Option<String>,
    /// Mobile phone number.
    pub mobile_phone: Option<String>,
    /// Preferred language tag.
    pub preferred_language: Option<String>,
    /// Sign-in principal name.
    pub user_principal_name: Option<String>,
}

/// Date-time with an explicit named time zone, as the event endpoints expect
/// it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonedDateTime {
    /// Local wall-clock value, e.g. `2024-03-15T13:00:00`.
    pub date_time: String,
    /// IANA or Windows time zone name.
    pub time_zone: String,
}

/// A meeting attendee on an outbound event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    /// Who is invited.
    pub email_address: EmailAddress,
    /// `required`, `optional`, or `resource`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub attendee_type: Option<String>,
}

/// Payload for creating a calendar event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCalendarEvent {
    /// Event subject.
    pub subject: String,
    /// Optional body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ItemBody>,
    /// Zoned start.
    pub start: ZonedDateTime,
    /// Zoned end.
    pub end: ZonedDateTime,
    /// Invitees; omitted from the payload when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<Attendee>,
}
