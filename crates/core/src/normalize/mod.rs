//! Normalization policies
//!
//! Pure mappings from raw upstream records to application-facing views, one
//! per collection kind. Each mapping either produces a complete view or
//! fails as a unit with a `Normalization` error carrying the raw record.

pub mod calendar;
pub mod message;
pub mod user;

pub use calendar::calendar_event_view;
pub use message::message_view;
pub use user::user_view;
