//! Common data types used throughout the workspace

pub mod query;
pub mod views;

pub use query::{Collection, DateRange, OrderDirection, Ordering, QuerySpec};
pub use views::{
    Attendee, CalendarEventView, EmailAddress, FlagStatus, ItemBody, MessageFlag, MessageView,
    NewCalendarEvent, Recipient, UserView, ZonedDateTime,
};
