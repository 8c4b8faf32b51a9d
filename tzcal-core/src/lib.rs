//! Core of tzcal: timezone conversion and event reminders.
//!
//! - `zones` maps "Country/City" labels to IANA zone ids
//! - `convert` turns an event's wall-clock time into the viewer's local time
//! - `store` keeps the persisted event collection
//! - `reminder` sends one notification shortly before each event
//! - `share` and `calendar_link` build links for other people and calendars

pub mod calendar_link;
pub mod config;
pub mod constants;
pub mod convert;
pub mod error;
pub mod event;
pub mod preferences;
pub mod reminder;
pub mod share;
pub mod storage;
pub mod store;
pub mod zones;

pub use error::{TzCalError, TzCalResult};
pub use event::{Event, EventDraft};
