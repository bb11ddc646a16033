//! The JSON shapes returned by the API.
//!
//! Each projection carries exactly the fields a client is allowed to see. They
//! are deliberately narrower than the entities they come from: an event summary
//! has no session count and a speaker summary has no biography.

use crate::entities::{Event, Session, Speaker};
use chrono::{NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

/// Placeholder returned as `bio_text` for speakers without a biography.
pub const NO_BIO_TEXT: &str = "No bio available";

/// `{id, name, location}` as listed by `GET /events`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    pub id: i64,
    pub name: String,
    pub location: String,
}

impl From<Event> for EventSummary {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            location: event.location,
        }
    }
}

/// `{id, title, start_time}`; `start_time` is ISO-8601 or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub id: i64,
    pub title: String,
    #[serde(serialize_with = "serialize_start_time")]
    pub start_time: Option<NaiveDateTime>,
}

/// Writes whole seconds without a fraction, anything else with exactly six
/// fractional digits (`2025-01-01T09:00:00.500000`).
fn serialize_start_time<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) if ts.nanosecond() == 0 => {
            serializer.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S"))
        }
        Some(ts) => serializer.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S%.6f")),
        None => serializer.serialize_none(),
    }
}

impl From<Session> for SessionSummary {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            title: session.title,
            start_time: session.start_time,
        }
    }
}

/// `{id, name}` as listed by `GET /speakers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerSummary {
    pub id: i64,
    pub name: String,
}

impl From<Speaker> for SpeakerSummary {
    fn from(speaker: Speaker) -> Self {
        Self {
            id: speaker.id,
            name: speaker.name,
        }
    }
}

/// A speaker with their biography text resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerDetail {
    pub id: i64,
    pub name: String,
    pub bio_text: String,
}

impl SpeakerDetail {
    /// Builds the detail view from raw columns, substituting [`NO_BIO_TEXT`]
    /// when the speaker has no bio row.
    pub fn resolve(id: i64, name: String, bio_text: Option<String>) -> Self {
        Self {
            id,
            name,
            bio_text: bio_text.unwrap_or_else(|| NO_BIO_TEXT.to_string()),
        }
    }
}
