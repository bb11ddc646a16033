use chrono::NaiveDateTime;
use sqlx::FromRow;

/// A conference event. Owns its sessions; deleting an event deletes them.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub location: String,
}

/// A talk or slot inside an event.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Session {
    pub id: i64,
    pub title: String,
    /// Naive wall-clock time; the schedule carries no timezone.
    pub start_time: Option<NaiveDateTime>,
    pub event_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Speaker {
    pub id: i64,
    pub name: String,
}

/// A speaker's biography. At most one per speaker.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Bio {
    pub id: i64,
    pub bio_text: String,
    pub speaker_id: i64,
}
