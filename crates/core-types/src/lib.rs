pub mod entities;
pub mod projections;

// Re-export the core types to provide a clean public API.
pub use entities::{Bio, Event, Session, Speaker};
pub use projections::{EventSummary, NO_BIO_TEXT, SessionSummary, SpeakerDetail, SpeakerSummary};
