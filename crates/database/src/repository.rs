use crate::DbError;
use core_types::{Bio, Event, Session, Speaker, SpeakerDetail};
use sqlx::sqlite::SqlitePool;
use sqlx::FromRow;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the schedule database. It encapsulates all SQL queries and data access logic.
///
/// Lookups by primary key return `Ok(None)` when the row does not exist;
/// `DbError` is reserved for the database itself failing.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

// A speaker joined with their (optional) bio in one row.
#[derive(Debug, FromRow)]
struct SpeakerBioRow {
    id: i64,
    name: String,
    bio_text: Option<String>,
}

impl From<SpeakerBioRow> for SpeakerDetail {
    fn from(row: SpeakerBioRow) -> Self {
        SpeakerDetail::resolve(row.id, row.name, row.bio_text)
    }
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The underlying pool, for callers that manage the schema or fixtures.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ==========================================================================
    // Events
    // ==========================================================================

    pub async fn find_event_by_id(&self, id: i64) -> Result<Option<Event>, DbError> {
        let event = sqlx::query_as::<_, Event>("SELECT id, name, location FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(event)
    }

    /// Fetches every event in insertion (primary key) order.
    pub async fn list_all_events(&self) -> Result<Vec<Event>, DbError> {
        let events = sqlx::query_as::<_, Event>("SELECT id, name, location FROM events ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!(count = events.len(), "Fetched events.");
        Ok(events)
    }

    /// The sessions owned by an event. Empty when the event has none or does not exist.
    pub async fn sessions_for_event(&self, event_id: i64) -> Result<Vec<Session>, DbError> {
        let sessions = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, title, start_time, event_id
            FROM sessions
            WHERE event_id = ?
            ORDER BY id
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sessions)
    }

    // ==========================================================================
    // Sessions
    // ==========================================================================

    pub async fn find_session_by_id(&self, id: i64) -> Result<Option<Session>, DbError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, title, start_time, event_id FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(session)
    }

    /// The event a session belongs to.
    pub async fn event_for_session(&self, session_id: i64) -> Result<Option<Event>, DbError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT e.id, e.name, e.location
            FROM events AS e
            JOIN sessions AS s ON s.event_id = e.id
            WHERE s.id = ?
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(event)
    }

    /// The speakers linked to a session through `session_speakers`.
    pub async fn speakers_for_session(&self, session_id: i64) -> Result<Vec<Speaker>, DbError> {
        let speakers = sqlx::query_as::<_, Speaker>(
            r#"
            SELECT sp.id, sp.name
            FROM speakers AS sp
            JOIN session_speakers AS ss ON ss.speaker_id = sp.id
            WHERE ss.session_id = ?
            ORDER BY sp.id
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(speakers)
    }

    /// Like [`Self::speakers_for_session`], with each speaker's bio resolved
    /// in the same query.
    pub async fn speaker_details_for_session(
        &self,
        session_id: i64,
    ) -> Result<Vec<SpeakerDetail>, DbError> {
        let rows = sqlx::query_as::<_, SpeakerBioRow>(
            r#"
            SELECT sp.id, sp.name, b.bio_text
            FROM session_speakers AS ss
            JOIN speakers AS sp ON sp.id = ss.speaker_id
            LEFT JOIN bios AS b ON b.speaker_id = sp.id
            WHERE ss.session_id = ?
            ORDER BY sp.id
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;
        tracing::debug!(session_id, count = rows.len(), "Fetched session speakers.");
        Ok(rows.into_iter().map(SpeakerDetail::from).collect())
    }

    // ==========================================================================
    // Speakers & Bios
    // ==========================================================================

    pub async fn find_speaker_by_id(&self, id: i64) -> Result<Option<Speaker>, DbError> {
        let speaker = sqlx::query_as::<_, Speaker>("SELECT id, name FROM speakers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(speaker)
    }

    /// Fetches every speaker in insertion (primary key) order.
    pub async fn list_all_speakers(&self) -> Result<Vec<Speaker>, DbError> {
        let speakers = sqlx::query_as::<_, Speaker>("SELECT id, name FROM speakers ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!(count = speakers.len(), "Fetched speakers.");
        Ok(speakers)
    }

    /// A single speaker with their bio resolved, or `None` if the speaker does not exist.
    pub async fn speaker_detail(&self, speaker_id: i64) -> Result<Option<SpeakerDetail>, DbError> {
        let row = sqlx::query_as::<_, SpeakerBioRow>(
            r#"
            SELECT sp.id, sp.name, b.bio_text
            FROM speakers AS sp
            LEFT JOIN bios AS b ON b.speaker_id = sp.id
            WHERE sp.id = ?
            "#,
        )
        .bind(speaker_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(SpeakerDetail::from))
    }

    pub async fn bio_for_speaker(&self, speaker_id: i64) -> Result<Option<Bio>, DbError> {
        let bio = sqlx::query_as::<_, Bio>(
            "SELECT id, bio_text, speaker_id FROM bios WHERE speaker_id = ?",
        )
        .bind(speaker_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(bio)
    }

    /// The speaker a bio belongs to.
    pub async fn speaker_for_bio(&self, bio_id: i64) -> Result<Option<Speaker>, DbError> {
        let speaker = sqlx::query_as::<_, Speaker>(
            r#"
            SELECT sp.id, sp.name
            FROM speakers AS sp
            JOIN bios AS b ON b.speaker_id = sp.id
            WHERE b.id = ?
            "#,
        )
        .bind(bio_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(speaker)
    }

    /// The sessions a speaker is linked to, across all events.
    pub async fn sessions_for_speaker(&self, speaker_id: i64) -> Result<Vec<Session>, DbError> {
        let sessions = sqlx::query_as::<_, Session>(
            r#"
            SELECT s.id, s.title, s.start_time, s.event_id
            FROM sessions AS s
            JOIN session_speakers AS ss ON ss.session_id = s.id
            WHERE ss.speaker_id = ?
            ORDER BY s.id
            "#,
        )
        .bind(speaker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{connect_in_memory, run_migrations};
    use chrono::{NaiveDate, NaiveDateTime};
    use core_types::NO_BIO_TEXT;

    async fn repo() -> DbRepository {
        let pool = connect_in_memory().await.unwrap();
        run_migrations(&pool).await.unwrap();
        DbRepository::new(pool)
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    async fn exec(repo: &DbRepository, sql: &str) {
        sqlx::query(sql).execute(repo.pool()).await.unwrap();
    }

    async fn insert_session(repo: &DbRepository, id: i64, title: &str, start: Option<NaiveDateTime>, event_id: i64) {
        sqlx::query("INSERT INTO sessions (id, title, start_time, event_id) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(title)
            .bind(start)
            .bind(event_id)
            .execute(repo.pool())
            .await
            .unwrap();
    }

    /// Two events, three sessions, three speakers (one without bio).
    async fn seeded() -> DbRepository {
        let repo = repo().await;
        exec(&repo, "INSERT INTO events (id, name, location) VALUES (1, 'DevConf', 'Remote'), (2, 'RustFest', 'Berlin')").await;
        insert_session(&repo, 1, "Keynote", Some(at(9, 0)), 1).await;
        insert_session(&repo, 2, "Lightning Talks", None, 1).await;
        insert_session(&repo, 3, "Async Deep Dive", Some(at(14, 30)), 2).await;
        exec(&repo, "INSERT INTO speakers (id, name) VALUES (1, 'Grace'), (2, 'Ada'), (3, 'Linus')").await;
        exec(&repo, "INSERT INTO bios (id, bio_text, speaker_id) VALUES (10, 'Compiler pioneer.', 1), (11, 'Kernel hacker.', 3)").await;
        exec(&repo, "INSERT INTO session_speakers (session_id, speaker_id) VALUES (1, 1), (1, 2), (3, 3), (3, 1)").await;
        repo
    }

    #[tokio::test]
    async fn finds_rows_by_primary_key() {
        let repo = seeded().await;

        let event = repo.find_event_by_id(1).await.unwrap().unwrap();
        assert_eq!(event.name, "DevConf");
        assert_eq!(event.location, "Remote");

        let session = repo.find_session_by_id(1).await.unwrap().unwrap();
        assert_eq!(session.title, "Keynote");
        assert_eq!(session.start_time, Some(at(9, 0)));
        assert_eq!(session.event_id, 1);

        let speaker = repo.find_speaker_by_id(2).await.unwrap().unwrap();
        assert_eq!(speaker.name, "Ada");
    }

    #[tokio::test]
    async fn missing_rows_are_none_not_errors() {
        let repo = repo().await;
        assert!(repo.find_event_by_id(999).await.unwrap().is_none());
        assert!(repo.find_session_by_id(999).await.unwrap().is_none());
        assert!(repo.find_speaker_by_id(999).await.unwrap().is_none());
        assert!(repo.speaker_detail(999).await.unwrap().is_none());
        assert!(repo.bio_for_speaker(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn lists_cover_every_row() {
        let repo = seeded().await;
        let events = repo.list_all_events().await.unwrap();
        assert_eq!(events.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2]);

        let speakers = repo.list_all_speakers().await.unwrap();
        assert_eq!(speakers.len(), 3);
    }

    #[tokio::test]
    async fn sessions_for_event_only_returns_that_events_sessions() {
        let repo = seeded().await;
        let ids: Vec<i64> = repo.sessions_for_event(1).await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let sessions = repo.sessions_for_event(2).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].title, "Async Deep Dive");

        assert!(repo.sessions_for_event(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn traverses_both_sides_of_session_speakers() {
        let repo = seeded().await;

        let names: Vec<String> = repo
            .speakers_for_session(3)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Grace", "Linus"]);

        let session_ids: Vec<i64> = repo
            .sessions_for_speaker(1)
            .await
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(session_ids, vec![1, 3]);

        assert!(repo.speakers_for_session(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn back_references_resolve_owner() {
        let repo = seeded().await;
        let event = repo.event_for_session(3).await.unwrap().unwrap();
        assert_eq!(event.name, "RustFest");

        let speaker = repo.speaker_for_bio(11).await.unwrap().unwrap();
        assert_eq!(speaker.name, "Linus");
    }

    #[tokio::test]
    async fn speaker_detail_resolves_bio_text() {
        let repo = seeded().await;

        let grace = repo.speaker_detail(1).await.unwrap().unwrap();
        assert_eq!(grace.bio_text, "Compiler pioneer.");

        let ada = repo.speaker_detail(2).await.unwrap().unwrap();
        assert_eq!(ada.bio_text, NO_BIO_TEXT);

        let bio = repo.bio_for_speaker(3).await.unwrap().unwrap();
        assert_eq!(bio.id, 11);
        assert!(repo.bio_for_speaker(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn speaker_details_for_session_joins_bios() {
        let repo = seeded().await;
        let details = repo.speaker_details_for_session(1).await.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].name, "Grace");
        assert_eq!(details[0].bio_text, "Compiler pioneer.");
        assert_eq!(details[1].name, "Ada");
        assert_eq!(details[1].bio_text, NO_BIO_TEXT);
    }

    #[tokio::test]
    async fn deleting_an_event_cascades_to_its_sessions_only() {
        let repo = seeded().await;
        exec(&repo, "DELETE FROM events WHERE id = 1").await;

        assert!(repo.find_session_by_id(1).await.unwrap().is_none());
        assert!(repo.find_session_by_id(2).await.unwrap().is_none());
        assert!(repo.find_session_by_id(3).await.unwrap().is_some());
        // Speakers of the deleted sessions survive.
        assert_eq!(repo.list_all_speakers().await.unwrap().len(), 3);
        assert_eq!(repo.sessions_for_speaker(2).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn deleting_a_speaker_cascades_to_bio_and_links() {
        let repo = seeded().await;
        exec(&repo, "DELETE FROM speakers WHERE id = 1").await;

        assert!(repo.bio_for_speaker(1).await.unwrap().is_none());
        let names: Vec<String> = repo
            .speakers_for_session(3)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Linus"]);
        assert!(repo.find_session_by_id(1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn schema_rejects_integrity_violations() {
        let repo = seeded().await;

        let orphan_session = sqlx::query("INSERT INTO sessions (title, event_id) VALUES ('Ghost', 999)")
            .execute(repo.pool())
            .await;
        assert!(orphan_session.is_err());

        let second_bio = sqlx::query("INSERT INTO bios (bio_text, speaker_id) VALUES ('Again', 1)")
            .execute(repo.pool())
            .await;
        assert!(second_bio.is_err());

        let duplicate_link =
            sqlx::query("INSERT INTO session_speakers (session_id, speaker_id) VALUES (1, 1)")
                .execute(repo.pool())
                .await;
        assert!(duplicate_link.is_err());
    }
}
