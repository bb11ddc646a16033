use crate::{error::AppError, extract::EntityId, AppState};
use axum::{extract::State, Json};
use core_types::{EventSummary, SessionSummary, SpeakerDetail, SpeakerSummary};
use std::sync::Arc;

/// # GET /events
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EventSummary>>, AppError> {
    let events = state.db_repo.list_all_events().await?;
    Ok(Json(events.into_iter().map(EventSummary::from).collect()))
}

/// # GET /events/:id/sessions
/// The sessions of one event; 404 if the event does not exist.
pub async fn list_event_sessions(
    EntityId(event_id): EntityId,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SessionSummary>>, AppError> {
    state
        .db_repo
        .find_event_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::not_found("Event"))?;

    let sessions = state.db_repo.sessions_for_event(event_id).await?;
    Ok(Json(sessions.into_iter().map(SessionSummary::from).collect()))
}

/// # GET /speakers
pub async fn list_speakers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SpeakerSummary>>, AppError> {
    let speakers = state.db_repo.list_all_speakers().await?;
    Ok(Json(speakers.into_iter().map(SpeakerSummary::from).collect()))
}

/// # GET /speakers/:id
pub async fn get_speaker(
    EntityId(speaker_id): EntityId,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SpeakerDetail>, AppError> {
    let speaker = state
        .db_repo
        .speaker_detail(speaker_id)
        .await?
        .ok_or_else(|| AppError::not_found("Speaker"))?;
    Ok(Json(speaker))
}

/// # GET /sessions/:id/speakers
/// The speakers of one session with bios resolved; 404 if the session does not exist.
pub async fn list_session_speakers(
    EntityId(session_id): EntityId,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SpeakerDetail>>, AppError> {
    state
        .db_repo
        .find_session_by_id(session_id)
        .await?
        .ok_or_else(|| AppError::not_found("Session"))?;

    let speakers = state.db_repo.speaker_details_for_session(session_id).await?;
    Ok(Json(speakers))
}
