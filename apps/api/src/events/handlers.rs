use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::events::queries::{
    delete_participation, find_event, find_participation_detail, insert_event,
    insert_participation, list_events, list_participation_details, list_users,
    update_participation_status, NewEvent,
};
use crate::models::event::{Event, ParticipationDetailRow, ParticipationStatus};
use crate::models::user::UserSummary;
use crate::state::AppState;

/// GET /api/v1/events
pub async fn handle_list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, AppError> {
    Ok(Json(list_events(&state.db).await?))
}

#[derive(Deserialize)]
pub struct EventSubmission {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub organizer: String,
    pub contact: String,
}

/// POST /api/v1/events
pub async fn handle_create_event(
    State(state): State<AppState>,
    Json(req): Json<EventSubmission>,
) -> Result<Json<Event>, AppError> {
    require_text(&req.title, "title")?;
    require_text(&req.description, "description")?;
    require_text(&req.location, "location")?;
    require_text(&req.organizer, "organizer")?;
    require_text(&req.contact, "contact")?;

    let event = insert_event(
        &state.db,
        NewEvent {
            title: req.title.trim(),
            description: req.description.trim(),
            date: req.date,
            location: req.location.trim(),
            organizer: req.organizer.trim(),
            contact: req.contact.trim(),
        },
    )
    .await?;

    Ok(Json(event))
}

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Participation joined with its user and event for listing responses.
#[derive(Serialize)]
pub struct ParticipationDetail {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub user: ParticipantUser,
    pub event: ParticipantEvent,
}

#[derive(Serialize)]
pub struct ParticipantUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct ParticipantEvent {
    pub id: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    pub location: String,
}

impl From<ParticipationDetailRow> for ParticipationDetail {
    fn from(row: ParticipationDetailRow) -> Self {
        ParticipationDetail {
            id: row.id,
            status: row.status,
            created_at: row.created_at,
            user: ParticipantUser {
                id: row.user_id,
                username: row.username,
                email: row.email,
            },
            event: ParticipantEvent {
                id: row.event_id,
                title: row.event_title,
                date: row.event_date,
                location: row.event_location,
            },
        }
    }
}

/// GET /api/v1/events/participations
pub async fn handle_list_participations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParticipationDetail>>, AppError> {
    let rows = list_participation_details(&state.db).await?;
    Ok(Json(rows.into_iter().map(ParticipationDetail::from).collect()))
}

#[derive(Deserialize)]
pub struct ParticipationRequest {
    pub event_id: Uuid,
}

/// POST /api/v1/events/participations
pub async fn handle_register_participation(
    State(state): State<AppState>,
    Json(req): Json<ParticipationRequest>,
) -> Result<Json<ParticipationDetail>, AppError> {
    let user_id = state.config.default_user_id;

    find_event(&state.db, req.event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", req.event_id)))?;

    let participation = insert_participation(&state.db, req.event_id, user_id)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("Already registered for this event".to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                AppError::Validation("Unknown event or user".to_string())
            }
            _ => AppError::Database(e),
        })?;

    let detail = find_participation_detail(&state.db, participation.id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Participation {} not found", participation.id))
        })?;

    Ok(Json(detail.into()))
}

/// DELETE /api/v1/events/participations/:event_id
pub async fn handle_cancel_participation(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let removed = delete_participation(&state.db, event_id, state.config.default_user_id).await?;
    if removed == 0 {
        return Err(AppError::NotFound(format!(
            "No registration for event {event_id}"
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct ParticipationReview {
    pub participation_id: Uuid,
    pub status: ParticipationStatus,
}

/// PUT /api/v1/admin/participations
pub async fn handle_review_participation(
    State(state): State<AppState>,
    Json(req): Json<ParticipationReview>,
) -> Result<Json<ParticipationDetail>, AppError> {
    if !req.status.is_review_decision() {
        return Err(AppError::Validation(
            "status must be approved or rejected".to_string(),
        ));
    }

    let updated = update_participation_status(&state.db, req.participation_id, req.status.as_str())
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Participation {} not found",
                req.participation_id
            ))
        })?;

    let detail = find_participation_detail(&state.db, updated.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Participation {} not found", updated.id)))?;

    Ok(Json(detail.into()))
}

/// GET /api/v1/admin/users
pub async fn handle_list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    Ok(Json(list_users(&state.db).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_decision_accepts_approved_and_rejected() {
        assert!(ParticipationStatus::Approved.is_review_decision());
        assert!(ParticipationStatus::Rejected.is_review_decision());
        assert!(!ParticipationStatus::Pending.is_review_decision());
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::from_str::<ParticipationStatus>("\"approved\"").unwrap(),
            ParticipationStatus::Approved
        );
        assert!(serde_json::from_str::<ParticipationStatus>("\"waitlisted\"").is_err());
    }

    #[test]
    fn test_require_text_rejects_blank_fields() {
        assert!(require_text("  ", "title").is_err());
        assert!(require_text("Riverbank cleanup", "title").is_ok());
    }

    #[test]
    fn test_participation_detail_nests_user_and_event() {
        let row = ParticipationDetailRow {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            status: "pending".to_string(),
            created_at: Utc::now(),
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            event_title: "Neighborhood snow day".to_string(),
            event_date: Utc::now(),
            event_location: "Community center".to_string(),
        };
        let detail = ParticipationDetail::from(row.clone());
        assert_eq!(detail.user.id, row.user_id);
        assert_eq!(detail.event.id, row.event_id);
        assert_eq!(detail.event.title, "Neighborhood snow day");
        assert_eq!(detail.status, "pending");
    }
}
