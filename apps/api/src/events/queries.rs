use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::event::{Event, EventParticipation, ParticipationDetailRow};
use crate::models::user::UserSummary;

pub async fn list_events(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY date ASC")
        .fetch_all(pool)
        .await
}

pub async fn find_event(pool: &PgPool, id: Uuid) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub struct NewEvent<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub date: DateTime<Utc>,
    pub location: &'a str,
    pub organizer: &'a str,
    pub contact: &'a str,
}

pub async fn insert_event(pool: &PgPool, event: NewEvent<'_>) -> Result<Event, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        r#"
        INSERT INTO events (id, title, description, date, location, organizer, contact)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(event.title)
    .bind(event.description)
    .bind(event.date)
    .bind(event.location)
    .bind(event.organizer)
    .bind(event.contact)
    .fetch_one(pool)
    .await
}

/// New registrations start out pending review. The unique key on
/// (event_id, user_id) turns a duplicate registration into a unique
/// violation the handler maps to a 409.
pub async fn insert_participation(
    pool: &PgPool,
    event_id: Uuid,
    user_id: Uuid,
) -> Result<EventParticipation, sqlx::Error> {
    sqlx::query_as::<_, EventParticipation>(
        r#"
        INSERT INTO event_participations (id, event_id, user_id, status)
        VALUES ($1, $2, $3, 'pending')
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(event_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Returns the number of rows removed (0 when no registration existed).
pub async fn delete_participation(
    pool: &PgPool,
    event_id: Uuid,
    user_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM event_participations WHERE event_id = $1 AND user_id = $2",
    )
    .bind(event_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

const PARTICIPATION_DETAIL_SELECT: &str = r#"
    SELECT p.id, p.event_id, p.user_id, p.status, p.created_at,
           u.username, u.email,
           e.title AS event_title, e.date AS event_date, e.location AS event_location
    FROM event_participations p
    JOIN users u ON u.id = p.user_id
    JOIN events e ON e.id = p.event_id
"#;

pub async fn list_participation_details(
    pool: &PgPool,
) -> Result<Vec<ParticipationDetailRow>, sqlx::Error> {
    sqlx::query_as::<_, ParticipationDetailRow>(&format!(
        "{PARTICIPATION_DETAIL_SELECT} ORDER BY p.created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_participation_detail(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ParticipationDetailRow>, sqlx::Error> {
    sqlx::query_as::<_, ParticipationDetailRow>(&format!(
        "{PARTICIPATION_DETAIL_SELECT} WHERE p.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Returns the updated row, or `None` when the id is unknown.
pub async fn update_participation_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> Result<Option<EventParticipation>, sqlx::Error> {
    sqlx::query_as::<_, EventParticipation>(
        "UPDATE event_participations SET status = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await
}

pub async fn list_users(pool: &PgPool) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        "SELECT id, username, email FROM users ORDER BY username ASC",
    )
    .fetch_all(pool)
    .await
}
