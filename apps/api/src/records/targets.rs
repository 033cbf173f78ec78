//! Monthly reduction targets. Same bucket policy as car records: one row
//! per (user, first-of-month), overwritten in place on resubmission.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::records::MonthlyTarget;
use crate::state::AppState;
use crate::summary::window::parse_month;

#[derive(Deserialize)]
pub struct TargetSubmission {
    /// YYYY-MM
    pub month: String,
    pub car_target: f64,
    pub ac_target: f64,
}

/// PUT /api/v1/targets
pub async fn handle_put_target(
    State(state): State<AppState>,
    Json(req): Json<TargetSubmission>,
) -> Result<Json<MonthlyTarget>, AppError> {
    if req.car_target < 0.0 || req.ac_target < 0.0 {
        return Err(AppError::Validation(
            "targets must not be negative".to_string(),
        ));
    }
    let bucket = parse_month(&req.month)?;

    let target = upsert_monthly_target(
        &state.db,
        state.config.default_user_id,
        bucket,
        req.car_target,
        req.ac_target,
    )
    .await?;

    Ok(Json(target))
}

#[derive(Deserialize)]
pub struct TargetQuery {
    /// YYYY-MM
    pub month: String,
}

/// GET /api/v1/targets
pub async fn handle_get_target(
    State(state): State<AppState>,
    Query(params): Query<TargetQuery>,
) -> Result<Json<MonthlyTarget>, AppError> {
    let bucket = parse_month(&params.month)?;

    let target = find_monthly_target(&state.db, state.config.default_user_id, bucket)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No target recorded for {}", params.month))
        })?;

    Ok(Json(target))
}

async fn upsert_monthly_target(
    pool: &PgPool,
    user_id: Uuid,
    target_month: NaiveDate,
    car_target: f64,
    ac_target: f64,
) -> Result<MonthlyTarget, sqlx::Error> {
    sqlx::query_as::<_, MonthlyTarget>(
        r#"
        INSERT INTO monthly_targets (id, user_id, target_month, car_target, ac_target)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, target_month) DO UPDATE SET
            car_target = EXCLUDED.car_target,
            ac_target = EXCLUDED.ac_target
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(target_month)
    .bind(car_target)
    .bind(ac_target)
    .fetch_one(pool)
    .await
}

async fn find_monthly_target(
    pool: &PgPool,
    user_id: Uuid,
    target_month: NaiveDate,
) -> Result<Option<MonthlyTarget>, sqlx::Error> {
    sqlx::query_as::<_, MonthlyTarget>(
        "SELECT * FROM monthly_targets WHERE user_id = $1 AND target_month = $2",
    )
    .bind(user_id)
    .bind(target_month)
    .fetch_optional(pool)
    .await
}
