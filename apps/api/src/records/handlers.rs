use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::records::{AcRecord, CarRecord, SnowRemovalRecord};
use crate::records::calc::{ac_emission, car_emission, snow_removal_reduction, FuelType};
use crate::records::queries::{
    ac_records_in_window, car_records_in_window, insert_snow_record, snow_records_in_window,
    upsert_ac_record, upsert_car_record,
};
use crate::state::AppState;
use crate::summary::window::{month_start, next_day, next_month_start, parse_month};

#[derive(Deserialize)]
pub struct CarSubmission {
    pub distance_km: f64,
    pub fuel_efficiency: f64,
    pub fuel_type: FuelType,
}

/// POST /api/v1/car
///
/// Upserts into the current calendar-month bucket: a second submission in
/// the same month overwrites the measured fields and recomputed emission.
pub async fn handle_submit_car(
    State(state): State<AppState>,
    Json(req): Json<CarSubmission>,
) -> Result<Json<CarRecord>, AppError> {
    let co2_emission = car_emission(req.distance_km, req.fuel_efficiency, req.fuel_type)?;
    let bucket = month_start(Utc::now().date_naive());

    let record = upsert_car_record(
        &state.db,
        state.config.default_user_id,
        bucket,
        req.distance_km,
        req.fuel_efficiency,
        req.fuel_type.as_str(),
        co2_emission,
    )
    .await?;

    Ok(Json(record))
}

/// GET /api/v1/car — the current month's record(s) for the configured user.
pub async fn handle_current_car(
    State(state): State<AppState>,
) -> Result<Json<Vec<CarRecord>>, AppError> {
    let today = Utc::now().date_naive();
    let records = car_records_in_window(
        &state.db,
        state.config.default_user_id,
        month_start(today),
        next_month_start(today),
    )
    .await?;

    Ok(Json(records))
}

#[derive(Deserialize)]
pub struct AcSubmission {
    pub usage_hours: f64,
    pub power_kw: f64,
    pub temperature: f64,
}

/// POST /api/v1/ac
///
/// Upserts into the current calendar-day bucket.
pub async fn handle_submit_ac(
    State(state): State<AppState>,
    Json(req): Json<AcSubmission>,
) -> Result<Json<AcRecord>, AppError> {
    let co2_emission = ac_emission(req.usage_hours, req.power_kw, req.temperature)?;
    let bucket = Utc::now().date_naive();

    let record = upsert_ac_record(
        &state.db,
        state.config.default_user_id,
        bucket,
        req.usage_hours,
        req.power_kw,
        req.temperature,
        co2_emission,
    )
    .await?;

    Ok(Json(record))
}

/// GET /api/v1/ac — today's record(s) for the configured user.
pub async fn handle_today_ac(State(state): State<AppState>) -> Result<Json<Vec<AcRecord>>, AppError> {
    let today = Utc::now().date_naive();
    let records = ac_records_in_window(
        &state.db,
        state.config.default_user_id,
        today,
        next_day(today),
    )
    .await?;

    Ok(Json(records))
}

#[derive(Deserialize)]
pub struct SnowRemovalSubmission {
    pub area_m2: f64,
    pub snow_depth_cm: f64,
    pub time_spent_minutes: f64,
}

/// POST /api/v1/snow-removal
///
/// Append-only: every submission is its own row, no bucket merge.
pub async fn handle_submit_snow_removal(
    State(state): State<AppState>,
    Json(req): Json<SnowRemovalSubmission>,
) -> Result<Json<SnowRemovalRecord>, AppError> {
    let co2_reduction =
        snow_removal_reduction(req.area_m2, req.snow_depth_cm, req.time_spent_minutes)?;

    let record = insert_snow_record(
        &state.db,
        state.config.default_user_id,
        Utc::now().date_naive(),
        req.area_m2,
        req.snow_depth_cm,
        req.time_spent_minutes,
        co2_reduction,
    )
    .await?;

    Ok(Json(record))
}

/// GET /api/v1/snow-removal — today's records for the configured user.
pub async fn handle_today_snow_removal(
    State(state): State<AppState>,
) -> Result<Json<Vec<SnowRemovalRecord>>, AppError> {
    let today = Utc::now().date_naive();
    let records = snow_records_in_window(
        &state.db,
        state.config.default_user_id,
        today,
        next_day(today),
    )
    .await?;

    Ok(Json(records))
}

#[derive(Deserialize)]
pub struct MonthlyRecordsQuery {
    /// Defaults to the configured identity when omitted.
    pub user_id: Option<Uuid>,
    /// YYYY-MM
    pub month: String,
}

#[derive(Serialize)]
pub struct MonthlyRecordsResponse {
    pub car_records: Vec<CarRecord>,
    pub ac_records: Vec<AcRecord>,
    pub snow_records: Vec<SnowRemovalRecord>,
}

/// GET /api/v1/records — month-scoped listing across all three collections.
pub async fn handle_monthly_records(
    State(state): State<AppState>,
    Query(params): Query<MonthlyRecordsQuery>,
) -> Result<Json<MonthlyRecordsResponse>, AppError> {
    let user_id = params.user_id.unwrap_or(state.config.default_user_id);
    let start = parse_month(&params.month)?;
    let end = next_month_start(start);

    let (car_records, ac_records, snow_records) = tokio::join!(
        car_records_in_window(&state.db, user_id, start, end),
        ac_records_in_window(&state.db, user_id, start, end),
        snow_records_in_window(&state.db, user_id, start, end),
    );

    Ok(Json(MonthlyRecordsResponse {
        car_records: car_records?,
        ac_records: ac_records?,
        snow_records: snow_records?,
    }))
}
