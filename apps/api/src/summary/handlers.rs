use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::events::queries::list_users;
use crate::records::calc::round2;
use crate::records::queries::{
    ac_records_in_window, car_records_in_window, snow_records_in_window, sum_ac_emissions,
    sum_car_emissions, sum_snow_reductions,
};
use crate::state::AppState;
use crate::summary::aggregate::{
    collect_activities, comparison_percentage, emission_total, Activity, UserMonthlySummary,
};
use crate::summary::window::{month_start, next_day, next_month_start, parse_month};

#[derive(Deserialize)]
pub struct DailyQuery {
    /// Defaults to the current day when omitted.
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct DailySummaryResponse {
    pub date: NaiveDate,
    pub today_emission: f64,
    pub activities: Vec<Activity>,
    pub baseline_emission: f64,
    pub comparison_percentage: f64,
    pub monthly_total_emission: f64,
}

/// GET /api/v1/summary/daily
pub async fn handle_daily_summary(
    State(state): State<AppState>,
    Query(params): Query<DailyQuery>,
) -> Result<Json<DailySummaryResponse>, AppError> {
    let date = params.date.unwrap_or_else(|| Utc::now().date_naive());
    let user_id = state.config.default_user_id;

    let day_end = next_day(date);
    let m_start = month_start(date);
    let m_end = next_month_start(date);

    // Independent read-only queries over disjoint collections
    let (car_today, ac_today, snow_today, car_month, ac_month) = tokio::join!(
        car_records_in_window(&state.db, user_id, m_start, m_end),
        ac_records_in_window(&state.db, user_id, date, day_end),
        snow_records_in_window(&state.db, user_id, date, day_end),
        sum_car_emissions(&state.db, user_id, m_start, m_end),
        sum_ac_emissions(&state.db, user_id, m_start, m_end),
    );
    let (car_today, ac_today, snow_today) = (car_today?, ac_today?, snow_today?);

    let baseline_emission = state.baseline.daily_baseline(&state.db, user_id, date).await?;

    let today_emission = emission_total(&car_today, &ac_today);
    let activities = collect_activities(&car_today, &ac_today, &snow_today);

    Ok(Json(DailySummaryResponse {
        date,
        today_emission,
        activities,
        baseline_emission,
        comparison_percentage: comparison_percentage(today_emission, baseline_emission),
        monthly_total_emission: round2(car_month? + ac_month?),
    }))
}

#[derive(Deserialize)]
pub struct MonthQuery {
    /// YYYY-MM
    pub month: String,
}

/// GET /api/v1/summary/monthly
pub async fn handle_monthly_summaries(
    State(state): State<AppState>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Vec<UserMonthlySummary>>, AppError> {
    let start = parse_month(&params.month)?;
    let end = next_month_start(start);

    let users = list_users(&state.db).await?;
    let mut summaries = Vec::with_capacity(users.len());
    for user in users {
        summaries.push(user_summary_for_window(&state, user.id, start, end).await?);
    }

    Ok(Json(summaries))
}

/// GET /api/v1/summary/monthly/:user_id
pub async fn handle_user_monthly_summary(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<UserMonthlySummary>, AppError> {
    let start = parse_month(&params.month)?;
    let end = next_month_start(start);

    Ok(Json(user_summary_for_window(&state, user_id, start, end).await?))
}

async fn user_summary_for_window(
    state: &AppState,
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<UserMonthlySummary, AppError> {
    let (car, ac, snow) = tokio::join!(
        sum_car_emissions(&state.db, user_id, start, end),
        sum_ac_emissions(&state.db, user_id, start, end),
        sum_snow_reductions(&state.db, user_id, start, end),
    );

    Ok(UserMonthlySummary::new(user_id, car?, ac?, snow?))
}
