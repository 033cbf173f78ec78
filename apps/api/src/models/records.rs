use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One car-usage record per (user, calendar month). `target_month` is the
/// first day of the month and acts as the upsert bucket key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CarRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_month: NaiveDate,
    pub distance_km: f64,
    pub fuel_efficiency: f64,
    pub fuel_type: String,
    pub co2_emission: f64,
    pub created_at: DateTime<Utc>,
}

/// One air-conditioner record per (user, calendar day).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AcRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub usage_hours: f64,
    pub power_kw: f64,
    pub temperature: f64,
    pub co2_emission: f64,
    pub created_at: DateTime<Utc>,
}

/// Snow-removal records are append-only: every submission is its own row,
/// and `co2_reduction` is always a credit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SnowRemovalRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub area_m2: f64,
    pub snow_depth_cm: f64,
    pub time_spent_minutes: f64,
    pub co2_reduction: f64,
    pub created_at: DateTime<Utc>,
}

/// Per-month reduction goals, one row per (user, calendar month).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MonthlyTarget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target_month: NaiveDate,
    pub car_target: f64,
    pub ac_target: f64,
    pub created_at: DateTime<Utc>,
}
