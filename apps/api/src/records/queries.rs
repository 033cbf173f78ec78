//! Store access for activity records. Car and AC writes are single atomic
//! upserts keyed on (user, bucket) so two concurrent submissions for the
//! same bucket can never produce two rows; the row id and `created_at`
//! survive overwrites. All window reads are half-open `[start, end)`.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::records::{AcRecord, CarRecord, SnowRemovalRecord};

pub async fn upsert_car_record(
    pool: &PgPool,
    user_id: Uuid,
    target_month: NaiveDate,
    distance_km: f64,
    fuel_efficiency: f64,
    fuel_type: &str,
    co2_emission: f64,
) -> Result<CarRecord, sqlx::Error> {
    sqlx::query_as::<_, CarRecord>(
        r#"
        INSERT INTO car_records
            (id, user_id, target_month, distance_km, fuel_efficiency, fuel_type, co2_emission)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_id, target_month) DO UPDATE SET
            distance_km = EXCLUDED.distance_km,
            fuel_efficiency = EXCLUDED.fuel_efficiency,
            fuel_type = EXCLUDED.fuel_type,
            co2_emission = EXCLUDED.co2_emission
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(target_month)
    .bind(distance_km)
    .bind(fuel_efficiency)
    .bind(fuel_type)
    .bind(co2_emission)
    .fetch_one(pool)
    .await
}

pub async fn upsert_ac_record(
    pool: &PgPool,
    user_id: Uuid,
    date: NaiveDate,
    usage_hours: f64,
    power_kw: f64,
    temperature: f64,
    co2_emission: f64,
) -> Result<AcRecord, sqlx::Error> {
    sqlx::query_as::<_, AcRecord>(
        r#"
        INSERT INTO ac_records
            (id, user_id, date, usage_hours, power_kw, temperature, co2_emission)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_id, date) DO UPDATE SET
            usage_hours = EXCLUDED.usage_hours,
            power_kw = EXCLUDED.power_kw,
            temperature = EXCLUDED.temperature,
            co2_emission = EXCLUDED.co2_emission
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(date)
    .bind(usage_hours)
    .bind(power_kw)
    .bind(temperature)
    .bind(co2_emission)
    .fetch_one(pool)
    .await
}

/// Snow-removal submissions are append-only, no bucket merge.
pub async fn insert_snow_record(
    pool: &PgPool,
    user_id: Uuid,
    date: NaiveDate,
    area_m2: f64,
    snow_depth_cm: f64,
    time_spent_minutes: f64,
    co2_reduction: f64,
) -> Result<SnowRemovalRecord, sqlx::Error> {
    sqlx::query_as::<_, SnowRemovalRecord>(
        r#"
        INSERT INTO snow_removal_records
            (id, user_id, date, area_m2, snow_depth_cm, time_spent_minutes, co2_reduction)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(date)
    .bind(area_m2)
    .bind(snow_depth_cm)
    .bind(time_spent_minutes)
    .bind(co2_reduction)
    .fetch_one(pool)
    .await
}

pub async fn car_records_in_window(
    pool: &PgPool,
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<CarRecord>, sqlx::Error> {
    sqlx::query_as::<_, CarRecord>(
        r#"
        SELECT * FROM car_records
        WHERE user_id = $1 AND target_month >= $2 AND target_month < $3
        ORDER BY target_month DESC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}

pub async fn ac_records_in_window(
    pool: &PgPool,
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<AcRecord>, sqlx::Error> {
    sqlx::query_as::<_, AcRecord>(
        r#"
        SELECT * FROM ac_records
        WHERE user_id = $1 AND date >= $2 AND date < $3
        ORDER BY date DESC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}

pub async fn snow_records_in_window(
    pool: &PgPool,
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<SnowRemovalRecord>, sqlx::Error> {
    sqlx::query_as::<_, SnowRemovalRecord>(
        r#"
        SELECT * FROM snow_removal_records
        WHERE user_id = $1 AND date >= $2 AND date < $3
        ORDER BY date DESC, created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}

/// Sums default to 0 over empty windows, never NULL.
pub async fn sum_car_emissions(
    pool: &PgPool,
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<f64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(co2_emission), 0)::float8 FROM car_records
        WHERE user_id = $1 AND target_month >= $2 AND target_month < $3
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await
}

pub async fn sum_ac_emissions(
    pool: &PgPool,
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<f64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(co2_emission), 0)::float8 FROM ac_records
        WHERE user_id = $1 AND date >= $2 AND date < $3
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await
}

pub async fn sum_snow_reductions(
    pool: &PgPool,
    user_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<f64, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(co2_reduction), 0)::float8 FROM snow_removal_records
        WHERE user_id = $1 AND date >= $2 AND date < $3
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await
}
