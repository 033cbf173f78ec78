//! Daily-summary baseline — pluggable, trait-based policy for the reference
//! value today's emission is compared against.
//!
//! Three mutually exclusive strategies exist; exactly one is selected at
//! startup via `BASELINE_STRATEGY` and held in `AppState` as
//! `Arc<dyn BaselineStrategy>`. They are never mixed within a process.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::records::queries::{sum_ac_emissions, sum_car_emissions};
use crate::summary::window::{days_in_month, month_start, next_month_start};

/// Reference household per-day emissions (kg-CO₂/day), national averages.
pub const STANDARD_DAILY_CAR_EMISSION: f64 = 5.2;
pub const STANDARD_DAILY_AC_EMISSION: f64 = 2.8;

/// Per-month household baselines (kg-CO₂/day), January..December.
/// Winter months run high on heating load, mid-summer on cooling.
pub const SEASONAL_DAILY_BASELINES: [f64; 12] = [
    9.6, 9.4, 8.8, 8.0, 7.4, 7.8, 8.6, 8.9, 7.9, 7.6, 8.4, 9.3,
];

#[async_trait]
pub trait BaselineStrategy: Send + Sync {
    /// Reference emission (kg-CO₂) for the given day.
    async fn daily_baseline(
        &self,
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<f64, AppError>;

    fn name(&self) -> &'static str;
}

/// Resolves a strategy by its config name.
pub fn from_name(name: &str) -> anyhow::Result<Arc<dyn BaselineStrategy>> {
    match name {
        "fixed" => Ok(Arc::new(FixedBaseline)),
        "seasonal" => Ok(Arc::new(SeasonalBaseline)),
        "observed" => Ok(Arc::new(ObservedMonthlyAverage)),
        other => anyhow::bail!(
            "unknown baseline strategy '{other}' (expected fixed, seasonal or observed)"
        ),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FixedBaseline — default
// ────────────────────────────────────────────────────────────────────────────

/// Flat reference value: standard car + AC household emissions per day.
pub struct FixedBaseline;

pub fn fixed_daily_baseline() -> f64 {
    STANDARD_DAILY_CAR_EMISSION + STANDARD_DAILY_AC_EMISSION
}

#[async_trait]
impl BaselineStrategy for FixedBaseline {
    async fn daily_baseline(
        &self,
        _pool: &PgPool,
        _user_id: Uuid,
        _date: NaiveDate,
    ) -> Result<f64, AppError> {
        Ok(fixed_daily_baseline())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// SeasonalBaseline — month-indexed HVAC table
// ────────────────────────────────────────────────────────────────────────────

pub struct SeasonalBaseline;

pub fn seasonal_daily_baseline(date: NaiveDate) -> f64 {
    // month0 is 0-11, so the index never leaves the table
    SEASONAL_DAILY_BASELINES[date.month0() as usize]
}

#[async_trait]
impl BaselineStrategy for SeasonalBaseline {
    async fn daily_baseline(
        &self,
        _pool: &PgPool,
        _user_id: Uuid,
        date: NaiveDate,
    ) -> Result<f64, AppError> {
        Ok(seasonal_daily_baseline(date))
    }

    fn name(&self) -> &'static str {
        "seasonal"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ObservedMonthlyAverage — self-referential
// ────────────────────────────────────────────────────────────────────────────

/// The month's own recorded total divided by its day count. A month with no
/// records yields 0, which the comparison layer treats as "no baseline".
pub struct ObservedMonthlyAverage;

#[async_trait]
impl BaselineStrategy for ObservedMonthlyAverage {
    async fn daily_baseline(
        &self,
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<f64, AppError> {
        let start = month_start(date);
        let end = next_month_start(date);
        let (car, ac) = tokio::join!(
            sum_car_emissions(pool, user_id, start, end),
            sum_ac_emissions(pool, user_id, start, end)
        );
        Ok((car? + ac?) / days_in_month(date) as f64)
    }

    fn name(&self) -> &'static str {
        "observed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_baseline_is_car_plus_ac() {
        assert_eq!(fixed_daily_baseline(), 8.0);
    }

    #[test]
    fn test_seasonal_baseline_indexes_by_calendar_month() {
        assert_eq!(seasonal_daily_baseline(date(2025, 1, 15)), 9.6);
        assert_eq!(seasonal_daily_baseline(date(2025, 12, 1)), 9.3);
        assert_eq!(seasonal_daily_baseline(date(2025, 5, 31)), 7.4);
    }

    #[test]
    fn test_seasonal_table_covers_every_month() {
        assert_eq!(SEASONAL_DAILY_BASELINES.len(), 12);
        assert!(SEASONAL_DAILY_BASELINES.iter().all(|v| *v > 0.0));
    }

    #[test]
    fn test_from_name_resolves_known_strategies() {
        assert_eq!(from_name("fixed").unwrap().name(), "fixed");
        assert_eq!(from_name("seasonal").unwrap().name(), "seasonal");
        assert_eq!(from_name("observed").unwrap().name(), "observed");
    }

    #[test]
    fn test_from_name_rejects_unknown_strategy() {
        assert!(from_name("lunar").is_err());
    }
}
