//! Pure aggregation logic for the daily and monthly summaries. No I/O here:
//! handlers fetch window-bounded rows/sums and this module does the
//! arithmetic, so the policy-bearing pieces stay unit-testable.

use serde::Serialize;
use uuid::Uuid;

use crate::models::records::{AcRecord, CarRecord, SnowRemovalRecord};
use crate::records::calc::round2;

/// One record of a day's activity listing, tagged by source. Snow-removal
/// entries carry their credit in `co2_kg`; they are listed but excluded
/// from the emission total.
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub source: &'static str,
    pub co2_kg: f64,
}

pub const SOURCE_CAR: &str = "car";
pub const SOURCE_AC: &str = "ac";
pub const SOURCE_SNOW_REMOVAL: &str = "snow_removal";

/// Per-user monthly rollup. `total_co2` is net: emissions minus credits.
#[derive(Debug, Clone, Serialize)]
pub struct UserMonthlySummary {
    pub user_id: Uuid,
    pub total_co2: f64,
    pub car_co2: f64,
    pub ac_co2: f64,
    pub snow_removal_co2: f64,
}

impl UserMonthlySummary {
    pub fn new(user_id: Uuid, car_co2: f64, ac_co2: f64, snow_removal_co2: f64) -> Self {
        UserMonthlySummary {
            user_id,
            total_co2: net_total(car_co2, ac_co2, snow_removal_co2),
            car_co2: round2(car_co2),
            ac_co2: round2(ac_co2),
            snow_removal_co2: round2(snow_removal_co2),
        }
    }
}

/// Net monthly total: car + AC emissions minus snow-removal credits.
pub fn net_total(car_co2: f64, ac_co2: f64, snow_removal_co2: f64) -> f64 {
    round2(car_co2 + ac_co2 - snow_removal_co2)
}

/// Tags a day's records by source for the summary listing.
pub fn collect_activities(
    car: &[CarRecord],
    ac: &[AcRecord],
    snow: &[SnowRemovalRecord],
) -> Vec<Activity> {
    car.iter()
        .map(|r| Activity {
            source: SOURCE_CAR,
            co2_kg: r.co2_emission,
        })
        .chain(ac.iter().map(|r| Activity {
            source: SOURCE_AC,
            co2_kg: r.co2_emission,
        }))
        .chain(snow.iter().map(|r| Activity {
            source: SOURCE_SNOW_REMOVAL,
            co2_kg: r.co2_reduction,
        }))
        .collect()
}

/// Sum of the emission-producing sources only (car + AC).
pub fn emission_total(car: &[CarRecord], ac: &[AcRecord]) -> f64 {
    let car_sum: f64 = car.iter().map(|r| r.co2_emission).sum();
    let ac_sum: f64 = ac.iter().map(|r| r.co2_emission).sum();
    round2(car_sum + ac_sum)
}

/// Deviation from the baseline in percent. Defined as 0 when the baseline
/// is 0 — a policy choice so an absent reference reads as "on target"
/// rather than dividing by zero.
pub fn comparison_percentage(today_emission: f64, baseline_emission: f64) -> f64 {
    if baseline_emission <= 0.0 {
        return 0.0;
    }
    round2((today_emission - baseline_emission) / baseline_emission * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn car_record(co2: f64) -> CarRecord {
        CarRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            target_month: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            distance_km: 300.0,
            fuel_efficiency: 15.0,
            fuel_type: "regular".to_string(),
            co2_emission: co2,
            created_at: Utc::now(),
        }
    }

    fn ac_record(co2: f64) -> AcRecord {
        AcRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            usage_hours: 8.0,
            power_kw: 1.5,
            temperature: 25.0,
            co2_emission: co2,
            created_at: Utc::now(),
        }
    }

    fn snow_record(reduction: f64) -> SnowRemovalRecord {
        SnowRemovalRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            area_m2: 50.0,
            snow_depth_cm: 15.0,
            time_spent_minutes: 60.0,
            co2_reduction: reduction,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_net_total_subtracts_snow_credit() {
        assert_eq!(net_total(87.5, 12.0, 5.0), 94.5);
    }

    #[test]
    fn test_net_total_can_go_negative() {
        assert_eq!(net_total(1.0, 0.5, 4.0), -2.5);
    }

    #[test]
    fn test_summary_builder_uses_net_total() {
        let s = UserMonthlySummary::new(Uuid::new_v4(), 87.5, 12.0, 5.0);
        assert_eq!(s.total_co2, 94.5);
        assert_eq!(s.car_co2, 87.5);
        assert_eq!(s.ac_co2, 12.0);
        assert_eq!(s.snow_removal_co2, 5.0);
    }

    #[test]
    fn test_empty_window_sums_to_zero() {
        assert_eq!(emission_total(&[], &[]), 0.0);
        assert_eq!(net_total(0.0, 0.0, 0.0), 0.0);
        assert!(collect_activities(&[], &[], &[]).is_empty());
    }

    #[test]
    fn test_activities_are_tagged_by_source() {
        let activities = collect_activities(
            &[car_record(46.4)],
            &[ac_record(5.48)],
            &[snow_record(45.0)],
        );
        let sources: Vec<&str> = activities.iter().map(|a| a.source).collect();
        assert_eq!(sources, vec!["car", "ac", "snow_removal"]);
    }

    #[test]
    fn test_emission_total_excludes_snow_credits() {
        let car = [car_record(46.4)];
        let ac = [ac_record(5.48)];
        // snow credits are listed but never added to the emission side
        assert_eq!(emission_total(&car, &ac), 51.88);
    }

    #[test]
    fn test_comparison_percentage_against_baseline() {
        assert_eq!(comparison_percentage(10.0, 8.0), 25.0);
        assert_eq!(comparison_percentage(6.0, 8.0), -25.0);
    }

    #[test]
    fn test_comparison_percentage_zero_baseline_is_zero() {
        let p = comparison_percentage(12.5, 0.0);
        assert_eq!(p, 0.0);
        assert!(p.is_finite());
    }
}
