//! Emission calculators — pure, deterministic conversions from raw activity
//! inputs to a CO₂ mass in kilograms.
//!
//! The coefficients are national-average domain constants kept in one place
//! so a policy update (a new grid factor, say) is a one-line change.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// CO₂ emitted per liter of gasoline burned (kg-CO₂/L).
/// Regular and premium share a factor; diesel runs higher.
pub const GASOLINE_EMISSION_FACTOR: f64 = 2.32;
pub const DIESEL_EMISSION_FACTOR: f64 = 2.58;

/// Grid electricity factor (kg-CO₂/kWh), national average.
pub const GRID_EMISSION_FACTOR: f64 = 0.457;

/// Credit factor for snow-removal volunteering (kg-CO₂ per m²·cm·minute).
pub const SNOW_REMOVAL_FACTOR: f64 = 0.001;

/// Accepted air-conditioner setpoint range (°C), inclusive on both ends.
pub const AC_TEMP_MIN: f64 = 16.0;
pub const AC_TEMP_MAX: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Regular,
    Premium,
    Diesel,
}

impl FuelType {
    pub fn emission_factor(self) -> f64 {
        match self {
            FuelType::Regular | FuelType::Premium => GASOLINE_EMISSION_FACTOR,
            FuelType::Diesel => DIESEL_EMISSION_FACTOR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FuelType::Regular => "regular",
            FuelType::Premium => "premium",
            FuelType::Diesel => "diesel",
        }
    }
}

/// Rounds to 2 decimal places (standard half-up decimal rounding).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Car emission: fuel consumed (L) = distance / efficiency, then
/// consumed × per-liter factor for the fuel type.
pub fn car_emission(
    distance_km: f64,
    fuel_efficiency: f64,
    fuel_type: FuelType,
) -> Result<f64, AppError> {
    if distance_km <= 0.0 {
        return Err(AppError::Validation(
            "distance_km must be greater than 0".to_string(),
        ));
    }
    if fuel_efficiency <= 0.0 {
        return Err(AppError::Validation(
            "fuel_efficiency must be greater than 0".to_string(),
        ));
    }

    let fuel_consumed = distance_km / fuel_efficiency;
    Ok(round2(fuel_consumed * fuel_type.emission_factor()))
}

/// Air-conditioner emission: hours × kW × grid factor.
pub fn ac_emission(usage_hours: f64, power_kw: f64, temperature_c: f64) -> Result<f64, AppError> {
    if usage_hours <= 0.0 {
        return Err(AppError::Validation(
            "usage_hours must be greater than 0".to_string(),
        ));
    }
    if power_kw <= 0.0 {
        return Err(AppError::Validation(
            "power_kw must be greater than 0".to_string(),
        ));
    }
    if !(AC_TEMP_MIN..=AC_TEMP_MAX).contains(&temperature_c) {
        return Err(AppError::Validation(format!(
            "temperature must be between {AC_TEMP_MIN}\u{2103} and {AC_TEMP_MAX}\u{2103}"
        )));
    }

    Ok(round2(usage_hours * power_kw * GRID_EMISSION_FACTOR))
}

/// Snow-removal credit: area × depth × minutes × factor. Always positive;
/// stored as a reduction and subtracted from totals at aggregation time.
pub fn snow_removal_reduction(
    area_m2: f64,
    snow_depth_cm: f64,
    time_spent_minutes: f64,
) -> Result<f64, AppError> {
    if area_m2 <= 0.0 {
        return Err(AppError::Validation(
            "area_m2 must be greater than 0".to_string(),
        ));
    }
    if snow_depth_cm <= 0.0 {
        return Err(AppError::Validation(
            "snow_depth_cm must be greater than 0".to_string(),
        ));
    }
    if time_spent_minutes <= 0.0 {
        return Err(AppError::Validation(
            "time_spent_minutes must be greater than 0".to_string(),
        ));
    }

    Ok(round2(
        area_m2 * snow_depth_cm * time_spent_minutes * SNOW_REMOVAL_FACTOR,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_emission_diesel_reference_value() {
        // 500 km at 15 km/L burns 33.33 L of diesel
        assert_eq!(car_emission(500.0, 15.0, FuelType::Diesel).unwrap(), 86.0);
    }

    #[test]
    fn test_car_emission_regular() {
        // 300 / 15 * 2.32 = 46.4
        assert_eq!(car_emission(300.0, 15.0, FuelType::Regular).unwrap(), 46.4);
    }

    #[test]
    fn test_car_emission_premium_matches_regular_factor() {
        assert_eq!(
            car_emission(300.0, 15.0, FuelType::Premium).unwrap(),
            car_emission(300.0, 15.0, FuelType::Regular).unwrap()
        );
    }

    #[test]
    fn test_car_emission_is_deterministic() {
        let a = car_emission(123.4, 9.7, FuelType::Diesel).unwrap();
        let b = car_emission(123.4, 9.7, FuelType::Diesel).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_car_emission_rejects_zero_distance() {
        assert!(car_emission(0.0, 15.0, FuelType::Regular).is_err());
    }

    #[test]
    fn test_car_emission_rejects_negative_efficiency() {
        assert!(car_emission(500.0, -1.0, FuelType::Regular).is_err());
    }

    #[test]
    fn test_ac_emission_reference_value() {
        assert_eq!(ac_emission(8.0, 1.5, 25.0).unwrap(), 5.48);
    }

    #[test]
    fn test_ac_emission_temperature_bounds_inclusive() {
        assert!(ac_emission(8.0, 1.5, 16.0).is_ok());
        assert!(ac_emission(8.0, 1.5, 32.0).is_ok());
        assert!(ac_emission(8.0, 1.5, 15.0).is_err());
        assert!(ac_emission(8.0, 1.5, 33.0).is_err());
    }

    #[test]
    fn test_ac_emission_rejects_nonpositive_inputs() {
        assert!(ac_emission(0.0, 1.5, 25.0).is_err());
        assert!(ac_emission(8.0, 0.0, 25.0).is_err());
    }

    #[test]
    fn test_snow_removal_reference_value() {
        assert_eq!(snow_removal_reduction(50.0, 15.0, 60.0).unwrap(), 45.0);
    }

    #[test]
    fn test_snow_removal_rejects_nonpositive_inputs() {
        assert!(snow_removal_reduction(0.0, 15.0, 60.0).is_err());
        assert!(snow_removal_reduction(50.0, -2.0, 60.0).is_err());
        assert!(snow_removal_reduction(50.0, 15.0, 0.0).is_err());
    }

    #[test]
    fn test_round2_truncates_float_noise() {
        assert_eq!(round2(5.4840000000001), 5.48);
        assert_eq!(round2(86.00000000000003), 86.0);
        assert_eq!(round2(1.005000001), 1.01);
    }

    #[test]
    fn test_fuel_type_factors() {
        assert_eq!(FuelType::Regular.emission_factor(), 2.32);
        assert_eq!(FuelType::Premium.emission_factor(), 2.32);
        assert_eq!(FuelType::Diesel.emission_factor(), 2.58);
    }

    #[test]
    fn test_fuel_type_serde_lowercase() {
        assert_eq!(
            serde_json::from_str::<FuelType>("\"diesel\"").unwrap(),
            FuelType::Diesel
        );
        assert!(serde_json::from_str::<FuelType>("\"kerosene\"").is_err());
        assert_eq!(serde_json::to_string(&FuelType::Premium).unwrap(), "\"premium\"");
    }
}
