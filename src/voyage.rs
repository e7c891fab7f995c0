//! Distance and fuel calculators plus the canal requirement table
//!
//! Distance is a planar approximation, not a geodesic: the coordinate
//! deltas are treated as a flat right triangle and scaled by 60 to
//! nautical miles. Documented simplification, kept as-is.

use crate::catalog::Catalog;
use crate::models::{Canal, CanalRequirement, DistanceFact, FuelOption};
use serde::{Deserialize, Serialize};

pub const NM_TO_KM: f64 = 1.852;

/// Approximate distance between two ports in whole nautical miles.
/// Returns 0 when either port is unknown to the catalog.
pub fn distance_nm(catalog: &Catalog, from: &str, to: &str) -> f64 {
    let (Some(a), Some(b)) = (catalog.port(from), catalog.port(to)) else {
        return 0.0;
    };

    let dlat = b.lat - a.lat;
    let dlon = b.lon - a.lon;

    ((dlat * dlat + dlon * dlon).sqrt() * 60.0).round()
}

/// Distance fact for the bundle, `None` when either port is unknown.
pub fn distance_fact(catalog: &Catalog, from: &str, to: &str) -> Option<DistanceFact> {
    let a = catalog.port(from)?;
    let b = catalog.port(to)?;
    let nm = distance_nm(catalog, from, to);

    Some(DistanceFact {
        from: a.name.clone(),
        to: b.name.clone(),
        nautical_miles: nm,
        kilometers: round1(nm * NM_TO_KM),
    })
}

/// Comparative fuel table across the fixed speed grid. One record per
/// speed tier; empty when the distance is the zero sentinel.
pub fn fuel_table(catalog: &Catalog, distance_nm: f64) -> Vec<FuelOption> {
    if distance_nm <= 0.0 {
        return Vec::new();
    }

    catalog
        .fuel_curve()
        .iter()
        .map(|point| {
            let voyage_days = distance_nm / (point.speed_knots as f64 * 24.0);
            let total_fuel = point.consumption_tons_per_day as f64 * voyage_days;

            FuelOption {
                speed_knots: point.speed_knots,
                daily_consumption_tons: point.consumption_tons_per_day,
                efficiency_percent: point.efficiency_percent,
                voyage_duration_days: round1(voyage_days),
                total_fuel_tons: round1(total_fuel),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationEstimate {
    pub speed_knots: u32,
    pub days: f64,
}

/// Voyage duration per speed tier; empty for the zero-distance sentinel.
pub fn duration_estimates(catalog: &Catalog, distance_nm: f64) -> Vec<DurationEstimate> {
    if distance_nm <= 0.0 {
        return Vec::new();
    }

    catalog
        .fuel_curve()
        .iter()
        .map(|point| DurationEstimate {
            speed_knots: point.speed_knots,
            days: round1(distance_nm / (point.speed_knots as f64 * 24.0)),
        })
        .collect()
}

// Route pairs requiring canal passage. A fixed table, not derived from
// geography.
const SUEZ_DEPARTURES: &[&str] = &["Singapore", "Qingdao"];
const SUEZ_DESTINATIONS: &[&str] = &["Rotterdam", "New Orleans"];
const PANAMA_DEPARTURES: &[&str] = &["New Orleans"];
const PANAMA_DESTINATIONS: &[&str] = &["Qingdao", "Singapore"];

fn in_table(table: &[&str], port: &str) -> bool {
    table.iter().any(|entry| entry.eq_ignore_ascii_case(port))
}

/// Canal requirement for a departure/destination pair.
pub fn canal_check(departure: &str, destination: &str) -> CanalRequirement {
    if in_table(SUEZ_DEPARTURES, departure) && in_table(SUEZ_DESTINATIONS, destination) {
        CanalRequirement {
            canal: Canal::Suez,
            estimated_fee_usd: 300_000,
            additional_time: "2-3 days".to_string(),
        }
    } else if in_table(PANAMA_DEPARTURES, departure) && in_table(PANAMA_DESTINATIONS, destination) {
        CanalRequirement {
            canal: Canal::Panama,
            estimated_fee_usd: 250_000,
            additional_time: "1-2 days".to_string(),
        }
    } else {
        CanalRequirement {
            canal: Canal::None,
            estimated_fee_usd: 0,
            additional_time: "0 days".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRisk {
    pub piracy_risk: String,
    pub weather_risk: String,
    pub recommendations: Vec<String>,
}

/// Baseline risk assessment for a route.
pub fn assess_route_risks(_departure: &str, _destination: &str) -> RouteRisk {
    RouteRisk {
        piracy_risk: "Low".to_string(),
        weather_risk: "Moderate".to_string(),
        recommendations: vec![
            "Monitor weather conditions".to_string(),
            "Standard security protocols".to_string(),
        ],
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
