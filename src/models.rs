//! Core data models for the maritime agent

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GearType {
    Gearless,
    Cranes,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Canal {
    Suez,
    Panama,
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    Acceptable,
    Good,
    Optimal,
}

impl MatchTier {
    /// Tier for a compatibility score, `None` below the acceptance threshold.
    pub fn from_score(score: u32) -> Option<Self> {
        match score {
            s if s >= 80 => Some(MatchTier::Optimal),
            s if s >= 60 => Some(MatchTier::Good),
            s if s >= 50 => Some(MatchTier::Acceptable),
            _ => None,
        }
    }
}

//
// ================= Reference Entities =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Agreed date window within which a vessel must present ready to load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaycanWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vessel {
    pub vessel_id: u32,
    pub name: String,
    pub dwt: u32,
    /// Current location (port name, informational only)
    pub location: String,
    pub laycan: LaycanWindow,
    pub speed_knots: u32,
    pub consumption_tons_per_day: u32,
    pub gear: GearType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cargo {
    pub cargo_id: u32,
    pub commodity: String,
    pub size_tons: u32,
    pub load_port: String,
    pub discharge_port: String,
    pub laycan: LaycanWindow,
    /// USD per ton equivalent
    pub freight_rate: f64,
    /// Free-text constraint: gear type or draft limit
    pub requirement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BunkerPrice {
    pub port: String,
    pub price_usd_per_ton: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location: String,
    pub sea_state: String,
    pub wind: String,
    pub visibility: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketTrend {
    pub year: i32,
    pub freight_rate_usd_teu: f64,
    pub bunker_price_usd_ton: f64,
    pub demand_indicator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitDue {
    pub route: String,
    pub kind: String,
    pub cost_usd: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiracyZone {
    pub region: String,
    pub coordinates: String,
    pub risk_level: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FuelCurvePoint {
    pub speed_knots: u32,
    pub consumption_tons_per_day: u32,
    pub efficiency_percent: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortFacility {
    pub port: String,
    pub bunker_availability: String,
    pub cargo_handling: String,
    pub berth_availability: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoyageRecord {
    pub voyage_id: String,
    pub route: String,
    pub estimated_cost_usd: u64,
    pub actual_cost_usd: u64,
}

//
// ================= Derived Facts =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceFact {
    pub from: String,
    pub to: String,
    pub nautical_miles: f64,
    pub kilometers: f64,
}

/// One row of the comparative fuel table. The caller (or the LLM
/// collaborator) picks a recommended speed; no optimum is selected here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelOption {
    pub speed_knots: u32,
    pub daily_consumption_tons: u32,
    pub efficiency_percent: u32,
    pub voyage_duration_days: f64,
    pub total_fuel_tons: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanalRequirement {
    pub canal: Canal,
    pub estimated_fee_usd: u64,
    pub additional_time: String,
}

/// Ephemeral pairing of one cargo with one vessel. Recomputed per query,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub cargo: Cargo,
    pub vessel: Vessel,
    pub compatibility_score: u32,
    pub tier: MatchTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profitability {
    pub freight_revenue_usd: f64,
    pub estimated_costs_usd: f64,
    pub estimated_profit_usd: f64,
    pub profit_margin_percent: f64,
}

/// Fact bundle handed to the text-generation collaborator. Sections are
/// populated on demand per query content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<DistanceFact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bunker_price: Option<BunkerPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vessels: Option<Vec<Vessel>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargoes: Option<Vec<Cargo>>,
}

impl FactBundle {
    pub fn is_empty(&self) -> bool {
        self.distance.is_none()
            && self.weather.is_none()
            && self.bunker_price.is_none()
            && self.vessels.is_none()
            && self.cargoes.is_none()
    }
}

impl fmt::Display for GearType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GearType::Gearless => "gearless",
            GearType::Cranes => "cranes",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Canal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Canal::Suez => "Suez Canal",
            Canal::Panama => "Panama Canal",
            Canal::None => "None",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchTier::Optimal => "Optimal",
            MatchTier::Good => "Good",
            MatchTier::Acceptable => "Acceptable",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(MatchTier::from_score(100), Some(MatchTier::Optimal));
        assert_eq!(MatchTier::from_score(80), Some(MatchTier::Optimal));
        assert_eq!(MatchTier::from_score(75), Some(MatchTier::Good));
        assert_eq!(MatchTier::from_score(60), Some(MatchTier::Good));
        assert_eq!(MatchTier::from_score(55), Some(MatchTier::Acceptable));
        assert_eq!(MatchTier::from_score(50), Some(MatchTier::Acceptable));
        assert_eq!(MatchTier::from_score(49), None);
        assert_eq!(MatchTier::from_score(30), None);
    }

    #[test]
    fn test_empty_fact_bundle() {
        let bundle = FactBundle::default();
        assert!(bundle.is_empty());

        let bundle = FactBundle {
            distance: Some(DistanceFact {
                from: "Singapore".to_string(),
                to: "Rotterdam".to_string(),
                nautical_miles: 6690.0,
                kilometers: 12389.9,
            }),
            ..Default::default()
        };
        assert!(!bundle.is_empty());
    }
}
