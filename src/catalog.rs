//! Reference catalog: immutable in-memory maritime tables
//!
//! Ports, vessels, cargoes, bunker prices, weather, market trends, transit
//! dues, piracy zones, the fuel curve, port facilities and voyage history.
//! Built once from static literals; read-only afterwards. A production
//! deployment would load these from a versioned data source, keeping the
//! same schema.
//!
//! Lookups are linear scans by exact, case-insensitive name match,
//! acceptable at this data scale.

use crate::models::{
    BunkerPrice, Cargo, FuelCurvePoint, GearType, LaycanWindow, MarketTrend, PiracyZone, Port,
    PortFacility, TransitDue, Vessel, VoyageRecord, WeatherRecord,
};
use chrono::NaiveDate;

pub struct Catalog {
    ports: Vec<Port>,
    vessels: Vec<Vessel>,
    cargoes: Vec<Cargo>,
    bunker_prices: Vec<BunkerPrice>,
    weather: Vec<WeatherRecord>,
    market_trends: Vec<MarketTrend>,
    transit_dues: Vec<TransitDue>,
    piracy_zones: Vec<PiracyZone>,
    fuel_curve: Vec<FuelCurvePoint>,
    facilities: Vec<PortFacility>,
    voyage_history: Vec<VoyageRecord>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date in catalog literal")
}

fn laycan(start: (i32, u32, u32), end: (i32, u32, u32)) -> LaycanWindow {
    LaycanWindow {
        start: date(start.0, start.1, start.2),
        end: date(end.0, end.1, end.2),
    }
}

fn port(name: &str, lat: f64, lon: f64) -> Port {
    Port {
        name: name.to_string(),
        lat,
        lon,
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            ports: vec![
                port("Singapore", 1.3521, 103.8198),
                port("Durban", -29.8579, 31.0292),
                port("Rotterdam", 51.9225, 4.47917),
                port("Richards Bay", -28.7830, 32.0377),
                port("Tubarão", -20.2707, -40.2647),
                port("Qingdao", 36.0671, 120.3826),
                port("New Orleans", 29.9511, -90.0715),
                port("Alexandria", 31.2001, 29.9187),
            ],
            vessels: vec![
                Vessel {
                    vessel_id: 1,
                    name: "Ocean Star".to_string(),
                    dwt: 76_000,
                    location: "Singapore".to_string(),
                    laycan: laycan((2025, 9, 5), (2025, 9, 10)),
                    speed_knots: 14,
                    consumption_tons_per_day: 25,
                    gear: GearType::Gearless,
                },
                Vessel {
                    vessel_id: 2,
                    name: "Pacific Trader".to_string(),
                    dwt: 82_000,
                    location: "Durban".to_string(),
                    laycan: laycan((2025, 9, 6), (2025, 9, 12)),
                    speed_knots: 13,
                    consumption_tons_per_day: 28,
                    gear: GearType::Cranes,
                },
                Vessel {
                    vessel_id: 3,
                    name: "Atlantic Carrier".to_string(),
                    dwt: 100_000,
                    location: "Rotterdam".to_string(),
                    laycan: laycan((2025, 9, 8), (2025, 9, 15)),
                    speed_knots: 15,
                    consumption_tons_per_day: 30,
                    gear: GearType::Gearless,
                },
            ],
            cargoes: vec![
                Cargo {
                    cargo_id: 1,
                    commodity: "Coal".to_string(),
                    size_tons: 70_000,
                    load_port: "Richards Bay".to_string(),
                    discharge_port: "Rotterdam".to_string(),
                    laycan: laycan((2025, 9, 5), (2025, 9, 10)),
                    freight_rate: 18.0,
                    requirement: "gearless".to_string(),
                },
                Cargo {
                    cargo_id: 2,
                    commodity: "Iron Ore".to_string(),
                    size_tons: 80_000,
                    load_port: "Tubarão".to_string(),
                    discharge_port: "Qingdao".to_string(),
                    laycan: laycan((2025, 9, 6), (2025, 9, 12)),
                    freight_rate: 20.0,
                    requirement: "draft<18m".to_string(),
                },
                Cargo {
                    cargo_id: 3,
                    commodity: "Grain".to_string(),
                    size_tons: 65_000,
                    load_port: "New Orleans".to_string(),
                    discharge_port: "Alexandria".to_string(),
                    laycan: laycan((2025, 9, 7), (2025, 9, 14)),
                    freight_rate: 22.0,
                    requirement: "cranes".to_string(),
                },
            ],
            bunker_prices: vec![
                BunkerPrice { port: "Singapore".to_string(), price_usd_per_ton: 600.0 },
                BunkerPrice { port: "Rotterdam".to_string(), price_usd_per_ton: 580.0 },
                BunkerPrice { port: "Durban".to_string(), price_usd_per_ton: 610.0 },
                BunkerPrice { port: "Qingdao".to_string(), price_usd_per_ton: 590.0 },
                BunkerPrice { port: "New Orleans".to_string(), price_usd_per_ton: 605.0 },
            ],
            weather: vec![
                weather("Singapore", "Calm", "Light Breeze", "Good"),
                weather("Rotterdam", "Moderate", "Moderate Breeze", "Moderate"),
                weather("Durban", "Rough", "Strong Breeze", "Poor"),
                weather("Richards Bay", "Moderate", "Moderate Breeze", "Good"),
                weather("Tubarão", "Calm", "Light Breeze", "Good"),
            ],
            market_trends: vec![
                trend(2021, 1200.0, 450.0, "High"),
                trend(2022, 2500.0, 520.0, "Very High"),
                trend(2023, 1800.0, 480.0, "Moderate"),
                trend(2024, 2200.0, 500.0, "High"),
                trend(2025, 2100.0, 600.0, "High"),
            ],
            transit_dues: vec![
                due("Suez Canal", "canal", 300_000),
                due("Panama Canal", "canal", 250_000),
                due("Rotterdam", "port", 50_000),
                due("Singapore", "port", 45_000),
                due("Qingdao", "port", 48_000),
            ],
            piracy_zones: vec![
                zone("Gulf of Aden", "12.7N, 45.0E", "High", "Use naval escort"),
                zone("Somalia Coast", "2.0N, 50.0E", "Very High", "Avoid area"),
                zone("West Africa", "4.5N, 6.5E", "High", "Report to authorities"),
                zone("Malacca Strait", "2.5N, 101.5E", "Moderate", "Increase vigilance"),
                zone("Indian Ocean", "10.0N, 75.0E", "Low", "Standard precautions"),
            ],
            fuel_curve: vec![
                FuelCurvePoint { speed_knots: 13, consumption_tons_per_day: 28, efficiency_percent: 82 },
                FuelCurvePoint { speed_knots: 14, consumption_tons_per_day: 25, efficiency_percent: 85 },
                FuelCurvePoint { speed_knots: 15, consumption_tons_per_day: 30, efficiency_percent: 80 },
                FuelCurvePoint { speed_knots: 16, consumption_tons_per_day: 35, efficiency_percent: 78 },
                FuelCurvePoint { speed_knots: 17, consumption_tons_per_day: 40, efficiency_percent: 76 },
            ],
            facilities: vec![
                facility("Singapore", "Yes", "Excellent", "High"),
                facility("Rotterdam", "Yes", "Excellent", "Moderate"),
                facility("Durban", "Yes", "Good", "Moderate"),
                facility("Richards Bay", "Limited", "Good", "Low"),
                facility("Tubarão", "Yes", "Moderate", "Moderate"),
            ],
            voyage_history: vec![
                voyage("V001", "Singapore-Rotterdam", 500_000, 520_000),
                voyage("V002", "Durban-Rotterdam", 750_000, 740_000),
                voyage("V003", "Richards Bay-Qingdao", 680_000, 690_000),
                voyage("V004", "Tubarão-Qingdao", 720_000, 730_000),
                voyage("V005", "New Orleans-Alexandria", 450_000, 460_000),
            ],
        }
    }

    // =============================
    // Lookups (case-insensitive linear scans)
    // =============================

    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn vessel(&self, name: &str) -> Option<&Vessel> {
        self.vessels.iter().find(|v| v.name.eq_ignore_ascii_case(name))
    }

    pub fn cargoes_by_commodity<'a>(&'a self, commodity: &'a str) -> impl Iterator<Item = &'a Cargo> {
        self.cargoes
            .iter()
            .filter(move |c| c.commodity.eq_ignore_ascii_case(commodity))
    }

    pub fn weather(&self, location: &str) -> Option<&WeatherRecord> {
        self.weather
            .iter()
            .find(|w| w.location.eq_ignore_ascii_case(location))
    }

    pub fn bunker_price(&self, port: &str) -> Option<&BunkerPrice> {
        self.bunker_prices
            .iter()
            .find(|b| b.port.eq_ignore_ascii_case(port))
    }

    pub fn facility(&self, port: &str) -> Option<&PortFacility> {
        self.facilities
            .iter()
            .find(|f| f.port.eq_ignore_ascii_case(port))
    }

    pub fn transit_due(&self, route: &str) -> Option<&TransitDue> {
        self.transit_dues
            .iter()
            .find(|d| d.route.eq_ignore_ascii_case(route))
    }

    // =============================
    // Whole-table access
    // =============================

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    pub fn cargoes(&self) -> &[Cargo] {
        &self.cargoes
    }

    pub fn bunker_prices(&self) -> &[BunkerPrice] {
        &self.bunker_prices
    }

    pub fn market_trends(&self) -> &[MarketTrend] {
        &self.market_trends
    }

    pub fn piracy_zones(&self) -> &[PiracyZone] {
        &self.piracy_zones
    }

    pub fn fuel_curve(&self) -> &[FuelCurvePoint] {
        &self.fuel_curve
    }

    pub fn voyage_history(&self) -> &[VoyageRecord] {
        &self.voyage_history
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn weather(location: &str, sea_state: &str, wind: &str, visibility: &str) -> WeatherRecord {
    WeatherRecord {
        location: location.to_string(),
        sea_state: sea_state.to_string(),
        wind: wind.to_string(),
        visibility: visibility.to_string(),
    }
}

fn trend(year: i32, freight: f64, bunker: f64, demand: &str) -> MarketTrend {
    MarketTrend {
        year,
        freight_rate_usd_teu: freight,
        bunker_price_usd_ton: bunker,
        demand_indicator: demand.to_string(),
    }
}

fn due(route: &str, kind: &str, cost_usd: u64) -> TransitDue {
    TransitDue {
        route: route.to_string(),
        kind: kind.to_string(),
        cost_usd,
    }
}

fn zone(region: &str, coordinates: &str, risk_level: &str, recommendation: &str) -> PiracyZone {
    PiracyZone {
        region: region.to_string(),
        coordinates: coordinates.to_string(),
        risk_level: risk_level.to_string(),
        recommendation: recommendation.to_string(),
    }
}

fn facility(port: &str, bunker: &str, handling: &str, berths: &str) -> PortFacility {
    PortFacility {
        port: port.to_string(),
        bunker_availability: bunker.to_string(),
        cargo_handling: handling.to_string(),
        berth_availability: berths.to_string(),
    }
}

fn voyage(id: &str, route: &str, estimated: u64, actual: u64) -> VoyageRecord {
    VoyageRecord {
        voyage_id: id.to_string(),
        route: route.to_string(),
        estimated_cost_usd: estimated,
        actual_cost_usd: actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_lookup_is_case_insensitive() {
        let catalog = Catalog::new();
        assert!(catalog.port("Singapore").is_some());
        assert!(catalog.port("singapore").is_some());
        assert!(catalog.port("ROTTERDAM").is_some());
        assert!(catalog.port("Atlantis").is_none());
    }

    #[test]
    fn test_known_coordinates() {
        let catalog = Catalog::new();
        let singapore = catalog.port("Singapore").unwrap();
        assert_eq!(singapore.lat, 1.3521);
        assert_eq!(singapore.lon, 103.8198);

        let rotterdam = catalog.port("Rotterdam").unwrap();
        assert_eq!(rotterdam.lat, 51.9225);
        assert_eq!(rotterdam.lon, 4.47917);
    }

    #[test]
    fn test_table_sizes() {
        let catalog = Catalog::new();
        assert_eq!(catalog.ports().len(), 8);
        assert_eq!(catalog.vessels().len(), 3);
        assert_eq!(catalog.cargoes().len(), 3);
        assert_eq!(catalog.bunker_prices().len(), 5);
        assert_eq!(catalog.market_trends().len(), 5);
        assert_eq!(catalog.fuel_curve().len(), 5);
        assert_eq!(catalog.piracy_zones().len(), 5);
        assert_eq!(catalog.voyage_history().len(), 5);
    }

    #[test]
    fn test_cargoes_by_commodity() {
        let catalog = Catalog::new();
        let coal: Vec<_> = catalog.cargoes_by_commodity("coal").collect();
        assert_eq!(coal.len(), 1);
        assert_eq!(coal[0].size_tons, 70_000);
        assert_eq!(coal[0].requirement, "gearless");
    }

    #[test]
    fn test_weather_and_bunker_lookup() {
        let catalog = Catalog::new();
        let weather = catalog.weather("Durban").unwrap();
        assert_eq!(weather.sea_state, "Rough");

        let bunker = catalog.bunker_price("Rotterdam").unwrap();
        assert_eq!(bunker.price_usd_per_ton, 580.0);

        assert!(catalog.weather("Alexandria").is_none());
        assert!(catalog.bunker_price("Tubarão").is_none());
    }
}
