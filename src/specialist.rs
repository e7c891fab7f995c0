//! Specialist agents
//!
//! Thin agents over the deterministic engines, one per routing
//! destination: voyage planning, cargo matching, and market insights.
//! Each carries its own persona and produces a clarifying response when
//! the query lacks the entities it needs.

use crate::captain::AnswerSource;
use crate::catalog::Catalog;
use crate::extractor;
use crate::generator::{
    GenerationRequest, Persona, TextGenerator, CHARTERING_MANAGER, MARKET_ANALYST, VOYAGE_PLANNER,
};
use crate::matching;
use crate::models::{CanalRequirement, FuelOption, Match, Profitability, WeatherRecord};
use crate::voyage::{self, DurationEstimate, RouteRisk};
use crate::{market, profitability};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistResponse {
    pub response: String,
    pub source: AnswerSource,
    pub data: serde_json::Value,
    pub suggestions: Vec<String>,
}

async fn phrase(
    generator: &dyn TextGenerator,
    persona: Persona,
    query: &str,
    facts: serde_json::Value,
    fallback: String,
) -> (String, AnswerSource) {
    let request = GenerationRequest {
        persona,
        query: query.to_string(),
        context_summary: String::new(),
        facts,
    };

    match generator.generate(&request).await {
        Ok(text) => (text, AnswerSource::Generated),
        Err(e) => {
            warn!(persona = persona.name, "Generation failed, using fallback: {}", e);
            (fallback, AnswerSource::Fallback)
        }
    }
}

//
// ================= Voyage Planning =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortConditions {
    pub name: String,
    pub weather: Option<WeatherRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteAnalysis {
    pub route: String,
    pub distance_nm: f64,
    pub departure_port: PortConditions,
    pub destination_port: PortConditions,
    pub fuel_analysis: Vec<FuelOption>,
    pub canal_requirements: CanalRequirement,
    pub risk_assessment: RouteRisk,
    pub estimated_duration: Vec<DurationEstimate>,
}

pub struct VoyagePlanner {
    catalog: Arc<Catalog>,
    generator: Arc<dyn TextGenerator>,
}

impl VoyagePlanner {
    pub fn new(catalog: Arc<Catalog>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { catalog, generator }
    }

    pub async fn process_query(&self, query: &str) -> Result<SpecialistResponse> {
        let Some(route) = extractor::extract_route(query) else {
            return Ok(SpecialistResponse {
                response: "I need to know which route you'd like me to analyze. Please \
                           specify the departure and destination ports."
                    .to_string(),
                source: AnswerSource::Fallback,
                data: serde_json::json!({}),
                suggestions: vec![
                    "Try asking: 'What's the optimal route from Singapore - Rotterdam?'"
                        .to_string(),
                ],
            });
        };

        let analysis = self.analyze_route(&route);
        let fallback = Self::fallback_text(&analysis);
        let (response, source) = phrase(
            self.generator.as_ref(),
            VOYAGE_PLANNER,
            query,
            serde_json::to_value(&analysis)?,
            fallback,
        )
        .await;

        Ok(SpecialistResponse {
            response,
            source,
            data: serde_json::to_value(&analysis)?,
            suggestions: vec![
                "Consider slow steaming for fuel cost optimization".to_string(),
                "Check weather conditions along the route".to_string(),
                "Evaluate alternative routes for safety".to_string(),
            ],
        })
    }

    fn analyze_route(&self, route: &str) -> RouteAnalysis {
        let (departure, destination) = match route.split_once('-') {
            Some((a, b)) => (a.trim(), b.trim()),
            None => (route, ""),
        };

        let distance = voyage::distance_nm(&self.catalog, departure, destination);

        RouteAnalysis {
            route: route.to_string(),
            distance_nm: distance,
            departure_port: PortConditions {
                name: departure.to_string(),
                weather: self.catalog.weather(departure).cloned(),
            },
            destination_port: PortConditions {
                name: destination.to_string(),
                weather: self.catalog.weather(destination).cloned(),
            },
            fuel_analysis: voyage::fuel_table(&self.catalog, distance),
            canal_requirements: voyage::canal_check(departure, destination),
            risk_assessment: voyage::assess_route_risks(departure, destination),
            estimated_duration: voyage::duration_estimates(&self.catalog, distance),
        }
    }

    fn fallback_text(analysis: &RouteAnalysis) -> String {
        let mut text = format!(
            "Route analysis for {}: This {:.0} nautical mile voyage offers several \
             optimization opportunities. The route requires {} with estimated fees of \
             ${}.",
            analysis.route,
            analysis.distance_nm,
            analysis.canal_requirements.canal,
            analysis.canal_requirements.estimated_fee_usd
        );

        if let Some(at_14) = analysis
            .fuel_analysis
            .iter()
            .find(|option| option.speed_knots == 14)
        {
            text.push_str(&format!(
                " Consider optimizing speed for fuel efficiency - at 14 knots, you'll \
                 consume approximately {:.1} tons of fuel over {:.1} days.",
                at_14.total_fuel_tons, at_14.voyage_duration_days
            ));
        }

        text
    }
}

//
// ================= Cargo Matching =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingReport {
    pub matches: Vec<Match>,
    pub profitability_analysis: Vec<Profitability>,
    pub commodity: Option<String>,
    pub vessel: Option<String>,
}

pub struct CargoMatcher {
    catalog: Arc<Catalog>,
    generator: Arc<dyn TextGenerator>,
}

impl CargoMatcher {
    pub fn new(catalog: Arc<Catalog>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { catalog, generator }
    }

    pub async fn process_query(&self, query: &str) -> Result<SpecialistResponse> {
        let lowered = query.to_lowercase();

        let commodity = self
            .catalog
            .cargoes()
            .iter()
            .find(|c| lowered.contains(&c.commodity.to_lowercase()))
            .map(|c| c.commodity.clone());
        let vessel = self
            .catalog
            .vessels()
            .iter()
            .find(|v| lowered.contains(&v.name.to_lowercase()))
            .map(|v| v.name.clone());

        if commodity.is_none() && vessel.is_none() {
            return Ok(SpecialistResponse {
                response: "I need more information to help with cargo-vessel matching. \
                           Please specify cargo details, vessel requirements, or ask \
                           about available options."
                    .to_string(),
                source: AnswerSource::Fallback,
                data: serde_json::json!({}),
                suggestions: vec![
                    "Try asking: 'What vessels are available for coal cargo?'".to_string(),
                    "Or: 'What cargoes can Ocean Star carry?'".to_string(),
                ],
            });
        }

        let matches = matching::find_matches(
            &self.catalog,
            commodity.as_deref(),
            vessel.as_deref(),
        );
        let report = MatchingReport {
            profitability_analysis: profitability::analyze(&matches),
            matches,
            commodity,
            vessel,
        };

        let fallback = Self::fallback_text(&report.matches);
        let (response, source) = phrase(
            self.generator.as_ref(),
            CHARTERING_MANAGER,
            query,
            serde_json::to_value(&report)?,
            fallback,
        )
        .await;

        Ok(SpecialistResponse {
            response,
            source,
            data: serde_json::to_value(&report)?,
            suggestions: vec![
                "Consider vessel availability and laycan windows".to_string(),
                "Evaluate technical requirements compatibility".to_string(),
                "Analyze freight rate vs. operational costs".to_string(),
            ],
        })
    }

    fn fallback_text(matches: &[Match]) -> String {
        let Some(best) = matches.first() else {
            return "No compatible cargo-vessel matches found. Consider adjusting \
                    requirements or checking availability."
                .to_string();
        };

        format!(
            "Best match found: {} cargo ({} tons) with {} vessel. Compatibility score: \
             {}/100. This match shows {} compatibility and offers potential for \
             profitable operations.",
            best.cargo.commodity,
            best.cargo.size_tons,
            best.vessel.name,
            best.compatibility_score,
            best.tier
        )
    }
}

//
// ================= Market Insights =================
//

pub struct MarketAnalyst {
    catalog: Arc<Catalog>,
    generator: Arc<dyn TextGenerator>,
}

impl MarketAnalyst {
    pub fn new(catalog: Arc<Catalog>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { catalog, generator }
    }

    pub async fn process_query(&self, query: &str) -> Result<SpecialistResponse> {
        let snapshot = market::snapshot(&self.catalog);
        let trends = market::analyze_trends(&self.catalog);
        let insights = trends.as_ref().map(market::generate_insights);

        let data = serde_json::json!({
            "current_market": snapshot,
            "market_trends": trends,
            "market_insights": insights,
        });

        let fallback = Self::fallback_text(
            snapshot.as_ref(),
            trends.as_ref(),
            insights.as_ref(),
        );
        let (response, source) = phrase(
            self.generator.as_ref(),
            MARKET_ANALYST,
            query,
            data.clone(),
            fallback,
        )
        .await;

        Ok(SpecialistResponse {
            response,
            source,
            data,
            suggestions: vec![
                "Monitor bunker price trends for optimal bunkering timing".to_string(),
                "Consider market timing for chartering decisions".to_string(),
                "Analyze supply-demand patterns for route selection".to_string(),
            ],
        })
    }

    fn fallback_text(
        snapshot: Option<&market::MarketSnapshot>,
        trends: Option<&market::TrendAnalysis>,
        insights: Option<&market::MarketInsights>,
    ) -> String {
        let Some(snapshot) = snapshot else {
            return "Market data is currently unavailable.".to_string();
        };

        let freight_trend = trends
            .map(|t| t.freight_rate_trend.trend.as_str())
            .unwrap_or("stable");
        let bunker_trend = trends
            .map(|t| t.bunker_price_trend.trend.as_str())
            .unwrap_or("stable");

        let opportunities = insights
            .filter(|i| !i.opportunities.is_empty())
            .map(|i| i.opportunities.join(", "))
            .unwrap_or_else(|| "market monitoring".to_string());

        format!(
            "Current market analysis: Freight rates stand at ${:.0}/TEU with bunker \
             prices at ${:.1}/ton. The market shows {} freight rate trends and {} \
             bunker price movement. Key opportunities include {}.",
            snapshot.current_freight_rate,
            snapshot.current_bunker_price,
            freight_trend,
            bunker_trend,
            opportunities
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::OfflineGenerator;
    use crate::models::Canal;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new())
    }

    fn offline() -> Arc<dyn TextGenerator> {
        Arc::new(OfflineGenerator)
    }

    #[tokio::test]
    async fn test_voyage_planner_requires_route() {
        let planner = VoyagePlanner::new(catalog(), offline());
        let response = planner
            .process_query("What's the optimal route?")
            .await
            .unwrap();

        assert!(response.response.contains("departure and destination"));
        assert_eq!(response.data, serde_json::json!({}));
        assert_eq!(response.suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_voyage_planner_analyzes_route() {
        let planner = VoyagePlanner::new(catalog(), offline());
        let response = planner
            .process_query("Analyze Singapore - Rotterdam for me")
            .await
            .unwrap();

        let analysis: RouteAnalysis = serde_json::from_value(response.data).unwrap();
        assert_eq!(analysis.route, "Analyze Singapore-Rotterdam for me");

        // Both sides carry extra text, so the port lookups degrade to the
        // zero sentinel and the fuel table stays empty.
        assert_eq!(analysis.distance_nm, 0.0);
        assert!(analysis.fuel_analysis.is_empty());
    }

    #[tokio::test]
    async fn test_voyage_planner_clean_route_token() {
        let planner = VoyagePlanner::new(catalog(), offline());
        let response = planner.process_query("Singapore-Rotterdam").await.unwrap();

        let analysis: RouteAnalysis = serde_json::from_value(response.data).unwrap();
        assert!(analysis.distance_nm > 6000.0);
        assert_eq!(analysis.canal_requirements.canal, Canal::Suez);
        assert_eq!(analysis.fuel_analysis.len(), 5);
        assert_eq!(analysis.estimated_duration.len(), 5);

        // Fallback cites the 14-knot tier.
        assert!(response.response.contains("14 knots"));
        assert!(response.response.contains("Suez Canal"));
    }

    #[tokio::test]
    async fn test_cargo_matcher_requires_entities() {
        let matcher = CargoMatcher::new(catalog(), offline());
        let response = matcher
            .process_query("find me something profitable")
            .await
            .unwrap();

        assert!(response.response.contains("more information"));
        assert_eq!(response.suggestions.len(), 2);
    }

    #[tokio::test]
    async fn test_cargo_matcher_by_commodity() {
        let matcher = CargoMatcher::new(catalog(), offline());
        let response = matcher
            .process_query("What vessels can carry coal cargo?")
            .await
            .unwrap();

        let report: MatchingReport = serde_json::from_value(response.data).unwrap();
        assert_eq!(report.commodity.as_deref(), Some("Coal"));
        assert_eq!(report.matches.len(), 3);
        assert_eq!(report.profitability_analysis.len(), 3);

        assert!(response.response.contains("Ocean Star"));
        assert!(response.response.contains("75/100"));
        assert!(response.response.contains("Good"));
    }

    #[tokio::test]
    async fn test_cargo_matcher_by_vessel() {
        let matcher = CargoMatcher::new(catalog(), offline());
        let response = matcher
            .process_query("What can Pacific Trader carry?")
            .await
            .unwrap();

        let report: MatchingReport = serde_json::from_value(response.data).unwrap();
        assert_eq!(report.vessel.as_deref(), Some("Pacific Trader"));
        // Pacific Trader (82k dwt, cranes): Grain scores 55 (capacity +
        // gear), Coal and Iron Ore score 50 (capacity + tight fit). Ties
        // keep catalog order.
        assert_eq!(report.matches.len(), 3);
        assert_eq!(report.matches[0].cargo.commodity, "Grain");
        assert_eq!(report.matches[1].cargo.commodity, "Coal");
        assert_eq!(report.matches[2].cargo.commodity, "Iron Ore");
    }

    #[tokio::test]
    async fn test_market_analyst_fallback_cites_numbers() {
        let analyst = MarketAnalyst::new(catalog(), offline());
        let response = analyst
            .process_query("What are the current market trends?")
            .await
            .unwrap();

        assert!(response.response.contains("$2100/TEU"));
        assert!(response.response.contains("$597.0/ton"));
        assert!(response.response.contains("Downward"));
        assert!(response.response.contains("Rising"));
        assert_eq!(response.suggestions.len(), 3);
    }
}
