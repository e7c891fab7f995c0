//! Routing advisor
//!
//! Static mapping from classified intent to the downstream specialist
//! agent and its navigation target. Configuration, not computation.

use crate::classifier::QueryIntent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoutingAdvice {
    pub agent: String,
    pub description: String,
    pub page: String,
}

fn advice(agent: &str, description: &str, page: &str) -> RoutingAdvice {
    RoutingAdvice {
        agent: agent.to_string(),
        description: description.to_string(),
        page: page.to_string(),
    }
}

/// Destination for a classified intent. `General` maps to the captain
/// itself as the fallback destination.
pub fn recommend(intent: QueryIntent) -> RoutingAdvice {
    match intent {
        QueryIntent::VoyagePlanning => advice(
            "Voyage Planning & Optimization",
            "Route optimization, weather analysis, piracy risk assessment",
            "/voyage-planning",
        ),
        QueryIntent::CargoMatching => advice(
            "Cargo & Tonnage Matching",
            "Cargo-vessel compatibility and profitability analysis",
            "/cargo-matching",
        ),
        QueryIntent::MarketInsights => advice(
            "Market & Commercial Insights",
            "Market trends, benchmarking, and strategic analysis",
            "/market-insights",
        ),
        QueryIntent::PortIntelligence => advice(
            "Port & Cargo Intelligence",
            "Port optimization and bunker analysis",
            "/port-intelligence",
        ),
        QueryIntent::CostManagement => advice(
            "PDA & Cost Management",
            "Cost estimation and variance tracking",
            "/cost-management",
        ),
        QueryIntent::General => advice(
            "General Captain",
            "Multi-domain maritime expertise",
            "/general",
        ),
    }
}
