//! Query intent classifier
//!
//! Maps keyword presence to one of a fixed set of query categories,
//! evaluated first-match-wins in declaration order. A query matching two
//! categories always resolves to the earlier-listed one; the ordering is a
//! test-visible contract.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QueryIntent {
    VoyagePlanning,
    CargoMatching,
    MarketInsights,
    PortIntelligence,
    CostManagement,
    General,
}

/// Static keyword lists — zero allocation
const VOYAGE_KEYWORDS: &[&str] = &["route", "voyage", "journey", "distance"];
const CARGO_KEYWORDS: &[&str] = &["cargo", "vessel", "matching", "compatibility"];
const MARKET_KEYWORDS: &[&str] = &["market", "trend", "freight", "bunker"];
const PORT_KEYWORDS: &[&str] = &["port", "bunker", "facility"];
const COST_KEYWORDS: &[&str] = &["cost", "pda", "expense", "budget"];

/// Categories in precedence order.
const CATEGORIES: &[(QueryIntent, &[&str])] = &[
    (QueryIntent::VoyagePlanning, VOYAGE_KEYWORDS),
    (QueryIntent::CargoMatching, CARGO_KEYWORDS),
    (QueryIntent::MarketInsights, MARKET_KEYWORDS),
    (QueryIntent::PortIntelligence, PORT_KEYWORDS),
    (QueryIntent::CostManagement, COST_KEYWORDS),
];

/// Intent classifier
pub struct IntentClassifier;

impl IntentClassifier {
    /// Classify raw query text into exactly one intent label.
    pub fn classify(query: &str) -> QueryIntent {
        let lowered = query.to_lowercase();

        for (intent, keywords) in CATEGORIES {
            if keywords.iter().any(|kw| lowered.contains(kw)) {
                return *intent;
            }
        }

        QueryIntent::General
    }
}

impl fmt::Display for QueryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QueryIntent::VoyagePlanning => "voyage_planning",
            QueryIntent::CargoMatching => "cargo_matching",
            QueryIntent::MarketInsights => "market_insights",
            QueryIntent::PortIntelligence => "port_intelligence",
            QueryIntent::CostManagement => "cost_management",
            QueryIntent::General => "general",
        };
        write!(f, "{}", s)
    }
}
