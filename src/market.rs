//! Market snapshot and trend deltas
//!
//! Deterministic reductions over the market trend and bunker price tables:
//! a latest-year snapshot, year-over-year percentage deltas, and derived
//! insight lists.

use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub current_freight_rate: f64,
    pub current_bunker_price: f64,
    pub demand_indicator: String,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendDelta {
    pub trend: String,
    pub change_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub freight_rate_trend: TrendDelta,
    pub bunker_price_trend: TrendDelta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketInsights {
    pub key_trends: Vec<String>,
    pub opportunities: Vec<String>,
    pub risk_factors: Vec<String>,
}

/// Latest trend row plus the mean spot bunker price.
pub fn snapshot(catalog: &Catalog) -> Option<MarketSnapshot> {
    let latest = catalog.market_trends().last()?;
    let prices = catalog.bunker_prices();

    let avg_bunker = if prices.is_empty() {
        0.0
    } else {
        let sum: f64 = prices.iter().map(|b| b.price_usd_per_ton).sum();
        round2(sum / prices.len() as f64)
    };

    Some(MarketSnapshot {
        current_freight_rate: latest.freight_rate_usd_teu,
        current_bunker_price: avg_bunker,
        demand_indicator: latest.demand_indicator.clone(),
        year: latest.year,
    })
}

/// Year-over-year deltas between the two most recent trend rows.
/// `None` when the table holds fewer than two rows.
pub fn analyze_trends(catalog: &Catalog) -> Option<TrendAnalysis> {
    let trends = catalog.market_trends();
    if trends.len() < 2 {
        return None;
    }

    let current = &trends[trends.len() - 1];
    let previous = &trends[trends.len() - 2];

    let freight_change = (current.freight_rate_usd_teu - previous.freight_rate_usd_teu)
        / previous.freight_rate_usd_teu
        * 100.0;
    let bunker_change = (current.bunker_price_usd_ton - previous.bunker_price_usd_ton)
        / previous.bunker_price_usd_ton
        * 100.0;

    Some(TrendAnalysis {
        freight_rate_trend: TrendDelta {
            trend: if freight_change > 0.0 { "Upward" } else { "Downward" }.to_string(),
            change_percent: round2(freight_change),
        },
        bunker_price_trend: TrendDelta {
            trend: if bunker_change > 0.0 { "Rising" } else { "Falling" }.to_string(),
            change_percent: round2(bunker_change),
        },
    })
}

/// Insight lists derived from the trend directions.
pub fn generate_insights(analysis: &TrendAnalysis) -> MarketInsights {
    let mut insights = MarketInsights::default();

    if analysis.freight_rate_trend.trend == "Upward" {
        insights
            .key_trends
            .push("Freight rates showing positive momentum".to_string());
        insights
            .opportunities
            .push("Favorable conditions for rate negotiations".to_string());
    }

    if analysis.bunker_price_trend.trend == "Rising" {
        insights
            .key_trends
            .push("Bunker prices on upward trend".to_string());
        insights
            .risk_factors
            .push("Increasing operational costs".to_string());
    }

    insights
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_uses_latest_year() {
        let catalog = Catalog::new();
        let snap = snapshot(&catalog).unwrap();
        assert_eq!(snap.year, 2025);
        assert_eq!(snap.current_freight_rate, 2100.0);
        assert_eq!(snap.demand_indicator, "High");
        // Mean of 600, 580, 610, 590, 605.
        assert_eq!(snap.current_bunker_price, 597.0);
    }

    #[test]
    fn test_trend_deltas_for_fixed_table() {
        let catalog = Catalog::new();
        let analysis = analyze_trends(&catalog).unwrap();

        // 2024 -> 2025: freight 2200 -> 2100, bunker 500 -> 600.
        assert_eq!(analysis.freight_rate_trend.trend, "Downward");
        assert_eq!(analysis.freight_rate_trend.change_percent, -4.55);
        assert_eq!(analysis.bunker_price_trend.trend, "Rising");
        assert_eq!(analysis.bunker_price_trend.change_percent, 20.0);
    }

    #[test]
    fn test_insights_follow_trend_directions() {
        let analysis = TrendAnalysis {
            freight_rate_trend: TrendDelta {
                trend: "Upward".to_string(),
                change_percent: 5.0,
            },
            bunker_price_trend: TrendDelta {
                trend: "Rising".to_string(),
                change_percent: 10.0,
            },
        };

        let insights = generate_insights(&analysis);
        assert_eq!(insights.key_trends.len(), 2);
        assert_eq!(insights.opportunities.len(), 1);
        assert_eq!(insights.risk_factors.len(), 1);

        // Downward freight + falling bunker produce no entries.
        let quiet = TrendAnalysis {
            freight_rate_trend: TrendDelta {
                trend: "Downward".to_string(),
                change_percent: -2.0,
            },
            bunker_price_trend: TrendDelta {
                trend: "Falling".to_string(),
                change_percent: -3.0,
            },
        };
        let insights = generate_insights(&quiet);
        assert!(insights.key_trends.is_empty());
        assert!(insights.opportunities.is_empty());
        assert!(insights.risk_factors.is_empty());
    }
}
