//! Per-match profitability estimates
//!
//! Revenue from the cargo's freight rate against a flat operational cost.
//! The flat cost is a deliberate simplification and is not derived from
//! distance or consumption.

use crate::models::{Match, Profitability};

/// Base operational costs applied to every match, regardless of route or
/// vessel.
pub const BASE_OPERATIONAL_COST_USD: f64 = 200_000.0;

/// Estimate profitability for a single match.
pub fn estimate(m: &Match) -> Profitability {
    let revenue = m.cargo.size_tons as f64 * m.cargo.freight_rate;
    let profit = revenue - BASE_OPERATIONAL_COST_USD;
    let margin = if revenue > 0.0 {
        round2(profit / revenue * 100.0)
    } else {
        0.0
    };

    Profitability {
        freight_revenue_usd: revenue,
        estimated_costs_usd: BASE_OPERATIONAL_COST_USD,
        estimated_profit_usd: profit,
        profit_margin_percent: margin,
    }
}

/// Independent, order-preserving estimates for a match list.
pub fn analyze(matches: &[Match]) -> Vec<Profitability> {
    matches.iter().map(estimate).collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cargo, GearType, LaycanWindow, MatchTier, Vessel};
    use chrono::NaiveDate;

    fn match_with_cargo(size_tons: u32, freight_rate: f64) -> Match {
        let laycan = LaycanWindow {
            start: NaiveDate::from_ymd_opt(2025, 9, 5).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
        };

        Match {
            cargo: Cargo {
                cargo_id: 1,
                commodity: "Coal".to_string(),
                size_tons,
                load_port: "Richards Bay".to_string(),
                discharge_port: "Rotterdam".to_string(),
                laycan,
                freight_rate,
                requirement: "gearless".to_string(),
            },
            vessel: Vessel {
                vessel_id: 1,
                name: "Ocean Star".to_string(),
                dwt: 76_000,
                location: "Singapore".to_string(),
                laycan,
                speed_knots: 14,
                consumption_tons_per_day: 25,
                gear: GearType::Gearless,
            },
            compatibility_score: 75,
            tier: MatchTier::Good,
        }
    }

    #[test]
    fn test_coal_profitability() {
        // 70,000 t at 18 usd/t = 1,260,000 revenue; 1,060,000 profit.
        let result = estimate(&match_with_cargo(70_000, 18.0));
        assert_eq!(result.freight_revenue_usd, 1_260_000.0);
        assert_eq!(result.estimated_costs_usd, 200_000.0);
        assert_eq!(result.estimated_profit_usd, 1_060_000.0);
        assert_eq!(result.profit_margin_percent, 84.13);
    }

    #[test]
    fn test_zero_revenue_margin_is_zero() {
        let result = estimate(&match_with_cargo(0, 18.0));
        assert_eq!(result.freight_revenue_usd, 0.0);
        assert_eq!(result.estimated_profit_usd, -200_000.0);
        assert_eq!(result.profit_margin_percent, 0.0);
    }

    #[test]
    fn test_analyze_preserves_order() {
        let matches = vec![
            match_with_cargo(70_000, 18.0),
            match_with_cargo(65_000, 22.0),
        ];
        let results = analyze(&matches);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].freight_revenue_usd, 1_260_000.0);
        assert_eq!(results[1].freight_revenue_usd, 1_430_000.0);
    }
}
