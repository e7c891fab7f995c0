//! Cargo-vessel compatibility matcher
//!
//! Pure additive scoring over (cargo, vessel) pairs: capacity sufficiency,
//! tight capacity fit, and exact gear match. Pairs below the acceptance
//! threshold are excluded; survivors are tiered, sorted by score and capped.

use crate::catalog::Catalog;
use crate::models::{Cargo, Match, MatchTier, Vessel};
use std::cmp::Reverse;

/// Minimum score for a pair to be considered a match at all.
pub const MATCH_THRESHOLD: u32 = 50;

/// Result sets are capped at the top matches.
pub const MAX_MATCHES: usize = 5;

const CAPACITY_POINTS: u32 = 30;
const TIGHT_FIT_POINTS: u32 = 20;
const GEAR_POINTS: u32 = 25;

/// Additive compatibility score, 0-75.
pub fn compatibility_score(cargo: &Cargo, vessel: &Vessel) -> u32 {
    let mut score = 0;

    if vessel.dwt >= cargo.size_tons {
        score += CAPACITY_POINTS;
        // Not excessively oversized: rewards tight fit.
        if vessel.dwt as f64 <= cargo.size_tons as f64 * 1.2 {
            score += TIGHT_FIT_POINTS;
        }
    }

    // Exact gear match only. Any other requirement string (e.g. a draft
    // constraint) never earns gear points.
    let gear_matches = match cargo.requirement.as_str() {
        "gearless" => vessel.gear == crate::models::GearType::Gearless,
        "cranes" => vessel.gear == crate::models::GearType::Cranes,
        _ => false,
    };
    if gear_matches {
        score += GEAR_POINTS;
    }

    score
}

fn pair(cargo: &Cargo, vessel: &Vessel) -> Option<Match> {
    let score = compatibility_score(cargo, vessel);
    let tier = MatchTier::from_score(score)?;

    Some(Match {
        cargo: cargo.clone(),
        vessel: vessel.clone(),
        compatibility_score: score,
        tier,
    })
}

/// Generate ranked matches.
///
/// Driven by a named commodity, only that commodity's cargoes are scored;
/// by a named vessel, only that vessel's candidate cargoes; with neither,
/// the full cross-product. Ties retain catalog iteration order (stable
/// sort, no secondary key).
pub fn find_matches(
    catalog: &Catalog,
    commodity: Option<&str>,
    vessel_name: Option<&str>,
) -> Vec<Match> {
    let mut matches = Vec::new();

    if let Some(commodity) = commodity {
        for cargo in catalog.cargoes_by_commodity(commodity) {
            for vessel in catalog.vessels() {
                matches.extend(pair(cargo, vessel));
            }
        }
    } else if let Some(name) = vessel_name {
        if let Some(vessel) = catalog.vessel(name) {
            for cargo in catalog.cargoes() {
                matches.extend(pair(cargo, vessel));
            }
        }
    } else {
        for cargo in catalog.cargoes() {
            for vessel in catalog.vessels() {
                matches.extend(pair(cargo, vessel));
            }
        }
    }

    matches.sort_by_key(|m| Reverse(m.compatibility_score));
    matches.truncate(MAX_MATCHES);
    matches
}
