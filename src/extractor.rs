//! Entity extractor
//!
//! Scans raw query text for known port, vessel and commodity names and a
//! best-effort route token. Pure function of text + catalog; no side
//! effects. Each catalog name is matched independently as a
//! case-insensitive substring, so a name contained in another matched span
//! is still recorded. Intentional, pinned by tests.

use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};

/// Entities recognized in a single query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub ports: Vec<String>,
    pub vessels: Vec<String>,
    pub cargoes: Vec<String>,
    pub routes: Vec<String>,
}

impl ExtractedEntities {
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
            && self.vessels.is_empty()
            && self.cargoes.is_empty()
            && self.routes.is_empty()
    }
}

/// Extract known entities from raw query text.
pub fn extract(catalog: &Catalog, query: &str) -> ExtractedEntities {
    let lowered = query.to_lowercase();
    let mut entities = ExtractedEntities::default();

    for port in catalog.ports() {
        if lowered.contains(&port.name.to_lowercase()) {
            entities.ports.push(port.name.clone());
        }
    }

    for vessel in catalog.vessels() {
        if lowered.contains(&vessel.name.to_lowercase()) {
            entities.vessels.push(vessel.name.clone());
        }
    }

    for cargo in catalog.cargoes() {
        if lowered.contains(&cargo.commodity.to_lowercase()) {
            entities.cargoes.push(cargo.commodity.clone());
        }
    }

    if let Some(route) = extract_route(query) {
        entities.routes.push(route);
    }

    entities
}

/// Route token: the trimmed substrings around the first `-`, joined as
/// `"A-B"`. Both sides must be non-empty after trimming.
pub fn extract_route(query: &str) -> Option<String> {
    let mut parts = query.split('-');
    let first = parts.next()?.trim();
    let second = parts.next()?.trim();

    if first.is_empty() || second.is_empty() {
        return None;
    }

    Some(format!("{}-{}", first, second))
}
