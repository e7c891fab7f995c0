//! Maritime Agent Orchestrator
//!
//! An agent system that answers natural-language maritime questions:
//! - Extracts ports, vessels, cargoes and routes from free text
//! - Classifies query intent against fixed keyword categories
//! - Computes deterministic domain facts (distances, fuel burn,
//!   cargo-vessel compatibility, profitability, market trend deltas)
//!   from small immutable reference tables
//! - Hands the facts to an LLM collaborator for phrasing, with
//!   deterministic template fallbacks when the model is unavailable
//!
//! PIPELINE:
//! QUERY → EXTRACT + CLASSIFY → COMPUTE FACTS → ROUTE → PHRASE/FALLBACK

pub mod api;
pub mod captain;
pub mod catalog;
pub mod classifier;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod market;
pub mod matching;
pub mod models;
pub mod profitability;
pub mod routing;
pub mod session;
pub mod specialist;
pub mod voyage;

pub use error::Result;

// Re-export common types
pub use classifier::{IntentClassifier, QueryIntent};
pub use models::*;
