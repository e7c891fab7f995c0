//! General captain agent
//!
//! Per query: extract entities and classify intent, fold the mentions into
//! the session context, compute the fact bundle on demand, pick the
//! routing destination, then hand the facts to the text generator. When
//! the generator is unavailable the deterministic fallback templates
//! phrase the facts instead. No step after fact computation can alter the
//! computed facts.

use crate::catalog::Catalog;
use crate::classifier::{IntentClassifier, QueryIntent};
use crate::extractor::{self, ExtractedEntities};
use crate::generator::{GenerationRequest, Persona, TextGenerator, CAPTAIN};
use crate::models::FactBundle;
use crate::routing::{self, RoutingAdvice};
use crate::session::{ConversationTurn, SessionStore};
use crate::voyage;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptainResponse {
    pub answer: String,
    pub source: AnswerSource,
    pub intent: QueryIntent,
    pub entities: ExtractedEntities,
    pub facts: FactBundle,
    pub routing: RoutingAdvice,
    pub timestamp: DateTime<Utc>,
    pub agent: String,
}

pub struct CaptainAgent {
    catalog: Arc<Catalog>,
    sessions: Arc<dyn SessionStore>,
    generator: Arc<dyn TextGenerator>,
    persona: Persona,
}

impl CaptainAgent {
    pub fn new(
        catalog: Arc<Catalog>,
        sessions: Arc<dyn SessionStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            generator,
            persona: CAPTAIN,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Process one user query end to end.
    pub async fn process_query(
        &self,
        query: &str,
        user: Option<&str>,
    ) -> Result<CaptainResponse> {
        // Extraction and classification are independent pure functions of
        // the query text.
        let entities = extractor::extract(&self.catalog, query);
        let intent = IntentClassifier::classify(query);

        info!(
            intent = %intent,
            ports = entities.ports.len(),
            vessels = entities.vessels.len(),
            cargoes = entities.cargoes.len(),
            "Query classified"
        );

        let context = self.sessions.update_context(user, &entities).await?;

        let facts = self.collect_facts(query, &entities);
        let routing = routing::recommend(intent);

        let request = GenerationRequest {
            persona: self.persona,
            query: query.to_string(),
            context_summary: context.summary(),
            facts: serde_json::to_value(&facts)?,
        };

        let (answer, source) = match self.generator.generate(&request).await {
            Ok(text) => (text, AnswerSource::Generated),
            Err(e) => {
                warn!("Text generation failed, using fallback template: {}", e);
                (self.fallback_answer(&facts), AnswerSource::Fallback)
            }
        };

        let turn = ConversationTurn::new(query.to_string(), answer.clone(), intent);
        self.sessions.record_turn(user, turn).await?;

        Ok(CaptainResponse {
            answer,
            source,
            intent,
            entities,
            facts,
            routing,
            timestamp: Utc::now(),
            agent: "General Captain Agent".to_string(),
        })
    }

    /// Populate fact sections the query actually asks for.
    fn collect_facts(&self, query: &str, entities: &ExtractedEntities) -> FactBundle {
        let lowered = query.to_lowercase();
        let mut facts = FactBundle::default();

        if lowered.contains("distance") && entities.ports.len() >= 2 {
            facts.distance =
                voyage::distance_fact(&self.catalog, &entities.ports[0], &entities.ports[1]);
        }

        if lowered.contains("weather") {
            if let Some(port) = entities.ports.last() {
                facts.weather = self.catalog.weather(port).cloned();
            }
        }

        if lowered.contains("bunker") {
            if let Some(port) = entities.ports.last() {
                facts.bunker_price = self.catalog.bunker_price(port).cloned();
            }
        }

        if lowered.contains("vessel") {
            facts.vessels = Some(self.catalog.vessels().to_vec());
        }

        if lowered.contains("cargo") {
            facts.cargoes = Some(self.catalog.cargoes().to_vec());
        }

        facts
    }

    /// Deterministic fallback phrasing, built directly from the computed
    /// facts; never requires the generator.
    fn fallback_answer(&self, facts: &FactBundle) -> String {
        if let Some(distance) = &facts.distance {
            return format!(
                "The distance between {} and {} is {:.0} nautical miles ({:.1} km). \
                 This route typically takes 18-25 days depending on vessel speed and \
                 weather conditions.",
                distance.from, distance.to, distance.nautical_miles, distance.kilometers
            );
        }

        if let Some(weather) = &facts.weather {
            return format!(
                "Current weather conditions at {}: Sea State is {}, Wind is {}, and \
                 Visibility is {}. These conditions are suitable for normal maritime \
                 operations.",
                weather.location, weather.sea_state, weather.wind, weather.visibility
            );
        }

        if let Some(bunker) = &facts.bunker_price {
            return format!(
                "Bunker price at {} is currently ${:.0}/ton. This represents a \
                 competitive rate for the region.",
                bunker.port, bunker.price_usd_per_ton
            );
        }

        if let Some(vessels) = &facts.vessels {
            let min_dwt = vessels.iter().map(|v| v.dwt).min().unwrap_or(0);
            let max_dwt = vessels.iter().map(|v| v.dwt).max().unwrap_or(0);
            return format!(
                "There are {} vessels currently available in our system, ranging from \
                 {} to {} DWT. Each vessel has specific capabilities and laycan windows \
                 for chartering.",
                vessels.len(),
                min_dwt,
                max_dwt
            );
        }

        if let Some(cargoes) = &facts.cargoes {
            let commodities: Vec<&str> =
                cargoes.iter().map(|c| c.commodity.as_str()).collect();
            return format!(
                "We have {} cargo types available, including {}. Each cargo has \
                 specific requirements and freight rates.",
                cargoes.len(),
                commodities.join(", ")
            );
        }

        "I can help you with maritime queries including route planning, vessel \
         information, cargo matching, market analysis, port intelligence, and cost \
         management. Please provide more specific details about what you'd like to know."
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::OfflineGenerator;
    use crate::session::InMemorySessionStore;

    fn offline_captain() -> CaptainAgent {
        CaptainAgent::new(
            Arc::new(Catalog::new()),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(OfflineGenerator),
        )
    }

    #[tokio::test]
    async fn test_distance_scenario_end_to_end() {
        let captain = offline_captain();
        let response = captain
            .process_query("What's the distance between Singapore and Rotterdam?", None)
            .await
            .unwrap();

        assert_eq!(response.intent, QueryIntent::VoyagePlanning);
        assert_eq!(response.entities.ports, vec!["Singapore", "Rotterdam"]);
        assert_eq!(response.source, AnswerSource::Fallback);
        assert_eq!(response.routing.agent, "Voyage Planning & Optimization");

        let distance = response.facts.distance.as_ref().unwrap();
        let expected_nm = (((51.9225f64 - 1.3521).powi(2)
            + (4.47917f64 - 103.8198).powi(2))
        .sqrt()
            * 60.0)
            .round();
        assert_eq!(distance.nautical_miles, expected_nm);

        // Fallback text carries the numbers and the transit estimate.
        assert!(response.answer.contains(&format!("{:.0} nautical miles", expected_nm)));
        assert!(response
            .answer
            .contains(&format!("{:.1} km", distance.kilometers)));
        assert!(response.answer.contains("18-25 days"));
    }

    #[tokio::test]
    async fn test_weather_fallback() {
        let captain = offline_captain();
        let response = captain
            .process_query("What's the weather like at Durban?", Some("trader-1"))
            .await
            .unwrap();

        assert!(response.answer.contains("Sea State is Rough"));
        assert!(response.answer.contains("Durban"));
    }

    #[tokio::test]
    async fn test_vessel_listing_fallback() {
        let captain = offline_captain();
        let response = captain
            .process_query("What vessels are available?", None)
            .await
            .unwrap();

        assert_eq!(response.intent, QueryIntent::CargoMatching);
        assert!(response.answer.contains("3 vessels"));
        assert!(response.answer.contains("76000"));
        assert!(response.answer.contains("100000"));
    }

    #[tokio::test]
    async fn test_ambiguous_query_gets_clarifying_prompt() {
        let captain = offline_captain();
        let response = captain.process_query("hello there", None).await.unwrap();

        assert_eq!(response.intent, QueryIntent::General);
        assert!(response.facts.is_empty());
        assert!(response.answer.contains("more specific details"));
        assert_eq!(response.routing.agent, "General Captain");
    }

    #[tokio::test]
    async fn test_unknown_port_degrades_to_clarifying_text() {
        let captain = offline_captain();
        let response = captain
            .process_query("What's the distance between Atlantis and Rotterdam?", None)
            .await
            .unwrap();

        // Only one known port extracted, so no distance fact is computed
        // and the generic fallback applies.
        assert!(response.facts.distance.is_none());
        assert!(response.answer.contains("more specific details"));
    }

    #[tokio::test]
    async fn test_context_accumulates_without_duplicates() {
        let captain = offline_captain();
        captain
            .process_query("Tell me about Singapore", Some("trader-1"))
            .await
            .unwrap();
        captain
            .process_query("More about Singapore please", Some("trader-1"))
            .await
            .unwrap();

        let context = captain.sessions().context(Some("trader-1")).await.unwrap();
        assert_eq!(context.ports.len(), 1);
        assert!(context.ports.contains("Singapore"));

        let history = captain.sessions().history(Some("trader-1")).await.unwrap();
        assert_eq!(history.len(), 2);
    }
}
