//! Text-generation collaborator
//!
//! The deterministic core computes facts; this module phrases them. The
//! Gemini-backed generator uses a long-lived reqwest::Client for
//! connection pooling. Every caller must be able to survive generation
//! failure with its own deterministic fallback text.

use crate::error::AgentError;
use crate::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

/// Persona/style directive for the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persona {
    pub name: &'static str,
    pub directive: &'static str,
}

/// Senior maritime consultant fronting the general captain agent.
pub const CAPTAIN: Persona = Persona {
    name: "Captain Sarah Chen",
    directive: "You are Captain Sarah Chen, a senior maritime consultant with 25+ years of \
                experience speaking to maritime professionals. Use precise maritime \
                terminology, reference specific data points from the available information, \
                and provide actionable commercial insights. Stay within maritime domain \
                expertise only. Keep responses to 4-6 sentences.",
};

pub const VOYAGE_PLANNER: Persona = Persona {
    name: "Captain Michael Rodriguez",
    directive: "You are Captain Michael Rodriguez, a senior voyage optimization specialist \
                with 20+ years of experience in maritime route planning and fuel \
                optimization. Focus on commercial viability, fuel efficiency, and \
                operational safety. Reference specific distances, consumption figures and \
                canal fees. Keep responses to 4-6 sentences.",
};

pub const CHARTERING_MANAGER: Persona = Persona {
    name: "Captain Elena Vasquez",
    directive: "You are Captain Elena Vasquez, a senior chartering manager with 18+ years \
                of experience in cargo-vessel optimization and commercial shipping. \
                Reference specific compatibility scores, freight rates, and profit \
                margins. Keep responses to 4-6 sentences.",
};

pub const MARKET_ANALYST: Persona = Persona {
    name: "Dr. James Mitchell",
    directive: "You are Dr. James Mitchell, a senior maritime market analyst and economist \
                with 22+ years of experience in maritime finance and market intelligence. \
                Reference specific trend percentages and price levels; focus on market \
                timing and strategic decisions. Keep responses to 4-6 sentences.",
};

/// Everything the generator needs for one call: the persona, the raw query,
/// a summary of the conversation so far, and the computed facts.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub persona: Persona,
    pub query: String,
    pub context_summary: String,
    pub facts: serde_json::Value,
}

/// Collaborator contract: facts in, prose out. Failure is always
/// recoverable by the caller's fallback template.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// Generator that is never available. Forces every caller onto its
/// deterministic fallback; used offline and in tests.
pub struct OfflineGenerator;

#[async_trait::async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
        Err(AgentError::GenerationError(
            "text generation disabled".to_string(),
        ))
    }
}

/// Reusable Gemini client (connection-pooled)
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiGenerator {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent".to_string(),
        }
    }

    fn build_prompt(request: &GenerationRequest) -> String {
        let facts = serde_json::to_string_pretty(&request.facts)
            .unwrap_or_else(|_| request.facts.to_string());

        format!(
            "CURRENT CONVERSATION CONTEXT: {}\n\nUSER QUERY: {}\n\nAVAILABLE MARITIME DATA:\n{}",
            request.context_summary, request.query, facts
        )
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(AgentError::GenerationError(
                "GEMINI_API_KEY not configured".to_string(),
            ));
        }

        let url = format!("{}?key={}", self.base_url, self.api_key);

        let body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::build_prompt(request),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.3,
                top_p: 0.9,
                top_k: 40,
                max_output_tokens: 1024,
            },
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: request.persona.directive.to_string(),
                }],
            },
        };

        info!(persona = request.persona.name, "Calling Gemini API");

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            error!("Gemini API request failed: {}", e);
            AgentError::GenerationError(format!("Gemini API error: {}", e))
        })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error response: {}", error_text);
            return Err(AgentError::GenerationError(format!(
                "Gemini API error: {}",
                error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            AgentError::GenerationError(format!("Gemini parse error: {}", e))
        })?;

        let answer = gemini_response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| {
                AgentError::GenerationError("Empty response from Gemini".to_string())
            })?;

        Ok(answer)
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    system_instruction: SystemInstruction,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: i32,
    max_output_tokens: i32,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_query_context_and_facts() {
        let request = GenerationRequest {
            persona: CAPTAIN,
            query: "What's the distance between Singapore and Rotterdam?".to_string(),
            context_summary: "Ports mentioned: Rotterdam, Singapore".to_string(),
            facts: serde_json::json!({"distance": {"nautical_miles": 6688.0}}),
        };

        let prompt = GeminiGenerator::build_prompt(&request);
        assert!(prompt.contains("Singapore and Rotterdam"));
        assert!(prompt.contains("Ports mentioned"));
        assert!(prompt.contains("nautical_miles"));
    }

    #[test]
    fn test_request_serialization() {
        let body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "What is a laycan window?".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.3,
                top_p: 0.9,
                top_k: 40,
                max_output_tokens: 1024,
            },
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: CAPTAIN.directive.to_string(),
                }],
            },
        };

        let json = serde_json::to_string(&body);
        assert!(json.is_ok());
        assert!(json.unwrap().contains("laycan"));
    }

    #[tokio::test]
    async fn test_offline_generator_always_fails() {
        let request = GenerationRequest {
            persona: CAPTAIN,
            query: "anything".to_string(),
            context_summary: String::new(),
            facts: serde_json::json!({}),
        };

        assert!(OfflineGenerator.generate(&request).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let generator = GeminiGenerator::new(String::new());
        let request = GenerationRequest {
            persona: CAPTAIN,
            query: "distance Singapore-Rotterdam".to_string(),
            context_summary: String::new(),
            facts: serde_json::json!({}),
        };

        let result = generator.generate(&request).await;
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("GEMINI_API_KEY"));
    }
}
