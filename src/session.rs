//! Per-user conversation state
//!
//! An explicit, injectable session store instead of ambient process state.
//! Each session accumulates de-duplicated entity mentions and an
//! append-only transcript truncated to the most recent turns. Sessions are
//! isolated by key; concurrent updates for the same key are
//! last-write-wins.

use crate::classifier::QueryIntent;
use crate::extractor::ExtractedEntities;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Transcript is truncated to this many most recent turns.
pub const MAX_TRANSCRIPT_TURNS: usize = 10;

/// Session key used when no user id is supplied.
const ANONYMOUS_SESSION: &str = "anonymous";

fn session_key(user: Option<&str>) -> String {
    match user {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => ANONYMOUS_SESSION.to_string(),
    }
}

/// Accumulated entity mentions for one session. Sets de-duplicate repeated
/// mentions; BTreeSet keeps iteration deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationContext {
    pub ports: BTreeSet<String>,
    pub vessels: BTreeSet<String>,
    pub cargoes: BTreeSet<String>,
    pub routes: BTreeSet<String>,
}

impl ConversationContext {
    /// Merge one query's extracted entities into the accumulated sets.
    pub fn absorb(&mut self, entities: &ExtractedEntities) {
        self.ports.extend(entities.ports.iter().cloned());
        self.vessels.extend(entities.vessels.iter().cloned());
        self.cargoes.extend(entities.cargoes.iter().cloned());
        self.routes.extend(entities.routes.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
            && self.vessels.is_empty()
            && self.cargoes.is_empty()
            && self.routes.is_empty()
    }

    /// One-line summary handed to the text generator.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if !self.ports.is_empty() {
            parts.push(format!(
                "Ports mentioned: {}",
                self.ports.iter().cloned().collect::<Vec<_>>().join(", ")
            ));
        }
        if !self.vessels.is_empty() {
            parts.push(format!(
                "Vessels mentioned: {}",
                self.vessels.iter().cloned().collect::<Vec<_>>().join(", ")
            ));
        }
        if !self.cargoes.is_empty() {
            parts.push(format!(
                "Cargo types mentioned: {}",
                self.cargoes.iter().cloned().collect::<Vec<_>>().join(", ")
            ));
        }
        if !self.routes.is_empty() {
            parts.push(format!(
                "Routes discussed: {}",
                self.routes.iter().cloned().collect::<Vec<_>>().join(", ")
            ));
        }

        if parts.is_empty() {
            "No specific context established yet".to_string()
        } else {
            parts.join(" | ")
        }
    }
}

/// One completed query/answer exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub turn_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub query: String,
    pub answer: String,
    pub intent: QueryIntent,
}

impl ConversationTurn {
    pub fn new(query: String, answer: String, intent: QueryIntent) -> Self {
        Self {
            turn_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            query,
            answer,
            intent,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct SessionState {
    context: ConversationContext,
    transcript: VecDeque<ConversationTurn>,
}

/// Store for per-user conversation state.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Merge extracted entities into the session context; returns the
    /// accumulated context after the merge.
    async fn update_context(
        &self,
        user: Option<&str>,
        entities: &ExtractedEntities,
    ) -> Result<ConversationContext>;

    /// Append a turn, evicting the oldest beyond the transcript cap.
    async fn record_turn(&self, user: Option<&str>, turn: ConversationTurn) -> Result<()>;

    async fn context(&self, user: Option<&str>) -> Result<ConversationContext>;

    async fn history(&self, user: Option<&str>) -> Result<Vec<ConversationTurn>>;

    /// Drop both context and transcript for the session.
    async fn clear(&self, user: Option<&str>) -> Result<()>;
}

/// In-memory session store.
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionState>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn update_context(
        &self,
        user: Option<&str>,
        entities: &ExtractedEntities,
    ) -> Result<ConversationContext> {
        let key = session_key(user);
        let mut sessions = self.sessions.write().await;
        let state = sessions.entry(key).or_default();
        state.context.absorb(entities);
        Ok(state.context.clone())
    }

    async fn record_turn(&self, user: Option<&str>, turn: ConversationTurn) -> Result<()> {
        let key = session_key(user);
        let mut sessions = self.sessions.write().await;
        let state = sessions.entry(key).or_default();

        state.transcript.push_back(turn);
        while state.transcript.len() > MAX_TRANSCRIPT_TURNS {
            state.transcript.pop_front();
        }

        Ok(())
    }

    async fn context(&self, user: Option<&str>) -> Result<ConversationContext> {
        let key = session_key(user);
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(&key)
            .map(|state| state.context.clone())
            .unwrap_or_default())
    }

    async fn history(&self, user: Option<&str>) -> Result<Vec<ConversationTurn>> {
        let key = session_key(user);
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(&key)
            .map(|state| state.transcript.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn clear(&self, user: Option<&str>) -> Result<()> {
        let key = session_key(user);
        let mut sessions = self.sessions.write().await;
        sessions.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities_with_port(port: &str) -> ExtractedEntities {
        ExtractedEntities {
            ports: vec![port.to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_repeated_mentions_deduplicate() {
        let store = InMemorySessionStore::new();

        store
            .update_context(Some("trader-1"), &entities_with_port("Singapore"))
            .await
            .unwrap();
        let context = store
            .update_context(Some("trader-1"), &entities_with_port("Singapore"))
            .await
            .unwrap();

        assert_eq!(context.ports.len(), 1);
        assert!(context.ports.contains("Singapore"));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated_by_key() {
        let store = InMemorySessionStore::new();

        store
            .update_context(Some("trader-1"), &entities_with_port("Singapore"))
            .await
            .unwrap();
        store
            .update_context(Some("trader-2"), &entities_with_port("Rotterdam"))
            .await
            .unwrap();

        let first = store.context(Some("trader-1")).await.unwrap();
        let second = store.context(Some("trader-2")).await.unwrap();

        assert!(first.ports.contains("Singapore"));
        assert!(!first.ports.contains("Rotterdam"));
        assert!(second.ports.contains("Rotterdam"));
        assert!(!second.ports.contains("Singapore"));
    }

    #[tokio::test]
    async fn test_absent_user_shares_anonymous_session() {
        let store = InMemorySessionStore::new();

        store
            .update_context(None, &entities_with_port("Durban"))
            .await
            .unwrap();
        // Blank ids collapse to the same anonymous session.
        let context = store.context(Some("  ")).await.unwrap();
        assert!(context.ports.contains("Durban"));
    }

    #[tokio::test]
    async fn test_transcript_truncated_to_cap() {
        let store = InMemorySessionStore::new();

        for i in 0..15 {
            let turn = ConversationTurn::new(
                format!("query {}", i),
                format!("answer {}", i),
                QueryIntent::General,
            );
            store.record_turn(Some("trader-1"), turn).await.unwrap();
        }

        let history = store.history(Some("trader-1")).await.unwrap();
        assert_eq!(history.len(), MAX_TRANSCRIPT_TURNS);
        // Oldest turns are evicted first.
        assert_eq!(history[0].query, "query 5");
        assert_eq!(history[9].query, "query 14");
    }

    #[tokio::test]
    async fn test_clear_wipes_context_and_history() {
        let store = InMemorySessionStore::new();

        store
            .update_context(Some("trader-1"), &entities_with_port("Qingdao"))
            .await
            .unwrap();
        store
            .record_turn(
                Some("trader-1"),
                ConversationTurn::new("q".to_string(), "a".to_string(), QueryIntent::General),
            )
            .await
            .unwrap();

        store.clear(Some("trader-1")).await.unwrap();

        assert!(store.context(Some("trader-1")).await.unwrap().is_empty());
        assert!(store.history(Some("trader-1")).await.unwrap().is_empty());
    }

    #[test]
    fn test_context_summary_format() {
        let mut context = ConversationContext::default();
        assert_eq!(context.summary(), "No specific context established yet");

        context.absorb(&ExtractedEntities {
            ports: vec!["Singapore".to_string(), "Rotterdam".to_string()],
            cargoes: vec!["Coal".to_string()],
            ..Default::default()
        });

        let summary = context.summary();
        assert!(summary.contains("Ports mentioned: Rotterdam, Singapore"));
        assert!(summary.contains("Cargo types mentioned: Coal"));
        assert!(summary.contains(" | "));
    }
}
