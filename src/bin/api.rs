use maritime_agent_orchestrator::{
    api::{start_server, ApiState},
    captain::CaptainAgent,
    catalog::Catalog,
    generator::{GeminiGenerator, OfflineGenerator, TextGenerator},
    session::InMemorySessionStore,
    specialist::{CargoMatcher, MarketAnalyst, VoyagePlanner},
};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let generator: Arc<dyn TextGenerator> = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => Arc::new(GeminiGenerator::new(key)),
        _ => {
            warn!("GEMINI_API_KEY not set - serving deterministic fallback answers only");
            Arc::new(OfflineGenerator)
        }
    };

    let api_port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("API_PORT"))
        .unwrap_or_else(|_| "8080".to_string())
        .parse()?;

    info!("Maritime Agent Orchestrator - API Server");
    info!("Port: {}", api_port);

    // Shared components
    let catalog = Arc::new(Catalog::new());
    let sessions = Arc::new(InMemorySessionStore::new());

    let state = ApiState {
        captain: Arc::new(CaptainAgent::new(
            catalog.clone(),
            sessions,
            generator.clone(),
        )),
        voyage_planner: Arc::new(VoyagePlanner::new(catalog.clone(), generator.clone())),
        cargo_matcher: Arc::new(CargoMatcher::new(catalog.clone(), generator.clone())),
        market_analyst: Arc::new(MarketAnalyst::new(catalog, generator)),
    };

    info!("Agents initialized");

    start_server(state, api_port).await?;

    Ok(())
}
