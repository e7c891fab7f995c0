use maritime_agent_orchestrator::{
    captain::CaptainAgent,
    catalog::Catalog,
    generator::{GeminiGenerator, OfflineGenerator, TextGenerator},
    session::InMemorySessionStore,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    dotenv::dotenv().ok();

    info!("Maritime Agent Orchestrator starting");

    let generator: Arc<dyn TextGenerator> = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.is_empty() => Arc::new(GeminiGenerator::new(key)),
        _ => {
            info!("GEMINI_API_KEY not set - answers use deterministic fallback templates");
            Arc::new(OfflineGenerator)
        }
    };

    let captain = CaptainAgent::new(
        Arc::new(Catalog::new()),
        Arc::new(InMemorySessionStore::new()),
        generator,
    );

    let test_queries = [
        "What's the distance between Singapore and Rotterdam?",
        "What's the weather like at Singapore?",
        "What vessels are available?",
        "What are the bunker prices at Rotterdam?",
    ];

    for query in test_queries {
        println!("\nQuery: {}", query);

        match captain.process_query(query, None).await {
            Ok(response) => {
                println!("Intent: {}", response.intent);
                println!("Answer: {}", response.answer);
                println!("Routing: {} ({})", response.routing.agent, response.routing.page);
            }
            Err(e) => {
                eprintln!("Query failed: {}", e);
            }
        }
    }

    Ok(())
}
