use sim_lookup_api::client::LookupClient;
use sim_lookup_api::config::Config;
use sim_lookup_api::counter::{FileVisitCounter, MemoryVisitCounter, VisitCounter};
use sim_lookup_api::handlers::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration, builds the lookup client and the visit
/// counter, then serves the HTTP routes.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sim_lookup_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let lookup_client = LookupClient::from_config(&config)?;
    tracing::info!("✓ Lookup client initialized: {}", config.lookup_base_url);

    let visit_counter: Arc<dyn VisitCounter> = match config.counter_file {
        Some(ref path) => Arc::new(FileVisitCounter::new(path, config.counter_key.clone())),
        None => {
            tracing::info!("No COUNTER_FILE set, visits are counted in memory");
            Arc::new(MemoryVisitCounter::new())
        }
    };

    let app_state = Arc::new(AppState {
        lookup_client,
        visit_counter,
    });

    let app = sim_lookup_api::app(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
