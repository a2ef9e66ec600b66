use std::sync::Arc;

use job_tracker_api::config::AppConfig;
use job_tracker_api::database::SupabaseStore;
use job_tracker_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up PROJECT_URL, API_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().unwrap_or_else(|e| panic!("configuration error: {}", e));
    if config.api_key.is_none() {
        tracing::warn!(
            "API_KEY is not set; authenticated routes will report a server misconfiguration"
        );
    }

    let store =
        SupabaseStore::new(&config).unwrap_or_else(|e| panic!("datastore client error: {}", e));

    let bind_addr = format!("{}:{}", config.host, config.port);
    let app = job_tracker_api::app(AppState::new(config, Arc::new(store)));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Job Tracker API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
