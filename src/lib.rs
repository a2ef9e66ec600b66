use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod state;

use state::AppState;

/// Assemble the full router: public liveness routes plus the API-key
/// protected application resource and /version.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .merge(application_routes())
        .route("/version", get(handlers::version))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_api_key,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn application_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::application;

    Router::new()
        .route("/application", post(application::create))
        .route("/application/all", get(application::list_all))
        .route(
            "/application/user/:user_id",
            get(application::list_by_user).delete(application::delete_by_user),
        )
        .route(
            "/application/:application_id",
            get(application::get)
                .put(application::update)
                .delete(application::delete),
        )
}

/// Restrict cross-origin access to the configured frontend origin, with
/// credentials allowed. Without a configured origin, allow all.
fn cors_layer(config: &config::AppConfig) -> CorsLayer {
    match config.frontend_url.as_deref().map(str::parse::<HeaderValue>) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true),
        Some(Err(_)) => {
            tracing::warn!("FRONTEND_URL is not a valid origin value, allowing all origins");
            CorsLayer::very_permissive()
        }
        None => CorsLayer::very_permissive(),
    }
}
