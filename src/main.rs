pub use battle_server::*;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env();
    let state = app_state::AppState::from_config(config.clone());

    let cors = CorsLayer::new()
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);
    let cors = if config.server.cors_origins.iter().any(|origin| origin == "*") {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins = config
            .server
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(e) => {
                    tracing::warn!("Ignoring CORS origin {}: {}", origin, e);
                    None
                }
            })
            .collect::<Vec<_>>();
        cors.allow_origin(origins)
    };

    let app = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/teams", get(handlers::list_teams_handler))
        .route("/battles", post(handlers::start_battle_handler))
        .route("/battles/prediction", get(handlers::prediction_handler))
        .route("/type-chart", get(handlers::type_chart_handler))
        .route("/type-chart/{attacker}/{defender}", get(handlers::type_effectiveness_handler))
        .layer(cors)
        .with_state(state);

    let addr = config.server_addr();
    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind port");
    axum::serve(listener, app).await.expect("Server failed");
}
