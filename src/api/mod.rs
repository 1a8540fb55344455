pub mod auth;
pub mod error;
pub mod events;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod types;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use middleware::AdminAuth;
use state::AppState;

/// Assembles and serves the admin HTTP surface. Every mutating route
/// requires `AdminAuth`; `/health` and `/admin/events` (a read-only live
/// feed) do not.
pub async fn serve(host: &str, port: u16, state: AppState) -> Result<()> {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/admin/events", get(handlers::events::event_stream))
        .route("/admin/schema", get(handlers::admin::get_schema))
        .route(
            "/admin/execute-trade",
            post(handlers::admin::execute_trade).layer(axum::middleware::from_extractor::<AdminAuth>()),
        )
        .route(
            "/admin/close-position",
            post(handlers::admin::close_position).layer(axum::middleware::from_extractor::<AdminAuth>()),
        )
        .route(
            "/admin/sync-venue-markets",
            post(handlers::admin::sync_venue_markets).layer(axum::middleware::from_extractor::<AdminAuth>()),
        )
        .route(
            "/admin/test-nonce",
            get(handlers::admin::test_nonce).layer(axum::middleware::from_extractor::<AdminAuth>()),
        )
        .layer(cors)
        .with_state(state);

    let addr = format!("{host}:{port}");
    println!("coordinator admin API listening on {addr}");
    println!("  Health:   GET  http://{addr}/health");
    println!("  Execute:  POST http://{addr}/admin/execute-trade");
    println!("  Close:    POST http://{addr}/admin/close-position");
    println!("  Sync:     POST http://{addr}/admin/sync-venue-markets");
    println!("  Nonce:    GET  http://{addr}/admin/test-nonce");
    println!("  Schema:   GET  http://{addr}/admin/schema");
    println!("  Events:   GET  http://{addr}/admin/events");

    let listener = tokio::net::TcpListener::bind(&addr).await.with_context(|| format!("binding to {addr}"))?;
    axum::serve(listener, app).await.context("running server")?;

    Ok(())
}
