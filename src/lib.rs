//! Debater - debate chat over a JSON proxy
//!
//! Two halves share this crate: an axum proxy that forwards debate turns to a
//! remote service, and a terminal conversation view that keeps the transcript
//! and calls the proxy.

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod conversation;
pub mod routes;
pub mod session;
pub mod tui;
pub mod upstream;

use config::Config;
use upstream::DebateService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<DebateService>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            upstream: Arc::new(DebateService::new(config.upstream_url.clone())),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
