//! HTTP serving layer.
//!
//! Holds no state of its own: every request goes back to the repository.
//! Repository calls block on disk and network I/O, so handlers run them on the
//! blocking pool.

pub mod model;
mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::fetch::PageFetcher;
use crate::player::Player;
use crate::store::CollectionRepository;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<CollectionRepository>,
    pub fetcher: Arc<dyn PageFetcher>,
    pub player: Arc<dyn Player>,
}

impl AppState {
    pub fn new(
        repository: CollectionRepository,
        fetcher: Arc<dyn PageFetcher>,
        player: Arc<dyn Player>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            fetcher,
            player,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/shows", get(routes::list_shows).post(routes::ingest_show))
        .route("/load_show/:show", get(routes::load_show))
        .route("/mark_done/:show", post(routes::mark_done))
        .route("/play/:show", post(routes::play))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
