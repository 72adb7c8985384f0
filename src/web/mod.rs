use axum::{
    Router,
    http::Method,
    middleware as axum_middleware,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::store::{ClipStore, ProfileStore};
use crate::server::config::ServerConfig;
use crate::services::{ClipMutationService, ClipRetrievalService, ProfileService};
use crate::web::{middleware::auth, routes::*};

pub mod error;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;

pub use error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub clip_mutation: ClipMutationService,
    pub clip_retrieval: ClipRetrievalService,
    pub profiles: ProfileService,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(
        clip_store: Arc<dyn ClipStore>,
        profile_store: Arc<dyn ProfileStore>,
        config: Arc<ServerConfig>,
    ) -> Self {
        let policy = config.policy();
        AppState {
            clip_mutation: ClipMutationService::new(clip_store.clone(), policy.delete_scope),
            clip_retrieval: ClipRetrievalService::new(clip_store, policy),
            profiles: ProfileService::new(profile_store),
            config,
        }
    }
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn create_axum_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![
            Method::GET,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_check_handler))
        .nest(
            "/api/clips",
            clip_routes::create_clips_router().route_layer(
                axum_middleware::from_fn_with_state(app_state.clone(), auth::optional_auth),
            ),
        )
        .nest("/api/auth", profile_routes::create_profile_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
