mod handlers;

use std::sync::{Arc, Mutex};

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ConsoleConfig;
use crate::session::ProjectSession;

/// Shared state for the route handlers: the open project and console settings.
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<ProjectSession>>,
    config: Arc<ConsoleConfig>,
}

impl AppState {
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            session: Arc::new(Mutex::new(ProjectSession::new())),
            config: Arc::new(config),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let api = Router::new()
        // Project
        .route("/project/create", post(handlers::create_project))
        .route("/project/load", post(handlers::load_project))
        // Tree
        .route("/tree", get(handlers::get_tree))
        .route("/tree", post(handlers::update_tree))
        .route("/tree/regenerate", post(handlers::regenerate_tree))
        // Persistence
        .route("/save", post(handlers::save_project))
        .route("/save/status", get(handlers::get_save_status))
        // Filesystem
        .route("/filesystem/home", get(handlers::get_home_directory))
        .route("/filesystem/browse", get(handlers::browse_directory))
        // Config
        .route("/config/last-directory", get(handlers::get_last_directory))
        .route("/config/last-directory", post(handlers::set_last_directory))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .route("/", get(handlers::banner))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
