use std::path::Path;
use std::sync::MutexGuard;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::AppState;
use crate::config::home_dir;
use crate::error::{Error, ErrorKind};
use crate::filesystem::{self, DirectoryListing};
use crate::models::*;
use crate::session::ProjectSession;

// ============================================================
// Error Handling
// ============================================================

/// Map a library error to a response, logging it on the way out.
///
/// Client mistakes and missing state are returned with their message. I/O
/// failures are logged in full but clients only see a generic message.
fn error_response(e: Error) -> (StatusCode, String) {
    let status = match &e {
        Error::NoProject | Error::NoRoot => StatusCode::NOT_FOUND,
        Error::DirectoryNotFound { .. } | Error::TreeFileNotFound { .. } => StatusCode::NOT_FOUND,
        _ => match e.kind() {
            ErrorKind::Validation | ErrorKind::NotFound | ErrorKind::State => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::Io => StatusCode::INTERNAL_SERVER_ERROR,
        },
    };

    if status.is_server_error() {
        tracing::error!("Internal error: {}", e);
        return (status, "Internal server error".to_string());
    }

    tracing::warn!("Request failed: {}", e);
    (status, e.to_string())
}

/// Loading is driven by a path the client picked, so every failure is the
/// client's to fix.
fn load_error(e: Error) -> (StatusCode, String) {
    tracing::warn!("Load failed: {}", e);
    (StatusCode::BAD_REQUEST, e.to_string())
}

fn lock_session(state: &AppState) -> MutexGuard<'_, ProjectSession> {
    state.session.lock().expect("session lock poisoned")
}

fn require_path(input: ProjectPathInput) -> Result<String, (StatusCode, String)> {
    match input.path {
        Some(path) if !path.is_empty() => Ok(path),
        _ => Err((
            StatusCode::BAD_REQUEST,
            "Missing 'path' in request".to_string(),
        )),
    }
}

/// Remember the directory a project lives in for the next project dialog.
fn remember_project_directory(state: &AppState, project_path: &str) {
    let Some(parent) = Path::new(project_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    else {
        return;
    };
    if let Err(e) = state.config.save_last_directory(parent) {
        tracing::warn!("Could not remember last directory: {}", e);
    }
}

// ============================================================
// Health
// ============================================================

pub async fn banner() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "mbird Console API" }))
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Project
// ============================================================

pub async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<ProjectPathInput>,
) -> Result<Json<TreeResponse>, (StatusCode, String)> {
    let path = require_path(input)?;
    let tree = lock_session(&state)
        .create(&path)
        .map_err(error_response)?
        .clone();

    remember_project_directory(&state, &path);
    Ok(Json(TreeResponse::success(tree)))
}

pub async fn load_project(
    State(state): State<AppState>,
    Json(input): Json<ProjectPathInput>,
) -> Result<Json<TreeResponse>, (StatusCode, String)> {
    let path = require_path(input)?;
    let tree = lock_session(&state)
        .load(&path)
        .map_err(load_error)?
        .clone();

    remember_project_directory(&state, &path);
    Ok(Json(TreeResponse::success(tree)))
}

// ============================================================
// Tree
// ============================================================

pub async fn get_tree(
    State(state): State<AppState>,
) -> Result<Json<MbirdNode>, (StatusCode, String)> {
    lock_session(&state)
        .tree()
        .cloned()
        .map(Json)
        .map_err(error_response)
}

/// Replace the entire tree with the request body.
pub async fn update_tree(
    State(state): State<AppState>,
    Json(tree_data): Json<serde_json::Value>,
) -> Result<Json<TreeResponse>, (StatusCode, String)> {
    lock_session(&state)
        .replace(tree_data)
        .cloned()
        .map(|tree| Json(TreeResponse::success(tree)))
        .map_err(error_response)
}

pub async fn regenerate_tree(
    State(state): State<AppState>,
) -> Result<Json<TreeResponse>, (StatusCode, String)> {
    lock_session(&state)
        .regenerate()
        .cloned()
        .map(|tree| Json(TreeResponse::success(tree)))
        .map_err(error_response)
}

// ============================================================
// Persistence
// ============================================================

pub async fn save_project(
    State(state): State<AppState>,
) -> Result<Json<SaveResponse>, (StatusCode, String)> {
    lock_session(&state)
        .save()
        .map(|timestamp| {
            Json(SaveResponse {
                status: "success".to_string(),
                timestamp,
            })
        })
        .map_err(error_response)
}

pub async fn get_save_status(State(state): State<AppState>) -> Json<SaveStatus> {
    Json(SaveStatus {
        last_saved: lock_session(&state).last_saved(),
    })
}

// ============================================================
// Filesystem
// ============================================================

pub async fn get_home_directory() -> Json<PathResponse> {
    Json(PathResponse {
        path: home_dir().to_string_lossy().into_owned(),
    })
}

/// Query parameters for browsing directories.
#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    /// Directory to list. Defaults to the filesystem root.
    pub path: Option<String>,
}

pub async fn browse_directory(
    Query(query): Query<BrowseQuery>,
) -> Result<Json<DirectoryListing>, (StatusCode, String)> {
    let path = query.path.as_deref().unwrap_or("/");
    filesystem::browse(path).map(Json).map_err(error_response)
}

// ============================================================
// Config
// ============================================================

pub async fn get_last_directory(
    State(state): State<AppState>,
) -> Result<Json<PathResponse>, (StatusCode, String)> {
    state
        .config
        .last_directory()
        .map(|path| {
            Json(PathResponse {
                path: path.to_string_lossy().into_owned(),
            })
        })
        .map_err(error_response)
}

pub async fn set_last_directory(
    State(state): State<AppState>,
    Json(input): Json<ProjectPathInput>,
) -> Result<Json<PathResponse>, (StatusCode, String)> {
    let path = require_path(input)?;
    state
        .config
        .save_last_directory(&path)
        .map_err(error_response)?;
    Ok(Json(PathResponse { path }))
}
