//! Request and response bodies for the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MbirdNode;

/// Request body naming a project directory.
///
/// `path` is optional at the type level so a missing value can be reported
/// with a readable message instead of a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPathInput {
    pub path: Option<String>,
}

/// Response for every operation that hands back the current tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeResponse {
    pub status: String,
    pub tree: MbirdNode,
}

impl TreeResponse {
    pub fn success(tree: MbirdNode) -> Self {
        Self {
            status: "success".to_string(),
            tree,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// When the current project was last written to disk, if ever.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveStatus {
    pub last_saved: Option<DateTime<Utc>>,
}

/// A single directory path, used by the home and last-directory endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathResponse {
    pub path: String,
}
