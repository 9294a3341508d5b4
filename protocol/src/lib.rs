//! JSON contracts for the backend HTTP API.
//!
//! The game shell posts these shapes as-is; the engine itself never
//! performs I/O. Field names follow the backend's camelCase convention.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Backend route paths, relative to the configured base URL.
pub mod endpoints {
    pub const UPDATE_LEVEL_PROGRESS: &str = "/updateLevelProgress";
    pub const GET_USER_INF: &str = "/getUserInf";
}

/// `POST /updateLevelProgress` — final score of a finished round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLevelProgressRequest {
    pub username: String,
    pub level_number: u32,
    pub score: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLevelProgressResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `POST /getUserInf` — profile lookup by Telegram username.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserInfRequest {
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserInfResponse {
    pub user: UserInfo,
}

/// Player progress as stored by the backend: highest unlocked level and
/// stars earned per level, keyed by level id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub username: String,
    pub level: u32,
    #[serde(default)]
    pub stars: BTreeMap<String, u32>,
}

/// Error envelope returned by every route on failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub message: String,
}
