use aide::axum::IntoApiResponse;
use axum::{Extension, Json};
use schemars::JsonSchema;
use serde::Serialize;

use crate::{inference::TextGeneration, types::Environment};
use std::sync::Arc;

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    /// Current version of the application
    semver: String,
    /// Commit hash of the current build (if available)
    rev: Option<String>,
    /// Deployment stage
    environment: String,
    /// Whether live model replies are possible, otherwise chat serves fallbacks
    inference_configured: bool,
}

/// Health check endpoint
///
/// Returns the current status and version information of the service.
pub async fn handler(
    Extension(environment): Extension<Environment>,
    Extension(text_generation): Extension<Arc<dyn TextGeneration>>,
) -> impl IntoApiResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        semver: env!("CARGO_PKG_VERSION").to_string(),
        rev: option_env!("GIT_REV").map(ToString::to_string),
        environment: environment.to_string(),
        inference_configured: text_generation.has_credentials(),
    })
}
