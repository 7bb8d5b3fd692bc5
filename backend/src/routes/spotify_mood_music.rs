use std::sync::Arc;

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use common_types::Emotion;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{
    music::{fallback_playlist, search_query, MusicError, Playlist, PlaylistCatalog},
    types::ValidatedJson,
};

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct MoodMusicRequest {
    /// Emotion label, unknown or missing labels are treated as `neutral`
    pub emotion: Option<String>,
    /// Extra mood wording that leads the catalog search
    pub mood: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoodMusicResponse {
    pub success: bool,
    pub playlist: Playlist,
    pub emotion: String,
    pub message: String,
    /// Present and `true` when the curated playlist was served
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_fallback: Option<bool>,
}

/// 500 body: what went wrong plus a playlist the app can still show
#[derive(Debug, Serialize, JsonSchema)]
pub struct MoodMusicFailure {
    pub error: String,
    pub fallback: Playlist,
}

impl IntoResponse for MoodMusicFailure {
    fn into_response(self) -> Response {
        tracing::error!("Music catalog unavailable: {}", self.error);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

impl OperationOutput for MoodMusicFailure {
    type Inner = Self;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<Self>::operation_response(ctx, operation)
    }
}

/// Mood music endpoint
///
/// Searches the catalog for a playlist matching the emotion. A failed or
/// empty search is answered with the curated playlist for that emotion.
///
/// # Errors
///
/// Returns `MoodMusicFailure` (500) when the catalog credentials are missing
/// or the client-credentials exchange fails.
#[instrument(skip_all)]
pub async fn handler(
    Extension(playlist_catalog): Extension<Arc<dyn PlaylistCatalog>>,
    ValidatedJson(request): ValidatedJson<MoodMusicRequest>,
) -> Result<Json<MoodMusicResponse>, MoodMusicFailure> {
    let emotion_tag = request
        .emotion
        .as_deref()
        .map(str::trim)
        .filter(|tag| !tag.is_empty());
    let emotion = Emotion::from_tag(emotion_tag);
    let emotion_label = emotion_tag.map_or_else(|| Emotion::Neutral.to_string(), ToString::to_string);

    let query = search_query(emotion, request.mood.as_deref());

    let found = match playlist_catalog.find_playlist(&query).await {
        Ok(found) => found,
        Err(err) if err.is_credential_failure() => {
            return Err(MoodMusicFailure {
                error: credential_error_message(&err).to_string(),
                fallback: fallback_playlist(emotion),
            });
        }
        Err(err) => {
            tracing::warn!(%emotion, error = %err, "Serving curated playlist");
            None
        }
    };

    let response = match found {
        Some(playlist) => MoodMusicResponse {
            success: true,
            playlist,
            message: format!("Here's a playlist to match your {emotion_label} mood"),
            emotion: emotion_label,
            is_fallback: None,
        },
        None => MoodMusicResponse {
            success: true,
            playlist: fallback_playlist(emotion),
            message: format!("Here's a curated playlist for your {emotion_label} mood"),
            emotion: emotion_label,
            is_fallback: Some(true),
        },
    };

    Ok(Json(response))
}

const fn credential_error_message(err: &MusicError) -> &'static str {
    match err {
        MusicError::MissingCredentials => "Spotify credentials are not configured",
        MusicError::TokenExchange(_) | MusicError::Search(_) => {
            "Failed to authenticate with Spotify"
        }
    }
}
