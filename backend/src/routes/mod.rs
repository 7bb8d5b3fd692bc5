pub mod cors;
mod docs;
mod health;
pub mod huggingface_chat;
pub mod kintsugi_chat;
pub mod spotify_mood_music;

use aide::axum::{
    routing::{get, post},
    ApiRouter,
};
use chrono::{SecondsFormat, Utc};

use crate::types::Environment;

/// Creates the router with all handler routes
pub fn handler(environment: &Environment) -> ApiRouter {
    ApiRouter::new()
        .merge(docs::handler(environment))
        .api_route("/health", get(health::handler))
        .api_route(
            "/api/huggingface-chat",
            post(huggingface_chat::handler).options(cors::preflight),
        )
        .api_route(
            "/api/kintsugi-chat",
            post(kintsugi_chat::handler).options(cors::preflight),
        )
        .api_route(
            "/api/spotify-mood-music",
            post(spotify_mood_music::handler).options(cors::preflight),
        )
}

/// Current time as ISO-8601 with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
