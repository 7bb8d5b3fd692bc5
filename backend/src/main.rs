use std::sync::Arc;

use companion_backend::{
    inference::{HuggingFaceClient, TextGeneration},
    music::{PlaylistCatalog, SpotifyClient},
    server::{self, Providers},
    types::Environment,
};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    let env_filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // JSON logs for staging/production, human-readable for development
    if environment.json_logs() {
        fmt().json().with_env_filter(env_filter()).init();
    } else {
        fmt().with_env_filter(env_filter()).init();
    }

    tracing::info!("Starting Wellness Companion Backend in {environment} environment");

    let text_generation: Arc<dyn TextGeneration> = Arc::new(HuggingFaceClient::new(
        environment.inference_api_url(),
        environment.inference_api_token(),
    ));
    if !text_generation.has_credentials() {
        tracing::warn!("HUGGINGFACE_API_TOKEN is not set, chat endpoints will serve fallback replies");
    }

    let spotify_credentials = environment.spotify_credentials();
    if spotify_credentials.is_none() {
        tracing::warn!("SPOTIFY_CLIENT_ID/SPOTIFY_CLIENT_SECRET are not set, mood music will fail");
    }
    let playlist_catalog: Arc<dyn PlaylistCatalog> = Arc::new(SpotifyClient::new(
        environment.spotify_accounts_url(),
        environment.spotify_api_url(),
        spotify_credentials,
    ));

    server::start(
        environment,
        Providers {
            text_generation,
            playlist_catalog,
        },
    )
    .await
}
