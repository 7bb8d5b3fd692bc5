use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use companion_backend::{
    inference::{
        mock::{MockOutcome, MockTextGeneration},
        HuggingFaceClient, TextGeneration,
    },
    music::{
        mock::{MockCatalogOutcome, MockPlaylistCatalog},
        PlaylistCatalog, SpotifyClient,
    },
    server::{self, Providers},
    types::{Environment, SpotifyCredentials},
};
use tower::ServiceExt;
use wiremock::MockServer;

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    // Load test environment variables
    dotenvy::from_path(".env.example").ok();

    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Router wired to the given providers
pub struct TestSetup {
    pub router: Router,
}

impl TestSetup {
    pub fn new(
        text_generation: Arc<dyn TextGeneration>,
        playlist_catalog: Arc<dyn PlaylistCatalog>,
    ) -> Self {
        Self::in_environment(Environment::Development, text_generation, playlist_catalog)
    }

    pub fn in_environment(
        environment: Environment,
        text_generation: Arc<dyn TextGeneration>,
        playlist_catalog: Arc<dyn PlaylistCatalog>,
    ) -> Self {
        setup_test_env();

        let router = server::router(
            environment,
            Providers {
                text_generation,
                playlist_catalog,
            },
        );

        Self { router }
    }

    /// Router backed by scripted providers; the mocks are returned for call inspection
    pub fn with_mocks(
        text_generation: MockTextGeneration,
        playlist_catalog: MockPlaylistCatalog,
    ) -> (Self, Arc<MockTextGeneration>, Arc<MockPlaylistCatalog>) {
        let text_generation = Arc::new(text_generation);
        let playlist_catalog = Arc::new(playlist_catalog);
        let setup = Self::new(text_generation.clone(), playlist_catalog.clone());
        (setup, text_generation, playlist_catalog)
    }

    /// Router whose real clients talk to a local mock server
    pub fn with_upstream(
        server: &MockServer,
        inference_token: Option<&str>,
        spotify_credentials: Option<SpotifyCredentials>,
    ) -> Self {
        let text_generation = Arc::new(HuggingFaceClient::new(
            format!("{}/models", server.uri()),
            inference_token.map(ToString::to_string),
        ));
        let playlist_catalog = Arc::new(SpotifyClient::new(
            server.uri(),
            server.uri(),
            spotify_credentials,
        ));
        Self::new(text_generation, playlist_catalog)
    }

    /// Every model answers with the same text
    pub fn all_models(outcome: &MockOutcome) -> MockTextGeneration {
        companion_backend::chat::Persona::Kintsugi
            .models()
            .iter()
            .chain(companion_backend::chat::Persona::Companion.models())
            .fold(MockTextGeneration::new(), |mock, model| {
                mock.with_outcome(model, outcome.clone())
            })
    }

    pub fn unused_catalog() -> MockPlaylistCatalog {
        MockPlaylistCatalog::new(MockCatalogOutcome::NotFound)
    }

    pub async fn send_request(
        &self,
        method: &str,
        route: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let builder = Request::builder().uri(route).method(method);
        let request = match body {
            Some(payload) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(payload.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        self.send_request("POST", route, Some(payload)).await
    }
}
