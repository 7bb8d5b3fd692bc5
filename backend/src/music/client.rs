use std::sync::LazyLock;
use std::time::Duration;

use rand::Rng;
use regex::Regex;
use reqwest::{header, Client};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::Deserialize;

use super::{MusicError, Playlist, PlaylistCatalog};
use crate::types::SpotifyCredentials;

/// Default request timeout in seconds
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;
/// Number of playlists requested per search
const SEARCH_LIMIT: &str = "10";

/// Catalog descriptions may embed anchor tags
static HTML_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid html tag regex"));

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    playlists: Option<PlaylistPage>,
}

#[derive(Debug, Deserialize)]
struct PlaylistPage {
    /// Raw items; the catalog returns `null` or partial objects for playlists it can no longer serve
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    name: String,
    description: Option<String>,
    external_urls: ExternalUrls,
    images: Option<Vec<PlaylistImage>>,
    tracks: Option<TrackCount>,
    owner: Option<PlaylistOwner>,
}

#[derive(Debug, Deserialize)]
struct ExternalUrls {
    spotify: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistImage {
    url: String,
}

#[derive(Debug, Deserialize)]
struct TrackCount {
    total: u32,
}

#[derive(Debug, Deserialize)]
struct PlaylistOwner {
    display_name: Option<String>,
}

impl From<PlaylistItem> for Playlist {
    fn from(item: PlaylistItem) -> Self {
        let description = item
            .description
            .map(|d| HTML_TAGS.replace_all(&d, "").trim().to_string())
            .unwrap_or_default();

        Self {
            name: item.name,
            description,
            url: item.external_urls.spotify,
            image: item
                .images
                .and_then(|images| images.into_iter().next())
                .map(|image| image.url),
            track_count: item.tracks.map_or(0, |t| t.total),
            owner: item
                .owner
                .and_then(|o| o.display_name)
                .unwrap_or_else(|| "Spotify".to_string()),
        }
    }
}

/// HTTP client for the music catalog, authenticating with the client-credentials grant
pub struct SpotifyClient {
    accounts_url: String,
    api_url: String,
    credentials: Option<SpotifyCredentials>,
    http_client: ClientWithMiddleware,
}

impl SpotifyClient {
    /// Creates a new music catalog client
    ///
    /// # Panics
    ///
    /// If the HTTP client fails to be created
    #[must_use]
    pub fn new(
        accounts_url: String,
        api_url: String,
        credentials: Option<SpotifyCredentials>,
    ) -> Self {
        let reqwest_client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .user_agent(format!("companion-backend/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        let http_client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Self {
            accounts_url: accounts_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            credentials,
            http_client,
        }
    }

    /// Exchanges the client credentials for a short-lived access token
    async fn access_token(&self, credentials: &SpotifyCredentials) -> Result<String, MusicError> {
        let url = format!("{}/api/token", self.accounts_url);
        let response = self
            .http_client
            .post(url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| MusicError::TokenExchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MusicError::TokenExchange(format!("status {status}")));
        }

        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| MusicError::TokenExchange(e.to_string()))?;

        Ok(token.access_token)
    }

    async fn search(&self, access_token: &str, query: &str) -> Result<Vec<Playlist>, MusicError> {
        let url = format!("{}/v1/search", self.api_url);
        let response = self
            .http_client
            .get(url)
            .bearer_auth(access_token)
            .query(&[("q", query), ("type", "playlist"), ("limit", SEARCH_LIMIT)])
            .send()
            .await
            .map_err(|e| MusicError::Search(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MusicError::Search(format!("status {status}")));
        }

        let results = response
            .json::<SearchResponse>()
            .await
            .map_err(|e| MusicError::Search(e.to_string()))?;

        let items = results.playlists.map(|page| page.items).unwrap_or_default();
        let total = items.len();
        let playlists: Vec<Playlist> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value::<PlaylistItem>(item).ok())
            .map(Playlist::from)
            .collect();

        if playlists.len() < total {
            tracing::debug!(
                skipped = total - playlists.len(),
                "Skipped unusable playlist items"
            );
        }

        Ok(playlists)
    }
}

#[async_trait::async_trait]
impl PlaylistCatalog for SpotifyClient {
    async fn find_playlist(&self, query: &str) -> Result<Option<Playlist>, MusicError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(MusicError::MissingCredentials)?;

        let access_token = self.access_token(credentials).await?;
        let mut playlists = self.search(&access_token, query).await?;

        tracing::debug!(query, results = playlists.len(), "Playlist search finished");

        if playlists.is_empty() {
            return Ok(None);
        }
        let pick = rand::thread_rng().gen_range(0..playlists.len());
        Ok(Some(playlists.swap_remove(pick)))
    }
}
