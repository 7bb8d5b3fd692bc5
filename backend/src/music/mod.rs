//! Music catalog integration for mood-matched playlists.

mod client;
pub mod error;
pub mod fallback;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use client::SpotifyClient;
pub use error::MusicError;
pub use fallback::{fallback_playlist, search_query};

/// Playlist as presented to the app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub name: String,
    pub description: String,
    /// Link that opens the playlist in the catalog's app
    pub url: String,
    /// Cover art URL
    pub image: Option<String>,
    pub track_count: u32,
    pub owner: String,
}

/// Trait for a playlist catalog
#[async_trait::async_trait]
pub trait PlaylistCatalog: Send + Sync {
    /// Searches for playlists matching `query` and picks one.
    ///
    /// `Ok(None)` means the search worked but found nothing usable.
    async fn find_playlist(&self, query: &str) -> Result<Option<Playlist>, MusicError>;
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::sync::Mutex;

    use super::{MusicError, Playlist, PlaylistCatalog};

    /// Scripted catalog answer
    #[derive(Debug, Clone)]
    pub enum MockCatalogOutcome {
        Found(Playlist),
        NotFound,
        MissingCredentials,
        TokenExchangeFails,
        SearchFails,
    }

    pub struct MockPlaylistCatalog {
        outcome: MockCatalogOutcome,
        queries: Mutex<Vec<String>>,
    }

    impl MockPlaylistCatalog {
        #[must_use]
        pub const fn new(outcome: MockCatalogOutcome) -> Self {
            Self {
                outcome,
                queries: Mutex::new(Vec::new()),
            }
        }

        /// Search queries received so far
        ///
        /// # Panics
        ///
        /// If the query log mutex is poisoned
        #[must_use]
        pub fn queries(&self) -> Vec<String> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl PlaylistCatalog for MockPlaylistCatalog {
        async fn find_playlist(&self, query: &str) -> Result<Option<Playlist>, MusicError> {
            self.queries.lock().unwrap().push(query.to_string());

            match &self.outcome {
                MockCatalogOutcome::Found(playlist) => Ok(Some(playlist.clone())),
                MockCatalogOutcome::NotFound => Ok(None),
                MockCatalogOutcome::MissingCredentials => Err(MusicError::MissingCredentials),
                MockCatalogOutcome::TokenExchangeFails => {
                    Err(MusicError::TokenExchange("mock token failure".to_string()))
                }
                MockCatalogOutcome::SearchFails => {
                    Err(MusicError::Search("mock search failure".to_string()))
                }
            }
        }
    }
}
