use thiserror::Error;

/// Errors from the music catalog integration
#[derive(Debug, Error)]
pub enum MusicError {
    /// Client id or secret is not configured
    #[error("Music catalog credentials are not configured")]
    MissingCredentials,

    /// The client-credentials exchange did not yield an access token
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// The playlist search failed after a token was obtained
    #[error("Playlist search failed: {0}")]
    Search(String),
}

impl MusicError {
    /// Credential problems surface to the app, search problems are absorbed
    #[must_use]
    pub const fn is_credential_failure(&self) -> bool {
        matches!(self, Self::MissingCredentials | Self::TokenExchange(_))
    }
}
