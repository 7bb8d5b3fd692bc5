//! Environment configuration for different deployment stages

use std::env;

/// Default hosted inference endpoint; the model identifier is appended as a path segment
const DEFAULT_INFERENCE_API_URL: &str = "https://api-inference.huggingface.co/models";

/// Default music catalog endpoints
const DEFAULT_SPOTIFY_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment
    Development,
}

/// Client id / secret pair for the music catalog's client-credentials grant
#[derive(Clone, PartialEq, Eq)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for SpotifyCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotifyCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// Bearer token for the hosted inference API, if configured
    #[must_use]
    pub fn inference_api_token(&self) -> Option<String> {
        non_empty_var("HUGGINGFACE_API_TOKEN")
    }

    /// Base URL of the hosted inference API
    #[must_use]
    pub fn inference_api_url(&self) -> String {
        non_empty_var("HUGGINGFACE_API_URL")
            .unwrap_or_else(|| DEFAULT_INFERENCE_API_URL.to_string())
    }

    /// Music catalog client credentials; `None` unless both halves are set
    #[must_use]
    pub fn spotify_credentials(&self) -> Option<SpotifyCredentials> {
        Some(SpotifyCredentials {
            client_id: non_empty_var("SPOTIFY_CLIENT_ID")?,
            client_secret: non_empty_var("SPOTIFY_CLIENT_SECRET")?,
        })
    }

    /// Base URL of the music catalog's token endpoint
    #[must_use]
    pub fn spotify_accounts_url(&self) -> String {
        non_empty_var("SPOTIFY_ACCOUNTS_URL")
            .unwrap_or_else(|| DEFAULT_SPOTIFY_ACCOUNTS_URL.to_string())
    }

    /// Base URL of the music catalog's web API
    #[must_use]
    pub fn spotify_api_url(&self) -> String {
        non_empty_var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string())
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Staging => write!(f, "staging"),
            Self::Development => write!(f, "development"),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_environment_from_env() {
        // Test development (default)
        env::remove_var("APP_ENV");
        assert_eq!(Environment::from_env(), Environment::Development);

        // Test explicit development
        env::set_var("APP_ENV", "development");
        assert_eq!(Environment::from_env(), Environment::Development);

        // Test staging
        env::set_var("APP_ENV", " Staging ");
        assert_eq!(Environment::from_env(), Environment::Staging);

        // Test production
        env::set_var("APP_ENV", "production");
        assert_eq!(Environment::from_env(), Environment::Production);

        env::remove_var("APP_ENV");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "Invalid environment: invalid")]
    fn test_invalid_environment() {
        env::set_var("APP_ENV", "invalid");
        let _ = Environment::from_env();
    }

    #[test]
    #[serial]
    fn test_inference_settings() {
        env::remove_var("HUGGINGFACE_API_TOKEN");
        env::remove_var("HUGGINGFACE_API_URL");
        let env = Environment::Development;
        assert_eq!(env.inference_api_token(), None);
        assert_eq!(env.inference_api_url(), DEFAULT_INFERENCE_API_URL);

        // Blank values count as unset
        env::set_var("HUGGINGFACE_API_TOKEN", "   ");
        assert_eq!(env.inference_api_token(), None);

        env::set_var("HUGGINGFACE_API_TOKEN", "hf_test");
        env::set_var("HUGGINGFACE_API_URL", "http://localhost:9000/models");
        assert_eq!(env.inference_api_token().as_deref(), Some("hf_test"));
        assert_eq!(env.inference_api_url(), "http://localhost:9000/models");

        env::remove_var("HUGGINGFACE_API_TOKEN");
        env::remove_var("HUGGINGFACE_API_URL");
    }

    #[test]
    #[serial]
    fn test_spotify_credentials_need_both_halves() {
        env::remove_var("SPOTIFY_CLIENT_ID");
        env::remove_var("SPOTIFY_CLIENT_SECRET");
        let env = Environment::Production;
        assert_eq!(env.spotify_credentials(), None);

        env::set_var("SPOTIFY_CLIENT_ID", "id");
        assert_eq!(env.spotify_credentials(), None);

        env::set_var("SPOTIFY_CLIENT_SECRET", "secret");
        assert_eq!(
            env.spotify_credentials(),
            Some(SpotifyCredentials {
                client_id: "id".to_string(),
                client_secret: "secret".to_string(),
            })
        );

        env::remove_var("SPOTIFY_CLIENT_ID");
        env::remove_var("SPOTIFY_CLIENT_SECRET");
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = SpotifyCredentials {
            client_id: "id".to_string(),
            client_secret: "super-secret".to_string(),
        };
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn test_show_api_docs() {
        assert!(Environment::Development.show_api_docs());
        assert!(Environment::Staging.show_api_docs());
        assert!(!Environment::Production.show_api_docs());
    }
}
