//! Hosted text-generation integration.
//!
//! The chat handlers only see the [`TextGeneration`] trait, so the hosted
//! client can be swapped for the scripted mock in tests.

mod client;
pub mod error;

pub use client::HuggingFaceClient;
pub use error::InferenceError;

/// Sampling knobs sent along with every prompt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

/// Trait for a hosted text-generation provider
#[async_trait::async_trait]
pub trait TextGeneration: Send + Sync {
    /// Whether a credential for the provider is configured
    fn has_credentials(&self) -> bool;

    /// Asks `model` to continue `prompt`, returning the raw generated text
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParameters,
    ) -> Result<String, InferenceError>;
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::{GenerationParameters, InferenceError, TextGeneration};

    /// Scripted answer for one model
    #[derive(Debug, Clone)]
    pub enum MockOutcome {
        Text(String),
        Empty,
        Fail,
        /// Answers with the text only after the delay has passed
        Delayed(std::time::Duration, String),
    }

    /// Text generation double; models without a scripted outcome fail
    pub struct MockTextGeneration {
        has_credentials: bool,
        outcomes: HashMap<String, MockOutcome>,
        calls: Mutex<Vec<String>>,
    }

    impl MockTextGeneration {
        #[must_use]
        pub fn new() -> Self {
            Self {
                has_credentials: true,
                outcomes: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        #[must_use]
        pub fn without_credentials(mut self) -> Self {
            self.has_credentials = false;
            self
        }

        #[must_use]
        pub fn with_outcome(mut self, model: &str, outcome: MockOutcome) -> Self {
            self.outcomes.insert(model.to_string(), outcome);
            self
        }

        /// Models called so far, in call order
        ///
        /// # Panics
        ///
        /// If the call log mutex is poisoned
        #[must_use]
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Default for MockTextGeneration {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait::async_trait]
    impl TextGeneration for MockTextGeneration {
        fn has_credentials(&self) -> bool {
            self.has_credentials
        }

        async fn generate(
            &self,
            model: &str,
            _prompt: &str,
            _params: &GenerationParameters,
        ) -> Result<String, InferenceError> {
            self.calls.lock().unwrap().push(model.to_string());

            if !self.has_credentials {
                return Err(InferenceError::MissingCredentials);
            }

            match self.outcomes.get(model) {
                Some(MockOutcome::Text(text)) => Ok(text.clone()),
                Some(MockOutcome::Empty) => Ok(String::new()),
                Some(MockOutcome::Delayed(delay, text)) => {
                    tokio::time::sleep(*delay).await;
                    Ok(text.clone())
                }
                Some(MockOutcome::Fail) | None => Err(InferenceError::UpstreamStatus {
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                    body: "mock failure".to_string(),
                }),
            }
        }
    }
}
