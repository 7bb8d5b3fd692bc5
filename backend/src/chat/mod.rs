//! Chat orchestration shared by the companion and Kintsugi endpoints.
//!
//! A reply is produced by trying the persona's models in order and keeping
//! the first one whose cleaned output is non-empty. When every attempt fails
//! the persona's canned replies are used instead, so callers always get text.

pub mod fallback;
pub mod persona;
pub mod postprocess;

use std::time::Duration;

use common_types::Emotion;

use crate::inference::{InferenceError, TextGeneration};

pub use fallback::{fallback_candidates, fallback_reply};
pub use persona::{Persona, PromptContext};

/// Time budget for a single model attempt
pub const MODEL_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(25);

/// Model identifier reported when a canned reply was served
pub const FALLBACK_MODEL: &str = "fallback";

/// Text handed back to the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Model that produced the text, `None` for a canned reply
    pub model: Option<&'static str>,
}

impl Reply {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.model.is_none()
    }

    #[must_use]
    pub fn model_name(&self) -> &'static str {
        self.model.unwrap_or(FALLBACK_MODEL)
    }
}

/// Produces a reply, falling back to a canned one on any failure
pub async fn respond(
    generator: &dyn TextGeneration,
    persona: Persona,
    prompt: &str,
    emotion: Emotion,
) -> Reply {
    match generate(generator, persona, prompt, emotion).await {
        Ok((model, text)) => Reply {
            text,
            model: Some(model),
        },
        Err(err) => {
            tracing::warn!(?persona, %emotion, error = %err, "Serving fallback reply");
            Reply {
                text: fallback_reply(persona, emotion).to_string(),
                model: None,
            }
        }
    }
}

/// Tries the persona's models in order, returning the first usable reply.
///
/// # Errors
///
/// Returns the last attempt's error when no model produced usable text, or
/// `MissingCredentials` straight away when no token is configured.
pub async fn generate(
    generator: &dyn TextGeneration,
    persona: Persona,
    prompt: &str,
    emotion: Emotion,
) -> Result<(&'static str, String), InferenceError> {
    let params = persona.parameters();
    let mut last_error = InferenceError::EmptyOutput;

    for &model in persona.models() {
        tracing::debug!(model, "Trying model");

        let attempt = tokio::time::timeout(
            MODEL_ATTEMPT_TIMEOUT,
            generator.generate(model, prompt, &params),
        )
        .await
        .unwrap_or(Err(InferenceError::Timeout));

        match attempt {
            Ok(raw) => {
                let polished = postprocess::polish(
                    &raw,
                    prompt,
                    persona.max_reply_chars(),
                    persona.closing_emoji(emotion),
                );
                if let Some(text) = polished {
                    tracing::debug!(model, "Model produced a reply");
                    return Ok((model, text));
                }
                tracing::warn!(model, "Model output was empty after cleanup");
                last_error = InferenceError::EmptyOutput;
            }
            // Every model shares the token, later ones would fail the same way
            Err(InferenceError::MissingCredentials) => {
                return Err(InferenceError::MissingCredentials);
            }
            Err(err) => {
                tracing::warn!(model, error = %err, "Model attempt failed");
                last_error = err;
            }
        }
    }

    Err(last_error)
}
