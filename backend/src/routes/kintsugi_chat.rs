use std::sync::Arc;

use axum::{Extension, Json};
use common_types::{ChatTurn, Emotion, UserMoodData};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{
    chat::{self, Persona, PromptContext},
    inference::TextGeneration,
    types::{non_blank, AppError, ValidatedJson},
};

#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct KintsugiChatRequest {
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "missing_message"))]
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,
    /// Mood tracking summary, `currentMood` selects the fallback table
    pub user_mood_data: Option<UserMoodData>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KintsugiChatResponse {
    pub response: String,
    /// Model that wrote the reply, or `fallback`
    pub model: String,
    /// ISO-8601 UTC timestamp
    pub timestamp: String,
}

/// Kintsugi chat endpoint
///
/// Tries each Kintsugi model in order and keeps the first usable reply.
///
/// # Errors
///
/// - `missing_credentials` (500) - no inference API token is configured
#[instrument(skip_all)]
pub async fn handler(
    Extension(text_generation): Extension<Arc<dyn TextGeneration>>,
    ValidatedJson(request): ValidatedJson<KintsugiChatRequest>,
) -> Result<Json<KintsugiChatResponse>, AppError> {
    if !text_generation.has_credentials() {
        return Err(AppError::missing_inference_credentials());
    }

    let emotion = Emotion::from_tag(
        request
            .user_mood_data
            .as_ref()
            .and_then(|mood| mood.current_mood.as_deref()),
    );

    let persona = Persona::Kintsugi;
    let prompt = persona.build_prompt(&PromptContext {
        message: &request.message,
        history: &request.conversation_history,
        emotion_tag: None,
        mood_data: request.user_mood_data.as_ref(),
    });

    let reply = chat::respond(text_generation.as_ref(), persona, &prompt, emotion).await;

    Ok(Json(KintsugiChatResponse {
        model: reply.model_name().to_string(),
        response: reply.text,
        timestamp: super::timestamp(),
    }))
}
