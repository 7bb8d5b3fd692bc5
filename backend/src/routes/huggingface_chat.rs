use std::sync::Arc;

use axum::{Extension, Json};
use common_types::{ChatTurn, Emotion};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{
    chat::{self, Persona, PromptContext},
    inference::TextGeneration,
    types::{non_blank, ValidatedJson},
};

#[derive(Debug, Deserialize, JsonSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// What the user just said
    #[serde(default)]
    #[validate(custom(function = "non_blank", message = "missing_message"))]
    pub message: String,
    /// Free-text emotion tag chosen in the app, e.g. `sad`
    pub emotion: Option<String>,
    /// Prior turns, oldest first
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    /// Echo of the request's emotion tag, `neutral` when none was sent
    pub emotion: String,
    /// ISO-8601 UTC timestamp
    pub timestamp: String,
    /// Present and `true` when the reply is a canned one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_fallback: Option<bool>,
}

/// Companion chat endpoint
///
/// Always answers 200 once the message is present: any inference problem,
/// including a missing API token, is answered with a canned reply.
#[instrument(skip_all)]
pub async fn handler(
    Extension(text_generation): Extension<Arc<dyn TextGeneration>>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> Json<ChatResponse> {
    let emotion_tag = request
        .emotion
        .as_deref()
        .map(str::trim)
        .filter(|tag| !tag.is_empty());
    let emotion = Emotion::from_tag(emotion_tag);

    let persona = Persona::Companion;
    let prompt = persona.build_prompt(&PromptContext {
        message: &request.message,
        history: &request.conversation_history,
        emotion_tag,
        mood_data: None,
    });

    let reply = chat::respond(text_generation.as_ref(), persona, &prompt, emotion).await;
    let is_fallback = reply.is_fallback().then_some(true);

    Json(ChatResponse {
        success: true,
        response: reply.text,
        emotion: emotion_tag.map_or_else(|| Emotion::Neutral.to_string(), ToString::to_string),
        timestamp: super::timestamp(),
        is_fallback,
    })
}
