use std::time::Duration;

use reqwest::{header, Client};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::{Deserialize, Serialize};

use super::{error::InferenceError, GenerationParameters, TextGeneration};

/// Default request timeout in seconds, models may need to load before answering
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    do_sample: bool,
    return_full_text: bool,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
    use_cache: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// The inference host answers either with a batch, a single object, or an error object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
    Error { error: String },
}

/// HTTP client for the hosted text-generation API
///
/// Every model lives at `{base_url}/{model}` and is called with the same bearer token.
pub struct HuggingFaceClient {
    base_url: String,
    api_token: Option<String>,
    http_client: ClientWithMiddleware,
}

impl HuggingFaceClient {
    /// Creates a new inference client
    ///
    /// # Panics
    ///
    /// If the HTTP client fails to be created
    #[must_use]
    pub fn new(base_url: String, api_token: Option<String>) -> Self {
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
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            http_client,
        }
    }
}

#[async_trait::async_trait]
impl TextGeneration for HuggingFaceClient {
    fn has_credentials(&self) -> bool {
        self.api_token.is_some()
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        params: &GenerationParameters,
    ) -> Result<String, InferenceError> {
        let Some(api_token) = &self.api_token else {
            return Err(InferenceError::MissingCredentials);
        };

        let request = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: params.max_new_tokens,
                temperature: params.temperature,
                top_p: params.top_p,
                do_sample: true,
                return_full_text: false,
            },
            options: InferenceOptions {
                wait_for_model: true,
                use_cache: false,
            },
        };
        let json_body = serde_json::to_string(&request)
            .map_err(|e| InferenceError::MalformedPayload(e.to_string()))?;

        let url = format!("{}/{model}", self.base_url);
        let response = self
            .http_client
            .post(url)
            .bearer_auth(api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(json_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(InferenceError::UpstreamStatus { status, body });
        }

        let body = response.text().await?;
        extract_generated_text(&body)
    }
}

/// Pulls the first generated text out of an inference payload
fn extract_generated_text(body: &str) -> Result<String, InferenceError> {
    let parsed: InferenceResponse = serde_json::from_str(body)
        .map_err(|e| InferenceError::MalformedPayload(e.to_string()))?;

    let text = match parsed {
        InferenceResponse::Batch(items) => items
            .into_iter()
            .next()
            .map(|item| item.generated_text)
            .ok_or(InferenceError::EmptyOutput)?,
        InferenceResponse::Single(item) => item.generated_text,
        InferenceResponse::Error { error } => return Err(InferenceError::MalformedPayload(error)),
    };

    if text.trim().is_empty() {
        return Err(InferenceError::EmptyOutput);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params() -> GenerationParameters {
        GenerationParameters {
            max_new_tokens: 120,
            temperature: 0.7,
            top_p: 0.9,
        }
    }

    #[test]
    fn test_extract_generated_text_shapes() {
        let batch = r#"[{"generated_text":"Hello there."}]"#;
        assert_eq!(extract_generated_text(batch).unwrap(), "Hello there.");

        let single = r#"{"generated_text":"Hi!"}"#;
        assert_eq!(extract_generated_text(single).unwrap(), "Hi!");

        assert!(matches!(
            extract_generated_text("[]"),
            Err(InferenceError::EmptyOutput)
        ));
        assert!(matches!(
            extract_generated_text(r#"[{"generated_text":"   "}]"#),
            Err(InferenceError::EmptyOutput)
        ));
        assert!(matches!(
            extract_generated_text(r#"{"error":"Model is currently loading"}"#),
            Err(InferenceError::MalformedPayload(msg)) if msg.contains("loading")
        ));
        assert!(matches!(
            extract_generated_text("not json"),
            Err(InferenceError::MalformedPayload(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_posts_to_model_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/org/model-a"))
            .and(header("authorization", "Bearer hf_test"))
            .and(body_partial_json(json!({
                "inputs": "User: hi\nAssistant:",
                "parameters": { "max_new_tokens": 120, "return_full_text": false },
                "options": { "wait_for_model": true }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "generated_text": "Hello, friend." }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HuggingFaceClient::new(
            format!("{}/models/", server.uri()),
            Some("hf_test".to_string()),
        );
        let text = client
            .generate("org/model-a", "User: hi\nAssistant:", &params())
            .await
            .unwrap();
        assert_eq!(text, "Hello, friend.");
    }

    #[tokio::test]
    async fn test_generate_non_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let client = HuggingFaceClient::new(server.uri(), Some("hf_test".to_string()));
        let result = client.generate("model", "prompt", &params()).await;

        match result {
            Err(InferenceError::UpstreamStatus { status, body }) => {
                assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(body, "overloaded");
            }
            other => panic!("Expected UpstreamStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_without_token_never_calls_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = HuggingFaceClient::new(server.uri(), None);
        assert!(!client.has_credentials());

        let result = client.generate("model", "prompt", &params()).await;
        assert!(matches!(result, Err(InferenceError::MissingCredentials)));
    }
}
