use crate::{
    config::{Config, SamplingParams},
    constants::API_KEY_HEADER,
    errors::{ContentError, ContentResult},
    logging::log_api_call,
    models::ApiCallLog,
};
use async_trait::async_trait;
use chrono::Utc;
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::{json, Value};
use std::{env, time::Instant};

/// Everything one generation call sends to the model.
#[derive(Debug, Clone)]
pub struct GenerationInput<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub system_instruction: &'a str,
    pub sampling: SamplingParams,
}

/// The external generation service. Returns the model's text, which may be
/// empty; turning empty text into a failure is the orchestrator's job.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_content(&self, input: GenerationInput<'_>) -> ContentResult<String>;
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key_var: String,
    api_key: OnceCell<String>,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.api_base_url, &config.api_key_var)
    }

    pub fn with_base_url(base_url: &str, api_key_var: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key_var: api_key_var.to_string(),
            api_key: OnceCell::new(),
        }
    }

    /// Reads the credential on first use and keeps it afterwards. A missing
    /// key is not cached, so a later call can pick it up.
    fn api_key(&self) -> ContentResult<&str> {
        self.api_key
            .get_or_try_init(|| match env::var(&self.api_key_var) {
                Ok(key) if !key.trim().is_empty() => Ok(key),
                _ => Err(ContentError::MissingCredential),
            })
            .map(String::as_str)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

/// Request body for `generateContent`.
pub fn build_payload(input: &GenerationInput<'_>) -> Value {
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": input.prompt }] }],
        "systemInstruction": { "parts": [{ "text": input.system_instruction }] },
        "generationConfig": {
            "temperature": input.sampling.temperature,
            "topK": input.sampling.top_k,
            "topP": input.sampling.top_p
        }
    })
}

/// Concatenates the text parts of the first candidate. Missing fields give an
/// empty string.
pub fn extract_text(body: &Value) -> String {
    body["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part["text"].as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}

fn error_message(body: &Value) -> Option<String> {
    body["error"]["message"].as_str().map(|s| s.to_string())
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate_content(&self, input: GenerationInput<'_>) -> ContentResult<String> {
        let api_key = self.api_key()?;
        let endpoint = self.endpoint(input.model);
        let payload = build_payload(&input);

        let start_time = Instant::now();
        let response = self
            .http
            .post(&endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ContentError::remote(format!("Request failed: {}", e)))?;

        let status = response.status();
        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: endpoint.clone(),
            request_summary: format!("generateContent model={}", input.model),
            response_status: status.as_u16(),
            response_time_ms: start_time.elapsed().as_millis(),
        });

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&error_text)
                .ok()
                .and_then(|body| error_message(&body))
                .unwrap_or_else(|| format!("API returned error: {} - {}", status, error_text));
            log::error!("Gemini API error: {}", message);
            return Err(ContentError::Remote(message));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ContentError::remote(format!("Failed to parse API response: {}", e)))?;

        if let Some(message) = error_message(&body) {
            log::error!("Gemini API error: {}", message);
            return Err(ContentError::Remote(message));
        }

        Ok(extract_text(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SYSTEM_INSTRUCTION;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn input<'a>(prompt: &'a str) -> GenerationInput<'a> {
        GenerationInput {
            model: "gemini-test",
            prompt,
            system_instruction: SYSTEM_INSTRUCTION,
            sampling: SamplingParams::default(),
        }
    }

    fn client_with_key(server: &MockServer, var: &str) -> GeminiClient {
        env::set_var(var, "test-api-key");
        GeminiClient::with_base_url(&server.uri(), var)
    }

    #[test]
    fn test_payload_shape() {
        let payload = build_payload(&input("Topic: Rust"));
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "Topic: Rust");
        assert_eq!(payload["contents"][0]["role"], "user");
        assert_eq!(
            payload["systemInstruction"]["parts"][0]["text"],
            SYSTEM_INSTRUCTION
        );
        assert_eq!(payload["generationConfig"]["topK"], 40);
        assert!((payload["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((payload["generationConfig"]["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "## Hook\n" }, { "text": "- x" }] } }]
        });
        assert_eq!(extract_text(&body), "## Hook\n- x");
        assert_eq!(extract_text(&json!({ "candidates": [] })), "");
    }

    #[tokio::test]
    async fn test_generate_content_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-test:generateContent"))
            .and(header(API_KEY_HEADER, "test-api-key"))
            .and(body_partial_json(json!({
                "generationConfig": { "topK": 40 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "## Hook\nHello" }] } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_with_key(&mock_server, "DRCONTENT_TEST_KEY_SUCCESS");
        let text = client.generate_content(input("Topic: Rust")).await.unwrap();
        assert_eq!(text, "## Hook\nHello");
    }

    #[tokio::test]
    async fn test_generate_content_surfaces_api_error_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "API key not valid.", "status": "PERMISSION_DENIED" }
            })))
            .mount(&mock_server)
            .await;

        let client = client_with_key(&mock_server, "DRCONTENT_TEST_KEY_ERROR");
        let err = client.generate_content(input("x")).await.unwrap_err();
        assert!(matches!(err, ContentError::Remote(ref m) if m == "API key not valid."));
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client =
            GeminiClient::with_base_url(&mock_server.uri(), "DRCONTENT_TEST_KEY_DEFINITELY_UNSET");
        let err = client.generate_content(input("x")).await.unwrap_err();
        assert!(matches!(err, ContentError::MissingCredential));
    }
}
