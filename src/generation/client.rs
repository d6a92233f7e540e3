use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::generation::{
    GenerationConfig, GenerationError, GenerationSettings, SafetySetting, TextGenerator,
};

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    pub fn new(client: reqwest::Client, settings: GeminiSettings) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url, self.settings.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a GenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GenerateResponse {
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        settings: &GenerationSettings,
    ) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: &settings.config,
            safety_settings: settings.safety,
        };

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GenerationError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = resp.json().await?;
        first_text(parsed)
    }
}

/// Trimmed text of the first candidate, or why there is none.
fn first_text(resp: GenerateResponse) -> Result<String, GenerationError> {
    if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationError::Blocked(reason));
    }

    let candidate = resp.candidates.into_iter().next().unwrap_or_default();
    let text = candidate
        .content
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .map(|t| t.trim().to_string())
        .unwrap_or_default();

    if !text.is_empty() {
        return Ok(text);
    }
    match candidate.finish_reason {
        Some(reason) => Err(GenerationError::Incomplete(reason)),
        None => Err(GenerationError::Empty),
    }
}

#[cfg(test)]
mod tests {
    use axum::Json;
    use axum::Router;
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use serde_json::{Value, json};

    use super::*;
    use crate::generation::{COVER_LETTER, RESUME_KEYWORDS};
    use crate::testing::{Captured, serve};

    fn response(value: Value) -> GenerateResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn returns_trimmed_text() {
        let resp = response(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "\n Dear Hiring Manager, \n" }] },
                "finishReason": "STOP"
            }]
        }));
        assert_eq!(first_text(resp).unwrap(), "Dear Hiring Manager,");
    }

    #[test]
    fn block_reason_is_reported() {
        let resp = response(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        let err = first_text(resp).unwrap_err();
        assert!(matches!(err, GenerationError::Blocked(ref r) if r == "SAFETY"));
        assert_eq!(err.to_string(), "Content generation blocked: SAFETY");
    }

    #[test]
    fn finish_reason_without_content() {
        let resp = response(json!({ "candidates": [{ "finishReason": "RECITATION" }] }));
        assert_eq!(
            first_text(resp).unwrap_err().to_string(),
            "Content generation issue: RECITATION"
        );

        let resp = response(json!({ "candidates": [] }));
        assert!(matches!(first_text(resp), Err(GenerationError::Empty)));
    }

    #[tokio::test]
    async fn posts_prompt_with_settings() {
        let seen: Captured<(String, String, Value)> = Captured::default();
        let recorder = seen.clone();
        let app = Router::new().route(
            "/v1beta/models/{call}",
            post(
                move |Path(call): Path<String>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    let key = headers["x-goog-api-key"].to_str().unwrap().to_string();
                    recorder.push((call, key, body));
                    Json(json!({
                        "candidates": [{ "content": { "parts": [{ "text": "Dear Hiring Manager," }] } }]
                    }))
                },
            ),
        );
        let base = serve(app).await;

        let client = GeminiClient::new(
            reqwest::Client::new(),
            GeminiSettings {
                api_key: "g-key".into(),
                model: "gemini-test".into(),
                base_url: base,
            },
        );
        let text = client.generate("write it", &COVER_LETTER).await.unwrap();
        assert_eq!(text, "Dear Hiring Manager,");

        let (call, key, body) = seen.all().remove(0);
        assert_eq!(call, "gemini-test:generateContent");
        assert_eq!(key, "g-key");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "write it");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(body["generationConfig"]["topK"], 1);
        assert_eq!(body["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(
            body["safetySettings"][0],
            json!({ "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" })
        );
    }

    #[tokio::test]
    async fn optional_sampling_fields_are_omitted() {
        let seen: Captured<Value> = Captured::default();
        let recorder = seen.clone();
        let app = Router::new().route(
            "/v1beta/models/{call}",
            post(move |Json(body): Json<Value>| async move {
                recorder.push(body);
                Json(json!({ "candidates": [{ "content": { "parts": [{ "text": "{}" }] } }] }))
            }),
        );
        let base = serve(app).await;

        let client = GeminiClient::new(
            reqwest::Client::new(),
            GeminiSettings {
                api_key: "k".into(),
                model: "m".into(),
                base_url: base,
            },
        );
        client.generate("p", &RESUME_KEYWORDS).await.unwrap();

        let config = &seen.all()[0]["generationConfig"];
        assert!(config.get("topK").is_none());
        assert!(config.get("topP").is_none());
        assert_eq!(config["maxOutputTokens"], 300);
    }

    #[tokio::test]
    async fn api_error_message_is_surfaced() {
        let app = Router::new().route(
            "/v1beta/models/{call}",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" } })),
                )
            }),
        );
        let base = serve(app).await;

        let client = GeminiClient::new(
            reqwest::Client::new(),
            GeminiSettings {
                api_key: "bad".into(),
                model: "m".into(),
                base_url: base,
            },
        );
        let err = client.generate("p", &COVER_LETTER).await.unwrap_err();
        match err {
            GenerationError::Backend { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
