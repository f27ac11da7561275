use base64::Engine;
use serde::{Deserialize, Serialize};

use super::{build_http_client, ensure_success, map_send_error, LlmError, TextModel, VisionModel};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Preferred Gemini models in order of preference.
pub const GEMINI_MODELS: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-2.0-flash-001",
    "gemini-2.5-flash",
    "gemini-2.5-pro",
    "gemini-flash-latest",
    "gemini-pro-latest",
];

/// Blocking client for the Gemini `generateContent` REST API.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: normalize_model_name(model),
            client: build_http_client(timeout_secs)?,
            timeout_secs,
        })
    }

    /// Replace the configured model with the first preferred model the
    /// account can actually use. Called once while the pipeline is built.
    pub fn with_resolved_model(mut self) -> Result<Self, LlmError> {
        let available = self.list_models()?;
        self.model = select_model(&available).ok_or(LlmError::NoModelAvailable)?;
        tracing::info!(model = %self.model, "Resolved Gemini model");
        Ok(self)
    }

    /// Models that support `generateContent`, without the `models/` prefix.
    pub fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .map_err(|e| map_send_error(e, &self.base_url, self.timeout_secs))?;
        let parsed: GeminiModelList = ensure_success(response)?
            .json()
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        Ok(parsed
            .models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent")
            })
            .map(|m| normalize_model_name(&m.name))
            .collect())
    }

    fn generate_content(&self, parts: Vec<Part<'_>>) -> Result<String, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| map_send_error(e, &self.base_url, self.timeout_secs))?;

        let parsed: GenerateResponse = ensure_success(response)?
            .json()
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        parsed.text()
    }
}

/// Pick the first preferred model present, else any `gemini*` model.
pub fn select_model(available: &[String]) -> Option<String> {
    GEMINI_MODELS
        .iter()
        .find(|preferred| available.iter().any(|m| m.as_str() == **preferred))
        .map(|m| m.to_string())
        .or_else(|| available.iter().find(|m| m.starts_with("gemini")).cloned())
}

fn normalize_model_name(name: &str) -> String {
    name.trim().trim_start_matches("models/").to_string()
}

impl TextModel for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.generate_content(vec![Part::Text { text: prompt }])
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

impl VisionModel for GeminiClient {
    fn describe_image(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, LlmError> {
        let data = base64::engine::general_purpose::STANDARD.encode(image);
        self.generate_content(vec![
            Part::Text { text: prompt },
            Part::InlineData {
                inline_data: InlineData { mime_type, data },
            },
        ])
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// ═══════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(self) -> Result<String, LlmError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(LlmError::MalformedResponse("Empty Gemini response".into()));
        }
        Ok(text)
    }
}

#[derive(Deserialize)]
struct GeminiModelList {
    #[serde(default)]
    models: Vec<GeminiModelInfo>,
}

#[derive(Deserialize)]
struct GeminiModelInfo {
    name: String,
    #[serde(default, rename = "supportedGenerationMethods")]
    supported_generation_methods: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_trims_url_and_model_prefix() {
        let client = GeminiClient::new(
            "https://example.test/v1beta/",
            "AIzaKey",
            "models/gemini-2.0-flash",
            30,
        )
        .unwrap();
        assert_eq!(client.base_url, "https://example.test/v1beta");
        assert_eq!(TextModel::model_name(&client), "gemini-2.0-flash");
        assert_eq!(client.timeout_secs, 30);
    }

    #[test]
    fn select_model_follows_preference_order() {
        let available = vec![
            "gemini-2.5-pro".to_string(),
            "gemini-2.0-flash-001".to_string(),
        ];
        assert_eq!(select_model(&available).as_deref(), Some("gemini-2.0-flash-001"));
    }

    #[test]
    fn select_model_falls_back_to_any_gemini() {
        let available = vec!["text-bison".to_string(), "gemini-exp-1206".to_string()];
        assert_eq!(select_model(&available).as_deref(), Some("gemini-exp-1206"));
    }

    #[test]
    fn select_model_none_when_no_gemini() {
        assert!(select_model(&["text-bison".to_string()]).is_none());
    }

    #[test]
    fn image_part_serializes_as_inline_data() {
        let part = Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/png",
                data: "AAAA".into(),
            },
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inline_data"]["mime_type"], "image/png");
        assert_eq!(json["inline_data"]["data"], "AAAA");
    }

    #[test]
    fn response_text_joins_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text().unwrap(), "{\"a\":1}");
    }

    #[test]
    fn empty_response_is_malformed() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(parsed.text(), Err(LlmError::MalformedResponse(_))));
    }
}
