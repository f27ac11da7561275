use serde::{Deserialize, Serialize};

use super::{build_http_client, ensure_success, map_send_error, LlmError, TextModel};

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4o-mini";

/// Client for an OpenAI-compatible `chat/completions` endpoint.
pub struct OpenRouterClient {
    base_url: String,
    api_key: String,
    model: String,
    app_url: Option<String>,
    app_name: Option<String>,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OpenRouterClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            app_url: None,
            app_name: None,
            client: build_http_client(timeout_secs)?,
            timeout_secs,
        })
    }

    /// Attribution headers (`HTTP-Referer`, `X-Title`).
    pub fn with_attribution(mut self, app_url: Option<String>, app_name: Option<String>) -> Self {
        self.app_url = app_url;
        self.app_name = app_name;
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl TextModel for OpenRouterClient {
    fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.2,
        };

        let mut request = self.client.post(&url).bearer_auth(&self.api_key).json(&body);
        if let Some(app_url) = &self.app_url {
            request = request.header("HTTP-Referer", app_url);
        }
        if let Some(app_name) = &self.app_name {
            request = request.header("X-Title", app_name);
        }

        let response = request
            .send()
            .map_err(|e| map_send_error(e, &self.base_url, self.timeout_secs))?;
        let parsed: ChatResponse = ensure_success(response)?
            .json()
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| LlmError::MalformedResponse("Empty completion".into()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_trims_trailing_slash() {
        let client =
            OpenRouterClient::new("https://openrouter.ai/api/v1/", "sk-or", "m", 20).unwrap();
        assert_eq!(client.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(client.model_name(), "m");
    }

    #[test]
    fn attribution_is_optional() {
        let client =
            OpenRouterClient::new(DEFAULT_OPENROUTER_BASE_URL, "k", DEFAULT_OPENROUTER_MODEL, 20)
                .unwrap()
                .with_attribution(Some("https://circular.example".into()), None);
        assert_eq!(client.app_url.as_deref(), Some("https://circular.example"));
        assert!(client.app_name.is_none());
    }

    #[test]
    fn completion_content_is_extracted() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"{\"nudge\":\"x\"}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("{\"nudge\":\"x\"}")
        );
    }
}
