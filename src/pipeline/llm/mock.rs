use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{LlmError, TextModel, VisionModel};

/// Mock text model for testing: returns a fixed reply (or error) and
/// records how often it was called and the last prompt it saw.
pub struct MockTextModel {
    reply: Result<String, LlmError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockTextModel {
    pub fn new(response: &str) -> Self {
        Self::with_reply(Ok(response.to_string()))
    }

    pub fn failing(error: LlmError) -> Self {
        Self::with_reply(Err(error))
    }

    fn with_reply(reply: Result<String, LlmError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

impl TextModel for MockTextModel {
    fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        self.reply.clone()
    }

    fn model_name(&self) -> &str {
        "mock-text"
    }
}

/// Mock multimodal model for testing.
pub struct MockVisionModel {
    reply: Result<String, LlmError>,
    calls: AtomicUsize,
    last_mime: Mutex<Option<String>>,
}

impl MockVisionModel {
    pub fn new(response: &str) -> Self {
        Self::with_reply(Ok(response.to_string()))
    }

    pub fn failing(error: LlmError) -> Self {
        Self::with_reply(Err(error))
    }

    fn with_reply(reply: Result<String, LlmError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_mime: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_mime(&self) -> Option<String> {
        self.last_mime.lock().ok().and_then(|m| m.clone())
    }
}

impl VisionModel for MockVisionModel {
    fn describe_image(
        &self,
        _prompt: &str,
        _image: &[u8],
        mime_type: &str,
    ) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_mime.lock() {
            *last = Some(mime_type.to_string());
        }
        self.reply.clone()
    }

    fn model_name(&self) -> &str {
        "mock-vision"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_text_returns_configured_response() {
        let model = MockTextModel::new("hello");
        assert_eq!(model.generate("prompt").unwrap(), "hello");
        assert_eq!(model.calls(), 1);
        assert_eq!(model.last_prompt().as_deref(), Some("prompt"));
    }

    #[test]
    fn mock_text_can_fail() {
        let model = MockTextModel::failing(LlmError::Timeout(5));
        assert_eq!(model.generate("p").unwrap_err(), LlmError::Timeout(5));
    }

    #[test]
    fn mock_vision_records_mime() {
        let model = MockVisionModel::new("{}");
        model.describe_image("p", &[1, 2, 3], "image/jpeg").unwrap();
        assert_eq!(model.last_mime().as_deref(), Some("image/jpeg"));
        assert_eq!(model.calls(), 1);
    }
}
