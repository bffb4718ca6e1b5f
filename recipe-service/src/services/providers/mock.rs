//! Scripted provider for tests and offline runs.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with on every call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Echo the prompt back as a canned recipe.
    Echo,
    /// Return this exact text.
    Text(String),
    /// Return a response with no text at all.
    NoText,
    /// Reject the prompt as a content-policy violation.
    ContentFiltered,
    /// Fail with an API error carrying this message.
    Failure(String),
}

/// Mock text provider.
pub struct MockTextProvider {
    outcome: MockOutcome,
    healthy: bool,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            healthy: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn echo() -> Self {
        Self::new(MockOutcome::Echo)
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(MockOutcome::Text(text.into()))
    }

    /// Make `health_check` fail, as if the upstream were unreachable.
    pub fn unavailable(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let text = match &self.outcome {
            MockOutcome::Echo => Some(format!("Mock recipe for:\n{}", prompt.trim())),
            MockOutcome::Text(text) => Some(text.clone()),
            MockOutcome::NoText => None,
            MockOutcome::ContentFiltered => {
                return Err(ProviderError::ContentFiltered {
                    reason: Some("SAFETY".to_string()),
                })
            }
            MockOutcome::Failure(message) => return Err(ProviderError::ApiError(message.clone())),
        };

        Ok(ProviderResponse {
            output_tokens: text.as_ref().map(|t| t.len() as i32 / 4).unwrap_or(0),
            text,
            input_tokens: prompt.len() as i32 / 4,
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.healthy {
            Ok(())
        } else {
            Err(ProviderError::NetworkError(
                "mock provider marked unavailable".to_string(),
            ))
        }
    }
}
