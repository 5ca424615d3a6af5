//! HTTP client for OpenAI-compatible chat-completion endpoints.

use async_trait::async_trait;
use pipeline::{
    ChatMessage, Completion, GenerationError, ModelName, ResearchError, TextGenerator, TokenUsage,
};
use tracing::{debug, instrument};

use crate::config::LlmConfig;
use crate::wire::{ChatRequest, ChatResponse};

/// Sends `{model, messages}` to `<endpoint>/chat/completions` and returns the
/// first choice's text.
#[derive(Debug, Clone)]
pub struct OpenAiCompatClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: ModelName,
}

impl OpenAiCompatClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// [`ResearchError::Configuration`] if the API key or model is missing, or
    /// the HTTP client cannot be constructed.
    pub fn new(config: &LlmConfig) -> Result<Self, ResearchError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ResearchError::Configuration {
                message: "no API key configured for the generation backend".to_string(),
            })?;
        let model = ModelName::new(config.model.clone()).ok_or_else(|| {
            ResearchError::Configuration {
                message: "generation model name is empty".to_string(),
            }
        })?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ResearchError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            url: format!("{}/chat/completions", config.endpoint.trim_end_matches('/')),
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &ModelName {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OpenAiCompatClient {
    #[instrument(skip_all, fields(model = %self.model, messages = messages.len()))]
    async fn generate(&self, messages: &[ChatMessage]) -> Result<Completion, GenerationError> {
        let body = ChatRequest {
            model: self.model.as_str(),
            messages,
        };

        debug!(url = %self.url, "Sending chat completion request");
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let completion = parse_completion(&text)?;
        debug!(chars = completion.text.len(), "Chat completion received");
        Ok(completion)
    }
}

fn transport_error(err: reqwest::Error) -> GenerationError {
    if err.is_timeout() {
        GenerationError::Timeout
    } else {
        GenerationError::Transport(err.to_string())
    }
}

fn parse_completion(body: &str) -> Result<Completion, GenerationError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or(GenerationError::EmptyChoices)?;
    let content = choice.message.content.ok_or_else(|| {
        GenerationError::MalformedResponse("first choice has no message content".to_string())
    })?;

    Ok(Completion {
        text: content.trim().to_string(),
        usage: parsed
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  hi \n"}},
                                   {"message":{"role":"assistant","content":"second"}}]}"#;
        let completion = parse_completion(body).unwrap();
        assert_eq!(completion.text, "hi");
        assert_eq!(completion.usage, None);
    }

    #[test]
    fn test_parse_reads_usage() {
        let body = r#"{"choices":[{"message":{"content":"x"}}],
                       "usage":{"prompt_tokens":12,"completion_tokens":3,"total_tokens":15}}"#;
        assert_eq!(
            parse_completion(body).unwrap().usage,
            Some(TokenUsage::new(12, 3))
        );
    }

    #[test]
    fn test_parse_empty_choices() {
        assert_eq!(
            parse_completion(r#"{"choices":[]}"#).unwrap_err(),
            GenerationError::EmptyChoices
        );
    }

    #[test]
    fn test_parse_null_content_is_malformed() {
        let err = parse_completion(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_non_json_is_malformed() {
        assert!(matches!(
            parse_completion("<html>gateway</html>"),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_new_requires_api_key() {
        let err = OpenAiCompatClient::new(&LlmConfig::default()).unwrap_err();
        assert!(matches!(err, ResearchError::Configuration { .. }));
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let client = OpenAiCompatClient::new(&LlmConfig {
            endpoint: "http://localhost:8000/v1/".to_string(),
            api_key: Some("k".to_string()),
            ..LlmConfig::default()
        })
        .unwrap();
        assert_eq!(client.url, "http://localhost:8000/v1/chat/completions");
        assert_eq!(client.model().as_str(), "deepseek-v3.1");
    }
}
