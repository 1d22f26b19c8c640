use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};

use crate::error::{FlowError, Result};

pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// One prompt for one model, the unit sent to the inference endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRequest {
    pub model: String,
    pub prompt: String,
}

/// Narrow seam around the remote model so it can be swapped for a test double
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Issue exactly one completion request and return the completion text
    async fn complete(&self, request: &InferenceRequest) -> Result<String>;
}

/// Connection settings for the OpenRouter chat completions endpoint
#[derive(Clone)]
pub struct InferenceConfig {
    pub api_key: String,
    pub endpoint_url: String,
}

impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

impl InferenceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint_url: OPENROUTER_URL.to_string(),
        }
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = endpoint_url.into();
        self
    }

    /// Read the bearer credential from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_key(std::env::var(API_KEY_VAR).ok())
    }

    fn from_key(key: Option<String>) -> Result<Self> {
        match key {
            Some(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(FlowError::MissingCredential(API_KEY_VAR)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

impl ChatCompletionRequest {
    pub(crate) fn single_user_message(request: &InferenceRequest) -> Self {
        Self {
            model: request.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(request.prompt.clone()),
            }],
        }
    }
}

/// Pull the first choice's text out of a chat completion body
fn extract_completion(body: &str) -> Result<String> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|_| FlowError::EmptyCompletion)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(FlowError::EmptyCompletion)
}

/// reqwest-backed client for OpenRouter. Uses the client's default timeout.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Arc<Client>,
    config: InferenceConfig,
}

impl OpenRouterClient {
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            config,
        }
    }
}

#[async_trait]
impl InferenceClient for OpenRouterClient {
    async fn complete(&self, request: &InferenceRequest) -> Result<String> {
        debug!(
            model = %request.model,
            prompt_length = request.prompt.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(&self.config.endpoint_url)
            .bearer_auth(&self.config.api_key)
            .json(&ChatCompletionRequest::single_user_message(request))
            .send()
            .await
            .map_err(|e| {
                error!(model = %request.model, error = %e, "inference request failed");
                FlowError::EndpointUnavailable(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FlowError::EndpointUnavailable(e.to_string()))?;

        if !status.is_success() {
            error!(model = %request.model, status = %status, "inference endpoint returned an error status");
            return Err(FlowError::EndpointUnavailable(format!("status {status}")));
        }

        extract_completion(&body)
    }
}

#[cfg(feature = "rig")]
pub mod rig_client {
    //! OpenRouter access through `rig`'s agent abstraction.

    use async_trait::async_trait;
    use rig::{client::CompletionClient, completion::Prompt, providers::openrouter};

    use super::{InferenceClient, InferenceConfig, InferenceRequest};
    use crate::error::{FlowError, Result};

    pub struct RigInferenceClient {
        client: openrouter::Client,
    }

    impl RigInferenceClient {
        pub fn new(config: &InferenceConfig) -> Self {
            Self {
                client: openrouter::Client::new(&config.api_key),
            }
        }
    }

    #[async_trait]
    impl InferenceClient for RigInferenceClient {
        async fn complete(&self, request: &InferenceRequest) -> Result<String> {
            let agent = self.client.agent(&request.model).build();
            let response = agent
                .prompt(request.prompt.as_str())
                .await
                .map_err(|e| FlowError::EndpointUnavailable(e.to_string()))?;
            if response.trim().is_empty() {
                return Err(FlowError::EmptyCompletion);
            }
            Ok(response)
        }
    }
}
