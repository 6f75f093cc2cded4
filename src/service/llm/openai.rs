//! OpenAI implementation of the LLM client.
//!
//! Sends one chat completion per user message: the configured system directive
//! followed by the user's text. The call is bounded by the configured timeout
//! and is never retried here.

use std::{sync::Arc, time::Duration};

use async_openai::{
    Client,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use tokio::time::timeout;
use tracing::{debug, info, instrument};

use crate::base::config::Config;

use super::{CompletionError, GenericLlmClient, LlmClient};

// Extra methods on `LlmClient` applied by the openai implementation.

impl LlmClient {
    pub fn openai(config: &Config) -> Self {
        let client = OpenAiLlmClient::new(config);
        Self { inner: Arc::new(client) }
    }
}

impl From<OpenAIError> for CompletionError {
    fn from(err: OpenAIError) -> Self {
        CompletionError::Upstream(err.to_string())
    }
}

// Specific implementations.

/// OpenAI LLM client implementation.
#[derive(Clone)]
pub struct OpenAiLlmClient {
    client: Client<OpenAIConfig>,
    config: Config,
}

impl OpenAiLlmClient {
    /// Create a new OpenAI LLM client.
    #[instrument(name = "OpenAiLlmClient::new", skip_all)]
    pub fn new(config: &Config) -> Self {
        let mut cfg = OpenAIConfig::new().with_api_key(config.api_key.clone());

        if let Some(api_base) = &config.api_base {
            cfg = cfg.with_api_base(api_base.clone());
        }

        // Upstream failures are reported straight back; the client's own retries stay off.
        let no_retry = ExponentialBackoffBuilder::new().with_max_elapsed_time(Some(Duration::ZERO)).build();

        Self {
            client: Client::with_config(cfg).with_backoff(no_retry),
            config: config.clone(),
        }
    }

    /// Build the chat completion request for a single user message.
    fn build_request(&self, message: &str) -> Result<CreateChatCompletionRequest, OpenAIError> {
        let system_message: ChatCompletionRequestMessage = ChatCompletionRequestSystemMessageArgs::default().content(self.config.system_directive.clone()).build()?.into();
        let user_message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default().content(message).build()?.into();

        CreateChatCompletionRequestArgs::default()
            .model(self.config.completion_model.clone())
            .messages(vec![system_message, user_message])
            .build()
    }
}

#[async_trait]
impl GenericLlmClient for OpenAiLlmClient {
    #[instrument(name = "OpenAiLlmClient::generate_response", skip_all, fields(model = %self.config.completion_model))]
    async fn generate_response(&self, message: &str) -> Result<String, CompletionError> {
        let request = self.build_request(message)?;
        let limit = self.config.completion_timeout();

        debug!("Sending chat completion request ...");

        let response = timeout(limit, self.client.chat().create(request)).await.map_err(|_| CompletionError::Timeout(limit))??;

        if let Some(usage) = &response.usage {
            info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion succeeded."
            );
        }

        response.choices.into_iter().next().and_then(|choice| choice.message.content).ok_or(CompletionError::EmptyResponse)
    }
}

// Tests.
