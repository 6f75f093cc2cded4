//! Integration with Large Language Model services.
//!
//! This module defines the `GenericLlmClient` trait that can be implemented
//! for different LLM providers, with a default implementation for OpenAI.

pub mod openai;

use std::{ops::Deref, sync::Arc, time::Duration};

use async_trait::async_trait;
use thiserror::Error;

// Errors.

/// Failure of a single completion call.
///
/// The `Display` output is the description shown to users in the error reply,
/// so variants carry the upstream message verbatim where one exists.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The provider rejected or failed the request (auth, quota, network, malformed response).
    #[error("{0}")]
    Upstream(String),
    /// The provider did not answer within the configured timeout.
    #[error("completion request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
    /// The provider answered without any completion text.
    #[error("completion response contained no message content")]
    EmptyResponse,
}

// Traits.

/// Generic LLM client trait that clients must implement.
///
/// Implementing this trait allows different LLM providers to be used with the bot.
#[async_trait]
pub trait GenericLlmClient: Send + Sync + 'static {
    /// Generate a single reply to a user message.
    ///
    /// Issues exactly one request to the provider. The message is passed through
    /// as-is; empty messages are not rejected locally.
    async fn generate_response(&self, message: &str) -> Result<String, CompletionError>;
}

// Structs.

/// LLM client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct LlmClient {
    inner: Arc<dyn GenericLlmClient>,
}

impl Deref for LlmClient {
    type Target = dyn GenericLlmClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl LlmClient {
    pub fn new(inner: Arc<dyn GenericLlmClient>) -> Self {
        Self { inner }
    }
}
