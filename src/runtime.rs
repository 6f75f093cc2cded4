//! Runtime services and shared state for the mention-bot.

use tracing::{info, instrument, warn};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    service::{chat::ChatClient, health, llm::LlmClient},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the LLM client, chat client, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The LLM client instance.
    pub llm: LlmClient,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the LLM client.
        let llm = LlmClient::openai(&config);

        // Initialize the slack client.
        let chat = ChatClient::slack(&config, llm.clone()).await?;

        Ok(Self { config, llm, chat })
    }

    /// Run the chat listener and the health check server side by side.
    ///
    /// Returns as soon as either of them stops, propagating its error.
    pub async fn start(&self) -> Void {
        tokio::select! {
            result = self.chat.start() => {
                result?;
                info!("Chat listener stopped.");
            }
            result = health::serve(&self.config) => {
                result?;
                warn!("Health check server stopped.");
            }
        }

        Ok(())
    }
}
