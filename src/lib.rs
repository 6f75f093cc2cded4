//! Library root for `mention-bot`.
//!
//! Mention-bot answers `@`-mentions in Slack using an OpenAI chat model:
//! - Listens for mentions over Slack Socket Mode
//! - Forwards the mentioning message to the completion API
//! - Posts the completion (or a description of the failure) back into the conversation
//!
//! An HTTP liveness endpoint runs alongside the listener so a process supervisor
//! can confirm the bot is up. Chat and LLM services sit behind traits so that
//! other implementations can be swapped in.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the mention-bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with LLM and chat clients
/// - Runs the chat listener and health check server until either stops
pub async fn start(config: Config) -> Void {
    info!("Starting mention-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install the default crypto provider."))?;

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
