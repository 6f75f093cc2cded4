//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services used by the mention-bot:
//! - Chat services (e.g., Slack)
//! - LLM services (e.g., OpenAI)
//! - The HTTP liveness endpoint
//!
//! Chat and LLM modules define both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod chat;
pub mod health;
pub mod llm;
