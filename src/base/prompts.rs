//! Prompt templates for LLM usage.

/// Default system directive sent ahead of every user message.
pub const SYSTEM_DIRECTIVE: &str = "You are a helpful Slack assistant.";
