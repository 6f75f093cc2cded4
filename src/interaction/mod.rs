//! Event handling and user interactions for the mention-bot.
//!
//! This module turns incoming `@`-mentions into completion requests and posts
//! the result (or a description of the failure) back into the conversation.

pub mod app_mention;
