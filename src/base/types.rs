//! Common types shared across the application.

use serde::{Deserialize, Serialize};

/// Error type used throughout the application.
pub type Err = anyhow::Error;
/// Result type used throughout the application.
pub type Res<T> = Result<T, Err>;
/// Result type for operations that return nothing.
pub type Void = Res<()>;

/// An `@`-mention of the bot, as delivered by the chat platform.
///
/// The reply capability is not part of the event itself: handlers receive a
/// [`ChatClient`](crate::service::chat::ChatClient) alongside it and reply
/// into `channel_id` (and `thread_ts`, when set).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionEvent {
    /// Raw message text, including the leading mention token (e.g. `<@U123> hello`).
    pub text: String,
    /// The conversation the mention was posted in.
    pub channel_id: String,
    /// The thread the mention was posted in; empty for top-level messages.
    pub thread_ts: String,
}
