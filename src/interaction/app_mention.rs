//! Handles `@`-mentions of the bot.

use thiserror::Error;
use tracing::{Instrument, error, info, instrument, warn};

use crate::{
    base::types::{MentionEvent, Void},
    service::{chat::ChatClient, llm::LlmClient},
};

/// Prefix of the reply sent when a mention could not be answered.
pub const ERROR_REPLY_PREFIX: &str = "Error processing request: ";

/// Failure to pull the user's message out of a mention.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MentionError {
    /// The text has no mention token to strip.
    #[error("message does not start with a mention of the bot")]
    MissingMention,
}

/// Strips the leading mention token (e.g. `<@U123>`) and surrounding whitespace.
///
/// The token ends at the first `>`; everything after it is the user's message.
pub fn extract_user_message(text: &str) -> Result<&str, MentionError> {
    let (_, message) = text.split_once('>').ok_or(MentionError::MissingMention)?;

    Ok(message.trim())
}

/// Spawns the handling of a mention so the event acknowledgement is not held up.
#[instrument(skip_all)]
pub fn handle_app_mention(event: MentionEvent, llm: LlmClient, chat: ChatClient) {
    tokio::spawn(
        async move {
            // Process the event.
            let result = process_app_mention(event, &llm, &chat).await;

            // Log any errors.
            if let Err(err) = &result {
                error!("Error while handling: {}", err);
            }
        }
        .in_current_span(),
    );
}

/// Answers a single mention with exactly one reply.
///
/// Extraction and completion failures are turned into an error reply; the only
/// error returned is a failure to deliver that reply.
#[instrument(skip_all, fields(channel_id = %event.channel_id))]
pub async fn process_app_mention(event: MentionEvent, llm: &LlmClient, chat: &ChatClient) -> Void {
    let reply = match extract_user_message(&event.text) {
        Ok(message) => match llm.generate_response(message).await {
            Ok(response) => {
                info!("Replying with completion ...");
                response
            }
            Err(err) => {
                warn!("Completion failed: {}", err);
                format!("{ERROR_REPLY_PREFIX}{err}")
            }
        },
        Err(err) => {
            warn!("Could not extract user message: {}", err);
            format!("{ERROR_REPLY_PREFIX}{err}")
        }
    };

    chat.send_message(&event.channel_id, &event.thread_ts, &reply).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_user_message_strips_mention() {
        assert_eq!(extract_user_message("<@U123> what is the weather"), Ok("what is the weather"));
    }

    #[test]
    fn test_extract_user_message_trims_whitespace() {
        assert_eq!(extract_user_message("<@U123>   spaced out \n"), Ok("spaced out"));
    }

    #[test]
    fn test_extract_user_message_keeps_later_mentions() {
        assert_eq!(extract_user_message("<@U123> ask <@U456> about it"), Ok("ask <@U456> about it"));
    }

    #[test]
    fn test_extract_user_message_only_mention() {
        assert_eq!(extract_user_message("<@U123>"), Ok(""));
    }

    #[test]
    fn test_extract_user_message_without_mention() {
        assert_eq!(extract_user_message("hello there"), Err(MentionError::MissingMention));
    }
}
