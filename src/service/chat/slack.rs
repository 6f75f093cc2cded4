//! Slack integration for the mention-bot.
//!
//! Connects over Socket Mode with the app-level token, forwards `app_mention`
//! push events to the mention handler, and posts replies with the bot token.

use crate::{
    base::{
        config::Config,
        types::{MentionEvent, Res, Void},
    },
    interaction,
    service::llm::LlmClient,
};
use async_trait::async_trait;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use slack_morphism::prelude::*;
use tracing::{debug, info, instrument};

use std::sync::Arc;

use super::{ChatClient, GenericChatClient};

// Type aliases.

type FullClient = slack_morphism::SlackClient<SlackClientHyperConnector<HttpsConnector<HttpConnector>>>;

// Extra methods on `ChatClient` applied by the slack implementation.

impl ChatClient {
    /// Creates a new Slack chat client.
    pub async fn slack(config: &Config, llm: LlmClient) -> Res<Self> {
        let client = SlackChatClient::new(config, llm).await?;
        Ok(Self { inner: Arc::new(client) })
    }
}

impl From<SlackChatClient> for ChatClient {
    fn from(client: SlackChatClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Structs.

/// User state for the slack socket client.
struct SlackUserState {
    llm: LlmClient,
    chat: ChatClient,
}

/// Slack client implementation.
#[derive(Clone)]
struct SlackChatClient {
    pub app_token: SlackApiToken,
    pub bot_token: SlackApiToken,
    pub client: Arc<FullClient>,
    pub llm: LlmClient,
}

impl SlackChatClient {
    /// Create a new Slack chat client.
    ///
    /// Verifies the bot token with `auth.test`, so bad credentials fail at startup.
    #[instrument(name = "SlackChatClient::new", skip_all)]
    pub async fn new(config: &Config, llm: LlmClient) -> Res<Self> {
        // Initialize tokens.

        let app_token = SlackApiToken::new(SlackApiTokenValue(config.app_token.clone()));
        let bot_token = SlackApiToken::new(SlackApiTokenValue(config.bot_token.clone()));

        // Initialize the Slack client.

        let https_connector = HttpsConnector::<HttpConnector>::builder().with_native_roots()?.https_only().enable_all_versions().build();
        let connector = SlackClientHyperConnector::with_connector(https_connector);
        let client = Arc::new(slack_morphism::SlackClient::new(connector));

        // Check the bot token.

        let session = client.open_session(&bot_token);
        let bot_user = session.auth_test().await?;

        info!("Slack bot user ID: {}", bot_user.user_id.0);

        Ok(Self { app_token, bot_token, client, llm })
    }
}

#[async_trait]
impl GenericChatClient for SlackChatClient {
    async fn start(&self) -> Void {
        // Initialize the socket mode listener.

        let socket_mode_callbacks = SlackSocketModeListenerCallbacks::new().with_push_events(handle_push_event);

        // Initialize the socket mode listener environment.

        let listener_environment = Arc::new(SlackClientEventsListenerEnvironment::new(self.client.clone()).with_user_state(SlackUserState {
            llm: self.llm.clone(),
            chat: ChatClient::from(self.clone()),
        }));

        let socket_mode_listener = Arc::new(SlackClientSocketModeListener::new(
            &SlackClientSocketModeConfig::new(),
            listener_environment.clone(),
            socket_mode_callbacks,
        ));

        // Register the app token to listen for events.
        socket_mode_listener.listen_for(&self.app_token).await?;

        // Open the WS connections and wait for Ctrl-C to shut down.
        socket_mode_listener.serve().await;

        Ok(())
    }

    /// Posts `text` with `chat.postMessage` using the bot token.
    ///
    /// A mention made inside a thread is answered in that thread, not at the top
    /// level of the channel; top-level mentions (empty `thread_ts`) get a
    /// top-level reply.
    #[instrument(skip(self, text))]
    async fn send_message(&self, channel_id: &str, thread_ts: &str, text: &str) -> Void {
        let message = SlackMessageContent::new().with_text(text.to_string());

        let mut request = SlackApiChatPostMessageRequest::new(SlackChannelId(channel_id.to_string()), message);

        if !thread_ts.is_empty() {
            request = request.with_thread_ts(SlackTs(thread_ts.to_string()));
        }

        let session = self.client.open_session(&self.bot_token);

        let _ = session.chat_post_message(&request).await.map_err(|e| anyhow::anyhow!("Failed to send message: {}", e))?;

        Ok(())
    }
}

// Socket mode listener callbacks for Slack.

/// Converts a Slack app mention into the bot's own event type.
fn to_mention_event(event: SlackAppMentionEvent) -> MentionEvent {
    MentionEvent {
        text: event.content.text.unwrap_or_default(),
        channel_id: event.channel.0,
        thread_ts: event.origin.thread_ts.map(|ts| ts.0).unwrap_or_default(),
    }
}

/// Handles push events from Slack.
#[instrument(skip_all)]
async fn handle_push_event(event_callback: SlackPushEventCallback, _client: Arc<SlackHyperClient>, states: SlackClientEventsUserState) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let states = states.read().await;
    let user_state = states.get_user_state::<SlackUserState>().ok_or(anyhow::anyhow!("Failed to get user state"))?;

    match event_callback.event {
        SlackEventCallbackBody::AppMention(slack_app_mention_event) => {
            info!("Received app mention event ...");

            interaction::app_mention::handle_app_mention(to_mention_event(slack_app_mention_event), user_state.llm.clone(), user_state.chat.clone());
        }
        _ => {
            debug!("Ignoring unhandled push event.")
        }
    }

    Ok(())
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;

    fn app_mention(json: serde_json::Value) -> SlackAppMentionEvent {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_to_mention_event_top_level() {
        let event = app_mention(serde_json::json!({
            "user": "U54321",
            "channel": "C01TEST",
            "text": "<@U123> what is the weather",
            "ts": "1234567890.123456",
        }));

        let mention = to_mention_event(event);

        assert_eq!(mention.text, "<@U123> what is the weather");
        assert_eq!(mention.channel_id, "C01TEST");
        assert_eq!(mention.thread_ts, "");
    }

    #[test]
    fn test_to_mention_event_in_thread() {
        let event = app_mention(serde_json::json!({
            "user": "U54321",
            "channel": "C01TEST",
            "text": "<@U123> and tomorrow?",
            "ts": "1234567899.000001",
            "thread_ts": "1234567890.123456",
        }));

        let mention = to_mention_event(event);

        assert_eq!(mention.thread_ts, "1234567890.123456");
    }
}
