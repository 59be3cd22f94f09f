//! Chat sink: all posts are joined into one message and sent through the Telegram Bot API.

use crate::error::Error;
use crate::model::Post;
use crate::scraper::HttpClient;
use serde::Serialize;
use tracing::{debug, info};

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Something that can deliver a text message to a chat.
pub trait ChatClient {
    fn send_message(&self, chat_id: i64, text: &str) -> Result<(), Error>;
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    disable_notification: bool,
}

/// Bot API client bound to one bot token.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: HttpClient,
    api_base: String,
    bot_token: String,
}

impl TelegramClient {
    pub fn new(http: HttpClient, bot_token: impl Into<String>) -> Self {
        Self {
            http,
            api_base: DEFAULT_API_BASE.to_string(),
            bot_token: bot_token.into(),
        }
    }

    /// Point the client at another Bot API host (self-hosted server or a test double).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }
}

impl ChatClient for TelegramClient {
    /// POST sendMessage. Anything but HTTP 200 is a delivery failure.
    fn send_message(&self, chat_id: i64, text: &str) -> Result<(), Error> {
        let body = SendMessage {
            chat_id,
            text,
            disable_notification: true,
        };
        let response = self
            .http
            .post_json(&self.endpoint(), &body)
            .map_err(|e| Error::DeliveryTransport {
                source: e.without_url(),
            })?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(Error::Delivery { status });
        }
        debug!(chat_id, "chat message accepted");
        Ok(())
    }
}

/// Concatenate the rendered lines; each already ends with a newline.
fn chat_message(posts: &[Post]) -> String {
    posts.iter().map(Post::line).collect()
}

/// Send all posts as a single message. Nothing is sent for an empty list.
pub fn send_posts(client: &dyn ChatClient, chat_id: i64, posts: &[Post]) -> Result<(), Error> {
    if posts.is_empty() {
        info!("no posts, chat message not sent");
        return Ok(());
    }
    client.send_message(chat_id, &chat_message(posts))?;
    info!(count = posts.len(), chat_id, "sent posts to chat");
    Ok(())
}
