use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::{escape_markup, non_empty, Integration};
use crate::config::TelegramConfig;
use crate::error::NotifyError;
use crate::event::NotifyEvent;
use crate::http::HttpClient;

const SEND_MESSAGE: &str = "/sendMessage";

/// Telegram Bot API adapter. Posts Markdown messages to one chat.
pub struct Telegram {
    http: HttpClient,
    token: String,
    chat_id: String,
    base_url: String,
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct OutboundMessage<'a> {
    chat_id: &'a str,
    parse_mode: &'static str,
    text: String,
}

impl Telegram {
    /// Fails fast when the token or channel is missing; a half-configured
    /// adapter must never be constructed.
    pub fn new(config: &TelegramConfig, verbose: bool) -> Result<Self, NotifyError> {
        if config.token.is_empty() {
            return Err(NotifyError::Config {
                var: "DN_TELEGRAM_TOKEN",
            });
        }
        if config.channel.is_empty() {
            return Err(NotifyError::Config {
                var: "DN_TELEGRAM_CHANNEL",
            });
        }
        Ok(Self {
            http: HttpClient::new()?,
            token: config.token.clone(),
            chat_id: config.channel.clone(),
            base_url: config.base_url.clone(),
            verbose,
        })
    }

    fn body_text(event: &NotifyEvent) -> String {
        let mut text = String::new();
        if let Some(project) = non_empty(&event.project_name) {
            text.push_str(&format!("*Project*: {} \n", escape_markup(project)));
            // The description line rides the project gate: an event carrying
            // only a description renders an empty body. Matches the wire
            // behavior of the Java library this replaces.
            if let Some(description) = non_empty(&event.description) {
                text.push_str(&format!("*Message*: {} \n", escape_markup(description)));
            }
        }
        if let Some(report) = &event.error {
            text.push_str(&format!(
                "*Throwable*:` {} `\n*Stack trace*:``` {} ```",
                escape_markup(&report.message),
                escape_markup(&report.render_stack()),
            ));
        }
        text
    }
}

#[async_trait]
impl Integration for Telegram {
    fn name(&self) -> &'static str {
        "telegram"
    }

    fn generate_message(&self, event: &NotifyEvent) -> Result<String, NotifyError> {
        let message = OutboundMessage {
            chat_id: &self.chat_id,
            parse_mode: "Markdown",
            text: Self::body_text(event),
        };
        Ok(serde_json::to_string(&message)?)
    }

    async fn send_message(&self, payload: &str) {
        let url = format!("{}/bot{}{}", self.base_url, self.token, SEND_MESSAGE);
        if self.verbose {
            info!(url = %url, payload = %payload, "Sending message to Telegram");
        } else {
            info!("Sending message to Telegram");
        }

        match self.http.post(&url, payload).await {
            Ok(resp) => {
                if self.verbose {
                    debug!(
                        status = resp.status_code,
                        body = ?resp.json_response,
                        "Telegram response"
                    );
                }
                if resp.is_success() {
                    debug!(response = %resp, "Telegram accepted message");
                } else {
                    warn!(response = %resp, "Telegram returned non-success status");
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to send Telegram message");
            }
        }
    }
}
