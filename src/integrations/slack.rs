use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::{escape_markup, non_empty, Integration};
use crate::config::SlackConfig;
use crate::error::NotifyError;
use crate::event::NotifyEvent;
use crate::http::HttpClient;

const USERNAME: &str = "devnotify";
const COLOR_ERROR: &str = "#e74c3c";
const COLOR_INFO: &str = "#3498db";

/// Slack incoming-webhook adapter. Posts one attachment per event.
pub struct Slack {
    http: HttpClient,
    token: String,
    channel: String,
    base_url: String,
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    channel: &'a str,
    username: &'static str,
    attachments: Vec<Attachment>,
}

#[derive(Debug, Serialize)]
struct Attachment {
    fallback: String,
    color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    text: String,
    ts: i64,
}

impl Slack {
    pub fn new(config: &SlackConfig, verbose: bool) -> Result<Self, NotifyError> {
        if config.token.is_empty() {
            return Err(NotifyError::Config {
                var: "DN_SLACK_TOKEN",
            });
        }
        if config.channel.is_empty() {
            return Err(NotifyError::Config {
                var: "DN_SLACK_CHANNEL",
            });
        }
        Ok(Self {
            http: HttpClient::new()?,
            token: config.token.clone(),
            channel: config.channel.clone(),
            base_url: config.base_url.clone(),
            verbose,
        })
    }

    fn attachment(event: &NotifyEvent) -> Attachment {
        let title = non_empty(&event.project_name).map(escape_markup);

        let mut text = String::new();
        if let Some(description) = non_empty(&event.description) {
            text.push_str(&escape_markup(description));
        }
        if let Some(report) = &event.error {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&format!(
                "*Error*: `{}`\n*Stack trace*:\n```{}```",
                escape_markup(&report.message),
                escape_markup(&report.render_stack()),
            ));
        }

        let fallback = title
            .clone()
            .or_else(|| non_empty(&event.description).map(escape_markup))
            .unwrap_or_else(|| USERNAME.to_string());

        Attachment {
            fallback,
            color: if event.error.is_some() {
                COLOR_ERROR
            } else {
                COLOR_INFO
            },
            title,
            text,
            ts: chrono::Utc::now().timestamp(),
        }
    }
}

#[async_trait]
impl Integration for Slack {
    fn name(&self) -> &'static str {
        "slack"
    }

    fn generate_message(&self, event: &NotifyEvent) -> Result<String, NotifyError> {
        let payload = WebhookPayload {
            channel: &self.channel,
            username: USERNAME,
            attachments: vec![Self::attachment(event)],
        };
        Ok(serde_json::to_string(&payload)?)
    }

    async fn send_message(&self, payload: &str) {
        let url = format!("{}/{}", self.base_url, self.token);
        if self.verbose {
            info!(url = %url, payload = %payload, "Sending message to Slack");
        } else {
            info!("Sending message to Slack");
        }

        match self.http.post(&url, payload).await {
            Ok(resp) => {
                if self.verbose {
                    debug!(
                        status = resp.status_code,
                        body = ?resp.json_response,
                        "Slack response"
                    );
                }
                if resp.is_success() {
                    debug!(response = %resp, "Slack accepted message");
                } else {
                    warn!(response = %resp, "Slack returned non-success status");
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to send Slack message");
            }
        }
    }
}
