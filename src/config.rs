use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Which messengers to build adapters for.
    #[serde(default = "default_messengers")]
    pub messengers: Vec<String>,
    /// Log full URLs/payloads instead of one-line summaries.
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub slack: SlackConfig,
}

fn default_messengers() -> Vec<String> {
    vec!["telegram".to_string()]
}

#[derive(Debug, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_base_url")]
    pub base_url: String,
    // Secrets come from the environment, never the file.
    #[serde(skip)]
    pub token: String,
    #[serde(skip)]
    pub channel: String,
}

fn default_telegram_base_url() -> String {
    "https://api.telegram.org".to_string()
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            base_url: default_telegram_base_url(),
            token: String::new(),
            channel: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SlackConfig {
    #[serde(default = "default_slack_base_url")]
    pub base_url: String,
    #[serde(skip)]
    pub token: String,
    #[serde(skip)]
    pub channel: String,
}

fn default_slack_base_url() -> String {
    "https://hooks.slack.com/services".to_string()
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            base_url: default_slack_base_url(),
            token: String::new(),
            channel: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            messengers: default_messengers(),
            verbose: false,
            telegram: TelegramConfig::default(),
            slack: SlackConfig::default(),
        }
    }
}

impl Config {
    /// Load `.env`, then the optional `devnotify.toml`, then secrets from
    /// the environment. A missing file yields defaults; whether a messenger
    /// is usable is decided by its adapter at construction.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = match std::fs::read_to_string("devnotify.toml") {
            Ok(content) => {
                toml::from_str(&content).context("Failed to parse devnotify.toml")?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => return Err(e).context("Failed to read devnotify.toml"),
        };

        config.telegram.token = env_or_empty("DN_TELEGRAM_TOKEN");
        config.telegram.channel = env_or_empty("DN_TELEGRAM_CHANNEL");
        config.slack.token = env_or_empty("DN_SLACK_TOKEN");
        config.slack.channel = env_or_empty("DN_SLACK_CHANNEL");

        if show_whole_log_details() {
            config.verbose = true;
        }
        Ok(config)
    }
}

fn env_or_empty(var: &str) -> String {
    std::env::var(var).unwrap_or_default()
}

/// DN_SHOW_WHOLE_LOG_DETAILS opts into logging full URLs and payloads.
pub fn show_whole_log_details() -> bool {
    std::env::var("DN_SHOW_WHOLE_LOG_DETAILS")
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
