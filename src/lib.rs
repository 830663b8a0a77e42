//! Fire-and-forget developer notifications.
//!
//! Formats an event (project name, description, optional error with a
//! stack rendering) into a provider-specific payload and delivers it to a
//! messaging API over HTTP. Delivery is best-effort: per-message failures
//! are logged and swallowed so a broken notification path can never take
//! down the host application. Only misconfiguration is fatal, and only at
//! construction time.
//!
//! ```no_run
//! use devnotify::{Config, ErrorReport, Notifier, NotifyEvent};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let notifier = Notifier::from_config(&config)?;
//!
//! let event = NotifyEvent::new(
//!     Some("checkout".to_string()),
//!     Some("payment processor unreachable".to_string()),
//! );
//! notifier.send(&event).await;
//! # Ok(())
//! # }
//! ```
//!
//! Secrets come from the environment (`DN_TELEGRAM_TOKEN`,
//! `DN_TELEGRAM_CHANNEL`, `DN_SLACK_TOKEN`, `DN_SLACK_CHANNEL`); messenger
//! selection and endpoint overrides from an optional `devnotify.toml`.

pub mod config;
pub mod error;
pub mod event;
pub mod http;
pub mod integrations;

pub use config::Config;
pub use error::NotifyError;
pub use event::{ErrorReport, NotifyEvent};
pub use http::{HttpClient, HttpResponse};
pub use integrations::slack::Slack;
pub use integrations::telegram::Telegram;
pub use integrations::Integration;

use tracing::{error, warn};

/// Dispatches each event to every configured messenger.
pub struct Notifier {
    integrations: Vec<Box<dyn Integration>>,
}

impl Notifier {
    /// Build one adapter per messenger named in the config. Any adapter
    /// failing validation aborts construction; an enabled messenger must
    /// never run half-configured.
    pub fn from_config(config: &Config) -> Result<Self, NotifyError> {
        let mut integrations: Vec<Box<dyn Integration>> = Vec::new();
        for messenger in &config.messengers {
            match messenger.as_str() {
                "telegram" => {
                    integrations.push(Box::new(Telegram::new(&config.telegram, config.verbose)?));
                }
                "slack" => {
                    integrations.push(Box::new(Slack::new(&config.slack, config.verbose)?));
                }
                other => {
                    warn!(messenger = other, "Unknown messenger in config, skipping");
                }
            }
        }
        if integrations.is_empty() {
            warn!("No messengers configured, notifications will be dropped");
        }
        Ok(Self { integrations })
    }

    pub fn with_integrations(integrations: Vec<Box<dyn Integration>>) -> Self {
        Self { integrations }
    }

    /// Send one event to every messenger, sequentially. Serialization
    /// failures skip that messenger's dispatch; nothing here propagates.
    pub async fn send(&self, event: &NotifyEvent) {
        for integration in &self.integrations {
            let payload = match integration.generate_message(event) {
                Ok(payload) => payload,
                Err(e) => {
                    error!(
                        integration = integration.name(),
                        error = %e,
                        "Failed to encode payload, skipping dispatch"
                    );
                    continue;
                }
            };
            integration.send_message(&payload).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Recording {
        sent: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Integration for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn generate_message(&self, _event: &NotifyEvent) -> Result<String, NotifyError> {
            Ok("{}".to_string())
        }

        async fn send_message(&self, _payload: &str) {
            self.sent.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FailsToEncode;

    #[async_trait]
    impl Integration for FailsToEncode {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn generate_message(&self, _event: &NotifyEvent) -> Result<String, NotifyError> {
            let err = serde_json::from_str::<serde_json::Value>("").unwrap_err();
            Err(NotifyError::Serialization(err))
        }

        async fn send_message(&self, _payload: &str) {
            panic!("dispatch must be skipped when encoding fails");
        }
    }

    #[tokio::test]
    async fn test_send_reaches_every_integration() {
        let sent = Arc::new(AtomicUsize::new(0));
        let notifier = Notifier::with_integrations(vec![
            Box::new(Recording { sent: sent.clone() }),
            Box::new(Recording { sent: sent.clone() }),
        ]);

        notifier.send(&NotifyEvent::default()).await;
        assert_eq!(sent.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_encoding_failure_skips_only_that_integration() {
        let sent = Arc::new(AtomicUsize::new(0));
        let notifier = Notifier::with_integrations(vec![
            Box::new(FailsToEncode),
            Box::new(Recording { sent: sent.clone() }),
        ]);

        notifier.send(&NotifyEvent::default()).await;
        assert_eq!(sent.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_from_config_fails_fast_on_missing_secret() {
        let config = Config::default(); // telegram enabled, no token
        let err = Notifier::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            NotifyError::Config {
                var: "DN_TELEGRAM_TOKEN"
            }
        ));
    }

    #[test]
    fn test_from_config_allows_empty_messenger_list() {
        let mut config = Config::default();
        config.messengers.clear();
        let notifier = Notifier::from_config(&config).unwrap();
        assert!(notifier.integrations.is_empty());
    }

    #[test]
    fn test_unknown_messenger_is_skipped() {
        let mut config = Config::default();
        config.messengers = vec!["pager".to_string()];
        let notifier = Notifier::from_config(&config).unwrap();
        assert!(notifier.integrations.is_empty());
    }
}
