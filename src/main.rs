use anyhow::{Context, Result};
use tracing::info;

use devnotify::{Config, ErrorReport, Notifier, NotifyEvent};

/// Smoke-test binary: sends one notification built from CLI args.
///
///     devnotify <project> [description] [error-message]
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devnotify=info".parse().unwrap()),
        )
        .init();

    let config = Config::load().context("Failed to load config")?;
    let notifier = Notifier::from_config(&config).context("Failed to configure messengers")?;

    let mut args = std::env::args().skip(1);
    let project_name = args.next();
    let description = args.next();
    let error = args.next().map(|message| ErrorReport::new(message, vec![]));

    let event = NotifyEvent {
        project_name,
        description,
        error,
    };

    info!(
        project = event.project_name.as_deref().unwrap_or("-"),
        has_error = event.error.is_some(),
        "Dispatching notification"
    );
    notifier.send(&event).await;
    Ok(())
}
