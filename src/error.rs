use thiserror::Error;

/// Errors produced by the notification pipeline.
///
/// Only `Config` is fatal: it aborts adapter construction so a
/// half-configured messenger can never be used. The other kinds are
/// logged and swallowed at the dispatch boundary.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Required credential/channel variable missing or empty.
    #[error("{var} is missing or empty")]
    Config { var: &'static str },

    /// Payload could not be encoded; dispatch is skipped.
    #[error("failed to encode payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network/IO failure during send.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
