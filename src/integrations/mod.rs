pub mod slack;
pub mod telegram;

use async_trait::async_trait;

use crate::error::NotifyError;
use crate::event::NotifyEvent;

/// One messaging provider. Each implementation owns its endpoint and
/// payload shape; the dispatcher only sees this capability set.
#[async_trait]
pub trait Integration: Send + Sync {
    fn name(&self) -> &'static str;

    /// Build the serialized wire payload for an event.
    fn generate_message(&self, event: &NotifyEvent) -> Result<String, NotifyError>;

    /// Deliver a payload, best-effort. Transport failures are logged and
    /// swallowed; this never propagates an error to the caller.
    async fn send_message(&self, payload: &str);
}

/// Replace `_` with `-` so inserted text cannot collide with the
/// provider's markup syntax.
pub(crate) fn escape_markup(text: &str) -> String {
    text.replace('_', "-")
}

/// Treat absent and empty strings the same, as the providers do.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup("deploy_failed"), "deploy-failed");
        assert_eq!(escape_markup("__init__"), "--init--");
        assert_eq!(escape_markup("no markup here"), "no markup here");
        assert_eq!(escape_markup(""), "");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&Some("x".to_string())), Some("x"));
    }

    proptest! {
        #[test]
        fn proptest_no_underscore_survives(input in ".*") {
            let escaped = escape_markup(&input);
            prop_assert!(!escaped.contains('_'));
            // Substitution only, never insertion or deletion.
            prop_assert_eq!(escaped.chars().count(), input.chars().count());
        }
    }
}
