/// One notification request. Immutable once created; every field is
/// optional and the adapters render whatever is present.
#[derive(Debug, Clone, Default)]
pub struct NotifyEvent {
    pub project_name: Option<String>,
    pub description: Option<String>,
    pub error: Option<ErrorReport>,
}

impl NotifyEvent {
    pub fn new(project_name: Option<String>, description: Option<String>) -> Self {
        Self {
            project_name,
            description,
            error: None,
        }
    }

    pub fn with_error(mut self, error: ErrorReport) -> Self {
        self.error = Some(error);
        self
    }
}

/// An error captured for reporting: its string form plus rendered frames.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub message: String,
    pub stack_trace: Vec<String>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>, stack_trace: Vec<String>) -> Self {
        Self {
            message: message.into(),
            stack_trace,
        }
    }

    /// Capture an error and its source chain.
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut stack_trace = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            stack_trace.push(format!("caused by: {cause}"));
            source = cause.source();
        }
        Self {
            message: error.to_string(),
            stack_trace,
        }
    }

    /// Rendered stack block for message bodies. Falls back to the message
    /// itself when no frames were captured so the block is never blank.
    pub fn render_stack(&self) -> String {
        if self.stack_trace.is_empty() {
            self.message.clone()
        } else {
            self.stack_trace.join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_walks_source_chain() {
        let root = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let wrapped = anyhow::Error::from(root).context("failed to reach database");

        let report = ErrorReport::from_error(wrapped.as_ref());
        assert_eq!(report.message, "failed to reach database");
        assert_eq!(report.stack_trace, vec!["caused by: connection refused"]);
    }

    #[test]
    fn test_render_stack_never_blank() {
        let report = ErrorReport::new("boom", vec![]);
        assert_eq!(report.render_stack(), "boom");

        let report = ErrorReport::new("boom", vec!["frame one".into(), "frame two".into()]);
        assert_eq!(report.render_stack(), "frame one\nframe two");
    }
}
