//! Span helpers for pipeline steps.

use tracing::{field, info_span, Span};

/// Create a span for one pipeline step (`introduction`, `audit`, ...).
pub fn step_span(step: &str) -> Span {
    info_span!("step", name = %step, error = field::Empty)
}

/// Create a span for a file operation.
pub fn file_span(operation: &str, path: &str) -> Span {
    info_span!("file", op = %operation, path = %path, error = field::Empty)
}

/// Record an error on the current span.
pub fn record_error(error: &dyn std::error::Error) {
    Span::current().record("error", field::display(error));
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Complete the timer and record duration.
    pub fn finish(self) {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %duration.as_millis(),
            "operation completed"
        );
    }
}

/// Macro for timing a block of code.
#[macro_export]
macro_rules! timed {
    ($name:expr, $body:expr) => {{
        let _timer = $crate::spans::Timer::start($name);
        let result = $body;
        _timer.finish();
        result
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::EnvFilter;

    fn with_subscriber<F>(f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(EnvFilter::new("trace"))
            .finish();

        tracing::subscriber::with_default(subscriber, f);
    }

    #[test]
    fn test_step_and_file_spans_nest() {
        with_subscriber(|| {
            let step = step_span("features");
            let _guard1 = step.enter();

            let file = file_span("read", "project_context/features.md");
            let _guard2 = file.enter();

            tracing::info!("nested operation");
        });
    }

    #[test]
    fn test_error_recording() {
        with_subscriber(|| {
            let span = file_span("write", "output/SRS_Draft.md");
            let _guard = span.enter();

            let error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
            record_error(&error);
        });
    }

    #[test]
    fn test_timed_macro_returns_value() {
        with_subscriber(|| {
            let result = timed!("macro_test", { 2 + 2 });
            assert_eq!(result, 4);
        });
    }
}
