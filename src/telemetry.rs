//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `info`. Calling this
/// twice keeps the first subscriber.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init(),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        init(LogFormat::Json);
        init(LogFormat::Pretty);
    }

    #[test]
    fn capture_records_fields() {
        let logs = capture::CapturedLogs::new();
        logs.record(|| tracing::info!(url = "ws://host/ws/", "socket path"));

        let events = logs.with_message("socket path");
        assert_eq!(events.len(), 1);
        assert_eq!(
            events.first().and_then(|e| capture::field(e, "url")),
            Some("ws://host/ws/")
        );
        assert_eq!(logs.at_level("INFO").len(), 1);
    }
}
