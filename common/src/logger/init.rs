use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

static LOGGER_INIT: OnceCell<LogStyle> = OnceCell::new();

/// Output layout of the fmt layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogStyle {
    /// Single line per event; for embedding in host application logs.
    #[default]
    Compact,
    /// Multi-line, for local debugging.
    Pretty,
}

/// Installs the global subscriber once per process with the compact layout.
pub fn init_logger(service_name: &'static str) {
    init_logger_with(service_name, LogStyle::Compact);
}

/// Installs the global subscriber once per process and returns the style in
/// effect. Later calls keep the first style. If another subscriber was
/// installed first (a test harness, the host UI) that one stays.
pub fn init_logger_with(service_name: &'static str, style: LogStyle) -> LogStyle {
    *LOGGER_INIT.get_or_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let base = fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_line_number(true)
            .with_span_events(fmt::format::FmtSpan::CLOSE);

        let installed = match style {
            LogStyle::Compact => tracing_subscriber::registry()
                .with(env_filter)
                .with(base.compact())
                .try_init()
                .is_ok(),
            LogStyle::Pretty => tracing_subscriber::registry()
                .with(env_filter)
                .with(base.pretty())
                .try_init()
                .is_ok(),
        };

        tracing::info!(service = service_name, ?style, installed, "logger initialized");
        style
    })
}
