use configuration::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so they never mix with table or JSON output on stdout.
/// `RUST_LOG` overrides the configured level. The returned guard must be held
/// until exit when file logging is enabled, or buffered lines are lost.
pub fn init(settings: &LoggingSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match &settings.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "valuechain.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(filter).with(stderr_layer).init();
            None
        }
    }
}
