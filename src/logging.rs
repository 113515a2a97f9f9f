//! Log setup for the command-line runner.

use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Keeps the file writer alive; drop it last to flush buffered lines.
#[allow(dead_code)]
pub struct LoggerGuard(Option<WorkerGuard>);

/// Normalize a configured level name, falling back to `info`.
pub fn normalize_level(level: &str) -> &'static str {
    match level.to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" => "warn",
        "error" => "error",
        _ => "info",
    }
}

/// Install a stderr layer and, when `log_file` is set, a plain-text file layer.
///
/// `RUST_LOG` directives take precedence over `level`.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> anyhow::Result<LoggerGuard> {
    let normalized = normalize_level(level);

    let builder = EnvFilter::builder().with_default_directive(normalized.parse()?);
    let rust_log = std::env::var("RUST_LOG").unwrap_or_default();
    let console_filter = builder.clone().parse_lossy(&rust_log);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_filter(console_filter);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("log file path has no file name: {}", path.display()))?;
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = NonBlocking::new(appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(builder.parse_lossy(&rust_log));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    if normalized != level.to_ascii_lowercase() {
        tracing::warn!("Invalid log level '{}', defaulting to 'info'", level);
    }

    Ok(LoggerGuard(guard))
}

/// Marks the start of a run in the log.
pub fn log_run_header() {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    tracing::info!("---  START OF RUN - {timestamp}  ---");
}

/// Marks the end of a run in the log.
pub fn log_run_footer() {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    tracing::info!("---  END OF RUN - {timestamp}  ---");
}
