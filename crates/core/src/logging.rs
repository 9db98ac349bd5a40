//! Subscriber setup shared by every binary that embeds the inventory.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the filter directives, e.g. `patrimonio_core=debug`.
pub const LOG_FILTER_ENV: &str = "PATRIMONIO_LOG";

const DEFAULT_FILTER: &str = "info";
const RETAINED_LOG_FILES: usize = 14;

/// Install the global subscriber: a daily `<component>.<date>.log` file under
/// `log_dir` (two weeks kept), plus a stderr layer when `echo_stderr` is set.
///
/// The returned guard flushes the file writer on drop. Calling this twice is
/// harmless; the second subscriber is simply not installed.
pub fn init_logging(
    log_dir: &Path,
    component: &str,
    echo_stderr: bool,
) -> Result<WorkerGuard, InitError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(component)
        .filename_suffix("log")
        .max_log_files(RETAINED_LOG_FILES)
        .build(log_dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = echo_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    Ok(guard)
}
