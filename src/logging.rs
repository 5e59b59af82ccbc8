use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

/// Log file created inside the log directory.
pub const LOG_FILE_NAME: &str = "mazerace.log";

/// Install the global `tracing` subscriber.
///
/// With a `log_dir`, events go to a non-blocking file writer and the returned guard must be
/// kept alive until exit so buffered lines are flushed. Otherwise events go to stderr.
/// Calling this twice leaves the first subscriber in place.
pub fn init(log_dir: Option<&Path>, verbose: bool) -> Option<WorkerGuard> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    match log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let installed = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_thread_names(true)
                .with_writer(writer)
                .try_init()
                .is_ok();
            installed.then_some(guard)
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .try_init();
            None
        }
    }
}
