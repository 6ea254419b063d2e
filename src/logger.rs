use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::Config;

/// Set up application logging based on configuration
pub fn setup_logging(config: &Config) -> tracing_appender::non_blocking::WorkerGuard {
    // Initialize tracing logger with level from config
    let log_level = config.log_level();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    match config.log_file_path() {
        None => {
            // When no file path is specified, log only to stderr so the
            // fetched body on stdout stays clean
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .expect("Failed to set global tracing subscriber");

            // Return a dummy guard - we still need to return the same type
            let (_dummy_writer, guard) = tracing_appender::non_blocking(
                tracing_appender::rolling::never(std::env::temp_dir(), "unused.log"),
            );

            guard
        }
        Some(path) => {
            let (file_writer, guard) = create_file_logger(path);

            let subscriber = FmtSubscriber::builder()
                .with_env_filter(env_filter)
                .with_writer(file_writer)
                .finish();

            tracing::subscriber::set_global_default(subscriber)
                .expect("Failed to set global tracing subscriber");

            guard
        }
    }
}

// Create file logger
fn create_file_logger(path: &str) -> (NonBlocking, tracing_appender::non_blocking::WorkerGuard) {
    let log_path = std::path::PathBuf::from(path);
    let log_dir = log_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| {
                    std::env::current_dir().expect("Current directory not accessible")
                })
                .join("hx-auth")
                .join("logs")
        });

    // Create the directory if it doesn't exist
    std::fs::create_dir_all(&log_dir).expect("Failed to create log directory");

    let log_file_name = log_path
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("hx-auth.log"));

    // Custom paths get a simple non-rotating appender
    let file_appender = tracing_appender::rolling::never(&log_dir, log_file_name);
    tracing_appender::non_blocking(file_appender)
}
