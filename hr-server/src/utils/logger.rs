//! Logging Infrastructure
//!
//! `RUST_LOG` style filtering with an optional daily-rolling log file.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "hr_server=info,tower_http=info,security=info";

/// Initialize the logger (stdout only)
pub fn init_logger() {
    init_logger_with_file(None);
}

/// Initialize the logger, writing to `<log_dir>/hr-server.<date>` when given
pub fn init_logger_with_file(log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "hr-server");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
        eprintln!("LOG_DIR {} is not usable, logging to stdout", dir);
    }

    subscriber.init();
}
