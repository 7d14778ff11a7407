use std::path::{Path, PathBuf};

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Environment variable that redirects logs to a file.
pub const LOG_FILE_ENV: &str = "NAVPRELOAD_LOG";

/// Initialize tracing for the CLI.
///
/// The filter comes from `RUST_LOG`, falling back to `config.level`.
/// Logs go to stderr unless `NAVPRELOAD_LOG` or `config.file` names a file.
/// Log files are created with unique names so concurrent runs don't clobber
/// each other: `{path}.{timestamp}.{pid}`
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_ascii_lowercase()));

    let requested = std::env::var_os(LOG_FILE_ENV)
        .map(PathBuf::from)
        .or_else(|| config.file.clone());

    let file = requested.and_then(|path| {
        let unique_path = unique_log_path(&path);
        match std::fs::File::create(&unique_path) {
            Ok(file) => Some(file),
            Err(err) => {
                eprintln!(
                    "Warning: Failed to create log file {}: {}",
                    unique_path.display(),
                    err
                );
                None
            }
        }
    });

    let (file_layer, stderr_layer) = match file {
        Some(file) => (
            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_level(true),
            ),
            None,
        ),
        None => (
            None,
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_timer(UtcTime::rfc_3339())
                    .with_target(false),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
}

fn unique_log_path(path: &Path) -> PathBuf {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    PathBuf::from(format!("{}.{}.{}", path.display(), timestamp, pid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_log_path_appends_timestamp_and_pid() {
        let path = unique_log_path(Path::new("/tmp/navpreload.log"));
        let text = path.display().to_string();
        assert!(text.starts_with("/tmp/navpreload.log."));
        assert!(text.ends_with(&format!(".{}", std::process::id())));
    }
}
