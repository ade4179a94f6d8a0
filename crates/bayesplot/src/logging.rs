//! File logging for the binary.
//!
//! Each run writes a fresh `bayesplot.log` in the data directory through a
//! non-blocking background writer; the previous run's log is kept alongside
//! as `bayesplot.log.prev`. Nothing is written to the terminal, which belongs
//! to the chart view.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "bayesplot.log";
const PREVIOUS_SUFFIX: &str = "prev";

/// Keeps the background log writer alive. Buffered lines are flushed when
/// this is dropped, so hold it until `main` returns.
#[must_use = "dropping the handle stops file logging"]
pub struct LogHandle {
    pub path: PathBuf,
    _worker: WorkerGuard,
}

/// Directives used when `RUST_LOG` is unset.
fn default_directives(level: &str) -> String {
    format!("bayesplot={level},bayesplot_core=warn")
}

/// Move last run's log aside so the new one starts empty.
fn retire_previous_log(log_path: &Path) -> io::Result<Option<PathBuf>> {
    if !log_path.exists() {
        return Ok(None);
    }
    let previous = log_path.with_extension(format!("log.{PREVIOUS_SUFFIX}"));
    fs::rename(log_path, &previous)?;
    Ok(Some(previous))
}

/// Open the log file behind a non-blocking writer.
fn log_writer(data_dir: &Path) -> io::Result<(NonBlocking, WorkerGuard, PathBuf)> {
    fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join(LOG_FILE_NAME);
    retire_previous_log(&log_path)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_NAME)
        .build(data_dir)
        .map_err(io::Error::other)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    Ok((writer, guard, log_path))
}

/// Initialize logging to `{data_dir}/bayesplot.log`.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<LogHandle> {
    let (writer, guard, log_path) = log_writer(data_dir)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()?;

    tracing::info!(log_path = %log_path.display(), "bayesplot logging initialized");
    Ok(LogHandle {
        path: log_path,
        _worker: guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_directives_quiet_core() {
        assert_eq!(
            default_directives("debug"),
            "bayesplot=debug,bayesplot_core=warn"
        );
    }

    #[test]
    fn test_previous_log_is_kept() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        assert_eq!(retire_previous_log(&path).unwrap(), None);

        fs::write(&path, "last run\n").unwrap();
        let previous = retire_previous_log(&path).unwrap().unwrap();

        assert!(previous.ends_with("bayesplot.log.prev"));
        assert_eq!(fs::read_to_string(previous).unwrap(), "last run\n");
        assert!(!path.exists());
    }

    #[test]
    fn test_writer_flushes_on_guard_drop() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(LOG_FILE_NAME), "stale\n").unwrap();

        let (writer, guard, log_path) = log_writer(dir.path()).unwrap();
        let subscriber =
            tracing_subscriber::registry().with(fmt::layer().with_writer(writer).with_ansi(false));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(samples = 3, "Sweep computed");
        });
        drop(guard);

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("Sweep computed"));
        assert!(content.contains("samples=3"));
        assert!(!content.contains("stale"));
        assert!(dir.path().join("bayesplot.log.prev").exists());
    }
}
