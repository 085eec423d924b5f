//! Logging for the preview tool.
//!
//! Menus are printed on stdout, so console logs always go to stderr. When
//! stderr is not a terminal the output is also kept in a daily log file
//! under the data directory, since nobody is watching the console.
//!
//! Filter priority: `--log` flag, then `CTXMENU_LOG`, then `RUST_LOG`, then
//! the build-type default.

use std::error::Error;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CTXMENU_LOG";

const FILE_PREFIX: &str = "ctxmenu-preview";

/// Where logs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    /// Explicit filter directive, overriding the environment.
    pub filter: Option<String>,
    /// Directory for the daily log file; `None` logs to stderr only.
    pub file_dir: Option<PathBuf>,
}

impl LogOptions {
    /// Stderr only when attached to a terminal, stderr plus file otherwise.
    pub fn detect(filter: Option<String>) -> Self {
        let file_dir = (!atty::is(atty::Stream::Stderr)).then(log_dir);
        Self { filter, file_dir }
    }

    pub fn stderr_only(filter: Option<String>) -> Self {
        Self { filter, file_dir: None }
    }
}

/// Keeps the file writer alive; dropping it flushes buffered lines.
#[must_use]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber. Does nothing if one is already set.
pub fn init(options: &LogOptions) -> LogGuard {
    let filter = env_filter(options.filter.as_deref());

    let Some(dir) = options.file_dir.as_deref() else {
        install_stderr(filter);
        return LogGuard { _file: None };
    };

    match daily_file(dir) {
        Ok((file, guard)) => {
            let writer = std::io::stderr.with_max_level(tracing::Level::WARN).and(file);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init();
            LogGuard { _file: Some(guard) }
        }
        Err(e) => {
            eprintln!("warning: log file unavailable in {}: {e}", dir.display());
            install_stderr(filter);
            LogGuard { _file: None }
        }
    }
}

fn install_stderr(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn daily_file(dir: &Path) -> Result<(NonBlocking, WorkerGuard), Box<dyn Error + Send + Sync>> {
    std::fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)?;
    Ok(tracing_appender::non_blocking(appender))
}

fn env_filter(explicit: Option<&str>) -> EnvFilter {
    explicit
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .or_else(|| EnvFilter::try_from_env(LOG_ENV).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_filter()))
}

fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "info,ctxmenu=debug,ctxmenu_core=debug,ctxmenu_system=debug"
    } else {
        "warn,ctxmenu=info"
    }
}

/// `<data dir>/ctxmenu/logs`.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir().unwrap_or_else(std::env::temp_dir).join("ctxmenu").join("logs")
}
