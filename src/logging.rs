use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use std::path::Path;

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

/// Starts logging to `log_file`, if given.  `RUST_LOG` overrides the default
/// level.  The terminal belongs to the UI, so without a log file nothing is
/// logged at all.
///
/// The returned handle must be kept alive for as long as messages should be
/// written.
pub(crate) fn init(log_file: Option<&Path>) -> anyhow::Result<Option<LoggerHandle>> {
    let Some(path) = log_file else {
        return Ok(None);
    };
    let spec = FileSpec::try_from(path.to_path_buf())
        .with_context(|| format!("invalid log file path {}", path.display()))?;
    let handle = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("invalid log specification")?
        .log_to_file(spec)
        .format(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")?;
    log::info!(
        "{} {} starting",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    Ok(Some(handle))
}
