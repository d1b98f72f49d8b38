use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable verbose (DEBUG) logging, which includes every HTTP request
/// * `log_file` - Optional path to a JSON log file. If None, logs only to stderr
pub fn init(verbose: bool, log_file: Option<PathBuf>) {
    // RUST_LOG wins over --verbose
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("forecast2github={}", default_level)));

    // stderr keeps stdout free for progress and --dry-run JSON
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    let Some(file_layer) = log_file.as_deref().and_then(file_layer) else {
        subscriber.init();
        return;
    };
    subscriber.with(file_layer).init();
}

/// Daily-rotated JSON log next to `log_path`, or None if its directory
/// cannot be created. Runs before the subscriber exists, so failures go to
/// stderr directly.
fn file_layer<S>(log_path: &Path) -> Option<impl Layer<S> + use<S>>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let dir = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("warning: not writing log file {}: {}", log_path.display(), e);
        return None;
    }

    let file_name = log_path
        .file_name()
        .unwrap_or_else(|| OsStr::new("forecast2github.log"));
    let appender = tracing_appender::rolling::daily(dir, file_name);

    Some(fmt::layer().with_writer(appender).with_ansi(false).json())
}
