//! Structured logging setup

use crate::config::LogFormat;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize logging.
///
/// The console receives events at `level` (or `RUST_LOG`) in the requested
/// format. When `log_file` is set, the crate's debug events are also appended
/// to that file without ANSI colors.
pub fn init_logging(level: &str, format: LogFormat, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console: BoxedLayer = match format {
        LogFormat::Pretty => fmt::layer().with_target(false).with_filter(filter).boxed(),
        LogFormat::Json => fmt::layer().json().with_filter(filter).boxed(),
    };

    let mut layers = vec![console];
    if let Some(path) = log_file.filter(|p| !p.as_os_str().is_empty()) {
        layers.push(file_layer(path)?);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to init logging: {}", e))?;

    Ok(())
}

fn file_layer(path: &Path) -> anyhow::Result<BoxedLayer> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), LevelFilter::DEBUG));
    Ok(fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .with_filter(filter)
        .boxed())
}
