use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use tracing::Level;
use tracing::event;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_flame::FlameLayer;
use tracing_flame::FlushGuard;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::prelude::*;

pub const LOG_VARIABLE: &str = "EXAMPLAN_LOG";
pub const LOG_DIRECTORY_VARIABLE: &str = "EXAMPLAN_LOG_DIR";
pub const PROFILING_FILE_VARIABLE: &str = "PROFILING_FILE";

const LOG_FILE_NAME: &str = "examplan.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Flushes the file and profiling layers when dropped. Keep it alive until
/// the end of `main`.
#[derive(Default)]
pub struct LogGuards {
    _file_guard: Option<WorkerGuard>,
    _flame_guard: Option<FlushGuard<BufWriter<File>>>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_VARIABLE).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Human readable events go to stderr. `EXAMPLAN_LOG_DIR` adds a JSON log
/// file and `PROFILING_FILE` a flame graph layer.
pub fn setup_logging() -> Result<LogGuards> {
    let mut log_guards = LogGuards::default();

    let mut layers: Vec<BoxedLayer> = vec![
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(env_filter())
            .boxed(),
    ];

    if let Ok(log_directory) = dotenvy::var(LOG_DIRECTORY_VARIABLE) {
        remove_previous_log_files(Path::new(&log_directory))?;

        let file_appender = tracing_appender::rolling::never(&log_directory, LOG_FILE_NAME);
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        log_guards._file_guard = Some(file_guard);

        layers.push(
            fmt::layer()
                .with_writer(non_blocking)
                .json()
                .with_file(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_current_span(true)
                .with_filter(env_filter())
                .boxed(),
        );
    }

    if let Ok(profiling_file) = dotenvy::var(PROFILING_FILE_VARIABLE) {
        let (flame_layer, flame_guard) = FlameLayer::with_file(&profiling_file)
            .with_context(|| format!("could not create profiling file {}", profiling_file))?;
        log_guards._flame_guard = Some(flame_guard);

        layers.push(flame_layer.with_filter(env_filter()).boxed());
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("a global tracing subscriber was already installed")?;

    event!(Level::DEBUG, "logging initialized");
    Ok(log_guards)
}

fn remove_previous_log_files(log_directory: &Path) -> Result<()> {
    fs::create_dir_all(log_directory)
        .with_context(|| format!("could not create log directory {}", log_directory.display()))?;

    for directory_entry in fs::read_dir(log_directory)? {
        let path = directory_entry?.path();
        if path.is_file() && path.extension().is_some_and(|extension| extension == "log") {
            fs::remove_file(&path)
                .with_context(|| format!("could not remove old log file {}", path.display()))?;
        }
    }
    Ok(())
}
