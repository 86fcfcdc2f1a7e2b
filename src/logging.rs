use std::fs;
use std::path::Path;

use schoolhub_config::LogConfig;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Console filter: `RUST_LOG` when set, otherwise `LOG_LEVEL` applied to the
/// schoolhub crates with everything else at `warn`.
fn console_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,{crate_name}={level},schoolhub_auth={level},reqwest=warn",
            crate_name = env!("CARGO_CRATE_NAME"),
            level = config.level
        ))
    })
}

/// Installs the global subscriber: a compact console layer on stderr and,
/// unless disabled, a daily-rotated JSON file under `log_dir`.
pub fn init_tracing(config: &LogConfig, log_dir: &Path) {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter(config));

    let file_layer = if config.file_enabled {
        match fs::create_dir_all(log_dir) {
            Ok(()) => {
                let json_appender =
                    RollingFileAppender::new(Rotation::DAILY, log_dir, "schoolhub.json");
                Some(
                    fmt::layer()
                        .json()
                        .with_writer(json_appender)
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_filter(EnvFilter::new(format!(
                            "warn,{}=info",
                            env!("CARGO_CRATE_NAME")
                        ))),
                )
            }
            Err(e) => {
                eprintln!(
                    "⚠️  Could not create log directory {}: {}. Continuing without file logging...",
                    log_dir.display(),
                    e
                );
                None
            }
        }
    } else {
        None
    };

    let file_logging = file_layer.is_some();

    if tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        warn!("Tracing already initialized");
        return;
    }

    info!(file_logging, log_dir = %log_dir.display(), "Tracing initialized");
}
