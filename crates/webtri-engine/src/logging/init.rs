use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "webtri_engine=debug,wgpu=warn") and is ignored by the console sink,
/// which only understands a single level.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: log::LevelFilter,
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: log::LevelFilter::Info,
            env_filter: None,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored, as is a logger some other crate already
/// installed.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| install(config));
}

#[cfg(target_arch = "wasm32")]
fn install(config: LoggingConfig) {
    let level = config.level.to_level().unwrap_or(log::Level::Info);
    if console_log::init_with_level(level).is_ok() {
        log::debug!("console logging initialized at {level}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn install(config: LoggingConfig) {
    let mut builder = env_logger::Builder::new();

    if let Some(filter) = config.env_filter {
        builder.parse_filters(&filter);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(config.level);
    }

    if builder.try_init().is_ok() {
        log::debug!("logging initialized");
    }
}
