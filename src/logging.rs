use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

/// Handle on the installed log filter.
///
/// The subscriber is installed before the config is read so config loading itself is
/// logged; [`LogFilter::apply`] then switches to the configured directives.
pub struct LogFilter {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

/// Install the global subscriber, honouring `RUST_LOG` when it is set.
pub fn init() -> LogFilter {
    let (layer, filter) = filter_layer(std::env::var(EnvFilter::DEFAULT_ENV).ok());
    tracing_subscriber::registry()
        .with(layer)
        .with(fmt::layer())
        .init();
    filter
}

fn filter_layer(env_directives: Option<String>) -> (reload::Layer<EnvFilter, Registry>, LogFilter) {
    let from_env = env_directives.is_some();
    let directives = env_directives.unwrap_or_else(|| LoggingConfig::default().filter);
    let (layer, handle) = reload::Layer::new(EnvFilter::new(directives));
    (layer, LogFilter { handle, from_env })
}

impl LogFilter {
    /// Switch to the configured filter. `RUST_LOG` wins over the config.
    pub fn apply(&self, config: &LoggingConfig) -> Result<()> {
        if self.from_env {
            return Ok(());
        }
        self.handle
            .reload(EnvFilter::new(&config.filter))
            .context("Failed to apply log filter")
    }

    pub fn current(&self) -> Option<String> {
        self.handle.with_current(|filter| filter.to_string()).ok()
    }
}
