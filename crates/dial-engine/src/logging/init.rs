use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` filter syntax (e.g. "info",
/// "dial_engine=debug,wgpu_core=warn"). When unset, `RUST_LOG` is consulted.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Filter applied to the wgpu/naga crates when no explicit filter is given.
    /// They are very chatty at info level.
    pub gpu_level: log::LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            gpu_level: log::LevelFilter::Warn,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
            for noisy in ["wgpu_core", "wgpu_hal", "naga"] {
                builder.filter_module(noisy, config.gpu_level);
            }
        }

        builder.write_style(config.write_style);

        // try_init: a host test harness may have installed a logger already.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig {
            env_filter: Some("debug".into()),
            ..Default::default()
        });
        init_logging(LoggingConfig::default());
        log::info!("still alive");
    }
}
