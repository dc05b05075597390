use std::sync::OnceLock;

use env_logger::{Builder, WriteStyle};

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "glimmer_libui=debug,glimmer_toolkit=trace").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Filter directives in effect: `env_filter`, else `RUST_LOG`, else `info`.
    pub fn filter(&self) -> String {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| "info".to_string())
    }

    fn builder(&self) -> Builder {
        let mut builder = Builder::new();
        builder.parse_filters(&self.filter());
        builder.write_style(self.write_style);
        builder
    }
}

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Installs the `env_logger` backend on the first call; later calls only
/// report the outcome of that first one.
///
/// Returns `false` when the host application had already installed its own
/// logger. Call it before building the first window so control construction
/// is visible at `debug` level.
pub fn init_logging(config: LoggingConfig) -> bool {
    *INSTALLED.get_or_init(|| {
        let installed = config.builder().try_init().is_ok();
        if installed {
            log::debug!("logging initialized with filter {:?}", config.filter());
        }
        installed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let config = LoggingConfig { env_filter: Some("glimmer_toolkit=trace".into()), ..Default::default() };
        assert_eq!(config.filter(), "glimmer_toolkit=trace");
    }

    #[test]
    fn init_is_idempotent() {
        let debug = LoggingConfig { env_filter: Some("debug".into()), ..Default::default() };
        let first = init_logging(debug);
        assert!(first);
        assert_eq!(log::max_level(), log::LevelFilter::Debug);

        let second = init_logging(LoggingConfig { env_filter: Some("error".into()), ..Default::default() });
        assert_eq!(second, first);
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
    }
}
