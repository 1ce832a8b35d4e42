use std::sync::Once;

/// Native logger configuration.
///
/// `filter` uses `env_logger` directives, e.g. `"retrohost_runtime=debug"`.
/// Without one, `RUST_LOG` applies, then `info`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Route output through the test harness capture instead of stderr.
    pub test_capture: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            write_style: env_logger::WriteStyle::Auto,
            test_capture: false,
        }
    }
}

impl LoggingConfig {
    /// Captured by `cargo test`, host lifecycle at `debug`, plain text.
    pub fn for_tests() -> Self {
        Self {
            filter: Some("retrohost_runtime=debug".to_string()),
            write_style: env_logger::WriteStyle::Never,
            test_capture: true,
        }
    }

    fn builder(&self) -> env_logger::Builder {
        let mut builder = env_logger::Builder::new();
        let env = std::env::var("RUST_LOG").ok();
        match self.filter.as_deref().or(env.as_deref()) {
            Some(filter) => {
                builder.parse_filters(filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Info);
            }
        }
        builder.write_style(self.write_style).is_test(self.test_capture);
        builder
    }
}

static INIT: Once = Once::new();

/// Installs the native logger. Only the first call has an effect; an already
/// installed logger is left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        if config.builder().try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
