// Configuration module entry point
// Loads layered configuration once at startup and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, ContentConfig, LoggingConfig, PerformanceConfig, ServerConfig};

use crate::logger::LogLevel;

/// Default configuration file name (extension optional)
pub const DEFAULT_CONFIG_PATH: &str = "sitebrowse";

/// Prefix of environment overrides, e.g. `SITEBROWSE_CONTENT__ROOT`
pub const ENV_PREFIX: &str = "SITEBROWSE";

impl Config {
    /// Load configuration from the default file
    pub fn load() -> Result<Self, ::config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Layers, lowest priority first: built-in defaults, the file (optional),
    /// then `SITEBROWSE_*` environment variables with `__` between sections.
    pub fn load_from(config_path: &str) -> Result<Self, ::config::ConfigError> {
        let settings = ::config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("content.root", "sites")?
            .set_default("content.index_file", "index.html")?
            .set_default("content.index_policy", "redirect")?
            .set_default("content.listing_order", "dirs_first")?
            .set_default("content.query_param", "path")?
            .set_default("content.show_hidden", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.request_timeout", 30)?
            .add_source(::config::File::with_name(config_path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that deserialize fine but can't be used
    fn validate(&self) -> Result<(), ::config::ConfigError> {
        if self.logging.level.parse::<LogLevel>().is_err() {
            return Err(::config::ConfigError::Message(format!(
                "logging.level: unknown level '{}'",
                self.logging.level
            )));
        }
        if self.content.index_file.is_empty() || self.content.index_file.contains('/') {
            return Err(::config::ConfigError::Message(format!(
                "content.index_file: '{}' must be a plain file name",
                self.content.index_file
            )));
        }
        if self.content.query_param.is_empty() {
            return Err(::config::ConfigError::Message(
                "content.query_param must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
