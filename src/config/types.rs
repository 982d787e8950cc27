// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

use crate::resolver::{IndexPolicy, ListingOrder};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads (CPU cores when unset)
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Content root and browsing behavior
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    /// Base directory, canonicalized at startup
    pub root: String,
    /// Index document looked up inside directories
    pub index_file: String,
    pub index_policy: IndexPolicy,
    pub listing_order: ListingOrder,
    /// Query parameter carrying the logical path
    pub query_param: String,
    /// List dot-files (they stay reachable by path either way)
    pub show_hidden: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Minimum level: error, warn, info or debug
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Upper bound on one connection's lifetime, in seconds
    pub request_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
}
