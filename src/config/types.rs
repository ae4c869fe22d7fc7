// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
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
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
    /// Listen backlog passed to the socket
    #[serde(default = "default_backlog")]
    pub backlog: i32,
}

const fn default_backlog() -> i32 {
    128
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// Built-in routes configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RoutesConfig {
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
    /// Register the greeting/tip/calc exercise routes
    #[serde(default = "default_exercises")]
    pub exercises: bool,
}

const fn default_exercises() -> bool {
    true
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            health: HealthConfig::default(),
            exercises: default_exercises(),
        }
    }
}

/// Health check configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}

/// Where record collections live
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Process memory, seeded at startup
    Memory,
    /// JSON documents under the directory named by the connection string
    Document,
}

/// Record store configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Environment variable holding the document store connection string
    pub url_env: String,
    /// Start collections from the built-in seed data
    pub seed: bool,
    /// Resources to serve (empty means the whole catalog)
    #[serde(default)]
    pub resources: Vec<String>,
}

/// Response format chosen when the request does not ask for one
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DefaultFormat {
    #[default]
    Json,
    Html,
}

/// Response rendering configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RenderConfig {
    /// Directory with `<name>.html` templates overriding the built-in ones
    #[serde(default)]
    pub template_dir: Option<String>,
    #[serde(default)]
    pub default_format: DefaultFormat,
}
