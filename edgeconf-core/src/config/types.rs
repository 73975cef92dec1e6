//! Configuration type definitions
//!
//! These types carry every fixed value the generator emits. The defaults
//! reproduce the settings the storefront deployments have always used.

use serde::{Deserialize, Serialize};

/// Root configuration for the generator
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Main-context settings (workers, logs, pid)
    pub process: ProcessConfig,

    /// `http` and `server` block settings
    pub http: HttpConfig,

    /// Object-storage origin serving the built site
    pub storage: StorageConfig,

    /// Forwarding settings for redirect locations
    pub proxy: ProxyConfig,

    /// Routing policies
    pub policy: RoutingPolicy,

    /// Output file settings
    pub output: OutputConfig,
}

/// Main-context settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProcessConfig {
    pub worker_processes: u32,
    pub worker_rlimit_nofile: u32,
    pub worker_connections: u32,
    pub error_log: String,
    pub error_log_level: String,
    pub pid: String,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            worker_processes: 3,
            worker_rlimit_nofile: 8192,
            worker_connections: 1024,
            error_log: "/var/log/nginx_errors.log".to_string(),
            error_log_level: "debug".to_string(),
            pid: "/var/log/nginx_run.pid".to_string(),
        }
    }
}

/// `http` and `server` block settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub access_log: String,

    /// Listen address of the single server block
    pub listen: String,

    /// Mark the server block as `default_server`
    pub default_server: bool,

    /// DNS resolver used for proxied origins
    pub resolver: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            access_log: "/var/log/nginx_access.log".to_string(),
            listen: "0.0.0.0:8080".to_string(),
            default_server: true,
            resolver: "1.1.1.1".to_string(),
        }
    }
}

/// Object-storage origin settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Base URL of the uploaded `public` directory, without trailing slash
    pub origin: String,

    /// Document appended to extensionless paths
    pub default_document: String,

    /// Name of the location proxying to the origin
    pub proxy_location: String,

    /// Name of the location holding the client-side rewrites
    pub fallback_location: String,

    /// Upstream status codes redirected to the fallback location
    pub fallback_status_codes: Vec<u16>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            origin: "https://s3.amazonaws.com/site-bucket/public".to_string(),
            default_document: "index.html".to_string(),
            proxy_location: "@storage".to_string(),
            fallback_location: "@client_side_fallback".to_string(),
            fallback_status_codes: vec![403, 404],
        }
    }
}

/// Headers forwarded with redirected requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Custom header carrying the original proxy host
    pub forwarded_host_header: String,

    pub http_version: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            forwarded_host_header: "X-Vtex-Graphql-Referer".to_string(),
            http_version: "1.1".to_string(),
        }
    }
}

/// Routing policies whose intended behavior differs between deployments
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RoutingPolicy {
    pub slug: SlugPolicy,
    pub rewrite_terminal: RewriteTerminal,
}

/// How a `:slug` placeholder is translated
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SlugPolicy {
    /// `.*?`, may cross `/`
    #[default]
    Lazy,
    /// `[^/]+`, exactly one path segment
    SingleSegment,
}

impl SlugPolicy {
    /// Regex fragment substituted for `:slug`
    pub fn fragment(self) -> &'static str {
        match self {
            SlugPolicy::Lazy => ".*?",
            SlugPolicy::SingleSegment => "[^/]+",
        }
    }
}

/// What the client-side fallback location does after its rewrites
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RewriteTerminal {
    /// Plain rewrites, then `return 200`
    #[default]
    Ok,
    /// Rewrites flagged `last`, then `return 404`
    NotFound,
}

impl RewriteTerminal {
    /// Flag appended to each rewrite statement
    pub fn rewrite_flag(self) -> Option<&'static str> {
        match self {
            RewriteTerminal::Ok => None,
            RewriteTerminal::NotFound => Some("last"),
        }
    }

    /// Status returned when no rewrite matched
    pub fn status(self) -> u16 {
        match self {
            RewriteTerminal::Ok => 200,
            RewriteTerminal::NotFound => 404,
        }
    }
}

/// Output file settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// File name written into the site directory
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name: "nginx.out.conf".to_string(),
        }
    }
}
