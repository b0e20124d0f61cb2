//! Configuration module for environment variable parsing.
//!
//! All configuration is read once at process start and shared read-only
//! through [`crate::web::AppState`].

use std::env;
use tracing::warn;

/// Header the content backend puts the body signature in.
pub const DEFAULT_SIGNATURE_HEADER: &str = "x-contentful-signature";

/// Locale used to pick the slug when the payload does not name one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Deployment environment, which controls how much payload data may be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// Anything other than an explicit development marker is production.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Shared secret used to key the webhook body HMAC
    pub webhook_secret: Option<String>,

    /// Name of the request header carrying the signature
    pub signature_header: String,

    /// Locale used when the payload has no `sys.locale`
    pub default_locale: String,

    /// Deployment environment
    pub environment: Environment,

    /// Emit verbose per-request diagnostics at debug level
    pub diagnostics: bool,

    /// Optional external purge endpoint; in-memory invalidation when unset
    pub purge_url: Option<String>,

    /// Bearer token sent to the purge endpoint
    pub purge_token: Option<String>,

    /// HTTP request timeout in milliseconds for purge calls
    pub request_timeout_ms: u64,

    /// Maximum accepted webhook body size
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            webhook_secret: None,
            signature_header: DEFAULT_SIGNATURE_HEADER.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            environment: Environment::Production,
            diagnostics: false,
            purge_url: None,
            purge_token: None,
            request_timeout_ms: 8000,
            max_body_bytes: 1024 * 1024,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            port: parse_or("PORT", defaults.port),

            webhook_secret: env::var("CONTENTFUL_WEBHOOK_SECRET").ok(),

            signature_header: non_empty("WEBHOOK_SIGNATURE_HEADER")
                .map(|h| h.to_ascii_lowercase())
                .unwrap_or(defaults.signature_header),

            default_locale: non_empty("DEFAULT_LOCALE").unwrap_or(defaults.default_locale),

            environment: env::var("APP_ENV")
                .map(|v| Environment::parse(&v))
                .unwrap_or(defaults.environment),

            diagnostics: parse_bool("WEBHOOK_DIAGNOSTICS", defaults.diagnostics),

            purge_url: non_empty("REVALIDATE_PURGE_URL"),

            purge_token: non_empty("REVALIDATE_PURGE_TOKEN"),

            request_timeout_ms: parse_or("REQUEST_TIMEOUT_MS", defaults.request_timeout_ms),

            max_body_bytes: parse_or("MAX_BODY_BYTES", defaults.max_body_bytes),
        }
    }

    /// The webhook secret, if one is configured and not blank.
    pub fn webhook_secret(&self) -> Option<&str> {
        self.webhook_secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    /// Whether a raw body preview may be written to the logs.
    pub fn may_log_raw_body(&self) -> bool {
        self.diagnostics && !self.environment.is_production()
    }
}

/// Read a variable, treating blank values as unset.
fn non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a variable with `FromStr`, falling back to the default on absence or error.
fn parse_or<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}

/// Parse a boolean flag like "true", "1", "yes".
fn parse_bool(name: &str, default: bool) -> bool {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!(env_var = name, value = %raw, "Invalid flag, using default");
            default
        }
    }
}
