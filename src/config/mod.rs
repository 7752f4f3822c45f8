//! Configuration management
//!
//! Configuration is loaded from `config.yml` and can be overridden with
//! `GALIN_*` environment variables. Missing values fall back to defaults
//! that run the site against the in-process store with demo content.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// External data store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Auth collaborator configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Admin panel configuration
    #[serde(default)]
    pub admin: AdminConfig,
    /// Contact form timings
    #[serde(default)]
    pub contact: ContactConfig,
    /// Site-wide display settings
    #[serde(default)]
    pub site: SiteConfig,
    /// Template override configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:8080".to_string()
}

/// External store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store driver (memory or rest)
    #[serde(default)]
    pub driver: StoreDriver,
    /// Base URL of the hosted backend (rest driver)
    #[serde(default)]
    pub url: String,
    /// Public API key sent with every backend request (rest driver)
    #[serde(default)]
    pub api_key: String,
    /// Seed the memory store with demo content
    #[serde(default = "default_true")]
    pub seed_demo: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            driver: StoreDriver::default(),
            url: String::new(),
            api_key: String::new(),
            seed_demo: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Store driver type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreDriver {
    /// In-process tables (default)
    #[default]
    Memory,
    /// Hosted backend over HTTP
    Rest,
}

/// Auth collaborator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Auth driver (static or rest)
    #[serde(default)]
    pub driver: AuthDriver,
    /// Session token -> user id (static driver)
    #[serde(default)]
    pub tokens: HashMap<String, String>,
}

/// Auth driver type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthDriver {
    /// Fixed token table from configuration (default)
    #[default]
    Static,
    /// Hosted backend auth endpoint, reusing the store URL and key
    Rest,
}

/// Admin panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Require a valid session for /admin routes
    #[serde(default = "default_true")]
    pub require_auth: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self { require_auth: true }
    }
}

/// Contact form timings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Simulated submission delay in milliseconds
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
    /// How long the success message stays before reverting, in milliseconds
    #[serde(default = "default_success_timeout_ms")]
    pub success_timeout_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            success_timeout_ms: default_success_timeout_ms(),
        }
    }
}

fn default_submit_delay_ms() -> u64 {
    1500
}

fn default_success_timeout_ms() -> u64 {
    5000
}

/// Site-wide display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site name shown in titles
    #[serde(default = "default_site_name")]
    pub name: String,
    /// Image used when a remote image is missing or fails to load
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

fn default_site_name() -> String {
    "Galin Education".to_string()
}

fn default_placeholder_image() -> String {
    crate::ui::image::PLACEHOLDER_IMAGE.to_string()
}

/// Template override configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Directory with `.html` templates that replace the embedded ones
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// A missing or empty file yields the defaults. Invalid YAML is an error
    /// that names the line and column.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Recognised variables:
    /// - GALIN_SERVER_HOST, GALIN_SERVER_PORT, GALIN_SERVER_CORS_ORIGIN
    /// - GALIN_STORE_DRIVER, GALIN_STORE_URL, GALIN_STORE_API_KEY, GALIN_STORE_SEED_DEMO
    /// - GALIN_AUTH_DRIVER
    /// - GALIN_ADMIN_REQUIRE_AUTH
    /// - GALIN_CONTACT_SUBMIT_DELAY_MS, GALIN_CONTACT_SUCCESS_TIMEOUT_MS
    /// - GALIN_SITE_NAME, GALIN_THEME_PATH
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that cannot work at runtime
    fn validate(&self) -> Result<(), ConfigError> {
        let needs_backend =
            self.store.driver == StoreDriver::Rest || self.auth.driver == AuthDriver::Rest;
        if needs_backend && self.store.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "store.url is required when the rest store or rest auth driver is used"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("GALIN_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("GALIN_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("GALIN_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        if let Ok(driver) = std::env::var("GALIN_STORE_DRIVER") {
            match driver.to_lowercase().as_str() {
                "memory" => self.store.driver = StoreDriver::Memory,
                "rest" => self.store.driver = StoreDriver::Rest,
                _ => {}
            }
        }
        if let Ok(url) = std::env::var("GALIN_STORE_URL") {
            self.store.url = url;
        }
        if let Ok(key) = std::env::var("GALIN_STORE_API_KEY") {
            self.store.api_key = key;
        }
        if let Ok(seed) = std::env::var("GALIN_STORE_SEED_DEMO") {
            if let Ok(seed) = seed.parse::<bool>() {
                self.store.seed_demo = seed;
            }
        }

        if let Ok(driver) = std::env::var("GALIN_AUTH_DRIVER") {
            match driver.to_lowercase().as_str() {
                "static" => self.auth.driver = AuthDriver::Static,
                "rest" => self.auth.driver = AuthDriver::Rest,
                _ => {}
            }
        }

        if let Ok(require) = std::env::var("GALIN_ADMIN_REQUIRE_AUTH") {
            if let Ok(require) = require.parse::<bool>() {
                self.admin.require_auth = require;
            }
        }

        if let Ok(delay) = std::env::var("GALIN_CONTACT_SUBMIT_DELAY_MS") {
            if let Ok(delay) = delay.parse::<u64>() {
                self.contact.submit_delay_ms = delay;
            }
        }
        if let Ok(timeout) = std::env::var("GALIN_CONTACT_SUCCESS_TIMEOUT_MS") {
            if let Ok(timeout) = timeout.parse::<u64>() {
                self.contact.success_timeout_ms = timeout;
            }
        }

        if let Ok(name) = std::env::var("GALIN_SITE_NAME") {
            self.site.name = name;
        }
        if let Ok(path) = std::env::var("GALIN_THEME_PATH") {
            self.theme.path = Some(PathBuf::from(path));
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Config tests that touch the process environment share this lock.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
const ENV_VARS: &[&str] = &[
    "GALIN_SERVER_HOST",
    "GALIN_SERVER_PORT",
    "GALIN_SERVER_CORS_ORIGIN",
    "GALIN_STORE_DRIVER",
    "GALIN_STORE_URL",
    "GALIN_STORE_API_KEY",
    "GALIN_STORE_SEED_DEMO",
    "GALIN_AUTH_DRIVER",
    "GALIN_ADMIN_REQUIRE_AUTH",
    "GALIN_CONTACT_SUBMIT_DELAY_MS",
    "GALIN_CONTACT_SUCCESS_TIMEOUT_MS",
    "GALIN_SITE_NAME",
    "GALIN_THEME_PATH",
];


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn store_driver_strategy() -> impl Strategy<Value = StoreDriver> {
        prop_oneof![Just(StoreDriver::Memory), Just(StoreDriver::Rest)]
    }

    fn config_strategy() -> impl Strategy<Value = Config> {
        (
            "[a-z][a-z0-9]{0,10}",
            1u16..=65535,
            store_driver_strategy(),
            any::<bool>(),
            0u64..=10_000,
            0u64..=60_000,
        )
            .prop_map(|(host, port, driver, require_auth, delay, timeout)| {
                let mut config = Config::default();
                config.server.host = host;
                config.server.port = port;
                config.store.driver = driver;
                config.store.url = "https://backend.example.com".to_string();
                config.admin.require_auth = require_auth;
                config.contact.submit_delay_ms = delay;
                config.contact.success_timeout_ms = timeout;
                config
            })
    }

    fn malformed_yaml_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("server:\n  port: not_a_number".to_string()),
            Just("server:\n  port: true".to_string()),
            Just("server:\n  port: 99999999999999999999".to_string()),
            Just("store:\n  driver: postgres".to_string()),
            Just("auth:\n  driver: oauth".to_string()),
            Just("contact:\n  submit_delay_ms: -1".to_string()),
            Just("admin:\n  require_auth: maybe".to_string()),
            Just("server: [invalid, list]".to_string()),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn config_survives_yaml_roundtrip(config in config_strategy()) {
            let yaml = serde_yaml::to_string(&config).expect("serialize config");
            let mut file = NamedTempFile::new().expect("temp file");
            write!(file, "{}", yaml).expect("write config");

            let parsed = Config::load(file.path()).expect("parse config");

            prop_assert_eq!(config.server.host, parsed.server.host);
            prop_assert_eq!(config.server.port, parsed.server.port);
            prop_assert_eq!(config.store.driver, parsed.store.driver);
            prop_assert_eq!(config.admin.require_auth, parsed.admin.require_auth);
            prop_assert_eq!(config.contact.submit_delay_ms, parsed.contact.submit_delay_ms);
            prop_assert_eq!(config.contact.success_timeout_ms, parsed.contact.success_timeout_ms);
        }

        #[test]
        fn malformed_config_is_an_error(yaml in malformed_yaml_strategy()) {
            let mut file = NamedTempFile::new().expect("temp file");
            write!(file, "{}", yaml).expect("write config");
            prop_assert!(Config::load(file.path()).is_err());
        }
    }
}
