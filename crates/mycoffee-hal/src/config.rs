//! # Client Configuration
//!
//! One [`ClientConfig`] is built at startup and handed to every service
//! through [`HalClient`](crate::client::HalClient). Nothing else in the
//! workspace reads the environment.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MYCOFFEE_API_BASE_URL, then API_BASE_URL                           │
//! │     MYCOFFEE_AUTH_MODE=basic                                           │
//! │     MYCOFFEE_USERNAME / MYCOFFEE_PASSWORD                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.mycoffee.storefront/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://127.0.0.1:8080, verbatim credentials, anonymous             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [api]
//! base_url = "http://127.0.0.1:8080"
//! auth_mode = "verbatim"  # verbatim | basic
//!
//! [api.default_headers]
//! X-Client = "storefront"
//!
//! [credentials]
//! username = "alice"
//! password = "secret"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{HalError, HalResult};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

// =============================================================================
// Auth Mode
// =============================================================================

/// How the credential returned by an [`AuthProvider`](crate::auth::AuthProvider)
/// becomes the `Authorization` header.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  credential              VERBATIM (default)        BASIC                │
/// │  ─────────────────────   ───────────────────────   ──────────────────── │
/// │  "Basic YWxpY2U6eA=="    "Basic YWxpY2U6eA=="      "Basic YWxpY2U6eA==" │
/// │  "alice:x"               "alice:x"                 "Basic YWxpY2U6eA==" │
/// │  None / ""               (no header)               (no header)          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Send the credential exactly as the provider returned it.
    #[default]
    Verbatim,

    /// Base64-encode `user:password` credentials unless already prefixed.
    Basic,
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMode::Verbatim => write!(f, "verbatim"),
            AuthMode::Basic => write!(f, "basic"),
        }
    }
}

impl std::str::FromStr for AuthMode {
    type Err = HalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verbatim" | "raw" | "passthrough" => Ok(AuthMode::Verbatim),
            "basic" => Ok(AuthMode::Basic),
            other => Err(HalError::InvalidConfig(format!(
                "Unknown auth mode: '{}'. Valid options: verbatim, basic",
                other
            ))),
        }
    }
}

// =============================================================================
// API Settings
// =============================================================================

/// Where and how to reach the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Root of the HAL API. Relative paths are appended to it verbatim.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub auth_mode: AuthMode,

    /// Extra headers sent with every request.
    #[serde(default)]
    pub default_headers: BTreeMap<String, String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            auth_mode: AuthMode::default(),
            default_headers: BTreeMap::new(),
        }
    }
}

// =============================================================================
// Credentials
// =============================================================================

/// Account used by the console storefront.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Credentials {
    /// Returns `(username, password)` when a non-empty username is set.
    ///
    /// A missing password is treated as empty.
    pub fn pair(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        Some((username, self.password.as_deref().unwrap_or("")))
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub credentials: Credentials,
}

impl ClientConfig {
    /// Creates a config pointing at `base_url` with everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        ClientConfig {
            api: ApiSettings {
                base_url: base_url.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> HalResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> HalResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| HalError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| HalError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| HalError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Storefront config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> HalResult<()> {
        let base = self.api.base_url.trim();

        if base.is_empty() {
            return Err(HalError::InvalidConfig("base_url must not be empty".into()));
        }

        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(HalError::InvalidUrl(format!(
                "Base URL must start with http:// or https://, got: {}",
                base
            )));
        }

        url::Url::parse(base)?;

        for name in self.api.default_headers.keys() {
            if reqwest::header::HeaderName::from_bytes(name.as_bytes()).is_err() {
                return Err(HalError::InvalidConfig(format!(
                    "Invalid default header name: '{}'",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. `apply_env_overrides` passes
    /// the process environment.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Base URL: the app-specific name wins over the generic one
        if let Some(url) = lookup("MYCOFFEE_API_BASE_URL").or_else(|| lookup("API_BASE_URL")) {
            debug!(url = %url, "Overriding base URL from environment");
            self.api.base_url = url;
        }

        if let Some(mode) = lookup("MYCOFFEE_AUTH_MODE") {
            match mode.parse() {
                Ok(parsed) => self.api.auth_mode = parsed,
                Err(_) => warn!(mode = %mode, "Unknown auth mode in environment"),
            }
        }

        if let Some(username) = lookup("MYCOFFEE_USERNAME") {
            self.credentials.username = Some(username);
        }

        if let Some(password) = lookup("MYCOFFEE_PASSWORD") {
            self.credentials.password = Some(password);
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "mycoffee", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim().trim_end_matches('/')
    }

    /// Returns the auth mode.
    pub fn auth_mode(&self) -> AuthMode {
        self.api.auth_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_auth_mode_parsing() {
        assert_eq!("basic".parse::<AuthMode>().unwrap(), AuthMode::Basic);
        assert_eq!("Verbatim".parse::<AuthMode>().unwrap(), AuthMode::Verbatim);
        assert!("bearer".parse::<AuthMode>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.auth_mode(), AuthMode::Verbatim);
        assert!(config.credentials.pair().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_normalized() {
        let config = ClientConfig::with_base_url("http://api.local:9000/");
        assert_eq!(config.base_url(), "http://api.local:9000");
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::with_base_url("ftp://files.local");
        assert!(matches!(config.validate(), Err(HalError::InvalidUrl(_))));

        config.api.base_url = String::new();
        assert!(config.validate().unwrap_err().is_config_error());

        config.api.base_url = "https://shop.example.com/api".into();
        assert!(config.validate().is_ok());

        config
            .api
            .default_headers
            .insert("Bad Header".into(), "x".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_precedence() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("API_BASE_URL", "http://generic:1"),
            ("MYCOFFEE_API_BASE_URL", "http://specific:2"),
            ("MYCOFFEE_AUTH_MODE", "basic"),
            ("MYCOFFEE_USERNAME", "alice"),
        ]);

        let mut config = ClientConfig::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.base_url(), "http://specific:2");
        assert_eq!(config.auth_mode(), AuthMode::Basic);
        assert_eq!(config.credentials.pair(), Some(("alice", "")));
    }

    #[test]
    fn test_generic_base_url_fallback() {
        let mut config = ClientConfig::default();
        config.apply_overrides(|k| (k == "API_BASE_URL").then(|| "http://generic:1".to_string()));
        assert_eq!(config.base_url(), "http://generic:1");
    }

    #[test]
    fn test_toml_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storefront.toml");

        let mut config = ClientConfig::with_base_url("http://shop.local:8080");
        config.api.auth_mode = AuthMode::Basic;
        config
            .api
            .default_headers
            .insert("X-Client".into(), "storefront".into());
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[api]"));

        let parsed: ClientConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: ClientConfig = toml::from_str("[credentials]\nusername = \"bob\"\n").unwrap();
        assert_eq!(parsed.base_url(), DEFAULT_BASE_URL);
        assert_eq!(parsed.credentials.pair(), Some(("bob", "")));
    }
}
