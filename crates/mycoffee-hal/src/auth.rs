//! # Credential Providers
//!
//! The HAL client asks an [`AuthProvider`] for a credential before every
//! request. Providers never refresh tokens; they hand back whatever they hold.
//!
//! ## Provider Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  HalClient::get("/baskets")                                            │
//! │        │                                                                │
//! │        │  1. provider.get_auth().await                                  │
//! │        ▼                                                                │
//! │  ┌──────────────────┐   Option<String>   ┌──────────────────────────┐  │
//! │  │  AuthProvider    │───────────────────►│ authorization_header()   │  │
//! │  │  Anonymous       │                    │  AuthMode::Verbatim      │  │
//! │  │  Static...       │                    │  AuthMode::Basic         │  │
//! │  │  Session...      │                    └────────────┬─────────────┘  │
//! │  └──────────────────┘                                 │                │
//! │                                        2. Authorization: <value>       │
//! │                                           (omitted when None)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::{AuthMode, Credentials};

const BASIC_PREFIX: &str = "Basic ";

/// Supplies the credential string for the `Authorization` header.
///
/// Returning `None` (or an empty string) sends the request anonymously.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn get_auth(&self) -> Option<String>;
}

/// Builds a `Basic` header value from a username and password.
///
/// ```rust
/// use mycoffee_hal::auth::basic_credential;
///
/// assert_eq!(basic_credential("alice", "secret"), "Basic YWxpY2U6c2VjcmV0");
/// ```
pub fn basic_credential(username: &str, password: &str) -> String {
    format!("{BASIC_PREFIX}{}", STANDARD.encode(format!("{username}:{password}")))
}

/// Turns a provider credential into the header value for `mode`.
///
/// Empty credentials yield `None` in both modes.
pub fn authorization_header(raw: Option<String>, mode: AuthMode) -> Option<String> {
    let raw = raw.filter(|r| !r.is_empty())?;

    match mode {
        AuthMode::Verbatim => Some(raw),
        AuthMode::Basic if raw.starts_with(BASIC_PREFIX) => Some(raw),
        AuthMode::Basic => Some(format!("{BASIC_PREFIX}{}", STANDARD.encode(raw.as_bytes()))),
    }
}

// =============================================================================
// Providers
// =============================================================================

/// Never sends credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

#[async_trait]
impl AuthProvider for Anonymous {
    async fn get_auth(&self) -> Option<String> {
        None
    }
}

/// A fixed credential, typically read from config at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    value: Option<String>,
}

impl StaticCredentials {
    /// Wraps a credential string as-is (`"Basic ..."`, `"Bearer ..."`, or a
    /// raw `user:password` for [`AuthMode::Basic`]).
    pub fn new(value: impl Into<String>) -> Self {
        StaticCredentials {
            value: Some(value.into()),
        }
    }

    /// Basic credential from the config's username and password, or
    /// anonymous when no username is configured.
    pub fn from_config(credentials: &Credentials) -> Self {
        StaticCredentials {
            value: credentials
                .pair()
                .map(|(user, pass)| basic_credential(user, pass)),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticCredentials {
    async fn get_auth(&self) -> Option<String> {
        self.value.clone()
    }
}

/// A login session that can change while the client is in use.
#[derive(Debug, Default)]
pub struct SessionCredentials {
    current: RwLock<Option<String>>,
}

impl SessionCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a Basic credential for the given account.
    pub async fn login(&self, username: &str, password: &str) {
        let mut guard = self.current.write().await;
        *guard = Some(basic_credential(username, password));
        debug!(username, "Session credentials set");
    }

    /// Stores an arbitrary credential string.
    pub async fn set_raw(&self, value: impl Into<String>) {
        *self.current.write().await = Some(value.into());
    }

    /// Forgets the credential; later requests go out anonymously.
    pub async fn logout(&self) {
        *self.current.write().await = None;
        debug!("Session credentials cleared");
    }

    pub async fn is_logged_in(&self) -> bool {
        self.current.read().await.is_some()
    }
}

#[async_trait]
impl AuthProvider for SessionCredentials {
    async fn get_auth(&self) -> Option<String> {
        self.current.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_passes_through() {
        assert_eq!(
            authorization_header(Some("alice:x".into()), AuthMode::Verbatim),
            Some("alice:x".to_string())
        );
        assert_eq!(
            authorization_header(Some("Bearer t0k".into()), AuthMode::Verbatim),
            Some("Bearer t0k".to_string())
        );
    }

    #[test]
    fn test_basic_encodes_raw_credentials() {
        assert_eq!(
            authorization_header(Some("alice:x".into()), AuthMode::Basic),
            Some("Basic YWxpY2U6eA==".to_string())
        );
        assert_eq!(
            authorization_header(Some("Basic YWxpY2U6eA==".into()), AuthMode::Basic),
            Some("Basic YWxpY2U6eA==".to_string())
        );
    }

    #[test]
    fn test_empty_credentials_send_nothing() {
        assert_eq!(authorization_header(None, AuthMode::Basic), None);
        assert_eq!(authorization_header(Some(String::new()), AuthMode::Verbatim), None);
    }

    #[tokio::test]
    async fn test_static_from_config() {
        let creds = Credentials {
            username: Some("alice".into()),
            password: Some("x".into()),
        };
        let provider = StaticCredentials::from_config(&creds);
        assert_eq!(provider.get_auth().await, Some("Basic YWxpY2U6eA==".to_string()));

        let anonymous = StaticCredentials::from_config(&Credentials::default());
        assert_eq!(anonymous.get_auth().await, None);
        assert_eq!(Anonymous.get_auth().await, None);
    }

    #[tokio::test]
    async fn test_session_login_logout() {
        let session = SessionCredentials::new();
        assert!(!session.is_logged_in().await);

        session.login("bob", "pw").await;
        assert_eq!(session.get_auth().await, Some(basic_credential("bob", "pw")));

        session.logout().await;
        assert_eq!(session.get_auth().await, None);
    }
}
