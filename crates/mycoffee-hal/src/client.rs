//! # HAL Client
//!
//! One HTTP request per call, HAL headers and credentials attached.
//!
//! ## Request Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  path ──► resolve_url ──► base_url + path  (or path if http(s)://)     │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  headers: Accept: application/hal+json                                 │
//! │           Cache-Control: no-store                                      │
//! │           Content-Type: application/json   (when a body is sent)       │
//! │           Authorization: <credential>      (when the provider has one) │
//! │           + configured default headers                                 │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  reqwest ──► 2xx ──► Resource::from_json(body)                         │
//! │         │         └► DELETE + (204 | empty body) ──► None              │
//! │         │                                                               │
//! │         └──► non-2xx ──► error! log ──► HalError::Status               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries, no caching, no timeouts beyond reqwest's defaults.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CACHE_CONTROL};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use crate::auth::{authorization_header, Anonymous, AuthProvider};
use crate::config::ClientConfig;
use crate::error::{HalError, HalResult};
use crate::hal::{merge, merge_all, Hal};
use crate::resource::Resource;

/// Media type requested on every call.
pub const HAL_JSON: &str = "application/hal+json";

/// HAL+JSON client shared by every service.
///
/// Cheap to clone: the connection pool, config and credential provider are
/// reference counted.
#[derive(Clone)]
pub struct HalClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    auth: Arc<dyn AuthProvider>,
}

impl std::fmt::Debug for HalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HalClient")
            .field("base_url", &self.config.base_url())
            .field("auth_mode", &self.config.auth_mode())
            .finish_non_exhaustive()
    }
}

impl HalClient {
    /// Builds a client from a validated config and a credential provider.
    pub fn new(config: ClientConfig, auth: Arc<dyn AuthProvider>) -> HalResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(HAL_JSON));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        for (name, value) in &config.api.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| HalError::InvalidConfig(format!("header '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| HalError::InvalidConfig(format!("header '{}': {}", name, e)))?;
            headers.insert(name, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(HalClient {
            http,
            config: Arc::new(config),
            auth,
        })
    }

    /// Client that never sends credentials.
    pub fn anonymous(config: ClientConfig) -> HalResult<Self> {
        Self::new(config, Arc::new(Anonymous))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute paths pass through; anything else is appended to the base URL.
    ///
    /// ```rust
    /// use mycoffee_hal::{ClientConfig, HalClient};
    ///
    /// let client = HalClient::anonymous(ClientConfig::with_base_url("http://api.local/")).unwrap();
    /// assert_eq!(client.resolve_url("/baskets"), "http://api.local/baskets");
    /// assert_eq!(client.resolve_url("https://cdn.local/x"), "https://cdn.local/x");
    /// ```
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.config.base_url(), path)
        }
    }

    /// Absolute form of a possibly relative URI, used when the backend
    /// expects a full URI as a query value.
    pub fn absolute_uri(&self, uri: &str) -> String {
        self.resolve_url(uri)
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    /// GET a resource.
    pub async fn get(&self, path: &str) -> HalResult<Resource> {
        let (_, body) = self.send(Method::GET, path, None::<&()>).await?;
        Resource::from_json(&body)
    }

    /// Same as [`get`](Self::get).
    pub async fn fetch(&self, path: &str) -> HalResult<Resource> {
        self.get(path).await
    }

    /// POST a JSON body and parse the returned resource.
    pub async fn post<B>(&self, path: &str, body: &B) -> HalResult<Resource>
    where
        B: Serialize + ?Sized,
    {
        let (_, text) = self.send(Method::POST, path, Some(body)).await?;
        Resource::from_json(&text)
    }

    /// PATCH a JSON body and parse the returned resource.
    pub async fn patch<B>(&self, path: &str, body: &B) -> HalResult<Resource>
    where
        B: Serialize + ?Sized,
    {
        let (_, text) = self.send(Method::PATCH, path, Some(body)).await?;
        Resource::from_json(&text)
    }

    /// DELETE a resource. `204 No Content` or an empty body yields `None`.
    pub async fn delete(&self, path: &str) -> HalResult<Option<Resource>> {
        let (status, text) = self.send(Method::DELETE, path, None::<&()>).await?;
        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(None);
        }
        Resource::from_json(&text).map(Some)
    }

    // =========================================================================
    // Typed Conveniences
    // =========================================================================

    /// GET and decode into `T`.
    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> HalResult<Hal<T>> {
        merge(self.get(path).await?)
    }

    /// GET a collection and decode the embedded array under `rel`.
    ///
    /// A response without that key is an empty collection.
    pub async fn get_embedded<T: DeserializeOwned>(
        &self,
        path: &str,
        rel: &str,
    ) -> HalResult<Vec<Hal<T>>> {
        let resource = self.get(path).await?;
        merge_all(resource.embedded_array(rel).iter().cloned())
    }

    /// POST and decode the created entity.
    pub async fn post_as<B, T>(&self, path: &str, body: &B) -> HalResult<Hal<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        merge(self.post(path, body).await?)
    }

    /// PATCH and decode the updated entity.
    pub async fn patch_as<B, T>(&self, path: &str, body: &B) -> HalResult<Hal<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        merge(self.patch(path, body).await?)
    }

    // =========================================================================
    // Transport
    // =========================================================================

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> HalResult<(StatusCode, String)>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve_url(path);
        let mut request = self.http.request(method.clone(), &url);

        if let Some(credential) =
            authorization_header(self.auth.get_auth().await, self.config.auth_mode())
        {
            let value = HeaderValue::from_str(&credential).map_err(|_| {
                HalError::InvalidConfig("credential is not a valid header value".into())
            })?;
            request = request.header(AUTHORIZATION, value);
        }

        if let Some(body) = body {
            // Sets Content-Type: application/json
            request = request.json(body);
        }

        debug!(%method, %url, "HAL request");

        let response = request.send().await.map_err(|e| {
            error!(%method, %url, error = %e, "HAL request failed to send");
            HalError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let detail = (method != Method::GET).then(|| text.clone());
            error!(
                status = status.as_u16(),
                %method,
                %url,
                detail = detail.as_deref().unwrap_or(""),
                "Backend returned an error"
            );
            return Err(HalError::Status {
                status: status.as_u16(),
                method: method.to_string(),
                url,
                detail,
            });
        }

        debug!(status = status.as_u16(), %method, %url, "HAL response");
        Ok((status, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let client = HalClient::anonymous(ClientConfig::with_base_url("http://api.local:8080")).unwrap();
        assert_eq!(client.resolve_url("/products/1"), "http://api.local:8080/products/1");
        assert_eq!(client.resolve_url("http://other/x"), "http://other/x");
        assert_eq!(client.resolve_url("https://other/x"), "https://other/x");
        // only the scheme prefix counts as absolute
        assert_eq!(client.resolve_url("httpish"), "http://api.local:8080httpish");
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let err = HalClient::anonymous(ClientConfig::with_base_url("localhost:8080")).unwrap_err();
        assert!(err.is_config_error());
    }
}
