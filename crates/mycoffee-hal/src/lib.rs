//! # mycoffee-hal: HAL+JSON Client for the MyCoffee Backend
//!
//! ## Modules
//!
//! - [`resource`] - `Resource` and `Link`: the parsed HAL document
//! - [`hal`] - `Hal<T>`: validated decode into entity types (`merge`, `merge_all`)
//! - [`client`] - `HalClient`: GET / POST / PATCH / DELETE with HAL headers
//! - [`auth`] - `AuthProvider` and the credential providers
//! - [`config`] - `ClientConfig` (TOML file + environment)
//! - [`error`] - `HalError` / `HalResult`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mycoffee_core::Product;
//! use mycoffee_hal::{auth::StaticCredentials, ClientConfig, HalClient};
//!
//! # async fn run() -> mycoffee_hal::HalResult<()> {
//! let config = ClientConfig::load(None)?;
//! let auth = Arc::new(StaticCredentials::from_config(&config.credentials));
//! let client = HalClient::new(config, auth)?;
//!
//! let products = client.get_embedded::<Product>("/products", "products").await?;
//! for product in &products {
//!     println!("{} {:?}", product.name, product.self_href());
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod hal;
pub mod resource;

pub use auth::AuthProvider;
pub use client::HalClient;
pub use config::{AuthMode, ClientConfig};
pub use error::{HalError, HalResult};
pub use hal::{merge, merge_all, Hal};
pub use resource::{Link, Resource};
