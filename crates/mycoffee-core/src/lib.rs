//! # mycoffee-core: Domain Layer for the MyCoffee Storefront
//!
//! Pure types and rules shared by the HAL client, the resource services and
//! the storefront app. Nothing in here touches the network.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     MyCoffee Storefront Layers                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/storefront (console)                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        mycoffee-services (Basket, Inventory, Product, ...)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             mycoffee-hal (Resource, HalClient)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mycoffee-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │ Inventory │  │   Money   │  │ CoreError │  │  stock    │  │   │
//! │  │   │  Basket   │  │  totals   │  │           │  │  times    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire records (Inventory, Product, Basket, ...) and payloads
//! - [`money`] - Integer-cent money for basket totals
//! - [`error`] - Domain error types
//! - [`validation`] - Stock, quantity and time-of-day rules
//!
//! ## Example Usage
//!
//! ```rust
//! use mycoffee_core::validation::validate_stock_adjustment;
//!
//! // Decrementing an empty shelf is rejected before any request is made
//! assert!(validate_stock_adjustment(0, -1, None).is_err());
//!
//! // Capacity caps increments
//! assert_eq!(validate_stock_adjustment(9, 1, Some(10)).unwrap(), 10);
//! assert!(validate_stock_adjustment(10, 1, Some(10)).is_err());
//! ```

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

/// Maximum quantity of a single product added to a basket in one request.
///
/// ## Business Reason
/// Prevents accidental over-ordering (typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Label shown for basket lines whose product could not be resolved.
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";
