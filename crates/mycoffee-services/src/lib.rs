//! # mycoffee-services: Resource Services and Storefront Flows
//!
//! Domain-named wrappers over [`HalClient`], one per backend resource, plus
//! the flows that need more than one request.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  apps/storefront                                                       │
//! │       │                                                                 │
//! │       │  storefront.inventories().get_my_inventories(&user)            │
//! │       ▼                                                                 │
//! │  Storefront ──► InventoryService                                       │
//! │                  │  GET /inventories/search/findByBusiness?business=.. │
//! │                  ▼                                                      │
//! │               HalClient ──► Resource ──► merge_all ──► Vec<Hal<T>>     │
//! │                                                                         │
//! │  Flows that coordinate several services:                               │
//! │  • basket_flow::add_to_basket       get-or-create basket, add item     │
//! │  • basket_view::load_basket_view    items + concurrent product lookup  │
//! │  • inventory_board::InventoryBoard  optimistic stock edit + rollback   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use mycoffee_hal::{ClientConfig, HalClient};
//! use mycoffee_services::Storefront;
//!
//! let client = HalClient::anonymous(ClientConfig::load_or_default(None)?)?;
//! let storefront = Storefront::new(client);
//!
//! for product in storefront.products().get_products().await? {
//!     println!("{} {}", product.name, product.price);
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket_flow;
pub mod basket_view;
pub mod inventory_board;
pub mod service;
pub mod storefront;

// =============================================================================
// Re-exports
// =============================================================================

pub use basket_flow::{add_to_basket, AddToBasket};
pub use basket_view::{load_basket_view, BasketLine, BasketView};
pub use inventory_board::{AdjustOutcome, InventoryBoard};
pub use service::basket::BasketService;
pub use service::basket_item::BasketItemService;
pub use service::business::BusinessService;
pub use service::customer::CustomerService;
pub use service::inventory::InventoryService;
pub use service::product::ProductService;
pub use service::record::RecordService;
pub use service::user::UserService;
pub use storefront::Storefront;

pub use mycoffee_hal::HalClient;
