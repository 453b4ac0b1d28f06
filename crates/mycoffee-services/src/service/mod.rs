//! # Resource Services
//!
//! One service per backend resource. Every method is a single request.
//!
//! ## Service Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  InventoryService                                                      │
//! │  ├── get_all_inventories()        GET    /inventories                  │
//! │  ├── get_my_inventories(&user)    GET    /inventories/search/...       │
//! │  ├── create_inventory(&new)       POST   /inventories                  │
//! │  ├── update_inventory(&inv, &p)   PATCH  <self link>                   │
//! │  └── delete_inventory(&inv)       DELETE <self link>                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  HalClient (shared clone, same pool and credentials)                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Collections are read from the `_embedded` rel named in [`rels`]. A
//! response without that key is an empty list.
//!
//! ## Available Services
//!
//! - [`BasketService`](basket::BasketService) - Baskets
//! - [`BasketItemService`](basket_item::BasketItemService) - Basket lines
//! - [`InventoryService`](inventory::InventoryService) - Stock locations
//! - [`ProductService`](product::ProductService) - Catalog
//! - [`RecordService`](record::RecordService) - Free-form owned records
//! - [`UserService`](user::UserService) - Accounts and identity
//! - [`CustomerService`](customer::CustomerService) - Customers
//! - [`BusinessService`](business::BusinessService) - Cafes

use mycoffee_hal::{HalError, HalResult, Resource};

pub mod basket;
pub mod basket_item;
pub mod business;
pub mod customer;
pub mod inventory;
pub mod product;
pub mod record;
pub mod user;

/// Embedded collection rels, as Spring Data REST names them.
pub mod rels {
    pub const BASKETS: &str = "baskets";
    pub const BASKET_ITEMS: &str = "basketItems";
    pub const INVENTORIES: &str = "inventories";
    pub const PRODUCTS: &str = "products";
    pub const RECORDS: &str = "records";
    pub const USERS: &str = "users";
    pub const CUSTOMERS: &str = "customers";
    pub const BUSINESSES: &str = "businesses";
}

/// Self href of a resource, or [`HalError::MissingLink`].
pub(crate) fn self_href(resource: &Resource) -> HalResult<&str> {
    resource
        .self_href()
        .ok_or_else(|| HalError::MissingLink { rel: "self".into() })
}
