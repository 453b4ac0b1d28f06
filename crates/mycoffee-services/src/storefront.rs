//! # Storefront
//!
//! Entry point that hands out services sharing one [`HalClient`].
//!
//! ```rust,ignore
//! let storefront = Storefront::new(client);
//! let me = storefront.users().identity().await?;
//! let shelves = storefront.inventories().get_my_inventories(&me).await?;
//! ```

use mycoffee_hal::HalClient;

use crate::service::basket::BasketService;
use crate::service::basket_item::BasketItemService;
use crate::service::business::BusinessService;
use crate::service::customer::CustomerService;
use crate::service::inventory::InventoryService;
use crate::service::product::ProductService;
use crate::service::record::RecordService;
use crate::service::user::UserService;

/// Shared client plus service accessors.
///
/// Services are created on demand; each holds a clone of the client, which
/// shares the connection pool, config and credentials.
#[derive(Debug, Clone)]
pub struct Storefront {
    client: HalClient,
}

impl Storefront {
    pub fn new(client: HalClient) -> Self {
        Storefront { client }
    }

    pub fn client(&self) -> &HalClient {
        &self.client
    }

    pub fn baskets(&self) -> BasketService {
        BasketService::new(self.client.clone())
    }

    pub fn basket_items(&self) -> BasketItemService {
        BasketItemService::new(self.client.clone())
    }

    pub fn inventories(&self) -> InventoryService {
        InventoryService::new(self.client.clone())
    }

    pub fn products(&self) -> ProductService {
        ProductService::new(self.client.clone())
    }

    pub fn records(&self) -> RecordService {
        RecordService::new(self.client.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.client.clone())
    }

    pub fn customers(&self) -> CustomerService {
        CustomerService::new(self.client.clone())
    }

    pub fn businesses(&self) -> BusinessService {
        BusinessService::new(self.client.clone())
    }
}
