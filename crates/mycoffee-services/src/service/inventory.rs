//! # Inventory Service
//!
//! Stock locations owned by a business. Updates and deletes go to the
//! inventory's own self link rather than a path built from its id.

use tracing::{debug, instrument};

use mycoffee_core::{Inventory, InventoryPatch, NewInventory, User};
use mycoffee_hal::{Hal, HalClient, HalResult};

use super::{rels, self_href};

/// Service for `/inventories`.
#[derive(Debug, Clone)]
pub struct InventoryService {
    client: HalClient,
}

impl InventoryService {
    pub fn new(client: HalClient) -> Self {
        InventoryService { client }
    }

    #[instrument(skip(self))]
    pub async fn get_all_inventories(&self) -> HalResult<Vec<Hal<Inventory>>> {
        self.client.get_embedded("/inventories", rels::INVENTORIES).await
    }

    /// Inventories of the business `user` signed in as.
    ///
    /// The user's self URI is passed as the `business` query value exactly
    /// as the backend issued it.
    ///
    /// ## Errors
    /// [`HalError::MissingLink`](mycoffee_hal::HalError::MissingLink) when the
    /// user carries no self link. No request is sent in that case.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn get_my_inventories(&self, user: &Hal<User>) -> HalResult<Vec<Hal<Inventory>>> {
        let user_uri = self_href(user.resource())?;
        let path = format!("/inventories/search/findByBusiness?business={user_uri}");

        let inventories = self.client.get_embedded(&path, rels::INVENTORIES).await?;
        debug!(count = inventories.len(), "Loaded business inventories");
        Ok(inventories)
    }

    #[instrument(skip(self))]
    pub async fn create_inventory(&self, inventory: &NewInventory) -> HalResult<Hal<Inventory>> {
        self.client.post_as("/inventories", inventory).await
    }

    /// PATCHes the inventory's self link.
    #[instrument(skip(self, inventory), fields(inventory = ?inventory.self_href()))]
    pub async fn update_inventory(
        &self,
        inventory: &Hal<Inventory>,
        patch: &InventoryPatch,
    ) -> HalResult<Hal<Inventory>> {
        let href = self_href(inventory.resource())?;
        self.client.patch_as(href, patch).await
    }

    /// DELETEs the inventory's self link.
    #[instrument(skip(self, inventory), fields(inventory = ?inventory.self_href()))]
    pub async fn delete_inventory(&self, inventory: &Hal<Inventory>) -> HalResult<()> {
        let href = self_href(inventory.resource())?;
        self.client.delete(href).await?;
        Ok(())
    }
}
