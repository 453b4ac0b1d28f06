//! # Basket Item Service
//!
//! Lines of a basket. Quantities are checked against
//! [`validate_quantity`] before anything is sent.

use tracing::{debug, instrument};

use mycoffee_core::validation::validate_quantity;
use mycoffee_core::{BasketItem, NewBasketItem};
use mycoffee_hal::{merge, Hal, HalClient, HalResult};

use super::{rels, self_href};

/// Service for `/basketItems`.
#[derive(Debug, Clone)]
pub struct BasketItemService {
    client: HalClient,
}

impl BasketItemService {
    pub fn new(client: HalClient) -> Self {
        BasketItemService { client }
    }

    /// Lines of one basket, from `/baskets/{id}/items`.
    #[instrument(skip(self))]
    pub async fn get_items_by_basket(&self, basket_id: &str) -> HalResult<Vec<Hal<BasketItem>>> {
        self.client
            .get_embedded(&format!("/baskets/{basket_id}/items"), rels::BASKET_ITEMS)
            .await
    }

    #[instrument(skip(self))]
    pub async fn add_item(&self, item: &NewBasketItem) -> HalResult<Hal<BasketItem>> {
        validate_quantity(item.quantity)?;
        self.client.post_as("/basketItems", item).await
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## How It Works
    /// ```text
    /// GET  /basketItems/{id}   → current line, links included
    ///        │
    ///        ▼  quantity = new value
    /// POST /basketItems/{id}   ← the whole line, links included
    /// ```
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, item_id: &str, quantity: i64) -> HalResult<Hal<BasketItem>> {
        validate_quantity(quantity)?;

        let path = format!("/basketItems/{item_id}");
        let mut item = self.client.get_as::<BasketItem>(&path).await?;
        debug!(from = item.quantity, to = quantity, "Updating basket line");
        item.quantity = quantity;

        merge(self.client.post(&path, &item.to_value()).await?)
    }

    /// Deletes the line at its self link.
    #[instrument(skip(self, item), fields(item = ?item.self_href()))]
    pub async fn remove_item(&self, item: &Hal<BasketItem>) -> HalResult<()> {
        let href = self_href(item.resource())?;
        self.client.delete(href).await?;
        Ok(())
    }
}
