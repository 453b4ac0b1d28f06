//! # Basket Service
//!
//! Baskets are looked up by owner on the client side: the backend lists every
//! basket the caller may see and [`BasketService::find_for_user`] picks the
//! caller's.

use tracing::{debug, instrument};

use mycoffee_core::{Basket, NewBasket, User};
use mycoffee_hal::{Hal, HalClient, HalResult};

use super::{rels, self_href};

/// Service for `/baskets`.
#[derive(Debug, Clone)]
pub struct BasketService {
    client: HalClient,
}

impl BasketService {
    pub fn new(client: HalClient) -> Self {
        BasketService { client }
    }

    #[instrument(skip(self))]
    pub async fn get_baskets(&self) -> HalResult<Vec<Hal<Basket>>> {
        self.client.get_embedded("/baskets", rels::BASKETS).await
    }

    #[instrument(skip(self))]
    pub async fn get_basket(&self, id: &str) -> HalResult<Hal<Basket>> {
        self.client.get_as(&format!("/baskets/{id}")).await
    }

    #[instrument(skip(self))]
    pub async fn create_basket(&self, basket: &NewBasket) -> HalResult<Hal<Basket>> {
        self.client.post_as("/baskets", basket).await
    }

    /// First basket owned by `user`, if any.
    ///
    /// Ownership is [`Basket::belongs_to`]: the `customer` URI contains the
    /// username, or the `username` field equals it. There is no fallback to
    /// somebody else's basket.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn find_for_user(&self, user: &User) -> HalResult<Option<Hal<Basket>>> {
        let found = self
            .get_baskets()
            .await?
            .into_iter()
            .find(|b| b.belongs_to(&user.username));

        debug!(found = found.is_some(), "Basket lookup finished");
        Ok(found)
    }

    /// Deletes the basket at its self link.
    #[instrument(skip(self, basket), fields(basket = ?basket.self_href()))]
    pub async fn delete_basket(&self, basket: &Hal<Basket>) -> HalResult<()> {
        let href = self_href(basket.resource())?;
        self.client.delete(href).await?;
        Ok(())
    }
}
