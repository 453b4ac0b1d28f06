//! # Product Service

use tracing::instrument;

use mycoffee_core::Product;
use mycoffee_hal::{Hal, HalClient, HalResult};

use super::rels;

/// Service for `/products`.
#[derive(Debug, Clone)]
pub struct ProductService {
    client: HalClient,
}

impl ProductService {
    pub fn new(client: HalClient) -> Self {
        ProductService { client }
    }

    #[instrument(skip(self))]
    pub async fn get_products(&self) -> HalResult<Vec<Hal<Product>>> {
        self.client.get_embedded("/products", rels::PRODUCTS).await
    }

    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: &str) -> HalResult<Hal<Product>> {
        self.client.get_as(&format!("/products/{id}")).await
    }

    /// Follows a product link, e.g. a basket line's `product` rel.
    #[instrument(skip(self))]
    pub async fn get_product_at(&self, href: &str) -> HalResult<Hal<Product>> {
        self.client.get_as(href).await
    }
}
