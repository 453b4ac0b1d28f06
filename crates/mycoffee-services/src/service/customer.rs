//! # Customer Service

use tracing::instrument;

use mycoffee_core::{Customer, NewCustomer};
use mycoffee_hal::{Hal, HalClient, HalResult};

use super::rels;

/// Service for `/customers`.
#[derive(Debug, Clone)]
pub struct CustomerService {
    client: HalClient,
}

impl CustomerService {
    pub fn new(client: HalClient) -> Self {
        CustomerService { client }
    }

    #[instrument(skip(self))]
    pub async fn get_customers(&self) -> HalResult<Vec<Hal<Customer>>> {
        self.client.get_embedded("/customers", rels::CUSTOMERS).await
    }

    #[instrument(skip(self))]
    pub async fn get_customer_by_id(&self, id: &str) -> HalResult<Hal<Customer>> {
        self.client.get_as(&format!("/customers/{id}")).await
    }

    #[instrument(skip(self, customer), fields(username = %customer.username))]
    pub async fn create_customer(&self, customer: &NewCustomer) -> HalResult<Hal<Customer>> {
        self.client.post_as("/customers", customer).await
    }
}
