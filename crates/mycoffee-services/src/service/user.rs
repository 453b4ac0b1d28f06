//! # User Service
//!
//! Accounts, plus `/identity` which returns whoever the current credential
//! belongs to.

use tracing::{info, instrument};

use mycoffee_core::{NewUser, User};
use mycoffee_hal::{Hal, HalClient, HalResult};

use super::rels;

/// Service for `/users` and `/identity`.
#[derive(Debug, Clone)]
pub struct UserService {
    client: HalClient,
}

impl UserService {
    pub fn new(client: HalClient) -> Self {
        UserService { client }
    }

    #[instrument(skip(self))]
    pub async fn get_users(&self) -> HalResult<Vec<Hal<User>>> {
        self.client.get_embedded("/users", rels::USERS).await
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_id(&self, id: &str) -> HalResult<Hal<User>> {
        self.client.get_as(&format!("/users/{id}")).await
    }

    /// Registers a user. The password is sent once and never read back.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn create_user(&self, user: &NewUser) -> HalResult<Hal<User>> {
        self.client.post_as("/users", user).await
    }

    /// The signed-in user, with roles.
    #[instrument(skip(self))]
    pub async fn identity(&self) -> HalResult<Hal<User>> {
        let user = self.client.get_as::<User>("/identity").await?;
        info!(username = %user.username, roles = user.authorities.len(), "Resolved identity");
        Ok(user)
    }
}
