//! # Business Service
//!
//! Cafes. Opening hours are entered as `HH:MM` but stored as `HH:MM:SS`, so
//! create and update normalize them before sending.
//!
//! ## Update Payload
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BusinessPatch (form)              PATCH /businesses/{id} body         │
//! │  ─────────────────────             ────────────────────────────        │
//! │  openingTime: "08:00"         ──►  "openingTime": "08:00:00"           │
//! │  closingTime: "20:00:00"      ──►  "closingTime": "20:00:00"           │
//! │  password:    ""              ──►  (omitted)                           │
//! │  password:    "n3w"           ──►  "password": "n3w"                   │
//! │  name:        None            ──►  (omitted)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, instrument};

use mycoffee_core::validation::normalize_optional_time;
use mycoffee_core::{Business, BusinessPatch, NewBusiness};
use mycoffee_hal::{Hal, HalClient, HalResult};

use super::rels;

/// Service for `/businesses`.
#[derive(Debug, Clone)]
pub struct BusinessService {
    client: HalClient,
}

impl BusinessService {
    pub fn new(client: HalClient) -> Self {
        BusinessService { client }
    }

    #[instrument(skip(self))]
    pub async fn get_businesses(&self) -> HalResult<Vec<Hal<Business>>> {
        self.client.get_embedded("/businesses", rels::BUSINESSES).await
    }

    #[instrument(skip(self))]
    pub async fn get_business_by_id(&self, id: &str) -> HalResult<Hal<Business>> {
        self.client.get_as(&format!("/businesses/{id}")).await
    }

    /// Registers a cafe. The new cafe starts in the `APPLIED` state.
    #[instrument(skip(self, business), fields(name = %business.name))]
    pub async fn create_business(&self, business: &NewBusiness) -> HalResult<Hal<Business>> {
        let mut payload = business.clone();
        payload.opening_time = normalize_optional_time(payload.opening_time.as_deref())?;
        payload.closing_time = normalize_optional_time(payload.closing_time.as_deref())?;

        let created = self.client.post_as::<_, Business>("/businesses", &payload).await?;
        info!(name = %created.name, "Business registered");
        Ok(created)
    }

    /// PATCHes `/businesses/{id}` with the normalized patch.
    #[instrument(skip(self, patch))]
    pub async fn update_business(&self, id: &str, patch: &BusinessPatch) -> HalResult<Hal<Business>> {
        let payload = normalize_patch(patch)?;
        self.client
            .patch_as(&format!("/businesses/{id}"), &payload)
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_business(&self, id: &str) -> HalResult<()> {
        self.client.delete(&format!("/businesses/{id}")).await?;
        Ok(())
    }
}

/// Applies the time and password rules to an edit form.
fn normalize_patch(patch: &BusinessPatch) -> HalResult<BusinessPatch> {
    let mut payload = patch.clone();
    payload.opening_time = normalize_optional_time(patch.opening_time.as_deref())?;
    payload.closing_time = normalize_optional_time(patch.closing_time.as_deref())?;
    payload.password = patch.password.clone().filter(|p| !p.is_empty());
    Ok(payload)
}
