//! # Record Service
//!
//! Free-form records owned by a user.
//!
//! ## Owner Search
//! ```text
//! owner self link: /users/alice
//!        │
//!        ▼  absolute_uri()
//! http://127.0.0.1:8080/users/alice
//!        │
//!        ▼  percent-encode (encodeURIComponent rules)
//! GET /records/search/findByOwnedBy?user=http%3A%2F%2F127.0.0.1%3A8080%2Fusers%2Falice
//!        │
//!        ├── ok    → records
//!        └── error → warn! and an empty list
//! ```

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use tracing::{instrument, warn};

use mycoffee_core::{NewRecord, Record, User};
use mycoffee_hal::{Hal, HalClient, HalResult};

use super::rels;

/// Characters left as-is in a query value. Everything else is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Service for `/records`.
#[derive(Debug, Clone)]
pub struct RecordService {
    client: HalClient,
}

impl RecordService {
    pub fn new(client: HalClient) -> Self {
        RecordService { client }
    }

    #[instrument(skip(self))]
    pub async fn get_records(&self) -> HalResult<Vec<Hal<Record>>> {
        self.client.get_embedded("/records", rels::RECORDS).await
    }

    #[instrument(skip(self))]
    pub async fn get_record_by_id(&self, id: &str) -> HalResult<Hal<Record>> {
        self.client.get_as(&format!("/records/{id}")).await
    }

    /// Records owned by `owner`.
    ///
    /// Never fails: a missing owner link, an HTTP error or an undecodable
    /// body is logged and reported as no records.
    #[instrument(skip(self, owner), fields(username = %owner.username))]
    pub async fn get_records_by_owned_by(&self, owner: &Hal<User>) -> Vec<Hal<Record>> {
        let Some(owner_uri) = owner.self_href() else {
            warn!("Owner has no self link, no records to look up");
            return Vec::new();
        };

        let absolute = self.client.absolute_uri(owner_uri);
        let path = format!(
            "/records/search/findByOwnedBy?user={}",
            utf8_percent_encode(&absolute, QUERY_VALUE)
        );

        match self.client.get_embedded(&path, rels::RECORDS).await {
            Ok(records) => records,
            Err(e) => {
                warn!(owner = %absolute, error = %e, "Owner record lookup failed");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn create_record(&self, record: &NewRecord) -> HalResult<Hal<Record>> {
        self.client.post_as("/records", record).await
    }

    /// Follows the record's `rel` link and decodes the target as `T`.
    ///
    /// ## Errors
    /// [`HalError::MissingLink`](mycoffee_hal::HalError::MissingLink) when the
    /// record has no such link.
    #[instrument(skip(self, record), fields(record = ?record.self_href()))]
    pub async fn get_record_relation<T: DeserializeOwned>(
        &self,
        record: &Hal<Record>,
        rel: &str,
    ) -> HalResult<Hal<T>> {
        let link = record.resource().require_link(rel)?;
        self.client.get_as(link.expand_bare()).await
    }
}
