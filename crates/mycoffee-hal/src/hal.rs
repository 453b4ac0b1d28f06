//! # Typed HAL Values
//!
//! [`Hal<T>`] pairs a decoded entity with the [`Resource`] it was read from.
//!
//! ## Decode Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Resource                         merge::<Inventory>()                 │
//! │   ├── properties ─────────────────► serde decode ──► Inventory         │
//! │   │   (name, totalStock, ...)        │                   │              │
//! │   ├── _links                         │ missing field?    │              │
//! │   └── _embedded                      ▼                   ▼              │
//! │          │                    HalError::Decode     Hal<Inventory>       │
//! │          │                                         ├── entity           │
//! │          └────────── kept unchanged ─────────────► └── resource         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Hal<T>` derefs to `T`, so `item.total_stock` reads the field while
//! `item.self_href()` still navigates.

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::ops::{Deref, DerefMut};

use crate::error::{HalError, HalResult};
use crate::resource::{Link, Resource};

/// An entity decoded from a HAL resource, still carrying its links.
#[derive(Debug, Clone, PartialEq)]
pub struct Hal<T> {
    entity: T,
    resource: Resource,
}

impl<T: DeserializeOwned> Hal<T> {
    /// Decodes the resource's properties into `T`.
    pub fn from_resource(resource: Resource) -> HalResult<Self> {
        let properties = Value::Object(resource.properties().clone());
        let entity = serde_json::from_value(properties).map_err(|e| HalError::Decode {
            entity: short_type_name::<T>(),
            message: e.to_string(),
        })?;
        Ok(Hal { entity, resource })
    }
}

impl<T> Hal<T> {
    /// Pairs an already-decoded entity with its resource.
    pub fn new(entity: T, resource: Resource) -> Self {
        Hal { entity, resource }
    }

    pub fn entity(&self) -> &T {
        &self.entity
    }

    /// The resource exactly as it was received.
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.resource.link(rel)
    }

    pub fn self_href(&self) -> Option<&str> {
        self.resource.self_href()
    }

    /// Last path segment of the self link, e.g. `"42"` for `/products/42`.
    pub fn id_segment(&self) -> Option<&str> {
        self.resource.self_link().and_then(Link::last_segment)
    }

    pub fn into_entity(self) -> T {
        self.entity
    }

    pub fn into_parts(self) -> (T, Resource) {
        (self.entity, self.resource)
    }
}

impl<T: Serialize> Hal<T> {
    /// The resource JSON with the entity's current field values laid over
    /// its properties.
    ///
    /// Used when an entity is edited locally and sent back whole.
    pub fn to_value(&self) -> Value {
        let mut value = self.resource.to_value();
        if let (Value::Object(target), Ok(Value::Object(fields))) =
            (&mut value, serde_json::to_value(&self.entity))
        {
            for (key, field) in fields {
                target.insert(key, field);
            }
        }
        value
    }
}

impl<T> Deref for Hal<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.entity
    }
}

impl<T> DerefMut for Hal<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.entity
    }
}

impl<T: Serialize> Serialize for Hal<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

// =============================================================================
// Merge Helpers
// =============================================================================

/// Decodes one resource into `T`, keeping the resource alongside.
pub fn merge<T: DeserializeOwned>(resource: Resource) -> HalResult<Hal<T>> {
    Hal::from_resource(resource)
}

/// Decodes every resource in order. The first failure aborts.
pub fn merge_all<T, I>(resources: I) -> HalResult<Vec<Hal<T>>>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = Resource>,
{
    resources.into_iter().map(Hal::from_resource).collect()
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycoffee_core::{BasketItem, Inventory};
    use serde_json::json;

    fn inventory_resource() -> Resource {
        Resource::from_value(json!({
            "name": "Fridge",
            "location": "Back",
            "totalStock": 3,
            "capacity": 10,
            "_links": {
                "self": { "href": "http://h/inventories/7" },
                "business": { "href": "http://h/inventories/7/business" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_merge_keeps_resource_and_fields() {
        let resource = inventory_resource();
        let merged: Hal<Inventory> = merge(resource.clone()).unwrap();

        assert_eq!(merged.resource(), &resource);
        assert_eq!(merged.total_stock, 3);
        assert_eq!(merged.name, "Fridge");
        assert_eq!(merged.self_href(), Some("http://h/inventories/7"));
        assert!(merged.link("business").is_some());
        assert_eq!(merged.id_segment(), Some("7"));
    }

    #[test]
    fn test_merge_missing_required_field_fails() {
        let resource = Resource::from_value(json!({
            "name": "Fridge",
            "_links": { "self": { "href": "/inventories/7" } }
        }))
        .unwrap();

        let err = merge::<Inventory>(resource).unwrap_err();
        match err {
            HalError::Decode { entity, message } => {
                assert_eq!(entity, "Inventory");
                assert!(message.contains("location"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_merge_all_preserves_order_and_aborts_on_failure() {
        let items: Vec<Resource> = (1..=3)
            .map(|q| Resource::from_value(json!({ "quantity": q })).unwrap())
            .collect();
        let merged: Vec<Hal<BasketItem>> = merge_all(items).unwrap();
        let quantities: Vec<i64> = merged.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![1, 2, 3]);

        let bad = vec![
            Resource::from_value(json!({ "quantity": 1 })).unwrap(),
            Resource::from_value(json!({ "quantity": "many" })).unwrap(),
        ];
        assert!(merge_all::<BasketItem, _>(bad).is_err());
    }

    #[test]
    fn test_to_value_overlays_edits() {
        let mut merged: Hal<Inventory> = merge(inventory_resource()).unwrap();
        merged.total_stock = 4;

        let value = merged.to_value();
        assert_eq!(value["totalStock"], json!(4));
        assert_eq!(value["_links"]["self"]["href"], json!("http://h/inventories/7"));
        // the received resource itself is untouched
        assert_eq!(merged.resource().property("totalStock"), Some(&json!(3)));
    }
}
