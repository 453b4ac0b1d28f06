//! # Domain Types
//!
//! Entity records and request payloads exchanged with the MyCoffee backend.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Basket       │   │   BasketItem    │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  customer (URI) │◄──│  basket (URI)   │──►│  name, price    │       │
//! │  │  username       │   │  product (URI)  │   │  stock          │       │
//! │  └─────────────────┘   │  quantity       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    Business     │   │   Inventory     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  username       │   │  user fields +  │   │  totalStock     │       │
//! │  │  authorities    │   │  name, address  │   │  capacity       │       │
//! │  └─────────────────┘   │  opening hours  │   │  type, status   │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Conventions
//! - Field names are camelCase on the wire.
//! - Required fields are plain values; a body missing one fails to decode.
//! - Relations are URIs (`/customers/alice`) rather than nested objects.
//! - Links and embedded collections are NOT part of these structs; they stay
//!   on the HAL resource that wraps the entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Roles
// =============================================================================

/// Administrator role name as issued by the backend.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Business (cafe owner) role name.
pub const ROLE_BUSINESS: &str = "ROLE_BUSINESS";

/// Customer role name.
pub const ROLE_CUSTOMER: &str = "ROLE_CUSTOMER";

/// A granted authority, `{"authority": "ROLE_ADMIN"}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    pub authority: String,
}

// =============================================================================
// Users
// =============================================================================

/// A registered account.
///
/// The password is write-only: it appears on [`NewUser`] but is never read
/// back from a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub authorities: Vec<Authority>,
}

impl User {
    /// Returns true when the user holds the given role.
    pub fn has_role(&self, role: &str) -> bool {
        self.authorities.iter().any(|a| a.authority == role)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// Admins and business owners may register cafes.
    pub fn can_register_business(&self) -> bool {
        self.is_admin() || self.has_role(ROLE_BUSINESS)
    }

    /// Admins may edit any cafe; business users only the ones they own.
    ///
    /// ```rust
    /// use mycoffee_core::{Authority, User, ROLE_BUSINESS};
    ///
    /// let owner = User {
    ///     id: None,
    ///     username: "bean-bar".into(),
    ///     email: None,
    ///     authorities: vec![Authority { authority: ROLE_BUSINESS.into() }],
    /// };
    /// assert!(owner.can_edit_business("bean-bar"));
    /// assert!(!owner.can_edit_business("other-cafe"));
    /// ```
    pub fn can_edit_business(&self, owner_id: &str) -> bool {
        self.is_admin() || (self.has_role(ROLE_BUSINESS) && self.username == owner_id)
    }
}

/// Registration payload for a plain user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

/// A shop customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub authorities: Vec<Authority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Customer sign-up payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

// =============================================================================
// Business
// =============================================================================

/// Whether a cafe is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessStatus {
    Open,
    Closed,
}

/// Where a cafe stands in the admin approval process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Applied,
    Accepted,
    Rejected,
}

/// A cafe. Businesses are users too, so they carry the user fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub authorities: Vec<Authority>,

    pub name: String,
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BusinessStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_status: Option<RegistrationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_wifi: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// `HH:MM:SS` as stored by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_time: Option<String>,
}

/// Cafe registration payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBusiness {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wifi: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_time: Option<String>,
}

/// Partial cafe update. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_wifi: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BusinessStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_time: Option<String>,
}

// =============================================================================
// Catalog
// =============================================================================

/// A product on sale.
///
/// `price` is a decimal on the wire; convert with
/// [`Money::from_decimal`](crate::money::Money::from_decimal) before summing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,

    pub price: f64,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,

    pub available: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,

    // Nutrition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kcal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proteins: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fats: Option<f64>,

    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    // Loyalty program
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_given: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_cost: Option<i64>,
    pub part_of_loyalty_program: bool,
}

// =============================================================================
// Baskets
// =============================================================================

/// A customer's shopping basket.
///
/// Every field is optional: depending on the projection the backend returns
/// either `customer` (a URI) or `username`, and a freshly created basket may
/// omit timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Basket {
    /// Returns true when this basket belongs to `username`.
    ///
    /// Matches when the last path segment of the `customer` URI equals the
    /// username, or the `username` field equals it. `/customers/alice`
    /// belongs to `alice` but not to `al`.
    pub fn belongs_to(&self, username: &str) -> bool {
        if username.is_empty() {
            return false;
        }
        let by_customer = self
            .customer
            .as_deref()
            .and_then(last_path_segment)
            .is_some_and(|segment| segment == username);
        let by_username = self.username.as_deref() == Some(username);
        by_customer || by_username
    }
}

/// Last path segment of a URI, ignoring query, fragment and URI template.
fn last_path_segment(uri: &str) -> Option<&str> {
    let path = uri.split(['?', '#', '{']).next().unwrap_or(uri);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
}

/// Basket creation payload.
///
/// The storefront links baskets by customer URI
/// (`{"customer": "/customers/<username>"}`); some backends accept a numeric
/// `customerId` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBasket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
}

impl NewBasket {
    /// Builds the payload that links a new basket to `username`.
    pub fn for_customer(username: &str) -> Self {
        NewBasket {
            customer: Some(format!("/customers/{username}")),
            customer_id: None,
        }
    }

    /// Builds the payload that links a new basket to a numeric customer id.
    pub fn for_customer_id(customer_id: i64) -> Self {
        NewBasket {
            customer: None,
            customer_id: Some(customer_id),
        }
    }
}

/// A line in a basket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(default)]
    pub quantity: i64,
}

/// Payload adding a product to a basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBasketItem {
    /// Basket URI, `/baskets/<id>` or an absolute self link.
    pub basket: String,
    /// Product URI, `/products/<id>`.
    pub product: String,
    pub quantity: i64,
}

// =============================================================================
// Inventory
// =============================================================================

/// Kind of storage location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryType {
    Warehouse,
    Shelf,
    Fridge,
    Display,
    Backroom,
}

/// Operational state of a storage location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryStatus {
    Active,
    Full,
    Maintenance,
    Closed,
}

/// A stock location owned by a business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: String,
    pub total_stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<InventoryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<InventoryStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Inventory {
    /// True when a positive capacity is set and stock has reached it.
    pub fn is_at_capacity(&self) -> bool {
        matches!(self.capacity, Some(cap) if cap > 0 && self.total_stock >= cap)
    }
}

/// Inventory creation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<InventoryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InventoryStatus>,
}

/// Partial inventory update, e.g. `{"totalStock": 7}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<InventoryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InventoryStatus>,
}

impl InventoryPatch {
    /// A patch that only sets the stock level.
    pub fn stock(total_stock: i64) -> Self {
        InventoryPatch {
            total_stock: Some(total_stock),
            ..Default::default()
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// A free-form record owned by a user.
///
/// Only `id`, `name` and `description` are typed; everything else the
/// backend sends is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Record creation payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owner URI, e.g. `/users/alice`.
    #[serde(rename = "ownedBy", skip_serializing_if = "Option::is_none")]
    pub owned_by: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_with(roles: &[&str], username: &str) -> User {
        User {
            id: None,
            username: username.to_string(),
            email: None,
            authorities: roles
                .iter()
                .map(|r| Authority {
                    authority: r.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_inventory_decodes_camel_case() {
        let inv: Inventory = serde_json::from_value(json!({
            "name": "Main fridge",
            "location": "Back",
            "totalStock": 5,
            "capacity": 10,
            "type": "FRIDGE",
            "status": "ACTIVE"
        }))
        .unwrap();

        assert_eq!(inv.total_stock, 5);
        assert_eq!(inv.kind, Some(InventoryType::Fridge));
        assert_eq!(inv.status, Some(InventoryStatus::Active));
        assert!(inv.id.is_none());
        assert!(!inv.is_at_capacity());
    }

    #[test]
    fn test_inventory_missing_required_field_fails() {
        let result: Result<Inventory, _> = serde_json::from_value(json!({
            "name": "Shelf A",
            "location": "Front"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_product_defaults_collections() {
        let p: Product = serde_json::from_value(json!({
            "name": "Espresso",
            "price": 2.5,
            "stock": 40,
            "available": true,
            "partOfLoyaltyProgram": false
        }))
        .unwrap();
        assert!(p.ingredients.is_empty());
        assert!(p.allergens.is_empty());
        assert_eq!(p.price, 2.5);
    }

    #[test]
    fn test_basket_belongs_to() {
        let by_uri = Basket {
            customer: Some("http://localhost:8080/customers/alice".into()),
            ..Default::default()
        };
        assert!(by_uri.belongs_to("alice"));
        assert!(!by_uri.belongs_to("bob"));

        let by_name = Basket {
            username: Some("bob".into()),
            ..Default::default()
        };
        assert!(by_name.belongs_to("bob"));

        assert!(!Basket::default().belongs_to("alice"));
        assert!(!by_uri.belongs_to("al"));
        assert!(!by_uri.belongs_to("customers/alice"));
        assert!(!by_uri.belongs_to(""));
    }

    #[test]
    fn test_customer_uri_segment_ignores_query_and_template() {
        let templated = Basket {
            customer: Some("/customers/alice{?projection}".into()),
            ..Default::default()
        };
        assert!(templated.belongs_to("alice"));

        let with_query = Basket {
            customer: Some("/customers/alice/?view=full".into()),
            ..Default::default()
        };
        assert!(with_query.belongs_to("alice"));
        assert!(!with_query.belongs_to("full"));
    }

    #[test]
    fn test_payload_shapes() {
        assert_eq!(
            serde_json::to_value(NewBasket::for_customer("alice")).unwrap(),
            json!({"customer": "/customers/alice"})
        );
        assert_eq!(
            serde_json::to_value(NewBasket::for_customer_id(5)).unwrap(),
            json!({"customerId": 5})
        );
        assert_eq!(
            serde_json::to_value(InventoryPatch::stock(7)).unwrap(),
            json!({"totalStock": 7})
        );
    }

    #[test]
    fn test_roles() {
        let admin = user_with(&[ROLE_ADMIN], "root");
        assert!(admin.is_admin());
        assert!(admin.can_edit_business("anyone"));

        let owner = user_with(&[ROLE_BUSINESS], "cafe-1");
        assert!(owner.can_register_business());
        assert!(owner.can_edit_business("cafe-1"));
        assert!(!owner.can_edit_business("cafe-2"));

        let customer = user_with(&[ROLE_CUSTOMER], "cafe-1");
        assert!(!customer.can_edit_business("cafe-1"));
        assert!(!customer.can_register_business());
    }

    #[test]
    fn test_record_keeps_unknown_properties() {
        let record: Record = serde_json::from_value(json!({
            "name": "Tasting notes",
            "created": "2024-01-01",
            "score": 9
        }))
        .unwrap();
        assert_eq!(record.name.as_deref(), Some("Tasting notes"));
        assert_eq!(record.extra.get("score"), Some(&json!(9)));
    }
}
