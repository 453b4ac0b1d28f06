//! # Add To Basket
//!
//! Puts a product into the signed-in customer's basket, creating the basket
//! on first use.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  GET /baskets ──► first basket owned by user?                          │
//! │       │                 │                                               │
//! │   (error: warn,        yes, with id or self link ──────────┐           │
//! │    treat as none)       │                                   │           │
//! │       │                no                                   │           │
//! │       ▼                 ▼                                   │           │
//! │  POST /baskets {customer: "/customers/<username>"}          │           │
//! │       │                                                     │           │
//! │       ▼                                                     ▼           │
//! │  POST /basketItems {basket: <self link | /baskets/<id>>,                │
//! │                     product: "/products/<id>", quantity}               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calls are not atomic. Two concurrent first adds for the same user can
//! both create a basket, and a failed item POST leaves the new basket behind.

use tracing::{info, instrument, warn};

use mycoffee_core::validation::{validate_quantity, validate_username};
use mycoffee_core::{Basket, BasketItem, NewBasket, NewBasketItem, User};
use mycoffee_hal::{Hal, HalError, HalResult};

use crate::storefront::Storefront;

/// What [`add_to_basket`] did.
#[derive(Debug, Clone)]
pub struct AddToBasket {
    pub basket: Hal<Basket>,
    pub item: Hal<BasketItem>,
    /// True when no basket existed and one was created.
    pub created_basket: bool,
}

/// Adds `quantity` of product `product_id` to `user`'s basket.
///
/// ## Errors
/// - Invalid username or quantity: rejected before any request.
/// - Basket creation or item POST failing: propagated as is.
#[instrument(skip(storefront, user), fields(username = %user.username))]
pub async fn add_to_basket(
    storefront: &Storefront,
    user: &User,
    product_id: &str,
    quantity: i64,
) -> HalResult<AddToBasket> {
    validate_username(&user.username)?;
    validate_quantity(quantity)?;

    let existing = match storefront.baskets().find_for_user(user).await {
        Ok(found) => found.filter(|b| basket_uri(b).is_some()),
        Err(e) => {
            warn!(error = %e, "Basket lookup failed, creating a new basket");
            None
        }
    };

    let (basket, created_basket) = match existing {
        Some(basket) => (basket, false),
        None => {
            let basket = storefront
                .baskets()
                .create_basket(&NewBasket::for_customer(&user.username))
                .await?;
            info!(basket = ?basket.self_href(), "Created basket");
            (basket, true)
        }
    };

    let basket_ref = basket_uri(&basket).ok_or_else(|| HalError::MissingLink {
        rel: "self".into(),
    })?;

    let item = storefront
        .basket_items()
        .add_item(&NewBasketItem {
            basket: basket_ref,
            product: format!("/products/{product_id}"),
            quantity,
        })
        .await?;

    info!(product_id, quantity, created_basket, "Added product to basket");
    Ok(AddToBasket {
        basket,
        item,
        created_basket,
    })
}

/// Self link when present, else `/baskets/<id>`.
fn basket_uri(basket: &Hal<Basket>) -> Option<String> {
    basket
        .self_href()
        .map(str::to_string)
        .or_else(|| basket.id.map(|id| format!("/baskets/{id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mycoffee_hal::{Link, Resource};

    fn basket(id: Option<i64>, self_href: Option<&str>) -> Hal<Basket> {
        let mut resource = Resource::default();
        if let Some(href) = self_href {
            resource = resource.with_link("self", Link::new(href));
        }
        Hal::new(
            Basket {
                id,
                ..Default::default()
            },
            resource,
        )
    }

    #[test]
    fn test_basket_uri_prefers_self_link() {
        let b = basket(Some(3), Some("http://h/baskets/3"));
        assert_eq!(basket_uri(&b).as_deref(), Some("http://h/baskets/3"));
    }

    #[test]
    fn test_basket_uri_falls_back_to_id() {
        assert_eq!(basket_uri(&basket(Some(3), None)).as_deref(), Some("/baskets/3"));
        assert!(basket_uri(&basket(None, None)).is_none());
    }
}
