//! # Basket View
//!
//! A basket's lines decorated with product name and price, plus the total.
//!
//! ## Loading
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  GET /baskets/{id}/items ──► [item 1, item 2, item 3]                  │
//! │                                  │       │       │                      │
//! │                     join_all     ▼       ▼       ▼                      │
//! │                               GET     GET     (no product link)        │
//! │                             product product        │                    │
//! │                                  │       │  (500)  │                    │
//! │                                  ▼       ▼         ▼                    │
//! │  lines (item order kept):   Espresso  Unknown   Unknown                │
//! │                              $2.50    $0.00     $0.00                  │
//! │                                                                         │
//! │  total = Σ unit price × quantity, in cents                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A line whose product cannot be resolved is kept and shown as
//! `"Unknown Product"` at price zero. Only a failure to list the items fails
//! the whole view.

use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use mycoffee_core::{BasketItem, Money, UNKNOWN_PRODUCT_NAME};
use mycoffee_hal::{Hal, HalResult};

use crate::service::product::ProductService;
use crate::storefront::Storefront;

/// One decorated basket line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketLine {
    pub item_id: Option<i64>,
    pub product_name: String,
    pub unit_price: Money,
    pub quantity: i64,
}

impl BasketLine {
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// A basket ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketView {
    pub basket_id: String,
    pub lines: Vec<BasketLine>,
}

impl BasketView {
    pub fn total(&self) -> Money {
        self.lines.iter().map(BasketLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Loads basket `basket_id` and resolves every line's product concurrently.
#[instrument(skip(storefront))]
pub async fn load_basket_view(storefront: &Storefront, basket_id: &str) -> HalResult<BasketView> {
    let items = storefront.basket_items().get_items_by_basket(basket_id).await?;
    let products = storefront.products();

    let lines = join_all(items.iter().map(|item| decorate(&products, item))).await;

    debug!(lines = lines.len(), "Basket view loaded");
    Ok(BasketView {
        basket_id: basket_id.to_string(),
        lines,
    })
}

async fn decorate(products: &ProductService, item: &Hal<BasketItem>) -> BasketLine {
    let quantity = if item.quantity == 0 { 1 } else { item.quantity };

    let (product_name, unit_price) = match item.link("product") {
        Some(link) => match products.get_product_at(link.expand_bare()).await {
            Ok(product) => (product.name.clone(), Money::from_decimal(product.price)),
            Err(e) => {
                warn!(item = ?item.id, error = %e, "Product lookup failed for basket line");
                (UNKNOWN_PRODUCT_NAME.to_string(), Money::zero())
            }
        },
        None => {
            warn!(item = ?item.id, "Basket line has no product link");
            (UNKNOWN_PRODUCT_NAME.to_string(), Money::zero())
        }
    };

    BasketLine {
        item_id: item.id,
        product_name,
        unit_price,
        quantity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(cents: i64, quantity: i64) -> BasketLine {
        BasketLine {
            item_id: None,
            product_name: "Latte".into(),
            unit_price: Money::from_cents(cents),
            quantity,
        }
    }

    #[test]
    fn test_total_sums_line_totals() {
        let view = BasketView {
            basket_id: "1".into(),
            lines: vec![line(250, 2), line(199, 1), line(0, 3)],
        };
        assert_eq!(view.total(), Money::from_cents(699));
    }

    #[test]
    fn test_empty_view_totals_zero() {
        let view = BasketView {
            basket_id: "1".into(),
            lines: vec![],
        };
        assert!(view.is_empty());
        assert!(view.total().is_zero());
    }

    #[test]
    fn test_huge_quantity_does_not_overflow_total() {
        let view = BasketView {
            basket_id: "1".into(),
            lines: vec![line(250, i64::MAX), line(199, 1)],
        };
        assert_eq!(view.lines[0].line_total(), Money::from_cents(i64::MAX));
        assert_eq!(view.total(), Money::from_cents(i64::MAX));
    }
}
