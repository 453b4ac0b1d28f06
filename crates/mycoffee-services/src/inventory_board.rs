//! # Inventory Board
//!
//! The business owner's list of stock locations, with +/- stock buttons that
//! update the display before the backend confirms.
//!
//! ## Optimistic Adjustment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    adjust_stock(href, delta)                            │
//! │                                                                         │
//! │  new = totalStock + delta                                              │
//! │       │                                                                 │
//! │       ├── new < 0 or new > capacity ──► Rejected (no request, no edit) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  snapshot = items.clone()                                              │
//! │  item.totalStock = new, item.lastUpdated = now      ◄── shown at once  │
//! │       │                                                                 │
//! │       ▼  (lock released)                                               │
//! │  PATCH <self link> {"totalStock": new}                                 │
//! │       │                                                                 │
//! │       ├── ok  ──► Applied(new)                                         │
//! │       └── err ──► items = snapshot                                     │
//! │                   error = "Failed to update stock: <err>"              │
//! │                   RolledBack                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! State lives in `Arc<Mutex<BoardState>>`. The lock is held only for the
//! synchronous edits, never across a request. Two adjustments running at
//! once can interleave; the later rollback restores the snapshot it took.

use chrono::{SecondsFormat, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info, instrument};

use mycoffee_core::validation::validate_stock_adjustment;
use mycoffee_core::{CoreError, Inventory, InventoryPatch, User};
use mycoffee_hal::{Hal, HalResult};

use crate::service::inventory::InventoryService;

/// Result of [`InventoryBoard::adjust_stock`].
#[derive(Debug, Clone, PartialEq)]
pub enum AdjustOutcome {
    /// Backend accepted the new stock level.
    Applied(i64),
    /// The change breaks a stock rule. Nothing was sent or changed.
    Rejected(CoreError),
    /// The backend refused the change and the board was restored.
    RolledBack,
    /// No inventory on the board has that self link.
    NotOnBoard,
}

/// Board contents.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub items: Vec<Hal<Inventory>>,
    /// Inline message shown above the list.
    pub error: Option<String>,
    owner: Option<Hal<User>>,
}

impl BoardState {
    fn find_mut(&mut self, href: &str) -> Option<&mut Hal<Inventory>> {
        self.items.iter_mut().find(|i| i.self_href() == Some(href))
    }
}

/// Shared inventory board for one business user.
#[derive(Debug, Clone)]
pub struct InventoryBoard {
    service: InventoryService,
    state: Arc<Mutex<BoardState>>,
}

impl InventoryBoard {
    pub fn new(service: InventoryService) -> Self {
        InventoryBoard {
            service,
            state: Arc::new(Mutex::new(BoardState::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Executes a function with read access to the board.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BoardState) -> R,
    {
        f(&self.lock())
    }

    fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut BoardState) -> R,
    {
        f(&mut self.lock())
    }

    /// Current items, in backend order.
    pub fn items(&self) -> Vec<Hal<Inventory>> {
        self.with_state(|s| s.items.clone())
    }

    pub fn error(&self) -> Option<String> {
        self.with_state(|s| s.error.clone())
    }

    /// Replaces the board with `owner`'s inventories.
    ///
    /// Clears the error first. On failure the error is recorded and returned;
    /// the previous items stay.
    #[instrument(skip(self, owner), fields(username = %owner.username))]
    pub async fn load(&self, owner: &Hal<User>) -> HalResult<()> {
        self.with_state_mut(|s| {
            s.error = None;
            s.owner = Some(owner.clone());
        });

        match self.service.get_my_inventories(owner).await {
            Ok(items) => {
                debug!(count = items.len(), "Inventory board loaded");
                self.with_state_mut(|s| s.items = items);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Loading inventories failed");
                self.with_state_mut(|s| s.error = Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Changes the stock of the inventory at `href` by `delta`.
    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, href: &str, delta: i64) -> AdjustOutcome {
        let prepared = self.with_state_mut(|s| {
            let item = s.find_mut(href)?;
            let new_stock =
                match validate_stock_adjustment(item.total_stock, delta, item.capacity) {
                    Ok(n) => n,
                    Err(reason) => return Some(Err(reason)),
                };

            // Snapshot before the optimistic edit
            let snapshot = s.items.clone();
            let item = s.find_mut(href)?;
            item.total_stock = new_stock;
            item.last_updated = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
            Some(Ok((snapshot, item.clone(), new_stock)))
        });

        let (snapshot, target, new_stock) = match prepared {
            None => return AdjustOutcome::NotOnBoard,
            Some(Err(reason)) => {
                debug!(%reason, "Stock adjustment rejected");
                return AdjustOutcome::Rejected(reason);
            }
            Some(Ok(prepared)) => prepared,
        };

        match self
            .service
            .update_inventory(&target, &InventoryPatch::stock(new_stock))
            .await
        {
            Ok(_) => {
                info!(new_stock, "Stock updated");
                AdjustOutcome::Applied(new_stock)
            }
            Err(e) => {
                error!(error = %e, "Stock update failed, restoring board");
                self.with_state_mut(|s| {
                    s.items = snapshot;
                    s.error = Some(format!("Failed to update stock: {e}"));
                });
                AdjustOutcome::RolledBack
            }
        }
    }

    /// Deletes `item`, then reloads the board.
    #[instrument(skip(self, item), fields(inventory = ?item.self_href()))]
    pub async fn delete(&self, item: &Hal<Inventory>) -> HalResult<()> {
        if let Err(e) = self.service.delete_inventory(item).await {
            self.with_state_mut(|s| s.error = Some(e.to_string()));
            return Err(e);
        }

        let owner = self.with_state(|s| s.owner.clone());
        match owner {
            Some(owner) => self.load(&owner).await,
            None => {
                let href = item.self_href();
                self.with_state_mut(|s| s.items.retain(|i| i.self_href() != href));
                Ok(())
            }
        }
    }
}
