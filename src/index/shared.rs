//! Thread-shareable handle over an [`OrderIndex`].
//!
//! `OrderIndex` has no internal locking. `SharedOrderIndex` puts it behind a
//! `parking_lot::RwLock`: any number of readers may query at once, and an
//! insert waits for all of them.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::index::{IndexConfig, OrderIndex, OrderKey};
use crate::types::{Order, Side};

/// Cloneable reader-writer handle to one index
#[derive(Debug, Clone, Default)]
pub struct SharedOrderIndex {
    inner: Arc<RwLock<OrderIndex>>,
}

impl SharedOrderIndex {
    pub fn new(index: OrderIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self::new(OrderIndex::with_config(config))
    }

    /// Insert under the write lock
    pub fn insert(&self, order: Order) -> Result<OrderKey> {
        self.inner.write().insert(order)
    }

    /// Run `f` against the index under the read lock
    ///
    /// ```
    /// use multi_index_book::index::SharedOrderIndex;
    /// use multi_index_book::types::{Order, Side};
    ///
    /// let shared = SharedOrderIndex::default();
    /// shared.insert(Order::new(1, Side::Sell, 10, 16, 3)).unwrap();
    ///
    /// let prices: Vec<u64> = shared.read(|index| {
    ///     index.all_orders(Side::Sell).map(|o| o.price).collect()
    /// });
    /// assert_eq!(prices, vec![16]);
    /// ```
    pub fn read<R>(&self, f: impl FnOnce(&OrderIndex) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn best_price(&self, side: Side) -> Option<Order> {
        self.inner.read().best_price(side).cloned()
    }

    pub fn worst_price(&self, side: Side) -> Option<Order> {
        self.inner.read().worst_price(side).cloned()
    }

    pub fn find_by_id(&self, order_id: u64) -> Option<Order> {
        self.inner.read().find_by_id(order_id).cloned()
    }

    /// Unwrap the index if this is the last handle
    pub fn try_unwrap(self) -> std::result::Result<OrderIndex, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}
