//! Multi-index order collection.
//!
//! ## Architecture
//!
//! - **Slab**: arena holding every order record; its keys are shared by all indexes
//! - **BTreeMap**: primary index ordered by `(side, price, timestamp)`
//! - **HashMap**: optional unique index from order id to slab key
//!
//! ## Boundary Probes
//!
//! Every read query is built from two probes over the primary index:
//!
//! - `lower_bound(prefix)`: first entry whose key is not below the prefix
//! - `upper_bound(prefix)`: first entry whose key is above the prefix
//!
//! Both are `O(log n)` via `BTreeMap::range`, so range queries cost the
//! size of the range plus a logarithmic term, never a full scan.
//!
//! ## Example
//!
//! ```
//! use multi_index_book::index::OrderIndex;
//! use multi_index_book::types::{Order, Side};
//!
//! let mut index = OrderIndex::with_capacity(16);
//! index.insert(Order::new(1, Side::Buy, 10, 15, 6)).unwrap();
//! index.insert(Order::new(2, Side::Buy, 10, 14, 1)).unwrap();
//! index.insert(Order::new(3, Side::Sell, 10, 16, 3)).unwrap();
//!
//! assert_eq!(index.best_price(Side::Buy).map(|o| o.price), Some(15));
//! assert_eq!(index.worst_price(Side::Buy).map(|o| o.price), Some(14));
//! assert_eq!(index.best_price(Side::Sell).map(|o| o.id), Some(3));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use sha2::{Digest, Sha256};
use slab::Slab;
use tracing::{debug, trace, warn};

use crate::error::{IndexError, Result};
use crate::types::{CompositeKey, KeyPrefix, Order, Side};

/// Stable handle to an order in the arena
pub type OrderKey = usize;

/// Primary index entry: composite key plus insertion sequence.
///
/// The sequence keeps equal composite keys apart (the primary index is
/// non-unique) and orders them by insertion.
type Entry = (CompositeKey, u64);

/// Whether the id index is maintained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityIndex {
    /// Order ids are unique; duplicates are rejected and `find_by_id` works
    #[default]
    Unique,
    /// No id index; any id is accepted and `find_by_id` always misses
    Disabled,
}

/// Construction parameters for [`OrderIndex`]
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexConfig {
    /// Number of order slots to pre-allocate
    pub capacity: usize,
    pub identity: IdentityIndex,
}

impl IndexConfig {
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn identity(mut self, identity: IdentityIndex) -> Self {
        self.identity = identity;
        self
    }
}

/// In-memory collection of orders sorted by `(side, price, timestamp)`.
#[derive(Debug)]
pub struct OrderIndex {
    /// Order storage
    /// Key: slab index, Value: Order
    orders: Slab<Order>,

    /// Primary index, ascending composite key
    primary: BTreeMap<Entry, OrderKey>,

    /// Order ID to slab key mapping (empty when disabled)
    by_id: HashMap<u64, OrderKey>,

    identity: IdentityIndex,

    /// Next insertion sequence number
    next_seq: u64,

    /// Orders per side, indexed by `Side::rank`
    side_counts: [usize; 3],
}

impl Default for OrderIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderIndex {
    /// Create a new empty index with a unique id index
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Create an index with pre-allocated capacity
    ///
    /// # Example
    ///
    /// ```
    /// use multi_index_book::index::OrderIndex;
    ///
    /// let index = OrderIndex::with_capacity(1_000);
    /// assert!(index.capacity() >= 1_000);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(IndexConfig::default().capacity(capacity))
    }

    pub fn with_config(config: IndexConfig) -> Self {
        let id_capacity = match config.identity {
            IdentityIndex::Unique => config.capacity,
            IdentityIndex::Disabled => 0,
        };
        Self {
            orders: Slab::with_capacity(config.capacity),
            primary: BTreeMap::new(),
            by_id: HashMap::with_capacity(id_capacity),
            identity: config.identity,
            next_seq: 0,
            side_counts: [0; 3],
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Number of orders on one side
    #[inline]
    pub fn side_count(&self, side: Side) -> usize {
        self.side_counts[side.rank() as usize]
    }

    #[inline]
    pub fn identity(&self) -> IdentityIndex {
        self.identity
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Add an order to every index.
    ///
    /// With a unique id index, an order whose id is already present is
    /// rejected before anything is touched, so a failed insert leaves the
    /// index exactly as it was.
    ///
    /// # Returns
    ///
    /// The slab key of the stored order
    ///
    /// # Example
    ///
    /// ```
    /// use multi_index_book::error::IndexError;
    /// use multi_index_book::index::OrderIndex;
    /// use multi_index_book::types::{Order, Side};
    ///
    /// let mut index = OrderIndex::new();
    /// index.insert(Order::new(1, Side::Buy, 10, 15, 0)).unwrap();
    ///
    /// let err = index.insert(Order::new(1, Side::Sell, 10, 16, 1)).unwrap_err();
    /// assert_eq!(err, IndexError::DuplicateIdentity { order_id: 1 });
    /// assert_eq!(index.len(), 1);
    /// ```
    pub fn insert(&mut self, order: Order) -> Result<OrderKey> {
        let order_id = order.id;

        if self.identity == IdentityIndex::Unique && self.by_id.contains_key(&order_id) {
            warn!(order_id, "rejecting order with duplicate id");
            return Err(IndexError::DuplicateIdentity { order_id });
        }

        let key = order.key();
        let seq = self.next_seq;
        self.next_seq += 1;

        let slot = self.orders.insert(order);
        self.primary.insert((key, seq), slot);
        if self.identity == IdentityIndex::Unique {
            self.by_id.insert(order_id, slot);
        }
        self.side_counts[key.side.rank() as usize] += 1;

        trace!(
            order_id,
            side = %key.side,
            price = key.price,
            timestamp = key.timestamp,
            slot,
            "order indexed"
        );
        Ok(slot)
    }

    /// Insert a sequence of orders, stopping at the first rejected one.
    ///
    /// Orders before the rejected one stay in the index.
    ///
    /// # Returns
    ///
    /// The number of orders inserted
    pub fn insert_all<I>(&mut self, orders: I) -> Result<usize>
    where
        I: IntoIterator<Item = Order>,
    {
        let mut inserted = 0;
        for order in orders {
            self.insert(order)?;
            inserted += 1;
        }
        debug!(inserted, total = self.len(), "bulk insert complete");
        Ok(inserted)
    }

    // ========================================================================
    // Boundary Probes
    // ========================================================================

    /// First order whose key is not below `prefix`, of any side
    pub fn lower_bound(&self, prefix: impl Into<KeyPrefix>) -> Option<&Order> {
        let start = (prefix.into().min_key(), u64::MIN);
        self.primary
            .range((Bound::Included(start), Bound::Unbounded))
            .next()
            .and_then(|(_, slot)| self.orders.get(*slot))
    }

    /// First order whose key is above `prefix`, of any side
    pub fn upper_bound(&self, prefix: impl Into<KeyPrefix>) -> Option<&Order> {
        let end = (prefix.into().max_key(), u64::MAX);
        self.primary
            .range((Bound::Excluded(end), Bound::Unbounded))
            .next()
            .and_then(|(_, slot)| self.orders.get(*slot))
    }

    /// Last order not above `prefix`: one step back from the upper bound
    fn before_upper_bound(&self, prefix: KeyPrefix) -> Option<&Order> {
        let end = (prefix.max_key(), u64::MAX);
        self.primary
            .range((Bound::Unbounded, Bound::Included(end)))
            .next_back()
            .and_then(|(_, slot)| self.orders.get(*slot))
    }

    /// All orders carrying `prefix`, in ascending key order
    pub fn equal_range(
        &self,
        prefix: impl Into<KeyPrefix>,
    ) -> impl DoubleEndedIterator<Item = &Order> + '_ {
        self.prefix_range(prefix.into())
    }

    fn prefix_range(&self, prefix: KeyPrefix) -> impl DoubleEndedIterator<Item = &Order> + '_ {
        let start = (prefix.min_key(), u64::MIN);
        let end = (prefix.max_key(), u64::MAX);
        let orders = &self.orders;
        self.primary
            .range(start..=end)
            .filter_map(move |(_, slot)| orders.get(*slot))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Every order of `side`, ascending by `(price, timestamp)`
    pub fn all_orders(&self, side: Side) -> impl DoubleEndedIterator<Item = &Order> + '_ {
        self.prefix_range(KeyPrefix::Side(side))
    }

    /// Highest-priced order of `side`; among equal prices, the latest one.
    pub fn best_price(&self, side: Side) -> Option<&Order> {
        let prefix = KeyPrefix::Side(side);
        // The step back lands on the previous side's range (or nothing)
        // when `side` has no orders.
        self.before_upper_bound(prefix)
            .filter(|order| order.side() == prefix.side())
    }

    /// Lowest-priced order of `side`; among equal prices, the earliest one.
    pub fn worst_price(&self, side: Side) -> Option<&Order> {
        let prefix = KeyPrefix::Side(side);
        // The lower bound lands on the next side's range when `side` is absent.
        self.lower_bound(prefix)
            .filter(|order| order.side() == prefix.side())
    }

    /// Orders of `side` at exactly `price`, ascending by timestamp
    pub fn orders_at_price(
        &self,
        side: Side,
        price: u64,
    ) -> impl DoubleEndedIterator<Item = &Order> + '_ {
        self.prefix_range(KeyPrefix::SidePrice(side, price))
    }

    /// Look up an order by id. Always `None` when the id index is disabled.
    pub fn find_by_id(&self, order_id: u64) -> Option<&Order> {
        let slot = *self.by_id.get(&order_id)?;
        self.orders.get(slot)
    }

    #[inline]
    pub fn contains_id(&self, order_id: u64) -> bool {
        self.by_id.contains_key(&order_id)
    }

    /// Get an order by slab key
    #[inline]
    pub fn get(&self, key: OrderKey) -> Option<&Order> {
        self.orders.get(key)
    }

    /// Every order, in composite key order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Order> + '_ {
        let orders = &self.orders;
        self.primary
            .values()
            .filter_map(move |slot| orders.get(*slot))
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 over [`Order::encode`] of every order, in composite key order.
    ///
    /// Two indexes holding the same orders in the same key order have the
    /// same root.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for order in self.iter() {
            hasher.update(order.encode());
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        root
    }

    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
