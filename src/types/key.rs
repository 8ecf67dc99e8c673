//! Composite `(side, price, timestamp)` key and its prefixes.
//!
//! The derived ordering on [`CompositeKey`] is lexicographic in field order:
//! side first (using [`Side`]'s explicit ordering), then price, then
//! timestamp, all ascending.

use crate::types::Side;

/// Primary ordering key of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositeKey {
    pub side: Side,
    pub price: u64,
    pub timestamp: u64,
}

impl CompositeKey {
    pub const fn new(side: Side, price: u64, timestamp: u64) -> Self {
        Self {
            side,
            price,
            timestamp,
        }
    }
}

/// A leading part of the composite key, used to delimit ranges.
///
/// ```
/// use multi_index_book::types::{CompositeKey, KeyPrefix, Side};
///
/// let key = CompositeKey::new(Side::Buy, 15, 6);
/// assert!(KeyPrefix::Side(Side::Buy).matches(&key));
/// assert!(KeyPrefix::SidePrice(Side::Buy, 15).matches(&key));
/// assert!(!KeyPrefix::SidePrice(Side::Buy, 14).matches(&key));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    Side(Side),
    SidePrice(Side, u64),
    Full(CompositeKey),
}

impl KeyPrefix {
    /// Smallest composite key carrying this prefix
    pub fn min_key(&self) -> CompositeKey {
        match *self {
            KeyPrefix::Side(side) => CompositeKey::new(side, u64::MIN, u64::MIN),
            KeyPrefix::SidePrice(side, price) => CompositeKey::new(side, price, u64::MIN),
            KeyPrefix::Full(key) => key,
        }
    }

    /// Largest composite key carrying this prefix
    pub fn max_key(&self) -> CompositeKey {
        match *self {
            KeyPrefix::Side(side) => CompositeKey::new(side, u64::MAX, u64::MAX),
            KeyPrefix::SidePrice(side, price) => CompositeKey::new(side, price, u64::MAX),
            KeyPrefix::Full(key) => key,
        }
    }

    /// Whether `key` starts with this prefix
    pub fn matches(&self, key: &CompositeKey) -> bool {
        match *self {
            KeyPrefix::Side(side) => key.side == side,
            KeyPrefix::SidePrice(side, price) => key.side == side && key.price == price,
            KeyPrefix::Full(full) => *key == full,
        }
    }

    pub fn side(&self) -> Side {
        match *self {
            KeyPrefix::Side(side) | KeyPrefix::SidePrice(side, _) => side,
            KeyPrefix::Full(key) => key.side,
        }
    }
}

impl From<Side> for KeyPrefix {
    fn from(side: Side) -> Self {
        KeyPrefix::Side(side)
    }
}

impl From<(Side, u64)> for KeyPrefix {
    fn from((side, price): (Side, u64)) -> Self {
        KeyPrefix::SidePrice(side, price)
    }
}

impl From<CompositeKey> for KeyPrefix {
    fn from(key: CompositeKey) -> Self {
        KeyPrefix::Full(key)
    }
}
