//! Order record and side enumeration.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs for deterministic encoding.
//! Per the SSZ spec (ethereum.org):
//! - Basic types (u8, u64): Direct little-endian encoding
//! - Fixed-size composites: Concatenated little-endian fields
//!
//! ## Side Ordering
//!
//! The side is the first component of the composite key, so its ordering
//! decides which side comes first in the index:
//!
//! ```text
//! Undefined < Sell < Buy
//! ```
//!
//! The ordering is spelled out in [`Side::rank`] rather than derived from
//! declaration order.

use std::cmp::Ordering;
use std::fmt;

use ssz_rs::prelude::*;
use tracing::error;

use crate::types::CompositeKey;

// ============================================================================
// Side enum
// ============================================================================

/// Order side.
///
/// Represented as u8 for SSZ compatibility:
/// - Undefined = 0
/// - Sell = 1
/// - Buy = 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Placeholder side, never produced by a valid order feed
    #[default]
    Undefined,
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// All sides, in index order
    pub const ALL: [Side; 3] = [Side::Undefined, Side::Sell, Side::Buy];

    /// Position of the side in the composite key ordering
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Side::Undefined => 0,
            Side::Sell => 1,
            Side::Buy => 2,
        }
    }

    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        self.rank()
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Undefined),
            1 => Some(Side::Sell),
            2 => Some(Side::Buy),
            _ => None,
        }
    }
}

impl Ord for Side {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Side {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Undefined => "UNDEFINED",
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// An order record held by the index.
///
/// Orders are never mutated once inserted; the index hands out shared
/// references only.
///
/// ## SSZ Layout
///
/// Fixed-size container of 33 bytes (8+1+8+8+8).
///
/// ## Example
///
/// ```
/// use multi_index_book::types::{Order, Side};
///
/// // Buy 10 @ 15, arrived at t=6
/// let order = Order::new(1, Side::Buy, 10, 15, 6);
/// assert_eq!(order.side(), Side::Buy);
/// assert_eq!(order.to_string(), "[6] BUY 10 @ 15");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Unique order identifier (enforced only by the identity index)
    pub id: u64,

    /// Order side as u8 (see [`Side::to_u8`]); read through [`Order::side`]
    side_raw: u8,

    /// Quantity, informational only
    pub quantity: u64,

    pub price: u64,

    /// Arrival order; not required to be unique
    pub timestamp: u64,
}

impl Order {
    /// Size of the SSZ encoding: id + side_raw + quantity + price + timestamp
    pub const ENCODED_LEN: usize = 33;

    /// Create a new order
    ///
    /// # Arguments
    ///
    /// * `id` - Order identifier
    /// * `side` - Buy, Sell or Undefined
    /// * `quantity` - Order quantity
    /// * `price` - Limit price
    /// * `timestamp` - Arrival sequence
    pub fn new(id: u64, side: Side, quantity: u64, price: u64, timestamp: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            quantity,
            price,
            timestamp,
        }
    }

    /// Get the order side. Unknown raw values read back as `Undefined`.
    #[inline]
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or(Side::Undefined)
    }

    /// SSZ bytes of this order with the side byte normalized through
    /// [`Order::side`], so an unknown raw side encodes as `Undefined`.
    pub fn encode(&self) -> Vec<u8> {
        let canonical = Order {
            side_raw: self.side().to_u8(),
            ..self.clone()
        };
        let mut buffer = Vec::with_capacity(Self::ENCODED_LEN);
        // Fixed container of basic fields: serialization cannot fail.
        if let Err(e) = canonical.serialize(&mut buffer) {
            error!(order_id = self.id, error = ?e, "order encoding failed");
        }
        buffer
    }

    /// Composite `(side, price, timestamp)` key of this order
    #[inline]
    pub fn key(&self) -> CompositeKey {
        CompositeKey::new(self.side(), self.price, self.timestamp)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} @ {}",
            self.timestamp,
            self.side(),
            self.quantity,
            self.price
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_conversion() {
        assert_eq!(Side::Undefined.to_u8(), 0);
        assert_eq!(Side::Sell.to_u8(), 1);
        assert_eq!(Side::Buy.to_u8(), 2);
        assert_eq!(Side::from_u8(0), Some(Side::Undefined));
        assert_eq!(Side::from_u8(1), Some(Side::Sell));
        assert_eq!(Side::from_u8(2), Some(Side::Buy));
        assert_eq!(Side::from_u8(3), None);
    }

    #[test]
    fn test_side_ordering_is_explicit() {
        // Declaration order is Undefined, Buy, Sell; index order is not.
        assert!(Side::Undefined < Side::Sell);
        assert!(Side::Sell < Side::Buy);
        assert!(Side::Undefined < Side::Buy);

        let mut sides = vec![Side::Buy, Side::Undefined, Side::Sell];
        sides.sort();
        assert_eq!(sides, Side::ALL.to_vec());
    }

    #[test]
    fn test_order_new() {
        let order = Order::new(7, Side::Sell, 10, 16, 3);

        assert_eq!(order.id, 7);
        assert_eq!(order.side(), Side::Sell);
        assert_eq!(order.quantity, 10);
        assert_eq!(order.price, 16);
        assert_eq!(order.timestamp, 3);
        assert_eq!(order.key(), CompositeKey::new(Side::Sell, 16, 3));
    }

    #[test]
    fn test_order_unknown_side_raw() {
        let mut order = Order::new(1, Side::Buy, 10, 15, 0);
        order.side_raw = 42;
        assert_eq!(order.side(), Side::Undefined);
    }

    #[test]
    fn test_order_display() {
        assert_eq!(Order::new(1, Side::Buy, 10, 15, 6).to_string(), "[6] BUY 10 @ 15");
        assert_eq!(Order::new(2, Side::Sell, 10, 16, 3).to_string(), "[3] SELL 10 @ 16");
        assert_eq!(
            Order::new(3, Side::Undefined, 10, 25, 8).to_string(),
            "[8] UNDEFINED 10 @ 25"
        );
    }

    #[test]
    fn test_order_ssz_roundtrip() {
        for side in Side::ALL {
            let order = Order::new(9, side, 10, 16, 3);

            let serialized = ssz_rs::serialize(&order).expect("Failed to serialize");
            let deserialized: Order =
                ssz_rs::deserialize(&serialized).expect("Failed to deserialize");

            assert_eq!(order, deserialized);
            assert_eq!(deserialized.side(), side);
        }
    }

    #[test]
    fn test_order_encode_normalizes_side() {
        let plain = Order::new(1, Side::Undefined, 10, 25, 8);
        let mut odd = plain.clone();
        odd.side_raw = 42;

        assert_eq!(odd.side(), plain.side());
        assert_eq!(odd.encode(), plain.encode());
        assert_eq!(plain.encode(), ssz_rs::serialize(&plain).expect("Failed to serialize"));
        assert_eq!(plain.encode().len(), Order::ENCODED_LEN);
    }

    #[test]
    fn test_order_ssz_size() {
        let order = Order::new(1, Side::Buy, 10, 15, 6);
        let bytes = ssz_rs::serialize(&order).expect("Failed to serialize");

        assert_eq!(bytes.len(), Order::ENCODED_LEN, "Order should serialize to 33 bytes");
    }

    #[test]
    fn test_order_deterministic_serialization() {
        let order = Order::new(1, Side::Buy, 10, 15, 6);

        let bytes1 = ssz_rs::serialize(&order).expect("Failed to serialize");
        let bytes2 = ssz_rs::serialize(&order).expect("Failed to serialize");

        assert_eq!(bytes1, bytes2, "SSZ serialization must be deterministic");
    }
}
