//! # Multi-Index Book
//!
//! In-memory collection of orders indexed by a composite
//! `(side, price, timestamp)` key, with an optional unique index on order id.
//!
//! ## Architecture
//!
//! - **Types**: Order record, side, composite key
//! - **Index**: slab-backed storage with ordered and hashed indexes
//!
//! ## Queries
//!
//! - All orders of a side, by price then arrival
//! - Best (highest) and worst (lowest) price of a side
//! - Orders of a side at one price, by arrival
//! - Direct lookup by order id
//!
//! Side ordering in the key is `Undefined < Sell < Buy`.

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, CompositeKey
pub mod types;

/// Order index: composite-key ordered collection
pub mod index;

/// Error type
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::{IndexError, Result};
pub use index::{IdentityIndex, IndexConfig, OrderIndex, OrderKey, SharedOrderIndex};
pub use types::{CompositeKey, KeyPrefix, Order, Side};
