//! Error type for index operations.

use thiserror::Error;

/// Errors reported by [`OrderIndex`](crate::index::OrderIndex).
///
/// Only insertion can fail; read queries never do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Another order with the same id is already indexed
    #[error("duplicate order id {order_id}")]
    DuplicateIdentity { order_id: u64 },
}

pub type Result<T> = std::result::Result<T, IndexError>;
