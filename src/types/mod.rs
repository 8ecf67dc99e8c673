//! Core data types for the order index
//!
//! ## Types
//!
//! - [`Order`]: An immutable order record
//! - [`Side`]: Undefined, Sell or Buy, ordered in that sequence
//! - [`CompositeKey`]: The `(side, price, timestamp)` primary ordering
//! - [`KeyPrefix`]: A leading part of the key, used for range probes

mod key;
mod order;

pub use key::{CompositeKey, KeyPrefix};
pub use order::{Order, Side};
