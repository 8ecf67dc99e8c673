//! Order index: multi-key sorted collection of orders.
//!
//! ## Components
//!
//! - [`OrderIndex`]: slab arena plus a composite-key primary index and an
//!   optional unique id index
//! - [`SharedOrderIndex`]: reader-writer handle for use across threads
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Insert | O(log n) |
//! | All orders of a side | O(log n + k) |
//! | Best / worst price | O(log n) |
//! | Orders at price | O(log n + k) |
//! | Find by id | O(1) |

pub mod book;
pub mod shared;

pub use book::{IdentityIndex, IndexConfig, OrderIndex, OrderKey};
pub use shared::SharedOrderIndex;
