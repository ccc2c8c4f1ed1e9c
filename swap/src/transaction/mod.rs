//! The last submitted swap.

pub mod model;
pub mod store;

pub use model::{TradeLeg, TransactionRecord, TransactionStatus};
pub use store::TransactionStore;
