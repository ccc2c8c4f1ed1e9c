//! User trade settings.

pub mod model;
pub mod store;

pub use model::{MaxSlippage, SettingsState, TRANSACTION_TTL_DEFAULT_SECS, Toggle};
pub use store::SettingsStore;
