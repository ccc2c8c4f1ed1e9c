//! Two-sided swap form: input and output legs plus the cached quote summary.

pub mod model;
pub mod store;

pub use model::{FormState, QuoteRequest, Side, SideState, SwapSummary};
pub use store::SwapFormStore;
