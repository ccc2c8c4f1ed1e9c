//! Client-side state for a two-sided token swap form.
//!
//! - [`form`]: [`SwapFormStore`](form::SwapFormStore) holds the input and
//!   output legs, exchanges them on a field swap and invalidates quotes.
//! - [`settings`]: [`SettingsStore`](settings::SettingsStore) for slippage,
//!   transaction TTL and toggles.
//! - [`transaction`]: [`TransactionStore`](transaction::TransactionStore), a
//!   single slot for the submitted swap.
//! - [`token`]: [`Token`](token::Token) with canonical identity equality.
//! - [`config`]: [`FormConfig`](config::FormConfig) defaults, optionally read
//!   from the environment.
//! - [`error`]: [`StateError`](error::StateError).

pub mod config;
pub mod form;
pub mod settings;
pub mod token;
pub mod transaction;

pub mod error;
pub mod time;
