//! State cells for client-side stores.
//!
//! - [`Observable`]: a shared, version-tracked value with change notification.
//! - [`Subscription`]: RAII guard that unsubscribes its listener on drop.
//! - [`FieldCell`]: a derived cell that reads and writes a single field of an
//!   aggregate [`Observable`] through a [`Lens`], optionally encoding writes
//!   with a write rule.
//! - [`Customizable`]: a setting that is either a named [`Preset`] or a custom
//!   number, plus the [`set_customizable`] and [`set_togglable`] write rules.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per write.
//! 2. Listeners are notified in registration order, after the value lock is
//!    released, so a listener may read or write the cell it observes.
//!    A write made from a listener is delivered after the current pass, so
//!    every listener sees values in write order and ends on the current one.
//! 3. Dropping a [`Subscription`] removes the listener before the next
//!    notification cycle.
//! 4. A [`FieldCell`] write leaves every sibling field untouched.

pub mod lens;
pub mod observable;
pub mod setting;

pub use lens::{FieldCell, Lens, replace};
pub use observable::{Observable, Subscription};
pub use setting::{Customizable, Preset, set_customizable, set_togglable};
