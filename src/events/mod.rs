//! Event and log emission.
//!
//! - [`GameEvent`] / [`EventKind`]: data-carrying notifications
//! - [`EventBus`]: per-engine `on`/`off` subscription
//! - [`GameLog`] / [`LogEntry`]: append-only structured log

mod bus;
mod event;
mod log;

pub use bus::{EventBus, ListenerId};
pub use event::{EventKind, GameEvent};
pub use log::{GameLog, LogEntry};
