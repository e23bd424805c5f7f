//! Trigger system for event-driven card effects.
//!
//! ## Key Components
//!
//! - [`TriggerKind`]: the points in a game where effects can fire
//! - [`Condition`]: optional state predicate on an effect
//! - [`collect_triggers`]: snapshot of the effects answering a trigger
//!
//! Resolution order is fixed: player 0 before player 1, field order, then
//! flag. There is no stack; each effect resolves fully before the next.

mod condition;
mod event;
mod scan;

pub use condition::{Condition, ConditionContext};
pub use event::{TriggerKind, TriggerScope};
pub use scan::{collect_triggers, TriggeredEffect};
