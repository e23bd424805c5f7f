//! The rules engine.
//!
//! [`GameEngine`] is the public surface: every caller action is a method on
//! it, and every method validates before it mutates. The implementation is
//! split by concern:
//!
//! - `engine`: construction, setup, accessors, `apply`, snapshots
//! - `phase`: the Start -> Main -> Combat -> PostCombat -> Refresh machine
//! - `play`: resource, summon, tribute, spell and burst play
//! - `combat`: attackers, blockers, damage
//! - `life`: draws, life-card damage and healing, game over
//! - `field`: damage, boosts, destruction and zone changes of field cards
//! - `dispatch`: trigger collection and effect resolution

mod combat;
mod dispatch;
mod engine;
mod field;
mod life;
mod phase;
mod play;

pub use engine::{GameEngine, GameSnapshot, PlayerSetup};
pub use phase::Phase;
