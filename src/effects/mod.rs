//! Effect system for card abilities.
//!
//! - [`CardEffect`]: authored effect data (trigger, target, kind, condition)
//! - [`TargetSpec`] / [`TargetSelector`]: how targets are chosen
//! - [`EffectResolver`]: the dispatcher, one handler per [`EffectKind`]
//!
//! ## Design Philosophy
//!
//! Effects are data. Handlers never inspect card names or text; everything
//! an effect does is expressed by its `EffectKind` and resolved against the
//! state as it is when the effect resolves.

mod effect;
mod resolver;
mod targeting;

pub use effect::{Amount, CardEffect, EffectKind};
pub use resolver::{EffectContext, EffectResolver, ResolveResult};
pub use targeting::{Target, TargetScope, TargetSelector, TargetSpec};
