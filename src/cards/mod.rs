//! Card system: definitions, instances, and registry.
//!
//! ## Key Types
//!
//! - [`CardDefinition`]: authored card data (kind, elements, cost, stats, effects)
//! - [`Cost`] and [`Element`]: azoth requirements
//! - [`CardInstance`]: runtime state of one physical card
//! - [`CardRegistry`]: lookup of definitions by [`CardId`]

mod definition;
mod elements;
mod instance;
mod registry;

pub use definition::{AzothSupply, CardDefinition, CardId, CardKind};
pub use elements::{Cost, Element, ElementSet};
pub use instance::CardInstance;
pub use registry::CardRegistry;
