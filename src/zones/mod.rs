//! Zone store for card locations.
//!
//! Each player owns one of every [`Zone`]: deck, hand, field, resource zone,
//! life cards, graveyard, removed-from-game, and the flag zone.
//!
//! ## Key Types
//!
//! - `Zone`: which container
//! - `ZoneManager`: card location tracking and movement
//! - `ZonePosition`: insertion point within a zone

pub mod manager;

pub use manager::{Zone, ZoneManager, ZonePosition};
