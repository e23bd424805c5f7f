//! Azoth: the resource economy.
//!
//! Resource cards played from hand sit in the resource zone and each supply
//! one azoth per turn by tapping. [`AzothLedger`] validates and executes
//! payments against a card's [`Cost`](crate::cards::Cost).

mod ledger;

pub use ledger::{AzothLedger, PaymentPlan, PlannedTap};
