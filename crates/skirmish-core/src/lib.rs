//! Core types and definitions for the SKIRMISH combat core.
//!
//! This crate defines the vocabulary shared across all other crates:
//! weapon profiles, commands, events, errors, snapshots and constants.
//! It has no dependency on a runtime, renderer or entity framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
pub mod weapon;

pub use error::{CombatError, CombatResult};

#[cfg(test)]
mod tests;
