//! Targeting for SKIRMISH.
//!
//! Pure functions that decide whether an attacker is aimed at and in range
//! of its target, and the edge detector that turns per-tick decisions into
//! attack start/end transitions. No engine dependency; operates on plain data.

pub mod evaluator;
pub mod intent;

pub use skirmish_core as core;

#[cfg(test)]
mod tests;
