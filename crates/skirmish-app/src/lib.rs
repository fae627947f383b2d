//! SKIRMISH headless driver.
//!
//! Wires the combat engine to a scripted arena, a hitscan projectile
//! resolver and a player autopilot, and steps it on a game-loop thread.

pub mod game_loop;
pub mod hitscan;
pub mod pilot;
pub mod scenario;
pub mod state;

pub use skirmish_core as core;
