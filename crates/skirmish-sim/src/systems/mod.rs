//! Systems run by the combat engine each tick.
//!
//! Systems are plain functions over the engine's collections. They do not
//! own state: combatants, spawners and score live in the engine.

pub mod cleanup;
pub mod damage;
pub mod respawn;
pub mod snapshot;
pub mod spawning;
pub mod targeting;
pub mod weapons;
