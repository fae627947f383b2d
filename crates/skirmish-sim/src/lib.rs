//! Combat runtime for SKIRMISH.
//!
//! Fire control, the combat event bus, health, scoring, spawners and the
//! `CombatEngine` that steps them once per tick.

pub mod bus;
pub mod combatant;
pub mod engine;
pub mod fire_control;
pub mod health;
pub mod score;
pub mod spawner;
pub mod systems;

pub use skirmish_core as core;
pub use bus::{CombatEventBus, DeliveryReport, KindFilter, ListenerId};
pub use engine::{CombatEngine, EngineConfig};
pub use fire_control::{FireContext, FireControl, FireOutcome};
