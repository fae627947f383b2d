//! Error taxonomy for the combat core.
//!
//! Only configuration and addressing problems are errors. Runtime gating
//! (cooldown, empty magazine, target out of range) is expressed as plain
//! values on the per-frame path.

use thiserror::Error;

use crate::types::CombatantId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CombatError {
    /// A weapon profile, weighted table, loot table or spawner is malformed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// An engine call named a combatant that does not exist.
    #[error("unknown combatant {0}")]
    UnknownCombatant(CombatantId),
    /// The combatant has no weapon for a weapon-only operation.
    #[error("combatant {0} has no weapon equipped")]
    NoWeaponEquipped(CombatantId),
    /// An event listener failed during dispatch. Logged, never propagated.
    #[error("listener '{listener}' failed: {reason}")]
    ListenerFailure { listener: String, reason: String },
}

impl CombatError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

pub type CombatResult<T> = Result<T, CombatError>;
