//! Events emitted by the combat core for animation, audio, UI and scoring.
//!
//! Events are ephemeral: they are delivered to listeners immediately and
//! never stored by the core.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::MatchOutcome;
use crate::types::CombatantId;

/// A projectile leaving the muzzle. Consumed by the projectile spawner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotFired {
    pub shooter: CombatantId,
    pub origin: DVec3,
    /// Unit direction after spread.
    pub direction: DVec3,
    pub damage: f64,
    pub muzzle_speed: f64,
    /// Logical time (seconds on the weapon's clock) the shot was due.
    pub fired_at_secs: f64,
}

/// Everything the core tells its collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// Combatant began attacking (AI aimed and in range, or trigger pressed).
    AttackStarted { combatant: CombatantId },
    /// Combatant stopped attacking.
    AttackEnded { combatant: CombatantId },
    /// A projectile was fired.
    ShotFired(ShotFired),
    /// A projectile reported by the collaborator struck a combatant.
    HitLanded {
        target: CombatantId,
        source: Option<CombatantId>,
        damage: f64,
        point: DVec3,
    },
    WeaponEquipped {
        combatant: CombatantId,
        weapon: String,
    },
    WeaponUnequipped { combatant: CombatantId },
    /// Magazine count changed (HUD).
    AmmoChanged {
        combatant: CombatantId,
        rounds_remaining: u32,
    },
    Damaged {
        combatant: CombatantId,
        amount: f64,
        health_remaining: f64,
    },
    Healed {
        combatant: CombatantId,
        amount: f64,
        health_remaining: f64,
    },
    Died {
        combatant: CombatantId,
        killer: Option<CombatantId>,
        point_value: u32,
    },
    /// Result of a loot draw, for the instantiation collaborator.
    LootDropped {
        combatant: CombatantId,
        item: String,
        position: DVec3,
    },
    ScoreChanged { score: u32, high_score: u32 },
    /// A spawner produced a combatant.
    SpawnRequested {
        spawner: u32,
        combatant: CombatantId,
        template: String,
    },
    /// The player ran out of lives or reached the winning score.
    MatchEnded { outcome: MatchOutcome },
}

/// Discriminant of `CombatEvent`, used for per-kind listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatEventKind {
    AttackStarted,
    AttackEnded,
    ShotFired,
    HitLanded,
    WeaponEquipped,
    WeaponUnequipped,
    AmmoChanged,
    Damaged,
    Healed,
    Died,
    LootDropped,
    ScoreChanged,
    SpawnRequested,
    MatchEnded,
}

impl CombatEvent {
    pub fn kind(&self) -> CombatEventKind {
        match self {
            Self::AttackStarted { .. } => CombatEventKind::AttackStarted,
            Self::AttackEnded { .. } => CombatEventKind::AttackEnded,
            Self::ShotFired(_) => CombatEventKind::ShotFired,
            Self::HitLanded { .. } => CombatEventKind::HitLanded,
            Self::WeaponEquipped { .. } => CombatEventKind::WeaponEquipped,
            Self::WeaponUnequipped { .. } => CombatEventKind::WeaponUnequipped,
            Self::AmmoChanged { .. } => CombatEventKind::AmmoChanged,
            Self::Damaged { .. } => CombatEventKind::Damaged,
            Self::Healed { .. } => CombatEventKind::Healed,
            Self::Died { .. } => CombatEventKind::Died,
            Self::LootDropped { .. } => CombatEventKind::LootDropped,
            Self::ScoreChanged { .. } => CombatEventKind::ScoreChanged,
            Self::SpawnRequested { .. } => CombatEventKind::SpawnRequested,
            Self::MatchEnded { .. } => CombatEventKind::MatchEnded,
        }
    }
}
