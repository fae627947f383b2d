//! Enumeration types used throughout the combat core.

use serde::{Deserialize, Serialize};

/// How a weapon discharges when the trigger is pulled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireMode {
    /// One projectile per trigger pull.
    #[default]
    SingleShot,
    /// A fixed number of evenly spaced projectiles per trigger pull.
    Burst,
}

/// Observable fire-control state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireState {
    /// Ready to fire.
    #[default]
    Idle,
    /// Burst shots are still scheduled.
    Firing,
    /// Waiting for the cooldown timer to expire.
    Cooldown,
}

/// Why a fire attempt had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotReadyReason {
    /// A cooldown is in progress.
    CoolingDown,
    /// Not enough rounds for the shot or burst.
    OutOfAmmo,
    /// No weapon is equipped.
    Unequipped,
}

/// Built-in weapon archetypes with preset profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponArchetype {
    /// Rate-limited semi-automatic sidearm.
    Pistol,
    /// Unlimited single-shot rifle (fires as fast as the trigger is pulled).
    Rifle,
    /// Three-round burst rifle with a bursts-per-minute cadence.
    BurstRifle,
    /// Fast, short-range burst weapon.
    Carbine,
}

/// Side a combatant fights for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    #[default]
    Enemy,
    Player,
}

/// How a spawner produces units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnMode {
    /// Spawns one unit immediately, then retires.
    #[default]
    Once,
    /// Spawns a unit every spawn delay.
    Continuous,
    /// Keeps a number of units alive, replacing losses after the spawn delay.
    Maintain,
    /// Spawns only when commanded.
    OnCommand,
}

/// Whether a loot draw honours weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawMode {
    #[default]
    Weighted,
    Uniform,
}

/// Top-level match state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Active,
    Paused,
    Won,
    Lost,
}

/// How a finished match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Won,
    Lost,
}
