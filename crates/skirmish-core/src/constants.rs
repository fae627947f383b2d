//! Combat constants and tuning parameters.

/// Default driver tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the default tick rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Slack applied when comparing accumulated float time against a deadline,
/// so that e.g. 0.05 stepped four times reaches a 0.2 s deadline.
pub const TIMER_EPSILON: f64 = 1e-9;

/// Seconds per minute, for rounds/bursts-per-minute conversions.
pub const SECS_PER_MINUTE: f64 = 60.0;

// --- Weapon defaults ---

/// Single-shot cadence (rounds per minute).
pub const DEFAULT_ROUNDS_PER_MINUTE: f64 = 45.0;

/// Rounds fired per burst.
pub const DEFAULT_ROUNDS_PER_BURST: u32 = 3;

/// Seconds taken to complete one burst.
pub const DEFAULT_BURST_DURATION_SECS: f64 = 0.25;

/// Burst cadence (bursts per minute).
pub const DEFAULT_BURSTS_PER_MINUTE: f64 = 15.0;

/// Damage dealt by each projectile.
pub const DEFAULT_PROJECTILE_DAMAGE: f64 = 10.0;

/// Initial projectile speed (units/second).
pub const DEFAULT_MUZZLE_SPEED: f64 = 1000.0;

/// Maximum spread perturbation per axis (degrees).
pub const DEFAULT_SPREAD_DEG: f64 = 1.2;

/// Rounds loaded on equip.
pub const DEFAULT_MAGAZINE_CAPACITY: u32 = 30;

/// Rounds consumed by each projectile.
pub const DEFAULT_ROUNDS_PER_SHOT: u32 = 1;

/// Half-angle of the AI firing cone (degrees).
pub const DEFAULT_ATTACK_ANGLE_DEG: f64 = 5.0;

/// Maximum AI engagement distance (game units).
pub const DEFAULT_EFFECTIVE_RANGE: f64 = 40.0;

/// Points a weapon adds to its wielder's kill value.
pub const DEFAULT_POINT_VALUE_MODIFIER: i32 = 2;

// --- Combatants ---

/// Default maximum health.
pub const DEFAULT_MAX_HEALTH: f64 = 100.0;

/// Points an enemy is worth before its weapon's modifier.
pub const DEFAULT_BASE_POINT_VALUE: u32 = 10;

/// Percent chance an enemy drops loot on death.
pub const DEFAULT_ITEM_DROP_CHANCE: u8 = 50;

// --- Match rules ---

/// Score at which the player wins.
pub const DEFAULT_SCORE_TO_WIN: u32 = 50;

/// Lives the player starts with (respawns available).
pub const DEFAULT_PLAYER_LIVES: u32 = 2;

/// Seconds between player death and respawn.
pub const DEFAULT_RESPAWN_DELAY_SECS: f64 = 4.0;

// --- Spawners ---

/// Seconds between spawns in Continuous/Maintain mode.
pub const DEFAULT_SPAWN_DELAY_SECS: f64 = 4.0;

/// Lifetime cap on spawns when limited.
pub const DEFAULT_TOTAL_SPAWNS: u32 = 10;
