//! Weapon configuration.
//!
//! `WeaponProfile` is immutable once validated and is shared read-only by the
//! fire-control instance of every weapon built from it.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{FireMode, WeaponArchetype};
use crate::error::{CombatError, CombatResult};

/// Static description of a weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub name: String,
    pub fire_mode: FireMode,
    /// If false the weapon fires as fast as the trigger is pulled.
    pub limited_fire_rate: bool,

    // --- Single shot ---
    pub rounds_per_minute: f64,

    // --- Burst ---
    pub rounds_per_burst: u32,
    /// Seconds from the first to the end of the last shot's slot.
    pub burst_duration_secs: f64,
    pub bursts_per_minute: f64,

    // --- Ammo ---
    /// Rounds loaded on equip.
    pub magazine_capacity: u32,
    /// Rounds consumed by each projectile (not per burst).
    pub rounds_per_shot: u32,

    // --- AI envelope ---
    /// Half-angle of the firing cone (degrees, 0..=180).
    pub attack_angle_deg: f64,
    /// Maximum engagement distance (game units).
    pub effective_range: f64,

    // --- Projectile ---
    pub muzzle_speed: f64,
    pub projectile_damage: f64,
    /// Maximum perturbation per axis (degrees). Zero disables spread.
    pub spread_deg: f64,

    // --- Scoring ---
    /// Added to the wielder's kill value while equipped.
    pub point_value_modifier: i32,
}

impl Default for WeaponProfile {
    fn default() -> Self {
        Self {
            name: "Gun".to_string(),
            fire_mode: FireMode::SingleShot,
            limited_fire_rate: false,
            rounds_per_minute: DEFAULT_ROUNDS_PER_MINUTE,
            rounds_per_burst: DEFAULT_ROUNDS_PER_BURST,
            burst_duration_secs: DEFAULT_BURST_DURATION_SECS,
            bursts_per_minute: DEFAULT_BURSTS_PER_MINUTE,
            magazine_capacity: DEFAULT_MAGAZINE_CAPACITY,
            rounds_per_shot: DEFAULT_ROUNDS_PER_SHOT,
            attack_angle_deg: DEFAULT_ATTACK_ANGLE_DEG,
            effective_range: DEFAULT_EFFECTIVE_RANGE,
            muzzle_speed: DEFAULT_MUZZLE_SPEED,
            projectile_damage: DEFAULT_PROJECTILE_DAMAGE,
            spread_deg: DEFAULT_SPREAD_DEG,
            point_value_modifier: DEFAULT_POINT_VALUE_MODIFIER,
        }
    }
}

impl WeaponProfile {
    /// Check every field. Called when a fire-control instance is built, so a
    /// malformed profile is rejected at equip time rather than at fire time.
    pub fn validate(&self) -> CombatResult<()> {
        let finite_non_negative = [
            ("burst_duration_secs", self.burst_duration_secs),
            ("effective_range", self.effective_range),
            ("muzzle_speed", self.muzzle_speed),
            ("projectile_damage", self.projectile_damage),
            ("spread_deg", self.spread_deg),
        ];
        for (field, value) in finite_non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CombatError::invalid_config(format!(
                    "weapon '{}': {field} must be finite and >= 0, got {value}",
                    self.name
                )));
            }
        }

        if !(0.0..=180.0).contains(&self.attack_angle_deg) {
            return Err(CombatError::invalid_config(format!(
                "weapon '{}': attack_angle_deg must be within 0..=180, got {}",
                self.name, self.attack_angle_deg
            )));
        }
        if self.rounds_per_shot == 0 {
            return Err(CombatError::invalid_config(format!(
                "weapon '{}': rounds_per_shot must be at least 1",
                self.name
            )));
        }

        if self.limited_fire_rate {
            let cadence = match self.fire_mode {
                FireMode::SingleShot => ("rounds_per_minute", self.rounds_per_minute),
                FireMode::Burst => ("bursts_per_minute", self.bursts_per_minute),
            };
            if !cadence.1.is_finite() || cadence.1 <= 0.0 {
                return Err(CombatError::invalid_config(format!(
                    "weapon '{}': {} must be > 0 for a rate-limited weapon, got {}",
                    self.name, cadence.0, cadence.1
                )));
            }
        }

        if self.fire_mode == FireMode::Burst && self.rounds_per_burst == 0 {
            return Err(CombatError::invalid_config(format!(
                "weapon '{}': rounds_per_burst must be at least 1",
                self.name
            )));
        }

        Ok(())
    }

    /// Seconds between single shots (`60 / rounds_per_minute`).
    pub fn single_shot_interval_secs(&self) -> f64 {
        SECS_PER_MINUTE / self.rounds_per_minute
    }

    /// Seconds between rounds inside one burst.
    pub fn burst_spacing_secs(&self) -> f64 {
        self.burst_duration_secs / self.rounds_per_burst.max(1) as f64
    }

    /// Cooldown after a burst: `60 / bursts_per_minute - burst_duration`,
    /// floored at zero when the burst outlasts its cadence slot.
    pub fn burst_cooldown_secs(&self) -> f64 {
        (SECS_PER_MINUTE / self.bursts_per_minute - self.burst_duration_secs).max(0.0)
    }

    /// Rounds one trigger pull consumes in the profile's fire mode.
    pub fn rounds_per_trigger(&self) -> u32 {
        match self.fire_mode {
            FireMode::SingleShot => self.rounds_per_shot,
            FireMode::Burst => self.rounds_per_shot.saturating_mul(self.rounds_per_burst),
        }
    }
}

/// Preset profile for a built-in archetype.
pub fn preset(archetype: WeaponArchetype) -> WeaponProfile {
    match archetype {
        WeaponArchetype::Pistol => WeaponProfile {
            name: "Pistol".to_string(),
            fire_mode: FireMode::SingleShot,
            limited_fire_rate: true,
            rounds_per_minute: DEFAULT_ROUNDS_PER_MINUTE,
            magazine_capacity: 12,
            attack_angle_deg: 8.0,
            effective_range: 25.0,
            muzzle_speed: 600.0,
            projectile_damage: 15.0,
            spread_deg: 0.8,
            point_value_modifier: 1,
            ..WeaponProfile::default()
        },
        WeaponArchetype::Rifle => WeaponProfile {
            name: "Rifle".to_string(),
            ..WeaponProfile::default()
        },
        WeaponArchetype::BurstRifle => WeaponProfile {
            name: "Burst Rifle".to_string(),
            fire_mode: FireMode::Burst,
            limited_fire_rate: true,
            ..WeaponProfile::default()
        },
        WeaponArchetype::Carbine => WeaponProfile {
            name: "Carbine".to_string(),
            fire_mode: FireMode::Burst,
            limited_fire_rate: true,
            rounds_per_burst: 4,
            burst_duration_secs: 0.2,
            bursts_per_minute: 40.0,
            magazine_capacity: 40,
            attack_angle_deg: 10.0,
            effective_range: 20.0,
            muzzle_speed: 800.0,
            projectile_damage: 7.0,
            spread_deg: 2.5,
            point_value_modifier: 3,
            ..WeaponProfile::default()
        },
    }
}
