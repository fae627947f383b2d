//! Commands sent by input/AI drivers and collaborators to the combat engine.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::Faction;
use crate::types::{CombatantId, Pose};
use crate::weapon::WeaponProfile;

/// One weighted loot entry, as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item: String,
    pub chance: f64,
}

/// Authored loot configuration; turned into a validated table on spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootSpec {
    /// Percent chance (0..=100) that anything drops at all.
    pub drop_chance_percent: u8,
    /// Draw with weights (true) or uniformly (false).
    pub weighted: bool,
    pub entries: Vec<LootEntry>,
}

/// Everything needed to create a combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantTemplate {
    pub name: String,
    pub faction: Faction,
    pub max_health: f64,
    pub initial_health: f64,
    /// Kill value before the weapon modifier.
    pub base_point_value: u32,
    pub weapon: Option<WeaponProfile>,
    pub loot: Option<LootSpec>,
}

impl Default for CombatantTemplate {
    fn default() -> Self {
        Self {
            name: "Grunt".to_string(),
            faction: Faction::Enemy,
            max_health: DEFAULT_MAX_HEALTH,
            initial_health: DEFAULT_MAX_HEALTH,
            base_point_value: DEFAULT_BASE_POINT_VALUE,
            weapon: None,
            loot: None,
        }
    }
}

/// All inbound intents and reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatCommand {
    // --- Weapons ---
    /// Equip a weapon, replacing any current one.
    Equip {
        combatant: CombatantId,
        profile: WeaponProfile,
    },
    Unequip { combatant: CombatantId },
    /// Trigger pressed (input driver).
    FireRequested { combatant: CombatantId },
    /// Trigger released (input driver).
    FireReleased { combatant: CombatantId },

    // --- Poses and AI ---
    SetPose {
        combatant: CombatantId,
        pose: Pose,
    },
    /// Point an AI combatant at a target; `None` falls back to the first
    /// live player.
    SetTarget {
        combatant: CombatantId,
        target: Option<CombatantId>,
    },

    // --- Projectile collaborator reports ---
    ReportHit {
        target: CombatantId,
        source: Option<CombatantId>,
        damage: f64,
        point: DVec3,
    },
    Heal {
        combatant: CombatantId,
        amount: f64,
    },
    Kill { combatant: CombatantId },

    // --- Spawners ---
    /// Fire an `OnCommand` spawner (or any spawner) once.
    TriggerSpawner { spawner: u32 },

    // --- Match control ---
    Pause,
    Resume,
}
