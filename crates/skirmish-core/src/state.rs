//! Combat snapshot: the read-only view handed to UI collaborators each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{CombatantId, Pose, SimTime};

/// Complete visible combat state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub combatants: Vec<CombatantView>,
    pub score: ScoreView,
}

/// One combatant as the HUD sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantView {
    pub id: CombatantId,
    pub name: String,
    pub faction: Faction,
    pub pose: Pose,
    pub health: f64,
    /// Health as a fraction of max (0.0 - 1.0), for health bars.
    pub health_fraction: f64,
    pub alive: bool,
    pub attacking: bool,
    pub point_value: u32,
    pub weapon: Option<WeaponView>,
}

/// Equipped weapon status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponView {
    pub name: String,
    pub fire_mode: FireMode,
    pub state: FireState,
    pub rounds_remaining: u32,
    pub capacity: u32,
    pub pending_shots: usize,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub high_score: u32,
    pub kills: u32,
    pub shots_fired: u32,
    pub hits_landed: u32,
    pub lives_left: u32,
}
