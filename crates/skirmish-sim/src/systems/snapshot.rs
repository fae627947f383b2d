//! Snapshot system: builds a `CombatSnapshot` from the engine's state.
//!
//! This system is read-only.

use std::collections::BTreeMap;

use skirmish_core::enums::MatchPhase;
use skirmish_core::state::CombatSnapshot;
use skirmish_core::types::{CombatantId, SimTime};

use crate::combatant::Combatant;
use crate::score::ScoreState;

pub fn build_snapshot(
    time: &SimTime,
    phase: MatchPhase,
    combatants: &BTreeMap<CombatantId, Combatant>,
    score: &ScoreState,
) -> CombatSnapshot {
    CombatSnapshot {
        time: *time,
        phase,
        combatants: combatants.values().map(Combatant::view).collect(),
        score: score.view(),
    }
}
