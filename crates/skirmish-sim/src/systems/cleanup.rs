//! Cleanup system: removes dead enemies from the roster.
//!
//! Players stay: they wait for a respawn or for the match to end.

use std::collections::BTreeMap;

use skirmish_core::types::CombatantId;

use crate::combatant::Combatant;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    combatants: &mut BTreeMap<CombatantId, Combatant>,
    despawn_buffer: &mut Vec<CombatantId>,
) {
    despawn_buffer.clear();
    despawn_buffer.extend(
        combatants
            .values()
            .filter(|c| !c.is_player() && !c.is_alive())
            .map(|c| c.id),
    );
    for id in despawn_buffer.iter() {
        combatants.remove(id);
    }
}
