//! Respawn system: brings a dead player back once the delay runs out.

use std::collections::BTreeMap;

use skirmish_core::constants::TIMER_EPSILON;
use skirmish_core::events::CombatEvent;
use skirmish_core::types::CombatantId;

use crate::combatant::Combatant;

pub fn run(
    combatants: &mut BTreeMap<CombatantId, Combatant>,
    events: &mut Vec<CombatEvent>,
    dt: f64,
) {
    for combatant in combatants.values_mut() {
        let Some(remaining) = combatant.respawn_in_secs.as_mut() else {
            continue;
        };
        *remaining -= dt;
        if *remaining > TIMER_EPSILON {
            continue;
        }
        combatant.respawn_in_secs = None;
        combatant.health.restore();
        combatant.rearm(events);
        log::info!("{} {} respawned", combatant.name, combatant.id);
    }
}
