//! Targeting system: turns AI aim/range checks into attack intent.

use std::collections::BTreeMap;

use glam::DVec3;

use skirmish_core::events::CombatEvent;
use skirmish_core::types::CombatantId;
use skirmish_targeting::evaluator::{evaluate, TargetingQuery};

use crate::combatant::Combatant;
use crate::systems::spawning::first_live_player;

/// Run the targeting evaluator for every living AI combatant.
///
/// An AI whose target is unset, gone or dead falls back to the first live
/// player.
pub fn run(combatants: &mut BTreeMap<CombatantId, Combatant>, events: &mut Vec<CombatEvent>) {
    let fallback = first_live_player(combatants);
    let positions: BTreeMap<CombatantId, DVec3> = combatants
        .values()
        .filter(|c| c.is_alive())
        .map(|c| (c.id, c.pose.position))
        .collect();

    for combatant in combatants.values_mut() {
        if combatant.is_player() || !combatant.is_alive() {
            continue;
        }

        let current = combatant
            .target
            .filter(|id| *id != combatant.id && positions.contains_key(id));
        combatant.target = current.or(fallback);

        let target = combatant.target.and_then(|id| positions.get(&id).copied());

        let should_attack = match target {
            Some(target) => {
                evaluate(&TargetingQuery {
                    attacker: combatant.pose,
                    target,
                    envelope: combatant.envelope(),
                })
                .should_attack
            }
            None => false,
        };
        combatant.set_attacking(should_attack, events);
    }
}
