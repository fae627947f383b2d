//! Weapons system: advances fire-control timers and pulls triggers.

use std::collections::BTreeMap;

use rand_chacha::ChaCha8Rng;

use skirmish_core::events::CombatEvent;
use skirmish_core::types::CombatantId;

use crate::combatant::Combatant;
use crate::fire_control::FireContext;
use crate::score::ScoreState;

/// Run fire control for one tick of `dt` seconds.
///
/// Timers advance first, so a cooldown that expires this tick lets the
/// trigger pull in the same tick through. AI combatants pull every tick while
/// attacking; the player pulls once per press.
pub fn run(
    combatants: &mut BTreeMap<CombatantId, Combatant>,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<CombatEvent>,
    score: &mut ScoreState,
    dt: f64,
) {
    for combatant in combatants.values_mut() {
        if !combatant.is_alive() {
            continue;
        }
        let is_player = combatant.is_player();
        let pull = if is_player {
            std::mem::take(&mut combatant.pending_pull)
        } else {
            combatant.intent.is_attacking()
        };
        let Some(weapon) = combatant.weapon.as_mut() else {
            continue;
        };

        let first_new = events.len();
        let mut ctx = FireContext {
            muzzle: combatant.pose,
            rng: &mut *rng,
            events: &mut *events,
        };
        weapon.advance(dt, &mut ctx);
        if pull {
            weapon.trigger(&mut ctx);
        }

        if is_player {
            let fired = events[first_new..]
                .iter()
                .filter(|e| matches!(e, CombatEvent::ShotFired(_)))
                .count();
            score.shots_fired += fired as u32;
        }
    }
}
