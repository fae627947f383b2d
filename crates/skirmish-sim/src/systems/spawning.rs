//! Spawning system: advances spawner timers and creates their units.

use std::collections::BTreeMap;

use rand_chacha::ChaCha8Rng;

use skirmish_core::error::{CombatError, CombatResult};
use skirmish_core::events::CombatEvent;
use skirmish_core::types::CombatantId;

use crate::combatant::Combatant;
use crate::spawner::Spawner;

/// Advance every spawner by `dt` and spawn the units that came due.
pub fn run(
    spawners: &mut BTreeMap<u32, Spawner>,
    combatants: &mut BTreeMap<CombatantId, Combatant>,
    next_combatant_id: &mut u32,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<CombatEvent>,
    dt: f64,
) {
    for spawner in spawners.values_mut() {
        if !spawner.advance(dt) {
            continue;
        }
        if let Err(err) = spawn_unit(spawner, combatants, next_combatant_id, rng, events) {
            log::warn!("spawner {} failed to spawn: {}", spawner.id(), err);
        }
    }
}

/// Create one unit from `spawner` regardless of its schedule.
pub fn spawn_unit(
    spawner: &mut Spawner,
    combatants: &mut BTreeMap<CombatantId, Combatant>,
    next_combatant_id: &mut u32,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<CombatEvent>,
) -> CombatResult<CombatantId> {
    if spawner.is_retired() {
        return Err(CombatError::invalid_config(format!(
            "spawner {} is retired",
            spawner.id()
        )));
    }

    let id = CombatantId(*next_combatant_id);
    let template = spawner.choose_template(rng).clone();
    let mut unit = Combatant::from_template(id, &template, spawner.config().location, events)?;
    *next_combatant_id += 1;

    unit.spawner = Some(spawner.id());
    unit.target = first_live_player(combatants);
    combatants.insert(id, unit);
    spawner.record_spawn();

    events.push(CombatEvent::SpawnRequested {
        spawner: spawner.id(),
        combatant: id,
        template: template.name.clone(),
    });
    log::info!("spawner {} spawned {} {}", spawner.id(), template.name, id);
    Ok(id)
}

/// The player AI combatants engage by default.
pub fn first_live_player(combatants: &BTreeMap<CombatantId, Combatant>) -> Option<CombatantId> {
    combatants
        .values()
        .find(|c| c.is_player() && c.is_alive())
        .map(|c| c.id)
}
