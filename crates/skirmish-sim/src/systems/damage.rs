//! Damage system: hits, heals, deaths, scoring and loot.

use std::collections::BTreeMap;

use glam::DVec3;
use rand_chacha::ChaCha8Rng;

use skirmish_core::enums::MatchOutcome;
use skirmish_core::error::{CombatError, CombatResult};
use skirmish_core::events::CombatEvent;
use skirmish_core::types::CombatantId;

use crate::combatant::Combatant;
use crate::health::HealthChange;
use crate::score::ScoreState;
use crate::spawner::Spawner;

/// Mutable engine state a death touches.
pub struct DamageScope<'a> {
    pub combatants: &'a mut BTreeMap<CombatantId, Combatant>,
    pub spawners: &'a mut BTreeMap<u32, Spawner>,
    pub score: &'a mut ScoreState,
    pub rng: &'a mut ChaCha8Rng,
    pub events: &'a mut Vec<CombatEvent>,
    /// Seconds a dead player waits before respawning.
    pub respawn_delay_secs: f64,
}

/// A projectile reported by the collaborator struck `target`.
/// Returns the match outcome if this hit ended the match.
pub fn apply_hit(
    scope: &mut DamageScope<'_>,
    target: CombatantId,
    source: Option<CombatantId>,
    damage: f64,
    point: DVec3,
) -> CombatResult<Option<MatchOutcome>> {
    if !scope.combatants.contains_key(&target) {
        return Err(CombatError::UnknownCombatant(target));
    }
    scope.events.push(CombatEvent::HitLanded {
        target,
        source,
        damage,
        point,
    });
    let from_player = source
        .and_then(|id| scope.combatants.get(&id))
        .is_some_and(Combatant::is_player);
    if from_player {
        scope.score.hits_landed += 1;
    }
    apply_damage(scope, target, source, damage)
}

/// Deal `amount` damage to `target`, resolving its death if it dies.
pub fn apply_damage(
    scope: &mut DamageScope<'_>,
    target: CombatantId,
    source: Option<CombatantId>,
    amount: f64,
) -> CombatResult<Option<MatchOutcome>> {
    let combatant = scope
        .combatants
        .get_mut(&target)
        .ok_or(CombatError::UnknownCombatant(target))?;
    let change = combatant.health.damage(amount);
    report_damage(target, &change, scope.events);
    if change.died {
        return Ok(resolve_death(scope, target, source));
    }
    Ok(None)
}

/// Kill `target` outright.
pub fn kill(scope: &mut DamageScope<'_>, target: CombatantId) -> CombatResult<Option<MatchOutcome>> {
    let combatant = scope
        .combatants
        .get_mut(&target)
        .ok_or(CombatError::UnknownCombatant(target))?;
    let change = combatant.health.kill();
    report_damage(target, &change, scope.events);
    if change.died {
        return Ok(resolve_death(scope, target, None));
    }
    Ok(None)
}

/// Heal a living combatant.
pub fn heal(
    combatants: &mut BTreeMap<CombatantId, Combatant>,
    events: &mut Vec<CombatEvent>,
    target: CombatantId,
    amount: f64,
) -> CombatResult<()> {
    let combatant = combatants
        .get_mut(&target)
        .ok_or(CombatError::UnknownCombatant(target))?;
    let change = combatant.health.heal(amount);
    if change.applied > 0.0 {
        events.push(CombatEvent::Healed {
            combatant: target,
            amount: change.applied,
            health_remaining: change.remaining,
        });
    }
    Ok(())
}

fn report_damage(target: CombatantId, change: &HealthChange, events: &mut Vec<CombatEvent>) {
    if change.applied > 0.0 {
        events.push(CombatEvent::Damaged {
            combatant: target,
            amount: change.applied,
            health_remaining: change.remaining,
        });
    }
}

/// Handle a combatant whose health just reached zero.
fn resolve_death(
    scope: &mut DamageScope<'_>,
    target: CombatantId,
    killer: Option<CombatantId>,
) -> Option<MatchOutcome> {
    let Some(combatant) = scope.combatants.get_mut(&target) else {
        return None;
    };

    let point_value = if combatant.is_player() {
        0
    } else {
        combatant.point_value()
    };
    combatant.stop_attack(scope.events);
    if let Some(weapon) = &mut combatant.weapon {
        weapon.on_unequip();
    }
    scope.events.push(CombatEvent::Died {
        combatant: target,
        killer,
        point_value,
    });
    log::info!("{} {} died (killer: {:?})", combatant.name, target, killer);

    if combatant.is_player() {
        if scope.score.consume_life() {
            combatant.respawn_in_secs = Some(scope.respawn_delay_secs);
            log::info!(
                "player {} respawns in {:.1}s, {} lives left",
                target,
                scope.respawn_delay_secs,
                scope.score.lives_left
            );
            return None;
        }
        return Some(MatchOutcome::Lost);
    }

    if let Some(loot) = &combatant.loot {
        if let Some(item) = loot.roll(&mut *scope.rng) {
            scope.events.push(CombatEvent::LootDropped {
                combatant: target,
                item: item.clone(),
                position: combatant.pose.position,
            });
        }
    }
    if let Some(spawner) = combatant.spawner.and_then(|id| scope.spawners.get_mut(&id)) {
        spawner.on_unit_died();
    }

    scope.score.kills += 1;
    if let Some(event) = scope.score.add_points(point_value as i64) {
        scope.events.push(event);
    }
    scope.score.check_win()
}
