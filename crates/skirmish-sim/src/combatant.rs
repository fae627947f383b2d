//! Combatant data model: one player or enemy owned by the engine.

use std::sync::Arc;

use skirmish_core::commands::CombatantTemplate;
use skirmish_core::enums::Faction;
use skirmish_core::error::CombatResult;
use skirmish_core::events::CombatEvent;
use skirmish_core::state::{CombatantView, WeaponView};
use skirmish_core::types::{CombatantId, Pose};
use skirmish_core::weapon::WeaponProfile;
use skirmish_loot::LootTable;
use skirmish_targeting::evaluator::TargetingEnvelope;
use skirmish_targeting::intent::{AttackIntent, IntentChange};

use crate::fire_control::FireControl;
use crate::health::Health;
use crate::score::kill_value;

#[derive(Debug, Clone)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub faction: Faction,
    pub pose: Pose,
    pub health: Health,
    pub weapon: Option<FireControl>,
    /// Whether the combatant is attacking (AI decision or trigger held).
    pub intent: AttackIntent,
    /// A trigger press waiting for the next weapons pass.
    pub pending_pull: bool,
    /// AI target. Ignored for the player.
    pub target: Option<CombatantId>,
    pub base_point_value: u32,
    pub loot: Option<LootTable<String>>,
    /// Spawner that produced this unit, if any.
    pub spawner: Option<u32>,
    /// Seconds until respawn, while a dead player waits.
    pub respawn_in_secs: Option<f64>,
}

impl Combatant {
    /// Build a combatant from a template. The weapon, if any, is equipped.
    pub fn from_template(
        id: CombatantId,
        template: &CombatantTemplate,
        pose: Pose,
        events: &mut Vec<CombatEvent>,
    ) -> CombatResult<Self> {
        let health = Health::new(template.max_health, template.initial_health)?;
        let loot = template
            .loot
            .as_ref()
            .map(LootTable::from_spec)
            .transpose()?;

        let mut combatant = Self {
            id,
            name: template.name.clone(),
            faction: template.faction,
            pose,
            health,
            weapon: None,
            intent: AttackIntent::default(),
            pending_pull: false,
            target: None,
            base_point_value: template.base_point_value,
            loot,
            spawner: None,
            respawn_in_secs: None,
        };
        if let Some(profile) = &template.weapon {
            combatant.equip(profile.clone(), events)?;
        }
        Ok(combatant)
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn is_player(&self) -> bool {
        self.faction == Faction::Player
    }

    /// Equip a weapon, replacing any current one. A malformed profile leaves
    /// the current weapon untouched.
    pub fn equip(&mut self, profile: WeaponProfile, events: &mut Vec<CombatEvent>) -> CombatResult<()> {
        let mut fire_control = FireControl::new(self.id, Arc::new(profile))?;
        self.unequip(events);

        let name = fire_control.profile().name.clone();
        let capacity = fire_control.profile().magazine_capacity;
        events.push(CombatEvent::WeaponEquipped {
            combatant: self.id,
            weapon: name.clone(),
        });
        fire_control.on_equip(capacity, events);
        self.weapon = Some(fire_control);
        log::debug!("{} {} equipped {}", self.name, self.id, name);
        Ok(())
    }

    /// Drop the current weapon. Pending shots are cancelled and an active
    /// attack ends. Returns false if nothing was equipped.
    pub fn unequip(&mut self, events: &mut Vec<CombatEvent>) -> bool {
        let Some(mut fire_control) = self.weapon.take() else {
            return false;
        };
        fire_control.on_unequip();
        self.stop_attack(events);
        events.push(CombatEvent::WeaponUnequipped { combatant: self.id });
        log::debug!(
            "{} {} unequipped {}",
            self.name,
            self.id,
            fire_control.profile().name
        );
        true
    }

    /// Reload the current weapon to capacity (respawn).
    pub fn rearm(&mut self, events: &mut Vec<CombatEvent>) {
        if let Some(fire_control) = &mut self.weapon {
            let capacity = fire_control.profile().magazine_capacity;
            fire_control.on_equip(capacity, events);
        }
    }

    /// Apply an attack decision, emitting the start/end edge.
    pub fn set_attacking(&mut self, attacking: bool, events: &mut Vec<CombatEvent>) {
        let change = self.intent.update(attacking);
        self.report_intent(change, events);
    }

    pub fn stop_attack(&mut self, events: &mut Vec<CombatEvent>) {
        self.pending_pull = false;
        let change = self.intent.stop();
        self.report_intent(change, events);
    }

    fn report_intent(&self, change: Option<IntentChange>, events: &mut Vec<CombatEvent>) {
        match change {
            Some(IntentChange::Started) => {
                events.push(CombatEvent::AttackStarted { combatant: self.id })
            }
            Some(IntentChange::Ended) => {
                events.push(CombatEvent::AttackEnded { combatant: self.id })
            }
            None => {}
        }
    }

    /// Current kill value, including the equipped weapon's modifier.
    pub fn point_value(&self) -> u32 {
        let modifier = self
            .weapon
            .as_ref()
            .map(|w| w.profile().point_value_modifier)
            .unwrap_or(0);
        kill_value(self.base_point_value, modifier)
    }

    pub fn envelope(&self) -> Option<TargetingEnvelope> {
        self.weapon
            .as_ref()
            .map(|w| TargetingEnvelope::from(w.profile().as_ref()))
    }

    pub fn view(&self) -> CombatantView {
        CombatantView {
            id: self.id,
            name: self.name.clone(),
            faction: self.faction,
            pose: self.pose,
            health: self.health.current(),
            health_fraction: self.health.fraction(),
            alive: self.is_alive(),
            attacking: self.intent.is_attacking(),
            point_value: self.point_value(),
            weapon: self.weapon.as_ref().map(|w| WeaponView {
                name: w.profile().name.clone(),
                fire_mode: w.profile().fire_mode,
                state: w.state(),
                rounds_remaining: w.rounds_remaining(),
                capacity: w.profile().magazine_capacity,
                pending_shots: w.pending_shots().len(),
            }),
        }
    }
}
