//! Player autopilot: stands in for the input driver in headless runs.
//!
//! Turns toward the nearest living enemy and taps the trigger whenever the
//! targeting evaluator says the shot is lined up and the weapon is ready.

use skirmish_core::commands::CombatCommand;
use skirmish_core::enums::{Faction, FireState};
use skirmish_core::state::{CombatSnapshot, CombatantView};
use skirmish_core::types::{CombatantId, Pose};
use skirmish_targeting::evaluator::{evaluate, TargetingEnvelope, TargetingQuery};

#[derive(Debug)]
pub struct Autopilot {
    player: CombatantId,
    envelope: TargetingEnvelope,
    trigger_down: bool,
}

impl Autopilot {
    pub fn new(player: CombatantId, envelope: TargetingEnvelope) -> Self {
        Self {
            player,
            envelope,
            trigger_down: false,
        }
    }

    /// Commands for the next tick, given the latest snapshot.
    pub fn plan(&mut self, snapshot: &CombatSnapshot) -> Vec<CombatCommand> {
        let mut commands = Vec::new();
        let released = self.trigger_down;
        if released {
            commands.push(CombatCommand::FireReleased {
                combatant: self.player,
            });
            self.trigger_down = false;
        }

        let Some(me) = snapshot.combatants.iter().find(|c| c.id == self.player) else {
            return commands;
        };
        if !me.alive {
            return commands;
        }
        let Some(target) = nearest_enemy(me, snapshot) else {
            return commands;
        };

        let pose = Pose::looking_at(me.pose.position, target.pose.position);
        commands.push(CombatCommand::SetPose {
            combatant: self.player,
            pose,
        });

        let decision = evaluate(&TargetingQuery {
            attacker: pose,
            target: target.pose.position,
            envelope: Some(self.envelope),
        });
        let ready = me
            .weapon
            .as_ref()
            .is_some_and(|w| w.state == FireState::Idle);
        if decision.should_attack && ready && !released {
            commands.push(CombatCommand::FireRequested {
                combatant: self.player,
            });
            self.trigger_down = true;
        }
        commands
    }
}

fn nearest_enemy<'a>(me: &CombatantView, snapshot: &'a CombatSnapshot) -> Option<&'a CombatantView> {
    snapshot
        .combatants
        .iter()
        .filter(|c| c.alive && c.faction == Faction::Enemy)
        .min_by(|a, b| {
            let da = me.pose.position.distance_squared(a.pose.position);
            let db = me.pose.position.distance_squared(b.pose.position);
            da.total_cmp(&db)
        })
}
