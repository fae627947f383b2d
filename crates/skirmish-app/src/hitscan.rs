//! Hitscan projectile resolver: the projectile collaborator for headless runs.
//!
//! Collects `ShotFired` events from the bus and resolves each one instantly
//! against the last snapshot, turning hits into `ReportHit` commands.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec3;

use skirmish_core::commands::CombatCommand;
use skirmish_core::events::{CombatEvent, CombatEventKind, ShotFired};
use skirmish_core::state::CombatSnapshot;
use skirmish_sim::bus::{KindFilter, ListenerResult};
use skirmish_sim::CombatEngine;

/// Radius of a combatant's hit capsule (game units).
pub const HIT_RADIUS: f64 = 0.5;

/// Farthest a hitscan round travels (game units).
pub const MAX_RANGE: f64 = 100.0;

/// Shots waiting to be resolved.
pub struct HitscanResolver {
    inbox: Rc<RefCell<Vec<ShotFired>>>,
}

impl HitscanResolver {
    /// Subscribe to `ShotFired` on the engine's bus.
    pub fn attach(engine: &mut CombatEngine) -> Self {
        let inbox = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&inbox);
        engine.bus_mut().subscribe(
            "hitscan",
            KindFilter::only([CombatEventKind::ShotFired]),
            move |event: &CombatEvent| -> ListenerResult {
                if let CombatEvent::ShotFired(shot) = event {
                    sink.borrow_mut().push(shot.clone());
                }
                Ok(())
            },
        );
        Self { inbox }
    }

    /// Resolve every collected shot against `snapshot`. Returns one
    /// `ReportHit` per shot that struck someone, and the number of shots seen.
    pub fn resolve(&self, snapshot: &CombatSnapshot) -> (Vec<CombatCommand>, u32) {
        let shots = std::mem::take(&mut *self.inbox.borrow_mut());
        let hits = shots
            .iter()
            .filter_map(|shot| trace(shot, snapshot))
            .collect();
        (hits, shots.len() as u32)
    }
}

/// First living combatant other than the shooter along the shot's ray.
pub fn trace(shot: &ShotFired, snapshot: &CombatSnapshot) -> Option<CombatCommand> {
    let mut best: Option<(f64, &skirmish_core::state::CombatantView)> = None;
    for view in &snapshot.combatants {
        if view.id == shot.shooter || !view.alive {
            continue;
        }
        let Some(t) = ray_hit(shot.origin, shot.direction, view.pose.position) else {
            continue;
        };
        if best.map_or(true, |(best_t, _)| t < best_t) {
            best = Some((t, view));
        }
    }

    best.map(|(t, view)| CombatCommand::ReportHit {
        target: view.id,
        source: Some(shot.shooter),
        damage: shot.damage,
        point: shot.origin + shot.direction * t,
    })
}

/// Distance along the ray to the closest approach to `center`, if the ray
/// passes within `HIT_RADIUS` of it and inside `MAX_RANGE`.
fn ray_hit(origin: DVec3, direction: DVec3, center: DVec3) -> Option<f64> {
    let to_center = center - origin;
    let t = to_center.dot(direction);
    if t <= 0.0 || t > MAX_RANGE {
        return None;
    }
    let miss = (to_center - direction * t).length();
    (miss <= HIT_RADIUS).then_some(t)
}
