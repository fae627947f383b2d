//! Fire-control state machine: gates when a weapon may discharge.
//!
//! One `FireControl` per equipped weapon, parameterized by the profile's
//! `FireMode`. All timing is explicit state advanced by `advance(dt)`:
//!
//! ```text
//!   Idle ──trigger──► Firing (burst shots pending) ──► Cooldown ──expire──► Idle
//!     ▲                                                   │
//!     └────────────── zero-length cooldown ───────────────┘
//! ```
//!
//! Burst shots are stamped with a due time on the weapon's own logical clock,
//! so the same sequence of shots comes out however the caller chunks `dt`.

use std::sync::Arc;

use glam::{DQuat, DVec3, EulerRot};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::TIMER_EPSILON;
use skirmish_core::enums::{FireMode, FireState, NotReadyReason};
use skirmish_core::error::CombatResult;
use skirmish_core::events::{CombatEvent, ShotFired};
use skirmish_core::types::{CombatantId, Pose};
use skirmish_core::weapon::WeaponProfile;

/// Everything a fire attempt needs from the outside world for one call.
pub struct FireContext<'a> {
    /// Muzzle position and facing at the time of the call.
    pub muzzle: Pose,
    /// Spread source.
    pub rng: &'a mut ChaCha8Rng,
    /// Sink for `ShotFired` / `AmmoChanged`.
    pub events: &'a mut Vec<CombatEvent>,
}

/// Result of a trigger pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// The trigger pull was accepted; `shots` projectiles were fired or scheduled.
    Fired { shots: u32 },
    /// Nothing happened.
    NotReady(NotReadyReason),
}

impl FireOutcome {
    pub fn fired(&self) -> bool {
        matches!(self, Self::Fired { .. })
    }
}

/// A burst round waiting for its slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingShot {
    /// Due time on the weapon's logical clock (seconds).
    pub due_secs: f64,
    /// Insertion order, breaks ties between equal due times.
    pub seq: u64,
}

/// Per-weapon fire-control state.
#[derive(Debug, Clone)]
pub struct FireControl {
    owner: CombatantId,
    profile: Arc<WeaponProfile>,
    equipped: bool,
    can_fire: bool,
    rounds_remaining: u32,
    time_since_last_fire: f64,
    /// Active cooldown length. Meaningful only while `!can_fire`.
    cooldown_secs: f64,
    /// Sorted by `(due_secs, seq)`.
    pending: Vec<PendingShot>,
    next_seq: u64,
    clock_secs: f64,
}

impl FireControl {
    /// Build an unequipped fire control for `owner`. Rejects a malformed profile.
    pub fn new(owner: CombatantId, profile: Arc<WeaponProfile>) -> CombatResult<Self> {
        profile.validate()?;
        Ok(Self {
            owner,
            profile,
            equipped: false,
            can_fire: true,
            rounds_remaining: 0,
            time_since_last_fire: 0.0,
            cooldown_secs: 0.0,
            pending: Vec::new(),
            next_seq: 0,
            clock_secs: 0.0,
        })
    }

    pub fn owner(&self) -> CombatantId {
        self.owner
    }

    pub fn profile(&self) -> &Arc<WeaponProfile> {
        &self.profile
    }

    pub fn is_equipped(&self) -> bool {
        self.equipped
    }

    pub fn can_fire(&self) -> bool {
        self.can_fire
    }

    pub fn rounds_remaining(&self) -> u32 {
        self.rounds_remaining
    }

    pub fn time_since_last_fire(&self) -> f64 {
        self.time_since_last_fire
    }

    pub fn cooldown_secs(&self) -> f64 {
        self.cooldown_secs
    }

    pub fn pending_shots(&self) -> &[PendingShot] {
        &self.pending
    }

    /// Observable state, derived from the timer fields.
    pub fn state(&self) -> FireState {
        if !self.pending.is_empty() {
            FireState::Firing
        } else if !self.can_fire {
            FireState::Cooldown
        } else {
            FireState::Idle
        }
    }

    /// Load `capacity` rounds and return to `Idle`.
    pub fn on_equip(&mut self, capacity: u32, events: &mut Vec<CombatEvent>) {
        self.reset();
        self.equipped = true;
        self.rounds_remaining = capacity;
        events.push(CombatEvent::AmmoChanged {
            combatant: self.owner,
            rounds_remaining: self.rounds_remaining,
        });
    }

    /// Zero the magazine, cancel pending shots and clear the cooldown.
    /// Calling it again is a no-op.
    pub fn on_unequip(&mut self) {
        self.reset();
        self.equipped = false;
    }

    /// Pull the trigger in the profile's fire mode.
    pub fn trigger(&mut self, ctx: &mut FireContext<'_>) -> FireOutcome {
        match self.profile.fire_mode {
            FireMode::SingleShot => self.try_fire_single(ctx),
            FireMode::Burst => self.try_fire_burst(ctx),
        }
    }

    /// Fire one projectile if ready and loaded.
    pub fn try_fire_single(&mut self, ctx: &mut FireContext<'_>) -> FireOutcome {
        let cost = self.profile.rounds_per_shot;
        if let Some(reason) = self.not_ready(cost) {
            return FireOutcome::NotReady(reason);
        }

        self.consume(cost, ctx.events);
        let due = self.clock_secs;
        self.emit_shot(due, ctx);

        if self.profile.limited_fire_rate {
            self.start_cooldown(self.profile.single_shot_interval_secs());
        }
        FireOutcome::Fired { shots: 1 }
    }

    /// Fire a burst: shot 0 now, the rest spaced evenly over the burst duration.
    pub fn try_fire_burst(&mut self, ctx: &mut FireContext<'_>) -> FireOutcome {
        let rounds = self.profile.rounds_per_burst;
        let cost = self.profile.rounds_per_trigger();
        if let Some(reason) = self.not_ready(cost) {
            return FireOutcome::NotReady(reason);
        }

        self.consume(cost, ctx.events);
        let start = self.clock_secs;
        let spacing = self.profile.burst_spacing_secs();
        self.emit_shot(start, ctx);
        for i in 1..rounds {
            self.schedule(start + spacing * i as f64);
        }

        if self.profile.limited_fire_rate {
            self.start_cooldown(self.profile.burst_cooldown_secs());
        }
        FireOutcome::Fired { shots: rounds }
    }

    /// Advance the weapon clock by `dt` seconds: fire due burst shots, then
    /// tick the cooldown. Returns the number of shots fired.
    pub fn advance(&mut self, dt: f64, ctx: &mut FireContext<'_>) -> u32 {
        if !self.equipped {
            return 0;
        }
        self.clock_secs += dt;

        let mut fired = 0;
        while let Some(shot) = self.pending.first().copied() {
            if shot.due_secs > self.clock_secs + TIMER_EPSILON {
                break;
            }
            self.pending.remove(0);
            self.emit_shot(shot.due_secs, ctx);
            fired += 1;
        }

        if !self.can_fire {
            self.time_since_last_fire += dt;
            if self.time_since_last_fire + TIMER_EPSILON >= self.cooldown_secs {
                self.time_since_last_fire = 0.0;
                self.cooldown_secs = 0.0;
                self.can_fire = true;
            }
        }
        fired
    }

    fn not_ready(&self, cost: u32) -> Option<NotReadyReason> {
        if !self.equipped {
            Some(NotReadyReason::Unequipped)
        } else if !self.can_fire {
            Some(NotReadyReason::CoolingDown)
        } else if self.rounds_remaining < cost {
            Some(NotReadyReason::OutOfAmmo)
        } else {
            None
        }
    }

    fn consume(&mut self, rounds: u32, events: &mut Vec<CombatEvent>) {
        self.rounds_remaining = self.rounds_remaining.saturating_sub(rounds);
        events.push(CombatEvent::AmmoChanged {
            combatant: self.owner,
            rounds_remaining: self.rounds_remaining,
        });
    }

    fn start_cooldown(&mut self, secs: f64) {
        // Zero-length cooldowns never block.
        if secs <= TIMER_EPSILON {
            return;
        }
        self.can_fire = false;
        self.cooldown_secs = secs;
        self.time_since_last_fire = 0.0;
    }

    fn schedule(&mut self, due_secs: f64) {
        let shot = PendingShot {
            due_secs,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        let at = self
            .pending
            .partition_point(|p| (p.due_secs, p.seq) <= (shot.due_secs, shot.seq));
        self.pending.insert(at, shot);
    }

    fn emit_shot(&self, due_secs: f64, ctx: &mut FireContext<'_>) {
        let direction = spread_direction(ctx.muzzle.direction(), self.profile.spread_deg, ctx.rng);
        ctx.events.push(CombatEvent::ShotFired(ShotFired {
            shooter: self.owner,
            origin: ctx.muzzle.position,
            direction,
            damage: self.profile.projectile_damage,
            muzzle_speed: self.profile.muzzle_speed,
            fired_at_secs: due_secs,
        }));
    }

    fn reset(&mut self) {
        self.can_fire = true;
        self.rounds_remaining = 0;
        self.time_since_last_fire = 0.0;
        self.cooldown_secs = 0.0;
        self.pending.clear();
        self.clock_secs = 0.0;
    }
}

/// Perturb a unit `forward` by a random Euler rotation whose per-axis angles
/// are a random point on the unit sphere scaled by `spread_deg`.
pub fn spread_direction(forward: DVec3, spread_deg: f64, rng: &mut ChaCha8Rng) -> DVec3 {
    if spread_deg <= 0.0 {
        return forward;
    }
    let barrel = DQuat::from_rotation_arc(DVec3::Z, forward);
    let axis_deg = random_on_unit_sphere(rng) * spread_deg;
    let jitter = DQuat::from_euler(
        EulerRot::YXZ,
        axis_deg.y.to_radians(),
        axis_deg.x.to_radians(),
        axis_deg.z.to_radians(),
    );
    ((barrel * jitter) * DVec3::Z).normalize()
}

fn random_on_unit_sphere(rng: &mut ChaCha8Rng) -> DVec3 {
    loop {
        let v = DVec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-12 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}
