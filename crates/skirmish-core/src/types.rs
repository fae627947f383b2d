//! Fundamental geometric and simulation types.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Stable identifier of a combatant owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position and facing of an attacker, muzzle or target (game units).
/// y = Up, +z = the default forward axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    /// Facing direction. Need not be normalized; zero means "no facing".
    pub forward: DVec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            forward: DVec3::Z,
        }
    }
}

impl Pose {
    pub fn new(position: DVec3, forward: DVec3) -> Self {
        Self { position, forward }
    }

    /// Pose at `position` facing toward `target`. Keeps +z when they coincide.
    pub fn looking_at(position: DVec3, target: DVec3) -> Self {
        let forward = (target - position).try_normalize().unwrap_or(DVec3::Z);
        Self { position, forward }
    }

    /// Distance to a point (game units).
    pub fn distance_to(&self, point: DVec3) -> f64 {
        self.position.distance(point)
    }

    /// Unit facing vector, falling back to +z for a degenerate forward.
    pub fn direction(&self) -> DVec3 {
        self.forward.try_normalize().unwrap_or(DVec3::Z)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks processed while the match was running.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Clamp an externally supplied frame delta to a usable value.
/// Negative and non-finite deltas count as zero elapsed time.
pub fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}
