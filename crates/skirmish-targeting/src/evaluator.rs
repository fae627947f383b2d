//! Targeting evaluator.
//!
//! Decides whether an attacker should attack: the target must sit inside the
//! weapon's firing cone and within its effective range. Deterministic and
//! stateless; the movement planner that turns the attacker toward the target
//! is a separate collaborator.

use glam::DVec3;

use skirmish_core::types::Pose;
use skirmish_core::weapon::WeaponProfile;

/// Below this product of lengths a pair of directions is treated as degenerate.
const DEGENERATE_EPSILON: f64 = 1e-15;

/// Angular and range limits of an equipped weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetingEnvelope {
    /// Half-angle of the firing cone (degrees).
    pub attack_angle_deg: f64,
    /// Maximum engagement distance (game units).
    pub effective_range: f64,
}

impl From<&WeaponProfile> for TargetingEnvelope {
    fn from(profile: &WeaponProfile) -> Self {
        Self {
            attack_angle_deg: profile.attack_angle_deg,
            effective_range: profile.effective_range,
        }
    }
}

/// Input to the evaluator for a single attacker/target pair.
#[derive(Debug, Clone, Copy)]
pub struct TargetingQuery {
    pub attacker: Pose,
    pub target: DVec3,
    /// `None` when the attacker has no weapon equipped.
    pub envelope: Option<TargetingEnvelope>,
}

/// Output of the evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetingDecision {
    /// Angle between the attacker's forward and the line to the target (degrees, 0..=180).
    pub angle_to_target_deg: f64,
    pub distance: f64,
    pub is_aimed: bool,
    pub is_in_range: bool,
    pub should_attack: bool,
}

/// Evaluate one attacker/target pair.
pub fn evaluate(query: &TargetingQuery) -> TargetingDecision {
    let angle_to_target_deg = angle_to_target(&query.attacker, query.target);
    let distance = query.attacker.distance_to(query.target);

    let (is_aimed, is_in_range) = match query.envelope {
        Some(envelope) => (
            angle_to_target_deg <= envelope.attack_angle_deg,
            distance <= envelope.effective_range,
        ),
        None => (false, false),
    };

    TargetingDecision {
        angle_to_target_deg,
        distance,
        is_aimed,
        is_in_range,
        should_attack: is_aimed && is_in_range,
    }
}

/// Angle in degrees between `target - attacker.position` and `attacker.forward`.
/// Returns 0 when either vector is degenerate (target on top of the attacker,
/// or no facing).
pub fn angle_to_target(attacker: &Pose, target: DVec3) -> f64 {
    angle_between_deg(target - attacker.position, attacker.forward)
}

/// Unsigned angle between two vectors in degrees, in `[0, 180]`.
pub fn angle_between_deg(a: DVec3, b: DVec3) -> f64 {
    let denominator = (a.length_squared() * b.length_squared()).sqrt();
    if denominator < DEGENERATE_EPSILON {
        return 0.0;
    }
    let cos = (a.dot(b) / denominator).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Whether the target lies inside the firing cone.
pub fn is_aimed(attacker: &Pose, target: DVec3, envelope: &TargetingEnvelope) -> bool {
    angle_to_target(attacker, target) <= envelope.attack_angle_deg
}

/// Whether the target lies within effective range.
pub fn is_in_range(attacker: &Pose, target: DVec3, envelope: &TargetingEnvelope) -> bool {
    attacker.distance_to(target) <= envelope.effective_range
}

/// Convenience: aimed and in range. False without an envelope.
pub fn should_attack(attacker: &Pose, target: DVec3, envelope: Option<&TargetingEnvelope>) -> bool {
    match envelope {
        Some(envelope) => {
            is_aimed(attacker, target, envelope) && is_in_range(attacker, target, envelope)
        }
        None => false,
    }
}
