#[cfg(test)]
mod tests {
    use glam::DVec3;

    use skirmish_core::types::Pose;
    use skirmish_core::weapon::WeaponProfile;

    use crate::evaluator::{
        angle_between_deg, angle_to_target, evaluate, should_attack, TargetingEnvelope,
        TargetingQuery,
    };
    use crate::intent::{AttackIntent, IntentChange};

    /// Attacker at the origin facing +Z with a 5°/40-unit envelope.
    fn make_query(target: DVec3) -> TargetingQuery {
        TargetingQuery {
            attacker: Pose::new(DVec3::ZERO, DVec3::Z),
            target,
            envelope: Some(TargetingEnvelope {
                attack_angle_deg: 5.0,
                effective_range: 40.0,
            }),
        }
    }

    #[test]
    fn test_dead_ahead_in_range_attacks() {
        let decision = evaluate(&make_query(DVec3::new(0.0, 0.0, 10.0)));
        assert!(decision.is_aimed);
        assert!(decision.is_in_range);
        assert!(decision.should_attack);
        assert!(decision.angle_to_target_deg.abs() < 1e-9);
        assert!((decision.distance - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_ninety_degrees_off_axis_does_not_attack() {
        let decision = evaluate(&make_query(DVec3::new(10.0, 0.0, 0.0)));
        assert!((decision.angle_to_target_deg - 90.0).abs() < 1e-9);
        assert!(!decision.is_aimed);
        assert!(decision.is_in_range);
        assert!(!decision.should_attack);
    }

    #[test]
    fn test_in_angle_out_of_range_does_not_attack() {
        let decision = evaluate(&make_query(DVec3::new(0.0, 0.0, 50.0)));
        assert!(decision.is_aimed);
        assert!(!decision.is_in_range);
        assert!(!decision.should_attack);
    }

    #[test]
    fn test_no_weapon_never_attacks() {
        let mut query = make_query(DVec3::new(0.0, 0.0, 10.0));
        query.envelope = None;
        let decision = evaluate(&query);
        assert!(!decision.should_attack);
        assert!(!should_attack(&query.attacker, query.target, None));
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        // Exactly at range.
        let decision = evaluate(&make_query(DVec3::new(0.0, 0.0, 40.0)));
        assert!(decision.should_attack);

        // Just inside the cone edge.
        let inside = 4.999_f64.to_radians();
        let target = DVec3::new(inside.sin(), 0.0, inside.cos()) * 20.0;
        assert!(evaluate(&make_query(target)).is_aimed);

        // Just outside it.
        let outside = 5.01_f64.to_radians();
        let target = DVec3::new(outside.sin(), 0.0, outside.cos()) * 20.0;
        assert!(!evaluate(&make_query(target)).is_aimed);
    }

    #[test]
    fn test_target_behind_is_180() {
        let attacker = Pose::new(DVec3::ZERO, DVec3::Z);
        let angle = angle_to_target(&attacker, DVec3::new(0.0, 0.0, -5.0));
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_ignores_forward_magnitude() {
        let short = Pose::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 0.01));
        let long = Pose::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 100.0));
        let target = DVec3::new(1.0, 0.0, 1.0);
        let a = angle_to_target(&short, target);
        let b = angle_to_target(&long, target);
        assert!((a - 45.0).abs() < 1e-9);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_vectors_give_zero_angle() {
        assert_eq!(angle_between_deg(DVec3::ZERO, DVec3::Z), 0.0);
        let attacker = Pose::new(DVec3::new(1.0, 2.0, 3.0), DVec3::Z);
        assert_eq!(angle_to_target(&attacker, attacker.position), 0.0);
    }

    #[test]
    fn test_attacker_offset_from_origin() {
        let query = TargetingQuery {
            attacker: Pose::new(DVec3::new(5.0, 0.0, 5.0), DVec3::X),
            target: DVec3::new(15.0, 0.0, 5.0),
            envelope: Some(TargetingEnvelope {
                attack_angle_deg: 1.0,
                effective_range: 10.0,
            }),
        };
        assert!(evaluate(&query).should_attack);
    }

    #[test]
    fn test_envelope_from_profile() {
        let profile = WeaponProfile {
            attack_angle_deg: 12.0,
            effective_range: 33.0,
            ..WeaponProfile::default()
        };
        let envelope = TargetingEnvelope::from(&profile);
        assert_eq!(envelope.attack_angle_deg, 12.0);
        assert_eq!(envelope.effective_range, 33.0);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let query = make_query(DVec3::new(0.3, 0.1, 12.0));
        assert_eq!(evaluate(&query), evaluate(&query));
    }

    // ---- Attack intent ----

    #[test]
    fn test_intent_reports_edges_only() {
        let mut intent = AttackIntent::default();
        assert_eq!(intent.update(false), None);
        assert_eq!(intent.update(true), Some(IntentChange::Started));
        assert_eq!(intent.update(true), None);
        assert!(intent.is_attacking());
        assert_eq!(intent.update(false), Some(IntentChange::Ended));
        assert_eq!(intent.update(false), None);
    }

    #[test]
    fn test_intent_stop() {
        let mut intent = AttackIntent::default();
        assert_eq!(intent.stop(), None);
        intent.update(true);
        assert_eq!(intent.stop(), Some(IntentChange::Ended));
        assert!(!intent.is_attacking());
    }
}
