#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::commands::{CombatCommand, CombatantTemplate};
    use crate::enums::*;
    use crate::error::CombatError;
    use crate::events::{CombatEvent, CombatEventKind, ShotFired};
    use crate::state::CombatSnapshot;
    use crate::types::{sanitize_dt, CombatantId, Pose, SimTime};
    use crate::weapon::{preset, WeaponProfile};

    #[test]
    fn test_presets_are_valid() {
        for archetype in [
            WeaponArchetype::Pistol,
            WeaponArchetype::Rifle,
            WeaponArchetype::BurstRifle,
            WeaponArchetype::Carbine,
        ] {
            let profile = preset(archetype);
            assert!(
                profile.validate().is_ok(),
                "{archetype:?} preset should validate"
            );
        }
    }

    #[test]
    fn test_single_shot_interval() {
        let profile = WeaponProfile {
            rounds_per_minute: 120.0,
            ..WeaponProfile::default()
        };
        assert!((profile.single_shot_interval_secs() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_burst_timing_derivation() {
        let profile = WeaponProfile {
            fire_mode: FireMode::Burst,
            rounds_per_burst: 3,
            burst_duration_secs: 0.3,
            bursts_per_minute: 30.0,
            ..WeaponProfile::default()
        };
        assert!((profile.burst_spacing_secs() - 0.1).abs() < 1e-12);
        // 60 / 30 - 0.3
        assert!((profile.burst_cooldown_secs() - 1.7).abs() < 1e-12);
        assert_eq!(profile.rounds_per_trigger(), 3);
    }

    #[test]
    fn test_burst_cooldown_floors_at_zero() {
        // 600 bursts/min leaves 0.1 s per burst, shorter than the 0.3 s burst.
        let profile = WeaponProfile {
            fire_mode: FireMode::Burst,
            burst_duration_secs: 0.3,
            bursts_per_minute: 600.0,
            ..WeaponProfile::default()
        };
        assert_eq!(profile.burst_cooldown_secs(), 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_angle() {
        let profile = WeaponProfile {
            attack_angle_deg: 200.0,
            ..WeaponProfile::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(CombatError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_range() {
        let profile = WeaponProfile {
            effective_range: -1.0,
            ..WeaponProfile::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(CombatError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_rate_when_limited() {
        let profile = WeaponProfile {
            limited_fire_rate: true,
            rounds_per_minute: 0.0,
            ..WeaponProfile::default()
        };
        assert!(profile.validate().is_err());

        // The same cadence is irrelevant for an unlimited weapon.
        let unlimited = WeaponProfile {
            limited_fire_rate: false,
            rounds_per_minute: 0.0,
            ..WeaponProfile::default()
        };
        assert!(unlimited.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_burst() {
        let profile = WeaponProfile {
            fire_mode: FireMode::Burst,
            rounds_per_burst: 0,
            ..WeaponProfile::default()
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_rounds_per_shot() {
        let profile = WeaponProfile {
            rounds_per_shot: 0,
            ..WeaponProfile::default()
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_pose_looking_at() {
        let pose = Pose::looking_at(DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0));
        assert!((pose.forward - DVec3::X).length() < 1e-12);
        assert!((pose.distance_to(DVec3::new(0.0, 4.0, 3.0)) - 5.0).abs() < 1e-12);

        let degenerate = Pose::looking_at(DVec3::ONE, DVec3::ONE);
        assert_eq!(degenerate.forward, DVec3::Z);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        time.advance(0.5);
        time.advance(0.25);
        assert_eq!(time.tick, 2);
        assert!((time.elapsed_secs - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.016), 0.016);
        assert_eq!(sanitize_dt(-1.0), 0.0);
        assert_eq!(sanitize_dt(f64::NAN), 0.0);
        assert_eq!(sanitize_dt(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_event_kind_matches_variant() {
        let shot = CombatEvent::ShotFired(ShotFired {
            shooter: CombatantId(1),
            origin: DVec3::ZERO,
            direction: DVec3::Z,
            damage: 10.0,
            muzzle_speed: 1000.0,
            fired_at_secs: 0.0,
        });
        assert_eq!(shot.kind(), CombatEventKind::ShotFired);
        assert_eq!(
            CombatEvent::AttackEnded {
                combatant: CombatantId(2)
            }
            .kind(),
            CombatEventKind::AttackEnded
        );
    }

    #[test]
    fn test_event_serde_is_tagged() {
        let event = CombatEvent::AmmoChanged {
            combatant: CombatantId(3),
            rounds_remaining: 29,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"AmmoChanged\""), "got {json}");
        let back: CombatEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_command_serde() {
        let cmd = CombatCommand::Equip {
            combatant: CombatantId(7),
            profile: preset(WeaponArchetype::BurstRifle),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: CombatCommand = serde_json::from_str(&json).unwrap();
        match back {
            CombatCommand::Equip { combatant, profile } => {
                assert_eq!(combatant, CombatantId(7));
                assert_eq!(profile.fire_mode, FireMode::Burst);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_default_template_is_unarmed_enemy() {
        let template = CombatantTemplate::default();
        assert_eq!(template.faction, Faction::Enemy);
        assert!(template.weapon.is_none());
        assert!(template.loot.is_none());
    }

    #[test]
    fn test_empty_snapshot_serializes() {
        let snapshot = CombatSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"phase\":\"Active\""));
    }
}
