//! The demo arena: one player in the middle, enemies fed in by spawners.

use glam::DVec3;

use skirmish_core::commands::{CombatantTemplate, LootEntry, LootSpec};
use skirmish_core::constants::*;
use skirmish_core::enums::{Faction, SpawnMode, WeaponArchetype};
use skirmish_core::error::CombatResult;
use skirmish_core::types::{CombatantId, Pose};
use skirmish_core::weapon::preset;
use skirmish_sim::spawner::SpawnerConfig;
use skirmish_sim::CombatEngine;

pub fn player_template() -> CombatantTemplate {
    CombatantTemplate {
        name: "Player".to_string(),
        faction: Faction::Player,
        weapon: Some(preset(WeaponArchetype::BurstRifle)),
        ..CombatantTemplate::default()
    }
}

fn field_loot() -> LootSpec {
    LootSpec {
        drop_chance_percent: DEFAULT_ITEM_DROP_CHANCE,
        weighted: true,
        entries: vec![
            LootEntry {
                item: "First Aid".to_string(),
                chance: 5.0,
            },
            LootEntry {
                item: "Biohazard Kit".to_string(),
                chance: 2.0,
            },
            LootEntry {
                item: "Carbine".to_string(),
                chance: 1.0,
            },
        ],
    }
}

pub fn enemy_templates() -> Vec<CombatantTemplate> {
    vec![
        CombatantTemplate {
            name: "Trooper".to_string(),
            weapon: Some(preset(WeaponArchetype::BurstRifle)),
            loot: Some(field_loot()),
            ..CombatantTemplate::default()
        },
        CombatantTemplate {
            name: "Scout".to_string(),
            max_health: 60.0,
            initial_health: 60.0,
            weapon: Some(preset(WeaponArchetype::Carbine)),
            loot: Some(field_loot()),
            ..CombatantTemplate::default()
        },
        CombatantTemplate {
            name: "Sentry".to_string(),
            weapon: Some(preset(WeaponArchetype::Pistol)),
            ..CombatantTemplate::default()
        },
    ]
}

/// Populate `engine` with the player and the arena's spawners.
/// Returns the player's id.
pub fn setup_arena(engine: &mut CombatEngine) -> CombatResult<CombatantId> {
    let player = engine.spawn(&player_template(), Pose::default())?;

    // Keeps one random unit up to the north.
    engine.add_spawner(SpawnerConfig {
        mode: SpawnMode::Maintain,
        random_template: true,
        templates: enemy_templates(),
        location: Pose::looking_at(DVec3::new(0.0, 0.0, 18.0), DVec3::ZERO),
        max_active: 1,
        ..SpawnerConfig::default()
    })?;

    // Trickles troopers in from the east.
    engine.add_spawner(SpawnerConfig {
        mode: SpawnMode::Continuous,
        spawn_delay_secs: DEFAULT_SPAWN_DELAY_SECS * 3.0,
        templates: enemy_templates(),
        location: Pose::looking_at(DVec3::new(15.0, 0.0, 10.0), DVec3::ZERO),
        total_spawn_limit: Some(DEFAULT_TOTAL_SPAWNS / 2),
        ..SpawnerConfig::default()
    })?;

    // A single sentry to the west.
    engine.add_spawner(SpawnerConfig {
        mode: SpawnMode::Once,
        templates: vec![enemy_templates()[2].clone()],
        location: Pose::looking_at(DVec3::new(-12.0, 0.0, 5.0), DVec3::ZERO),
        ..SpawnerConfig::default()
    })?;

    Ok(player)
}
