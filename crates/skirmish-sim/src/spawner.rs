//! Spawners: produce combatants from templates on a schedule.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use skirmish_core::commands::CombatantTemplate;
use skirmish_core::constants::*;
use skirmish_core::enums::SpawnMode;
use skirmish_core::error::{CombatError, CombatResult};
use skirmish_core::types::Pose;

/// Authored spawner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnerConfig {
    pub mode: SpawnMode,
    /// Seconds between spawns (Continuous, Maintain).
    pub spawn_delay_secs: f64,
    /// Pick a template at random instead of always the first.
    pub random_template: bool,
    pub templates: Vec<CombatantTemplate>,
    /// Where units appear.
    pub location: Pose,
    /// Units kept alive at once (Maintain).
    pub max_active: u32,
    /// Maintain mode spawns its first unit without waiting.
    pub spawn_first_immediately: bool,
    /// Retire after this many spawns (Continuous, Maintain). `None` = unlimited.
    pub total_spawn_limit: Option<u32>,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            mode: SpawnMode::Once,
            spawn_delay_secs: DEFAULT_SPAWN_DELAY_SECS,
            random_template: false,
            templates: vec![CombatantTemplate::default()],
            location: Pose::default(),
            max_active: 1,
            spawn_first_immediately: true,
            total_spawn_limit: Some(DEFAULT_TOTAL_SPAWNS),
        }
    }
}

/// Live spawner state.
#[derive(Debug, Clone)]
pub struct Spawner {
    id: u32,
    config: SpawnerConfig,
    time_since_spawn: f64,
    active_units: u32,
    total_spawned: u32,
    started: bool,
    retired: bool,
}

impl Spawner {
    pub fn new(id: u32, config: SpawnerConfig) -> CombatResult<Self> {
        if config.templates.is_empty() {
            return Err(CombatError::invalid_config(format!(
                "spawner {id} has no templates"
            )));
        }
        if !config.spawn_delay_secs.is_finite() || config.spawn_delay_secs < 0.0 {
            return Err(CombatError::invalid_config(format!(
                "spawner {id}: spawn delay must be finite and >= 0, got {}",
                config.spawn_delay_secs
            )));
        }
        if config.mode == SpawnMode::Maintain && config.max_active == 0 {
            return Err(CombatError::invalid_config(format!(
                "spawner {id}: maintain mode needs max_active >= 1"
            )));
        }
        if config.total_spawn_limit == Some(0) {
            return Err(CombatError::invalid_config(format!(
                "spawner {id}: total spawn limit must be at least 1"
            )));
        }
        for template in &config.templates {
            if let Some(weapon) = &template.weapon {
                weapon.validate()?;
            }
        }
        Ok(Self {
            id,
            config,
            time_since_spawn: 0.0,
            active_units: 0,
            total_spawned: 0,
            started: false,
            retired: false,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    pub fn active_units(&self) -> u32 {
        self.active_units
    }

    pub fn total_spawned(&self) -> u32 {
        self.total_spawned
    }

    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// Advance timers by `dt`. Returns true when a unit should spawn now.
    /// At most one unit per call.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.retired {
            return false;
        }
        if !self.started {
            self.started = true;
            match self.config.mode {
                SpawnMode::Once => return true,
                SpawnMode::Maintain if self.config.spawn_first_immediately => return true,
                _ => {}
            }
        }
        match self.config.mode {
            SpawnMode::Continuous => {
                self.time_since_spawn += dt;
                self.delay_elapsed()
            }
            SpawnMode::Maintain => {
                if self.active_units >= self.config.max_active {
                    return false;
                }
                self.time_since_spawn += dt;
                self.delay_elapsed()
            }
            SpawnMode::Once | SpawnMode::OnCommand => false,
        }
    }

    /// Template for the next unit.
    pub fn choose_template(&self, rng: &mut ChaCha8Rng) -> &CombatantTemplate {
        let templates = &self.config.templates;
        if self.config.random_template && templates.len() > 1 {
            &templates[rng.gen_range(0..templates.len())]
        } else {
            &templates[0]
        }
    }

    /// Book-keeping after the engine created a unit.
    pub fn record_spawn(&mut self) {
        match self.config.mode {
            SpawnMode::Once => self.retired = true,
            SpawnMode::OnCommand => {}
            SpawnMode::Continuous | SpawnMode::Maintain => {
                self.active_units += 1;
                self.total_spawned += 1;
                self.time_since_spawn = 0.0;
                if let Some(limit) = self.config.total_spawn_limit {
                    if self.total_spawned >= limit {
                        self.retired = true;
                    }
                }
            }
        }
    }

    /// A unit this spawner produced has died.
    pub fn on_unit_died(&mut self) {
        self.active_units = self.active_units.saturating_sub(1);
    }

    fn delay_elapsed(&self) -> bool {
        self.time_since_spawn + TIMER_EPSILON >= self.config.spawn_delay_secs
    }
}
