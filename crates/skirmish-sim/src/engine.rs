//! Combat engine: threads one tick through every combat system.
//!
//! `CombatEngine` owns the combatants, spawners, score, RNG and event bus,
//! processes queued commands, runs all systems and produces a
//! `CombatSnapshot`. Completely headless, enabling deterministic testing.

use std::collections::{BTreeMap, VecDeque};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use skirmish_core::commands::{CombatCommand, CombatantTemplate};
use skirmish_core::constants::*;
use skirmish_core::enums::{MatchOutcome, MatchPhase};
use skirmish_core::error::{CombatError, CombatResult};
use skirmish_core::events::CombatEvent;
use skirmish_core::state::CombatSnapshot;
use skirmish_core::types::{sanitize_dt, CombatantId, Pose, SimTime};
use skirmish_core::weapon::WeaponProfile;

use crate::bus::{CombatEventBus, DeliveryReport};
use crate::combatant::Combatant;
use crate::score::ScoreState;
use crate::spawner::{Spawner, SpawnerConfig};
use crate::systems;
use crate::systems::damage::DamageScope;

/// Configuration for starting a new match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// RNG seed for determinism. Same seed = same match.
    pub seed: u64,
    pub score_to_win: u32,
    /// Respawns available to the player.
    pub player_lives: u32,
    pub player_respawn_delay_secs: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            score_to_win: DEFAULT_SCORE_TO_WIN,
            player_lives: DEFAULT_PLAYER_LIVES,
            player_respawn_delay_secs: DEFAULT_RESPAWN_DELAY_SECS,
        }
    }
}

/// The combat engine. Owns all combat state.
pub struct CombatEngine {
    config: EngineConfig,
    time: SimTime,
    phase: MatchPhase,
    rng: ChaCha8Rng,
    combatants: BTreeMap<CombatantId, Combatant>,
    next_combatant_id: u32,
    spawners: BTreeMap<u32, Spawner>,
    next_spawner_id: u32,
    score: ScoreState,
    command_queue: VecDeque<CombatCommand>,
    events: Vec<CombatEvent>,
    despawn_buffer: Vec<CombatantId>,
    bus: CombatEventBus,
    last_delivery: DeliveryReport,
}

impl CombatEngine {
    pub fn new(config: EngineConfig) -> Self {
        let respawn = sanitize_dt(config.player_respawn_delay_secs);
        let config = EngineConfig {
            player_respawn_delay_secs: respawn,
            ..config
        };
        Self {
            time: SimTime::default(),
            phase: MatchPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            combatants: BTreeMap::new(),
            next_combatant_id: 0,
            spawners: BTreeMap::new(),
            next_spawner_id: 0,
            score: ScoreState::new(config.score_to_win, config.player_lives),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
            bus: CombatEventBus::new(),
            last_delivery: DeliveryReport::default(),
            config,
        }
    }

    // --- Roster ---

    /// Create a combatant now. Its events go out with the next tick.
    /// Enemies engage the current player by default.
    pub fn spawn(&mut self, template: &CombatantTemplate, pose: Pose) -> CombatResult<CombatantId> {
        let id = CombatantId(self.next_combatant_id);
        let mut combatant = Combatant::from_template(id, template, pose, &mut self.events)?;
        self.next_combatant_id += 1;
        if !combatant.is_player() {
            combatant.target = systems::spawning::first_live_player(&self.combatants);
        }
        log::info!("spawned {} {} ({:?})", combatant.name, id, combatant.faction);
        self.combatants.insert(id, combatant);
        Ok(id)
    }

    /// Remove a combatant. Pending shots are cancelled before the next tick.
    pub fn remove_combatant(&mut self, id: CombatantId) -> CombatResult<()> {
        let mut combatant = self
            .combatants
            .remove(&id)
            .ok_or(CombatError::UnknownCombatant(id))?;
        combatant.unequip(&mut self.events);
        if let Some(spawner) = combatant.spawner.and_then(|s| self.spawners.get_mut(&s)) {
            spawner.on_unit_died();
        }
        Ok(())
    }

    pub fn add_spawner(&mut self, config: SpawnerConfig) -> CombatResult<u32> {
        let id = self.next_spawner_id;
        let spawner = Spawner::new(id, config)?;
        self.next_spawner_id += 1;
        self.spawners.insert(id, spawner);
        Ok(id)
    }

    pub fn equip(&mut self, id: CombatantId, profile: WeaponProfile) -> CombatResult<()> {
        let combatant = self
            .combatants
            .get_mut(&id)
            .ok_or(CombatError::UnknownCombatant(id))?;
        combatant.equip(profile, &mut self.events)
    }

    /// Returns false if nothing was equipped.
    pub fn unequip(&mut self, id: CombatantId) -> CombatResult<bool> {
        let combatant = self
            .combatants
            .get_mut(&id)
            .ok_or(CombatError::UnknownCombatant(id))?;
        Ok(combatant.unequip(&mut self.events))
    }

    // --- Commands ---

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: CombatCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = CombatCommand>) {
        self.command_queue.extend(commands);
    }

    // --- Tick ---

    /// Advance the match by `dt` seconds and return the resulting snapshot.
    /// Paused or finished matches only process commands.
    pub fn tick(&mut self, dt: f64) -> CombatSnapshot {
        let dt = sanitize_dt(dt);
        self.process_commands();

        if self.phase == MatchPhase::Active {
            self.run_systems(dt);
            self.time.advance(dt);
        }
        systems::cleanup::run(&mut self.combatants, &mut self.despawn_buffer);

        let events = std::mem::take(&mut self.events);
        self.last_delivery = self.bus.emit_all(&events);
        self.snapshot()
    }

    /// Current state without advancing.
    pub fn snapshot(&self) -> CombatSnapshot {
        systems::snapshot::build_snapshot(&self.time, self.phase, &self.combatants, &self.score)
    }

    // --- Accessors ---

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(&id)
    }

    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.values()
    }

    pub fn spawner(&self, id: u32) -> Option<&Spawner> {
        self.spawners.get(&id)
    }

    pub fn bus(&self) -> &CombatEventBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut CombatEventBus {
        &mut self.bus
    }

    /// Listener delivery results from the last tick.
    pub fn last_delivery(&self) -> &DeliveryReport {
        &self.last_delivery
    }

    fn run_systems(&mut self, dt: f64) {
        systems::spawning::run(
            &mut self.spawners,
            &mut self.combatants,
            &mut self.next_combatant_id,
            &mut self.rng,
            &mut self.events,
            dt,
        );
        systems::targeting::run(&mut self.combatants, &mut self.events);
        systems::weapons::run(
            &mut self.combatants,
            &mut self.rng,
            &mut self.events,
            &mut self.score,
            dt,
        );
        systems::respawn::run(&mut self.combatants, &mut self.events, dt);
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.handle_command(command) {
                log::warn!("dropped command: {err}");
            }
        }
    }

    fn handle_command(&mut self, command: CombatCommand) -> CombatResult<()> {
        match command {
            CombatCommand::Equip { combatant, profile } => self.equip(combatant, profile),
            CombatCommand::Unequip { combatant } => self.unequip(combatant).map(|_| ()),
            CombatCommand::FireRequested { combatant } => {
                let c = self
                    .combatants
                    .get_mut(&combatant)
                    .ok_or(CombatError::UnknownCombatant(combatant))?;
                if c.weapon.is_none() {
                    return Err(CombatError::NoWeaponEquipped(combatant));
                }
                if c.is_alive() {
                    c.pending_pull = true;
                    c.set_attacking(true, &mut self.events);
                }
                Ok(())
            }
            CombatCommand::FireReleased { combatant } => {
                let c = self
                    .combatants
                    .get_mut(&combatant)
                    .ok_or(CombatError::UnknownCombatant(combatant))?;
                c.stop_attack(&mut self.events);
                Ok(())
            }
            CombatCommand::SetPose { combatant, pose } => {
                self.combatant_mut(combatant)?.pose = pose;
                Ok(())
            }
            CombatCommand::SetTarget { combatant, target } => {
                if let Some(target) = target {
                    if !self.combatants.contains_key(&target) {
                        return Err(CombatError::UnknownCombatant(target));
                    }
                }
                self.combatant_mut(combatant)?.target = target;
                Ok(())
            }
            CombatCommand::ReportHit {
                target,
                source,
                damage,
                point,
            } => {
                let outcome =
                    systems::damage::apply_hit(&mut self.damage_scope(), target, source, damage, point)?;
                self.finish_if(outcome);
                Ok(())
            }
            CombatCommand::Heal { combatant, amount } => {
                systems::damage::heal(&mut self.combatants, &mut self.events, combatant, amount)
            }
            CombatCommand::Kill { combatant } => {
                let outcome = systems::damage::kill(&mut self.damage_scope(), combatant)?;
                self.finish_if(outcome);
                Ok(())
            }
            CombatCommand::TriggerSpawner { spawner } => {
                let s = self
                    .spawners
                    .get_mut(&spawner)
                    .ok_or_else(|| CombatError::invalid_config(format!("unknown spawner {spawner}")))?;
                systems::spawning::spawn_unit(
                    s,
                    &mut self.combatants,
                    &mut self.next_combatant_id,
                    &mut self.rng,
                    &mut self.events,
                )
                .map(|_| ())
            }
            CombatCommand::Pause => {
                if self.phase == MatchPhase::Active {
                    self.phase = MatchPhase::Paused;
                }
                Ok(())
            }
            CombatCommand::Resume => {
                if self.phase == MatchPhase::Paused {
                    self.phase = MatchPhase::Active;
                }
                Ok(())
            }
        }
    }

    fn combatant_mut(&mut self, id: CombatantId) -> CombatResult<&mut Combatant> {
        self.combatants
            .get_mut(&id)
            .ok_or(CombatError::UnknownCombatant(id))
    }

    fn damage_scope(&mut self) -> DamageScope<'_> {
        DamageScope {
            combatants: &mut self.combatants,
            spawners: &mut self.spawners,
            score: &mut self.score,
            rng: &mut self.rng,
            events: &mut self.events,
            respawn_delay_secs: self.config.player_respawn_delay_secs,
        }
    }

    fn finish_if(&mut self, outcome: Option<MatchOutcome>) {
        let Some(outcome) = outcome else {
            return;
        };
        if matches!(self.phase, MatchPhase::Won | MatchPhase::Lost) {
            return;
        }
        self.phase = match outcome {
            MatchOutcome::Won => MatchPhase::Won,
            MatchOutcome::Lost => MatchPhase::Lost,
        };
        for combatant in self.combatants.values_mut() {
            combatant.stop_attack(&mut self.events);
        }
        self.events.push(CombatEvent::MatchEnded { outcome });
        log::info!(
            "match ended: {:?} (score {}, high score {})",
            outcome,
            self.score.score,
            self.score.high_score
        );
    }
}
