//! Types shared between `main` and the game loop thread.

use serde::{Deserialize, Serialize};

use skirmish_core::commands::CombatCommand;
use skirmish_core::constants::TICK_RATE;
use skirmish_core::enums::MatchPhase;
use skirmish_core::state::ScoreView;

/// Commands sent from the console to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A command to forward to the combat engine.
    Combat(CombatCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// How to run a skirmish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopConfig {
    pub seed: u64,
    /// Simulated seconds to run before stopping.
    pub seconds: f64,
    pub tick_rate: u32,
    /// Pace ticks against the wall clock instead of running flat out.
    pub realtime: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            seconds: 60.0,
            tick_rate: TICK_RATE,
            realtime: false,
        }
    }
}

impl LoopConfig {
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate.max(1) as f64
    }

    pub fn total_ticks(&self) -> u64 {
        (self.seconds.max(0.0) * self.tick_rate.max(1) as f64).round() as u64
    }
}

/// What happened during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub phase: MatchPhase,
    pub score: ScoreView,
    /// Projectiles the hitscan resolver processed.
    pub shots_resolved: u32,
    /// Of those, how many struck somebody.
    pub hits: u32,
    /// Listener failures seen on the bus.
    pub listener_failures: u32,
}
