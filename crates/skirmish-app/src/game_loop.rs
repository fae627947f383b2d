//! Game loop: steps the combat engine at a fixed tick rate.
//!
//! The engine is created inside the loop's thread; its bus listeners are not
//! `Send`. Commands arrive via an `mpsc`
//! channel; the latest snapshot is stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skirmish_core::constants::{DEFAULT_ATTACK_ANGLE_DEG, DEFAULT_EFFECTIVE_RANGE};
use skirmish_core::enums::MatchPhase;
use skirmish_core::error::CombatResult;
use skirmish_core::events::CombatEvent;
use skirmish_core::state::CombatSnapshot;
use skirmish_sim::bus::{KindFilter, ListenerResult};
use skirmish_sim::{CombatEngine, EngineConfig};
use skirmish_targeting::evaluator::TargetingEnvelope;

use crate::hitscan::HitscanResolver;
use crate::pilot::Autopilot;
use crate::scenario;
use crate::state::{GameLoopCommand, LoopConfig, RunSummary};

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the run summary.
pub fn spawn_game_loop(
    config: LoopConfig,
    latest_snapshot: Arc<Mutex<Option<CombatSnapshot>>>,
) -> io::Result<(
    mpsc::Sender<GameLoopCommand>,
    JoinHandle<CombatResult<RunSummary>>,
)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skirmish-game-loop".into())
        .spawn(move || run_game_loop(&config, &cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the configured time is up, the match ends, or a
/// Shutdown command / channel disconnect.
pub fn run_game_loop(
    config: &LoopConfig,
    cmd_rx: &mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<CombatSnapshot>>,
) -> CombatResult<RunSummary> {
    let mut engine = CombatEngine::new(EngineConfig {
        seed: config.seed,
        ..EngineConfig::default()
    });
    let player = scenario::setup_arena(&mut engine)?;
    let hitscan = HitscanResolver::attach(&mut engine);
    engine
        .bus_mut()
        .subscribe("log", KindFilter::All, log_event);

    let envelope = engine
        .combatant(player)
        .and_then(|c| c.envelope())
        .unwrap_or(TargetingEnvelope {
            attack_angle_deg: DEFAULT_ATTACK_ANGLE_DEG,
            effective_range: DEFAULT_EFFECTIVE_RANGE,
        });
    let mut pilot = Autopilot::new(player, envelope);

    let dt = config.dt();
    let tick_duration = Duration::from_secs_f64(dt);
    let mut next_tick_time = Instant::now();
    let mut summary = RunSummary {
        ticks: 0,
        elapsed_secs: 0.0,
        phase: engine.phase(),
        score: engine.score().view(),
        shots_resolved: 0,
        hits: 0,
        listener_failures: 0,
    };

    for _ in 0..config.total_ticks() {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Combat(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    return Ok(finish(summary, &engine));
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick(dt);
        summary.ticks += 1;
        summary.listener_failures += engine.last_delivery().failures.len() as u32;

        // 3. Resolve this tick's shots and plan the player's next move
        let (hits, resolved) = hitscan.resolve(&snapshot);
        summary.shots_resolved += resolved;
        summary.hits += hits.len() as u32;
        engine.queue_commands(hits);
        engine.queue_commands(pilot.plan(&snapshot));

        let finished = matches!(snapshot.phase, MatchPhase::Won | MatchPhase::Lost);

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }
        if finished {
            break;
        }

        // 5. Sleep until next tick
        if config.realtime {
            next_tick_time += tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > tick_duration * 2 {
                // Too far behind, reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }
    }

    Ok(finish(summary, &engine))
}

fn finish(mut summary: RunSummary, engine: &CombatEngine) -> RunSummary {
    summary.elapsed_secs = engine.time().elapsed_secs;
    summary.phase = engine.phase();
    summary.score = engine.score().view();
    summary
}

fn log_event(event: &CombatEvent) -> ListenerResult {
    match event {
        CombatEvent::Died {
            combatant,
            killer,
            point_value,
        } => log::info!("{combatant} died (killer {killer:?}, worth {point_value})"),
        CombatEvent::LootDropped { item, position, .. } => {
            log::info!("loot: {item} at ({:.1}, {:.1}, {:.1})", position.x, position.y, position.z)
        }
        CombatEvent::ScoreChanged { score, high_score } => {
            log::info!("score {score} (high {high_score})")
        }
        CombatEvent::MatchEnded { outcome } => log::info!("match over: {outcome:?}"),
        CombatEvent::SpawnRequested {
            combatant, template, ..
        } => log::debug!("{template} {combatant} entered the arena"),
        other => log::trace!("{other:?}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::commands::CombatCommand;

    fn short_run(seed: u64) -> RunSummary {
        let (_tx, rx) = mpsc::channel::<GameLoopCommand>();
        let latest = Mutex::new(None);
        let config = LoopConfig {
            seed,
            seconds: 20.0,
            ..LoopConfig::default()
        };
        run_game_loop(&config, &rx, &latest).unwrap()
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Combat(CombatCommand::Pause)).unwrap();
        tx.send(GameLoopCommand::Combat(CombatCommand::Resume)).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Combat(CombatCommand::Pause)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_shutdown_stops_loop_immediately() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::Shutdown).unwrap();
        let latest = Mutex::new(None);
        let summary = run_game_loop(&LoopConfig::default(), &rx, &latest).unwrap();
        assert_eq!(summary.ticks, 0);
        assert!(latest.lock().unwrap().is_none());
    }

    #[test]
    fn test_headless_run_produces_combat() {
        let summary = short_run(7);
        assert!(summary.ticks > 0);
        assert!(summary.shots_resolved > 0, "somebody should have fired");
        assert_eq!(summary.listener_failures, 0);
    }

    #[test]
    fn test_headless_run_is_deterministic() {
        let a = serde_json::to_string(&short_run(99)).unwrap();
        let b = serde_json::to_string(&short_run(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_spawned_thread_returns_summary() {
        let latest = Arc::new(Mutex::new(None));
        let config = LoopConfig {
            seconds: 1.0,
            ..LoopConfig::default()
        };
        let (_tx, handle) = spawn_game_loop(config, Arc::clone(&latest)).unwrap();
        let summary = handle.join().unwrap().unwrap();
        assert_eq!(summary.ticks, 60);
        assert!(latest.lock().unwrap().is_some());
    }
}
