//! skirmish: run a headless SKIRMISH arena and report the result.
//!
//! Usage:
//!   skirmish [--seed N] [--seconds S] [--tick-rate HZ] [--realtime] [--json]
//!
//! In realtime mode, console lines `pause`, `resume` and `quit` are forwarded
//! to the game loop.

use std::io::BufRead;
use std::process;
use std::sync::{Arc, Mutex};

use skirmish_app::game_loop::spawn_game_loop;
use skirmish_app::state::{GameLoopCommand, LoopConfig};
use skirmish_core::commands::CombatCommand;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| matches!(a.as_str(), "help" | "--help" | "-h")) {
        print_usage();
        return;
    }

    let config = match parse_config(&args) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("{msg}");
            print_usage();
            process::exit(1);
        }
    };
    let json = args.iter().any(|a| a == "--json");

    log::info!(
        "starting skirmish: seed {}, {:.0}s at {} Hz{}",
        config.seed,
        config.seconds,
        config.tick_rate,
        if config.realtime { " (realtime)" } else { "" }
    );

    let realtime = config.realtime;
    let latest = Arc::new(Mutex::new(None));
    let (cmd_tx, handle) = match spawn_game_loop(config, Arc::clone(&latest)) {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("Failed to spawn game loop thread: {err}");
            process::exit(1);
        }
    };

    if realtime {
        let console_tx = cmd_tx.clone();
        let _ = std::thread::Builder::new()
            .name("skirmish-console".into())
            .spawn(move || {
                for line in std::io::stdin().lock().lines().map_while(Result::ok) {
                    let cmd = match line.trim() {
                        "pause" => GameLoopCommand::Combat(CombatCommand::Pause),
                        "resume" => GameLoopCommand::Combat(CombatCommand::Resume),
                        "quit" => GameLoopCommand::Shutdown,
                        _ => continue,
                    };
                    if console_tx.send(cmd).is_err() {
                        break;
                    }
                }
            });
    }

    let summary = match handle.join() {
        Ok(Ok(summary)) => summary,
        Ok(Err(err)) => {
            eprintln!("Skirmish failed: {err}");
            process::exit(1);
        }
        Err(_) => {
            eprintln!("Game loop thread panicked");
            process::exit(1);
        }
    };
    drop(cmd_tx);

    log::info!(
        "{:?} after {:.1}s: score {} ({} kills), {} lives left, {}/{} shots hit",
        summary.phase,
        summary.elapsed_secs,
        summary.score.score,
        summary.score.kills,
        summary.score.lives_left,
        summary.hits,
        summary.shots_resolved
    );

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("Failed to serialize summary: {err}");
                process::exit(1);
            }
        }
    }
}

fn print_usage() {
    eprintln!(
        "skirmish: headless SKIRMISH arena\n\
         \n\
         Options:\n\
         \n\
           --seed <N>         RNG seed (default: 42)\n\
           --seconds <S>      Simulated seconds to run (default: 60)\n\
           --tick-rate <HZ>   Ticks per second (default: 60)\n\
           --realtime         Pace ticks against the wall clock\n\
           --json             Print the run summary as JSON\n\
         \n\
         Examples:\n\
         \n\
           skirmish --seed 7 --seconds 120\n\
           RUST_LOG=debug skirmish --realtime\n"
    );
}

fn parse_config(args: &[String]) -> Result<LoopConfig, String> {
    let mut config = LoopConfig::default();
    if let Some(seed) = parse_value::<u64>(args, "--seed")? {
        config.seed = seed;
    }
    if let Some(seconds) = parse_value::<f64>(args, "--seconds")? {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(format!("--seconds must be >= 0, got {seconds}"));
        }
        config.seconds = seconds;
    }
    if let Some(rate) = parse_value::<u32>(args, "--tick-rate")? {
        if rate == 0 {
            return Err("--tick-rate must be at least 1".to_string());
        }
        config.tick_rate = rate;
    }
    config.realtime = args.iter().any(|a| a == "--realtime");
    Ok(config)
}

fn parse_value<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>, String> {
    for i in 0..args.len() {
        if args[i] == flag {
            let raw = args
                .get(i + 1)
                .ok_or_else(|| format!("{flag} needs a value"))?;
            return raw
                .parse()
                .map(Some)
                .map_err(|_| format!("Invalid value for {flag}: {raw}"));
        }
    }
    Ok(None)
}
