//! Headless simulation harness CLI.
//! Usage: cargo run --bin sim_harness -- --seed 7 --seconds 60 [--fixed]
//!
//! Plays a run with a simple autopilot (kite away from close enemies, shoot
//! the nearest one) and prints a JSON summary.

use std::env;

use glam::Vec2;
use serde::Serialize;

use survival_waves::Settings;
use survival_waves::consts::SIM_DT;
use survival_waves::platform::{self, InputSource, Key, ScriptedInput};
use survival_waves::sim::{GamePhase, GameState, tick};

/// Enemies closer than this make the autopilot back off
const KITE_DISTANCE: f32 = 220.0;
/// Variable-step frame length
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    elapsed: f32,
    wave: u32,
    total_kills: u32,
    health: f32,
    phase: GamePhase,
    active_enemies: usize,
    active_bullets: usize,
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .skip_while(|a| a.as_str() != flag)
        .nth(1)
        .map(String::as_str)
}

fn nearest_enemy(state: &GameState) -> Option<Vec2> {
    let player = state.player.pos;
    state
        .enemies
        .iter_active()
        .map(|(_, enemy)| enemy.pos)
        .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)))
}

/// Set the scripted keys for the next frame
fn steer(input: &mut ScriptedInput, state: &GameState, frame: u64) {
    for key in [Key::Up, Key::Down, Key::Left, Key::Right] {
        input.release(key);
    }

    let Some(target) = nearest_enemy(state) else {
        input.release(Key::Fire);
        return;
    };
    input.set_pointer(Some(state.camera.world_to_screen(target)));

    let away = state.player.pos - target;
    if away.length() < KITE_DISTANCE {
        if away.x < 0.0 {
            input.press(Key::Left);
        } else {
            input.press(Key::Right);
        }
        if away.y < 0.0 {
            input.press(Key::Up);
        } else {
            input.press(Key::Down);
        }
    }

    // Tap fire every other frame so each tap re-arms the trigger
    if frame % 2 == 0 {
        input.press(Key::Fire);
    } else {
        input.release(Key::Fire);
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let seed = match arg_value(&args, "--seed").map(str::parse::<u64>) {
        Some(Ok(seed)) => seed,
        Some(Err(_)) => {
            eprintln!("usage: sim_harness [--seed <u64>] [--seconds <f32>] [--fixed]");
            std::process::exit(2);
        }
        None => 1,
    };
    let seconds = match arg_value(&args, "--seconds").map(str::parse::<f32>) {
        Some(Ok(seconds)) if seconds > 0.0 => seconds,
        Some(_) => {
            eprintln!("usage: sim_harness [--seed <u64>] [--seconds <f32>] [--fixed]");
            std::process::exit(2);
        }
        None => 60.0,
    };
    let dt = if args.iter().any(|a| a == "--fixed") {
        SIM_DT
    } else {
        FRAME_DT
    };

    env_logger::init();
    println!("[sim] seed {seed}, {seconds}s at dt {dt:.5}");

    let settings = Settings::load();
    let mut state = GameState::with_tuning(seed, settings.tuning);
    let mut input = ScriptedInput::new();
    let frames = (seconds / dt).ceil() as u64;

    for frame in 0..frames {
        if state.is_game_over() {
            break;
        }
        // pump() only fails for real devices
        let _ = input.pump();
        let tick_input = platform::sample(&input);
        tick(&mut state, &tick_input, dt);
        steer(&mut input, &state, frame);
    }

    let summary = RunSummary {
        seed,
        ticks: state.time_ticks,
        elapsed: state.elapsed,
        wave: state.progress.wave,
        total_kills: state.progress.total_kills,
        health: state.player.health,
        phase: state.phase,
        active_enemies: state.enemies.active_count(),
        active_bullets: state.bullets.active_count(),
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("[sim] failed to encode summary: {e}"),
    }
}
