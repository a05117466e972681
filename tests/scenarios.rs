//! End-to-end scenarios driven through the scripted input source

use glam::Vec2;

use survival_waves::platform::{self, InputSource, Key, ScriptedInput};
use survival_waves::sim::{Bullet, Enemy, GameEvent, GamePhase, GameState, tick};

const DT: f32 = 1.0 / 60.0;

/// Pump the scripted device and run one tick with what it reports
fn step(state: &mut GameState, input: &mut ScriptedInput, dt: f32) {
    input.pump().unwrap();
    tick(state, &platform::sample(input), dt);
}

fn enemy_at(pos: Vec2) -> Enemy {
    Enemy {
        pos,
        speed: 70.0,
        active: true,
        ..Default::default()
    }
}

#[test]
fn enemy_east_of_player_closes_in() {
    let mut state = GameState::new(11);
    let mut input = ScriptedInput::new();
    let player_x = state.player.pos.x;
    let slot = state
        .enemies
        .claim(enemy_at(state.player.pos + Vec2::new(400.0, 0.0)))
        .unwrap();

    let mut last_x = state.enemies.get(slot).unwrap().pos.x;
    for _ in 0..120 {
        step(&mut state, &mut input, DT);
        let x = state.enemies.get(slot).unwrap().pos.x;
        assert!(x < last_x);
        assert!(x > player_x);
        last_x = x;
    }
    assert!(last_x < player_x + 400.0 - 60.0);
}

#[test]
fn holding_fire_for_ten_ticks_shoots_once() {
    let mut state = GameState::new(5);
    let mut input = ScriptedInput::new();

    input.press(Key::Fire);
    for _ in 0..10 {
        step(&mut state, &mut input, DT);
    }
    assert_eq!(state.bullets.active_count(), 1);

    input.release(Key::Fire);
    step(&mut state, &mut input, DT);
    input.press(Key::Fire);
    step(&mut state, &mut input, DT);
    assert_eq!(state.bullets.active_count(), 2);
}

#[test]
fn contact_damage_runs_out_into_game_over() {
    let mut state = GameState::new(9);
    let mut input = ScriptedInput::new();
    assert_eq!(state.player.health, 100.0);

    let near = state.player.pos + Vec2::new(1.0, 0.0);
    state.enemies.claim(enemy_at(near));
    step(&mut state, &mut input, DT);
    assert_eq!(state.player.health, 80.0);
    assert!(state.is_running());

    for _ in 0..4 {
        state.enemies.claim(enemy_at(state.player.pos + Vec2::new(1.0, 0.0)));
    }
    step(&mut state, &mut input, DT);
    assert_eq!(state.player.health, 0.0);
    assert_eq!(state.phase, GamePhase::GameOver);
    let game_overs = state
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);

    // Nothing moves or spawns afterwards, even with input
    let frozen = state.clone();
    input.press(Key::Fire);
    input.press(Key::Right);
    for _ in 0..120 {
        step(&mut state, &mut input, DT);
    }
    assert_eq!(state, frozen);
}

#[test]
fn clearing_a_wave_raises_the_quota() {
    let mut state = GameState::new(21);
    let mut input = ScriptedInput::new();
    let far = state.player.pos + Vec2::new(600.0, 0.0);

    for kill in 1..=12 {
        state.enemies.claim(enemy_at(far));
        state.bullets.claim(Bullet {
            pos: far,
            dir: Vec2::X,
            active: true,
            age: 0.0,
        });
        step(&mut state, &mut input, 1.0 / 120.0);
        if kill < 12 {
            assert_eq!(state.progress.kills, kill);
        }
    }

    assert_eq!(state.progress.wave, 2);
    assert_eq!(state.progress.quota, 24);
    assert_eq!(state.progress.kills, 0);
    assert_eq!(state.progress.total_kills, 12);
    assert!(state.events.contains(&GameEvent::WaveAdvanced { wave: 2, quota: 24 }));
}

#[test]
fn pausing_freezes_the_world() {
    let mut state = GameState::new(3);
    let mut input = ScriptedInput::new();
    input.press(Key::Right);
    for _ in 0..30 {
        step(&mut state, &mut input, DT);
    }
    input.release(Key::Right);

    input.press(Key::Pause);
    step(&mut state, &mut input, DT);
    input.release(Key::Pause);
    assert!(state.is_paused());

    let frozen = state.clone();
    input.press(Key::Left);
    for _ in 0..60 {
        step(&mut state, &mut input, DT);
    }
    assert_eq!(state, frozen);

    input.release(Key::Left);
    input.press(Key::Pause);
    step(&mut state, &mut input, DT);
    assert!(state.is_running());
}

#[test]
fn enemies_spawn_off_screen_over_time() {
    let mut state = GameState::new(17);
    let mut input = ScriptedInput::new();
    for _ in 0..(60 * 3) {
        step(&mut state, &mut input, DT);
    }
    // 0.7 s spawn delay over three seconds
    assert_eq!(state.enemies.active_count(), 4);
}

#[test]
fn same_seed_and_script_replays_exactly() {
    fn run(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        let mut input = ScriptedInput::new();
        input.set_pointer(Some(Vec2::new(900.0, 200.0)));
        for frame in 0..600u32 {
            match frame % 40 {
                0 => input.press(Key::Fire),
                5 => input.release(Key::Fire),
                10 => input.press(Key::Up),
                25 => input.release(Key::Up),
                _ => {}
            }
            step(&mut state, &mut input, DT);
        }
        state
    }

    assert_eq!(run(99), run(99));
    assert_ne!(run(99).enemies, run(100).enemies);
}
