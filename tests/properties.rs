//! Invariants checked over generated input streams

use glam::Vec2;
use proptest::prelude::*;

use survival_waves::Tuning;
use survival_waves::sim::{GameState, TickInput, WaveProgress, fire_bullet, spawn_enemy, tick};

fn arb_input() -> impl Strategy<Value = TickInput> {
    (
        any::<[bool; 4]>(),
        proptest::option::of((0.0f32..1200.0, 0.0f32..800.0)),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|([up, down, left, right], pointer, fire_pressed, fire_held)| TickInput {
            up,
            down,
            left,
            right,
            pointer: pointer.map(|(x, y)| Vec2::new(x, y)),
            fire_pressed,
            fire_held: fire_held || fire_pressed,
            pause: false,
        })
}

fn arb_dt() -> impl Strategy<Value = f32> {
    0.001f32..0.1
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn player_stays_inside_world(
        seed in any::<u64>(),
        frames in proptest::collection::vec((arb_input(), arb_dt()), 1..200),
    ) {
        let mut state = GameState::new(seed);
        let (min, max) = (
            Vec2::splat(state.player.radius),
            state.tuning.world_size() - state.player.radius,
        );
        for (input, dt) in &frames {
            tick(&mut state, input, *dt);
            let pos = state.player.pos;
            prop_assert!(pos.cmpge(min).all() && pos.cmple(max).all(), "player at {pos}");
        }
    }

    #[test]
    fn bullets_age_out_or_leave(
        seed in any::<u64>(),
        frames in proptest::collection::vec((arb_input(), arb_dt()), 1..200),
    ) {
        let mut state = GameState::new(seed);
        let mut ages = vec![0.0f32; state.bullets.capacity()];
        for (input, dt) in &frames {
            tick(&mut state, input, *dt);
            for (slot, bullet) in state.bullets.iter_active() {
                prop_assert!(bullet.age <= state.tuning.bullet_ttl);
                prop_assert!(state.tuning.in_world(bullet.pos));
                // A slot's age only drops when it was re-used for a new shot
                prop_assert!(bullet.age >= ages[slot] || bullet.age <= *dt);
                ages[slot] = bullet.age;
            }
        }
    }

    #[test]
    fn spawns_land_in_the_ring(
        seed in any::<u64>(),
        x in 0.0f32..3000.0,
        y in 0.0f32..3000.0,
    ) {
        let mut state = GameState::new(seed);
        state.player.pos = Vec2::new(x, y);
        let slot = spawn_enemy(&mut state).unwrap();
        let distance = state.enemies.get(slot).unwrap().pos.distance(state.player.pos);
        let tuning = &state.tuning;
        prop_assert!(distance >= tuning.enemy_spawn_radius - 0.01);
        prop_assert!(distance <= tuning.enemy_spawn_radius + tuning.enemy_spawn_jitter + 0.01);
    }

    #[test]
    fn quota_is_base_times_wave(waves in 1u32..60) {
        let tuning = Tuning::default();
        let mut progress = WaveProgress::new(&tuning);
        for _ in 1..waves {
            progress.kills = progress.quota;
            progress.advance(&tuning);
            prop_assert_eq!(progress.kills, 0);
        }
        prop_assert_eq!(progress.wave, waves);
        prop_assert_eq!(progress.quota, 12 * waves);
    }

    #[test]
    fn double_pause_is_a_no_op(
        seed in any::<u64>(),
        frames in proptest::collection::vec((arb_input(), arb_dt()), 0..120),
    ) {
        let mut state = GameState::new(seed);
        for (input, dt) in &frames {
            tick(&mut state, input, *dt);
        }
        let before = state.clone();
        let toggle = TickInput { pause: true, ..Default::default() };
        tick(&mut state, &toggle, 0.016);
        tick(&mut state, &toggle, 0.016);
        prop_assert_eq!(state, before);
    }

    #[test]
    fn full_bullet_pool_drops_shots(seed in any::<u64>()) {
        let mut state = GameState::new(seed);
        for _ in 0..state.bullets.capacity() {
            prop_assert!(fire_bullet(&mut state).is_some());
        }
        prop_assert_eq!(fire_bullet(&mut state), None);
        prop_assert_eq!(state.bullets.active_count(), state.bullets.capacity());
    }
}
