//! Enemy spawning
//!
//! Enemies appear on a ring around the player, outside the visible area,
//! one every `spawn_delay` seconds while the wave quota is still open.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GameState, Rgb};
use crate::tuning::Tuning;

/// Pick a spawn position at a random angle and distance around `center`.
///
/// The distance lies in `[spawn_radius, spawn_radius + spawn_jitter)`.
pub fn spawn_point(rng: &mut impl Rng, center: Vec2, tuning: &Tuning) -> Vec2 {
    let angle = rng.random_range(0.0..TAU);
    let jitter = if tuning.enemy_spawn_jitter > 0.0 {
        rng.random_range(0.0..tuning.enemy_spawn_jitter)
    } else {
        0.0
    };
    center + Vec2::from_angle(angle) * (tuning.enemy_spawn_radius + jitter)
}

/// Random red-ish body colour
pub fn enemy_color(rng: &mut impl Rng) -> Rgb {
    Rgb(180 + rng.random_range(0..70), 60 + rng.random_range(0..40), 60)
}

/// Advance the spawn timer and spawn when it is due.
///
/// Returns the slot of the new enemy, if one was spawned.
pub fn update_spawner(state: &mut GameState, dt: f32) -> Option<usize> {
    let progress = &mut state.progress;
    progress.spawn_timer += dt;
    if progress.spawn_timer < state.tuning.spawn_delay || progress.quota_met() {
        return None;
    }
    progress.spawn_timer = 0.0;
    spawn_enemy(state)
}

/// Activate one enemy in the first free slot, aimed at the player.
///
/// Dropped silently when every slot is taken.
pub fn spawn_enemy(state: &mut GameState) -> Option<usize> {
    state.enemies.first_free()?;

    let target = state.player.pos;
    let pos = spawn_point(&mut state.rng, target, &state.tuning);
    let color = enemy_color(&mut state.rng);
    let speed = state.tuning.enemy_speed;

    let slot = state.enemies.claim(Enemy {
        pos,
        vel: (target - pos).normalize_or_zero() * speed,
        speed,
        active: true,
        color,
    })?;

    log::debug!("Enemy spawned in slot {slot} at ({:.0}, {:.0})", pos.x, pos.y);
    state.events.push(GameEvent::EnemySpawned { slot, pos });
    Some(slot)
}
