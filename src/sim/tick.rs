//! Simulation tick
//!
//! Advances the world by one (possibly variable) time step. The order of the
//! phases matters: movement, aim, firing, bullets, spawning, enemies,
//! bullet hits, camera.

use glam::Vec2;

use super::camera::Camera;
use super::collision::{in_contact, knockback_offset, resolve_bullet_hits};
use super::spawn::update_spawner;
use super::state::{Bullet, GameEvent, GamePhase, GameState, Player};
use crate::smoothing;
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in screen space, if known
    pub pointer: Option<Vec2>,
    /// Fire button went down since the last tick
    pub fire_pressed: bool,
    /// Fire button is currently down
    pub fire_held: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Raw (unnormalized) movement direction, +Y down
    pub fn move_dir(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }

    /// Drop press events once a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        self.fire_pressed = false;
        self.pause = false;
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // A pause toggle consumes the whole tick
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                log::info!("Resumed");
            }
            GamePhase::GameOver => {}
        }
        return;
    }

    if state.phase != GamePhase::Running {
        return;
    }

    state.events.clear();
    state.time_ticks += 1;
    state.elapsed += dt;

    move_player(&mut state.player, input.move_dir(), &state.tuning, dt);
    update_aim(&mut state.player, &state.camera, input.pointer);
    handle_fire(state, input);
    update_bullets(state, dt);
    update_spawner(state, dt);
    update_enemies(state, dt);
    resolve_bullet_hits(state);

    let focus = state.player.pos;
    state.camera.follow(focus, state.tuning.camera_follow, dt);
}

/// Apply movement input, glide to a stop without it, and keep the player in the world
pub fn move_player(player: &mut Player, dir: Vec2, tuning: &Tuning, dt: f32) {
    if dir != Vec2::ZERO {
        player.vel = dir.normalize() * tuning.player_speed;
    } else {
        player.vel = player
            .vel
            .lerp(Vec2::ZERO, smoothing(tuning.player_damping, dt));
    }

    player.pos += player.vel * dt;

    let min = Vec2::splat(player.radius);
    let max = tuning.world_size() - player.radius;
    player.pos = player.pos.clamp(min, max);
}

/// Point the aim at the pointer projected into the world.
///
/// Keeps the previous aim when there is no pointer or it sits on the player.
pub fn update_aim(player: &mut Player, camera: &Camera, pointer: Option<Vec2>) {
    let Some(screen) = pointer else {
        return;
    };
    if let Some(dir) = (camera.screen_to_world(screen) - player.pos).try_normalize() {
        player.aim = dir;
    }
}

/// One bullet per press; the trigger re-arms only after release
fn handle_fire(state: &mut GameState, input: &TickInput) {
    if input.fire_pressed && state.can_fire {
        state.can_fire = false;
        fire_bullet(state);
    }
    if !input.fire_held {
        state.can_fire = true;
    }
}

/// Launch a bullet from the player's edge along the aim.
///
/// Returns the slot used, or `None` if every bullet slot is busy.
pub fn fire_bullet(state: &mut GameState) -> Option<usize> {
    let player = &state.player;
    let slot = state.bullets.claim(Bullet {
        pos: player.pos + player.aim * player.radius,
        dir: player.aim,
        active: true,
        age: 0.0,
    })?;
    state.events.push(GameEvent::BulletFired { slot });
    Some(slot)
}

/// Move bullets and retire the ones that are too old or out of the world
pub fn update_bullets(state: &mut GameState, dt: f32) {
    let tuning = &state.tuning;
    for (_, bullet) in state.bullets.iter_active_mut() {
        bullet.pos += bullet.dir * tuning.bullet_speed * dt;
        bullet.age += dt;
        if bullet.age > tuning.bullet_ttl || !tuning.in_world(bullet.pos) {
            bullet.active = false;
        }
    }
}

/// Steer enemies toward the player and apply touch damage.
///
/// Damage repeats on every tick an enemy overlaps the player; knockback is
/// what normally breaks the contact.
pub fn update_enemies(state: &mut GameState, dt: f32) {
    let GameState {
        enemies,
        player,
        tuning,
        progress,
        phase,
        events,
        ..
    } = state;
    let steer = smoothing(tuning.enemy_steering, dt);

    for (slot, enemy) in enemies.iter_active_mut() {
        let desired = (player.pos - enemy.pos).normalize_or_zero() * enemy.speed;
        enemy.vel = enemy.vel.lerp(desired, steer);
        enemy.pos += enemy.vel * dt;

        if !in_contact(enemy.pos, player, tuning.contact_radius) {
            continue;
        }

        player.health = (player.health - tuning.touch_damage).max(0.0);
        enemy.pos += knockback_offset(enemy.pos, player.pos, tuning.knockback_distance);
        events.push(GameEvent::PlayerTouched {
            slot,
            health: player.health,
        });

        if player.is_dead() && *phase != GamePhase::GameOver {
            *phase = GamePhase::GameOver;
            log::info!(
                "Game over on wave {} after {} kills",
                progress.wave,
                progress.total_kills
            );
            events.push(GameEvent::GameOver {
                wave: progress.wave,
                total_kills: progress.total_kills,
            });
        }
    }
}
