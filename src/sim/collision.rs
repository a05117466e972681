//! Collision detection and response
//!
//! Everything here is circle-vs-circle. Trees are decoration and never take
//! part in collision.

use glam::Vec2;

use super::state::{GameEvent, GameState, Player};

/// Whether an enemy at `enemy_pos` is touching the player
#[inline]
pub fn in_contact(enemy_pos: Vec2, player: &Player, contact_radius: f32) -> bool {
    enemy_pos.distance(player.pos) < player.radius + contact_radius
}

/// Displacement pushing an enemy away from the player along their axis.
///
/// Zero when the two positions coincide.
#[inline]
pub fn knockback_offset(enemy_pos: Vec2, player_pos: Vec2, distance: f32) -> Vec2 {
    (enemy_pos - player_pos).normalize_or_zero() * distance
}

/// Resolve bullets against enemies.
///
/// Each active bullet kills at most one enemy: the first active one in slot
/// order within the hit radius, not the nearest. Kills count toward the
/// wave quota and advance the wave when it is met. Returns the number of
/// kills this call.
pub fn resolve_bullet_hits(state: &mut GameState) -> u32 {
    let GameState {
        bullets,
        enemies,
        progress,
        tuning,
        events,
        ..
    } = state;
    let hit_radius = tuning.bullet_hit_radius;
    let mut kills = 0;

    for (_, bullet) in bullets.iter_active_mut() {
        let Some((slot, enemy)) = enemies
            .iter_active_mut()
            .find(|(_, enemy)| enemy.pos.distance(bullet.pos) < hit_radius)
        else {
            continue;
        };

        enemy.active = false;
        bullet.active = false;
        kills += 1;
        progress.kills += 1;
        progress.total_kills += 1;
        log::debug!("Enemy in slot {slot} killed ({}/{})", progress.kills, progress.quota);
        events.push(GameEvent::EnemyKilled { slot });

        if progress.quota_met() {
            progress.advance(tuning);
            log::info!("Wave {} begins, quota {}", progress.wave, progress.quota);
            events.push(GameEvent::WaveAdvanced {
                wave: progress.wave,
                quota: progress.quota,
            });
        }
    }

    kills
}
