//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a settings
//! file can rebalance a run without touching code. Defaults mirror
//! [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world_width: f32,
    pub world_height: f32,

    pub player_speed: f32,
    pub player_radius: f32,
    pub player_max_health: f32,
    pub player_damping: f32,

    pub bullet_speed: f32,
    /// Seconds a bullet stays alive
    pub bullet_ttl: f32,
    pub bullet_hit_radius: f32,
    pub max_bullets: usize,

    pub enemy_speed: f32,
    pub enemy_steering: f32,
    pub enemy_spawn_radius: f32,
    pub enemy_spawn_jitter: f32,
    pub max_enemies: usize,

    /// Added to the player radius to get the touch distance
    pub contact_radius: f32,
    pub touch_damage: f32,
    pub knockback_distance: f32,

    pub spawn_delay: f32,
    /// Kills needed per wave, multiplied by the wave number
    pub wave_base_quota: u32,

    pub tree_count: usize,
    pub camera_follow: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,

            player_speed: PLAYER_SPEED,
            player_radius: PLAYER_RADIUS,
            player_max_health: PLAYER_MAX_HEALTH,
            player_damping: PLAYER_DAMPING,

            bullet_speed: BULLET_SPEED,
            bullet_ttl: BULLET_TTL,
            bullet_hit_radius: BULLET_HIT_RADIUS,
            max_bullets: MAX_BULLETS,

            enemy_speed: ENEMY_SPEED,
            enemy_steering: ENEMY_STEERING,
            enemy_spawn_radius: ENEMY_SPAWN_RADIUS,
            enemy_spawn_jitter: ENEMY_SPAWN_JITTER,
            max_enemies: MAX_ENEMIES,

            contact_radius: CONTACT_RADIUS,
            touch_damage: TOUCH_DAMAGE,
            knockback_distance: KNOCKBACK_DISTANCE,

            spawn_delay: SPAWN_DELAY,
            wave_base_quota: WAVE_BASE_QUOTA,

            tree_count: MAX_TREES,
            camera_follow: CAMERA_FOLLOW,
        }
    }
}

impl Tuning {
    /// World extent as a vector
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.world_width, self.world_height)
    }

    /// Kill quota for a given wave (1-based)
    pub fn quota_for_wave(&self, wave: u32) -> u32 {
        self.wave_base_quota * wave
    }

    /// Whether a point lies inside the world rectangle (edges inclusive)
    pub fn in_world(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.world_width && pos.y >= 0.0 && pos.y <= self.world_height
    }

    /// Check the values make a playable world. Returns the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let positive = |value: f32| value.is_finite() && value > 0.0;
        if !positive(self.world_width) || !positive(self.world_height) {
            return Err(format!(
                "world size must be positive, got {}x{}",
                self.world_width, self.world_height
            ));
        }
        if !positive(self.player_radius) {
            return Err(format!("player_radius must be positive, got {}", self.player_radius));
        }
        let radii = [
            ("contact_radius", self.contact_radius),
            ("bullet_hit_radius", self.bullet_hit_radius),
            ("enemy_spawn_radius", self.enemy_spawn_radius),
            ("enemy_spawn_jitter", self.enemy_spawn_jitter),
        ];
        for (name, value) in radii {
            if value < 0.0 || !value.is_finite() {
                return Err(format!("{name} must be a finite non-negative number, got {value}"));
            }
        }
        if self.world_width <= 2.0 * self.player_radius
            || self.world_height <= 2.0 * self.player_radius
        {
            return Err(format!(
                "world {}x{} is too small for player radius {}",
                self.world_width, self.world_height, self.player_radius
            ));
        }
        if self.max_bullets == 0 || self.max_enemies == 0 {
            return Err("bullet and enemy capacity must be at least 1".into());
        }
        if self.bullet_ttl <= 0.0 {
            return Err(format!("bullet_ttl must be positive, got {}", self.bullet_ttl));
        }
        if self.spawn_delay < 0.0 {
            return Err(format!("spawn_delay must not be negative, got {}", self.spawn_delay));
        }
        if self.wave_base_quota == 0 {
            return Err("wave_base_quota must be at least 1".into());
        }
        if self.player_max_health <= 0.0 {
            return Err("player_max_health must be positive".into());
        }
        let speeds = [
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("enemy_speed", self.enemy_speed),
        ];
        for (name, value) in speeds {
            if value < 0.0 || !value.is_finite() {
                return Err(format!("{name} must be a finite non-negative number, got {value}"));
            }
        }
        Ok(())
    }
}
