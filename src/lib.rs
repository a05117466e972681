//! Survival Waves - A top-down wave survival arcade game
//!
//! Core modules:
//! - `sim`: Simulation core (movement, steering, collisions, waves)
//! - `renderer`: Presentation of a finished tick (terminal backend)
//! - `platform`: Input sources and frame timing
//! - `settings`: Runtime configuration loaded from JSON
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, SettingsError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz) when fixed stepping is enabled
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 3000.0;
    pub const WORLD_HEIGHT: f32 = 3000.0;

    /// Reference screen size used by the default camera viewport
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_RADIUS: f32 = 18.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    /// Velocity decay rate when no movement key is held (per second)
    pub const PLAYER_DAMPING: f32 = 12.0;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 700.0;
    pub const BULLET_TTL: f32 = 2.0;
    pub const BULLET_HIT_RADIUS: f32 = 16.0;
    pub const MAX_BULLETS: usize = 200;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 70.0;
    pub const ENEMY_RADIUS: f32 = 16.0;
    /// Steering rate toward the player (per second)
    pub const ENEMY_STEERING: f32 = 3.0;
    pub const ENEMY_SPAWN_RADIUS: f32 = 900.0;
    pub const ENEMY_SPAWN_JITTER: f32 = 300.0;
    pub const MAX_ENEMIES: usize = 50;

    /// Contact damage
    pub const CONTACT_RADIUS: f32 = 16.0;
    pub const TOUCH_DAMAGE: f32 = 20.0;
    pub const KNOCKBACK_DISTANCE: f32 = 200.0;

    /// Waves
    pub const SPAWN_DELAY: f32 = 0.7;
    pub const WAVE_BASE_QUOTA: u32 = 12;

    /// Decoration
    pub const MAX_TREES: usize = 150;
    pub const TREE_MIN_RADIUS: f32 = 25.0;
    pub const TREE_RADIUS_JITTER: f32 = 30.0;

    /// Camera follow rate (per second)
    pub const CAMERA_FOLLOW: f32 = 8.0;
}

/// Interpolation factor for exponential smoothing at `rate` per second.
///
/// Clamped to 1.0 so a long frame snaps to the target instead of overshooting.
#[inline]
pub fn smoothing(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_scales_with_dt() {
        assert!((smoothing(12.0, 0.01) - 0.12).abs() < 1e-6);
        assert_eq!(smoothing(8.0, 0.0), 0.0);
    }

    #[test]
    fn smoothing_never_overshoots() {
        assert_eq!(smoothing(12.0, 0.5), 1.0);
    }
}
