//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - Elapsed time is the only clock
//! - Seeded RNG only
//! - Stable iteration order (by slot index)

pub mod camera;
pub mod collision;
pub mod slots;
pub mod spawn;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{in_contact, knockback_offset, resolve_bullet_hits};
pub use slots::{Slot, Slots};
pub use spawn::{spawn_enemy, spawn_point, update_spawner};
pub use state::{
    Bullet, Enemy, GameEvent, GamePhase, GameState, Player, Rgb, Tree, WaveProgress,
};
pub use tick::{TickInput, fire_bullet, tick};
