//! Rendering module
//!
//! Renderers only read a [`FrameView`] of the finished tick; nothing flows
//! back into the simulation.

pub mod canvas;
pub mod terminal;

use std::io;

use glam::Vec2;

use crate::sim::{Bullet, Camera, Enemy, GameState, Player, Slots, Tree};

pub use canvas::Canvas;
pub use terminal::TerminalRenderer;

/// Health bar colour band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthLevel {
    Healthy,
    Wounded,
    Critical,
}

impl HealthLevel {
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio > 0.4 {
            HealthLevel::Healthy
        } else if ratio > 0.15 {
            HealthLevel::Wounded
        } else {
            HealthLevel::Critical
        }
    }
}

/// Everything a renderer may look at for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub player: &'a Player,
    pub enemies: &'a Slots<Enemy>,
    pub bullets: &'a Slots<Bullet>,
    pub trees: &'a [Tree],
    pub camera: &'a Camera,
    pub world_size: Vec2,
    pub wave: u32,
    pub kills: u32,
    pub quota: u32,
    pub total_kills: u32,
    pub health_ratio: f32,
    pub paused: bool,
    pub game_over: bool,
    pub fps: Option<u32>,
}

impl<'a> FrameView<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            player: &state.player,
            enemies: &state.enemies,
            bullets: &state.bullets,
            trees: &state.trees,
            camera: &state.camera,
            world_size: state.tuning.world_size(),
            wave: state.progress.wave,
            kills: state.progress.kills,
            quota: state.progress.quota,
            total_kills: state.progress.total_kills,
            health_ratio: state.player.health_ratio(),
            paused: state.is_paused(),
            game_over: state.is_game_over(),
            fps: None,
        }
    }

    pub fn with_fps(self, fps: Option<u32>) -> Self {
        Self { fps, ..self }
    }

    pub fn health_level(&self) -> HealthLevel {
        HealthLevel::from_ratio(self.health_ratio)
    }
}

/// Something that can present a frame
pub trait Renderer {
    fn draw(&mut self, frame: &FrameView<'_>) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn health_bands() {
        assert_eq!(HealthLevel::from_ratio(1.0), HealthLevel::Healthy);
        assert_eq!(HealthLevel::from_ratio(0.4), HealthLevel::Wounded);
        assert_eq!(HealthLevel::from_ratio(0.2), HealthLevel::Wounded);
        assert_eq!(HealthLevel::from_ratio(0.15), HealthLevel::Critical);
        assert_eq!(HealthLevel::from_ratio(0.0), HealthLevel::Critical);
    }

    #[test]
    fn view_reflects_state() {
        let mut state = GameState::new(3);
        state.player.health = 60.0;
        state.phase = GamePhase::Paused;

        let view = FrameView::new(&state).with_fps(Some(60));
        assert_eq!(view.wave, 1);
        assert_eq!(view.quota, 12);
        assert!((view.health_ratio - 0.6).abs() < 1e-6);
        assert!(view.paused && !view.game_over);
        assert_eq!(view.fps, Some(60));
        assert_eq!(view.trees.len(), 150);
    }
}
