//! Smoothed follow camera
//!
//! The camera trails the player rather than snapping to it. It never feeds
//! back into gameplay except through aim projection.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::smoothing;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World point shown at `offset`
    pub target: Vec2,
    /// Screen-space position of the view centre
    pub offset: Vec2,
    /// Screen units per world unit, per axis
    pub zoom: Vec2,
}

impl Camera {
    /// Camera centred on `target` for the reference screen size
    pub fn new(target: Vec2) -> Self {
        Self {
            target,
            offset: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
            zoom: Vec2::ONE,
        }
    }

    /// Fit the view to a screen of `size` at `zoom` screen units per world unit
    pub fn set_viewport(&mut self, size: Vec2, zoom: Vec2) {
        self.offset = size / 2.0;
        self.zoom = zoom;
    }

    /// Move the view centre toward `focus` by exponential smoothing
    pub fn follow(&mut self, focus: Vec2, rate: f32, dt: f32) {
        self.target = self.target.lerp(focus, smoothing(rate, dt));
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.target) * self.zoom + self.offset
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.zoom + self.target
    }

    /// World-space size of the visible area for a screen of `size`
    pub fn visible_extent(&self, size: Vec2) -> Vec2 {
        size / self.zoom
    }
}
