//! Terminal renderer
//!
//! Draws the world through the camera onto a [`Canvas`], then the HUD and
//! overlays on top.

use std::io::Write;

use crossterm::style::Color;
use glam::Vec2;

use super::{Canvas, FrameView, HealthLevel, Renderer};
use crate::consts::ENEMY_RADIUS;
use crate::platform::terminal::{PAUSE_BUTTON_COLUMN, PAUSE_BUTTON_ROW, PAUSE_LABEL};
use crate::settings::QualityPreset;
use crate::sim::Rgb;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_OUT_OF_WORLD: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::Rgb { r: 80, g: 150, b: 255 };
const C_AIM: Color = Color::Rgb { r: 255, g: 161, b: 0 };
const C_BULLET: Color = Color::Yellow;
const C_WAVE: Color = Color::Rgb { r: 255, g: 220, b: 100 };
const C_HUD: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Length of the aim marker in world units
const AIM_LENGTH: f32 = 50.0;
const HEALTH_BAR_CELLS: usize = 30;

fn rgb(color: Rgb) -> Color {
    Color::Rgb {
        r: color.0,
        g: color.1,
        b: color.2,
    }
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    canvas: Canvas,
    quality: QualityPreset,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, width: u16, height: u16, quality: QualityPreset) -> Self {
        Self {
            out,
            canvas: Canvas::new(width, height),
            quality,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.canvas.resize(width, height);
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Compose the frame into the canvas without writing it out
    pub fn compose(&mut self, frame: &FrameView<'_>) {
        self.canvas.clear();
        self.draw_world_edge(frame);
        if self.quality.trees_enabled() {
            self.draw_trees(frame);
        }
        self.draw_enemies(frame);
        self.draw_bullets(frame);
        self.draw_player(frame);
        self.draw_hud(frame);

        if frame.paused {
            self.draw_paused();
        }
        if frame.game_over {
            self.draw_game_over(frame);
        }
    }

    // ── World ─────────────────────────────────────────────────────────────────

    /// Shade cells that fall outside the world rectangle
    fn draw_world_edge(&mut self, frame: &FrameView<'_>) {
        let screen = Vec2::new(
            f32::from(self.canvas.width()),
            f32::from(self.canvas.height()),
        );
        let view_min = frame.camera.screen_to_world(Vec2::ZERO);
        let view_max = view_min + frame.camera.visible_extent(screen);
        let outside = |p: Vec2| p.cmplt(Vec2::ZERO).any() || p.cmpgt(frame.world_size).any();
        if !outside(view_min) && !outside(view_max) {
            return;
        }

        for y in 0..i32::from(self.canvas.height()) {
            for x in 0..i32::from(self.canvas.width()) {
                let world = frame
                    .camera
                    .screen_to_world(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
                if outside(world) {
                    self.canvas.put(x, y, '░', C_OUT_OF_WORLD);
                }
            }
        }
    }

    fn draw_trees(&mut self, frame: &FrameView<'_>) {
        for tree in frame.trees {
            let center = frame.camera.world_to_screen(tree.pos);
            let color = rgb(tree.color);
            if self.quality.tree_canopies() {
                let radii = Vec2::splat(tree.radius) * frame.camera.zoom;
                self.canvas.fill_ellipse(center, radii, '▒', color);
            }
            self.canvas.put_at(center, '♣', color);
        }
    }

    fn draw_enemies(&mut self, frame: &FrameView<'_>) {
        for (_, enemy) in frame.enemies.iter_active() {
            let center = frame.camera.world_to_screen(enemy.pos);
            let color = rgb(enemy.color);
            let radii = Vec2::splat(ENEMY_RADIUS) * frame.camera.zoom;
            if radii.min_element() >= 1.0 {
                self.canvas.fill_ellipse(center, radii, '●', color);
            } else {
                self.canvas.put_at(center, '●', color);
            }
        }
    }

    fn draw_bullets(&mut self, frame: &FrameView<'_>) {
        for (_, bullet) in frame.bullets.iter_active() {
            self.canvas
                .put_at(frame.camera.world_to_screen(bullet.pos), '•', C_BULLET);
        }
    }

    fn draw_player(&mut self, frame: &FrameView<'_>) {
        let player = frame.player;
        let aim_tip = player.pos + player.aim * AIM_LENGTH;
        self.canvas
            .put_at(frame.camera.world_to_screen(aim_tip), '+', C_AIM);
        self.canvas
            .put_at(frame.camera.world_to_screen(player.pos), '@', C_PLAYER);
    }

    // ── HUD ───────────────────────────────────────────────────────────────────

    fn draw_hud(&mut self, frame: &FrameView<'_>) {
        let bottom = i32::from(self.canvas.height()) - 1;

        self.canvas
            .text_centered(0, &format!("WAVE {}", frame.wave), C_WAVE);
        self.canvas.text(
            1,
            0,
            &format!("Kills {}/{}", frame.kills, frame.quota),
            C_HUD,
        );
        if !frame.game_over {
            let color = if frame.paused {
                Color::Rgb { r: 220, g: 60, b: 60 }
            } else {
                Color::Grey
            };
            self.canvas.text(
                i32::from(PAUSE_BUTTON_COLUMN),
                i32::from(PAUSE_BUTTON_ROW),
                PAUSE_LABEL,
                color,
            );
        }
        if let Some(fps) = frame.fps {
            let fps_text = format!("{fps} FPS");
            let x = i32::from(self.canvas.width()) - fps_text.len() as i32 - 1;
            self.canvas.text(x, 0, &fps_text, C_HINT);
        }

        // Health bar
        let filled = (frame.health_ratio * HEALTH_BAR_CELLS as f32).round() as usize;
        let bar_color = match frame.health_level() {
            HealthLevel::Healthy => Color::Green,
            HealthLevel::Wounded => Color::Rgb { r: 255, g: 161, b: 0 },
            HealthLevel::Critical => Color::Red,
        };
        let bar: String = (0..HEALTH_BAR_CELLS)
            .map(|i| if i < filled { '█' } else { '░' })
            .collect();
        let label = "HEALTH ";
        let total = (label.len() + HEALTH_BAR_CELLS) as i32;
        let x = (i32::from(self.canvas.width()) - total) / 2;
        self.canvas.text(x, bottom - 1, label, C_HUD);
        self.canvas.text(x + label.len() as i32, bottom - 1, &bar, bar_color);

        self.canvas.text(
            1,
            bottom,
            "WASD: Move | CLICK/SPACE: Shoot | Mouse: Aim | P/[PAUSE]: Pause | Q: Quit",
            C_HINT,
        );
    }

    fn draw_paused(&mut self) {
        let mid = i32::from(self.canvas.height()) / 2;
        self.canvas.text_centered(mid - 1, "PAUSED", Color::White);
        self.canvas
            .text_centered(mid + 1, "Press P to resume", Color::Grey);
    }

    fn draw_game_over(&mut self, frame: &FrameView<'_>) {
        let mid = i32::from(self.canvas.height()) / 2;
        let lines: [(String, Color); 5] = [
            ("╔══════════════════╗".into(), Color::Red),
            ("║    GAME  OVER    ║".into(), Color::Red),
            ("╚══════════════════╝".into(), Color::Red),
            (
                format!(
                    "Waves cleared: {}   Kills: {}",
                    frame.wave.saturating_sub(1),
                    frame.total_kills
                ),
                Color::Yellow,
            ),
            ("R - Play Again  Q - Quit".into(), Color::White),
        ];
        let start = mid - lines.len() as i32 / 2;
        for (i, (text, color)) in lines.iter().enumerate() {
            self.canvas.text_centered(start + i as i32, text, *color);
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, frame: &FrameView<'_>) -> std::io::Result<()> {
        self.compose(frame);
        self.canvas.emit(&mut self.out)?;
        self.out.flush()
    }
}
