//! Game state and core simulation types
//!
//! Everything one tick reads or writes lives in [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::slots::{Slot, Slots};
use crate::consts::{TREE_MIN_RADIUS, TREE_RADIUS_JITTER};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// All gameplay updates frozen until unpaused
    Paused,
    /// Player health ran out; terminal
    GameOver,
}

/// Cosmetic colour, passed through to the renderer untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub radius: f32,
    /// Unit vector of the last aim direction
    pub aim: Vec2,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            radius: tuning.player_radius,
            aim: Vec2::X,
        }
    }

    /// Health as a fraction of max, for the health bar
    pub fn health_ratio(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// A chasing enemy
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub active: bool,
    pub color: Rgb,
}

impl Slot for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// A player projectile
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Unit travel direction
    pub dir: Vec2,
    pub active: bool,
    /// Seconds since fired
    pub age: f32,
}

impl Slot for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Static decoration. Nothing collides with trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgb,
}

/// Wave counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveProgress {
    /// Current wave (1-based)
    pub wave: u32,
    /// Kills this wave
    pub kills: u32,
    /// Kills needed to clear this wave
    pub quota: u32,
    /// Seconds accumulated toward the next spawn
    pub spawn_timer: f32,
    /// Kills over the whole run
    pub total_kills: u32,
}

impl WaveProgress {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            wave: 1,
            kills: 0,
            quota: tuning.quota_for_wave(1),
            spawn_timer: 0.0,
            total_kills: 0,
        }
    }

    pub fn quota_met(&self) -> bool {
        self.kills >= self.quota
    }

    /// Move to the next wave and restart spawning immediately
    pub fn advance(&mut self, tuning: &Tuning) {
        self.wave += 1;
        self.quota = tuning.quota_for_wave(self.wave);
        self.kills = 0;
        self.spawn_timer = 0.0;
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BulletFired { slot: usize },
    EnemySpawned { slot: usize, pos: Vec2 },
    EnemyKilled { slot: usize },
    PlayerTouched { slot: usize, health: f32 },
    WaveAdvanced { wave: u32, quota: u32 },
    GameOver { wave: u32, total_kills: u32 },
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Slots<Enemy>,
    pub bullets: Slots<Bullet>,
    pub trees: Vec<Tree>,
    pub progress: WaveProgress,
    pub camera: Camera,
    /// Re-armed once the fire button is released
    pub can_fire: bool,
    /// Simulated seconds (excludes paused time)
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed and default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let center = tuning.world_size() / 2.0;
        let trees = generate_trees(&mut rng, &tuning);

        Self {
            seed,
            rng,
            phase: GamePhase::Running,
            player: Player::new(center, &tuning),
            enemies: Slots::new(tuning.max_enemies),
            bullets: Slots::new(tuning.max_bullets),
            trees,
            progress: WaveProgress::new(&tuning),
            camera: Camera::new(center),
            can_fire: true,
            elapsed: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Scatter decorative trees over the whole world
fn generate_trees(rng: &mut Pcg32, tuning: &Tuning) -> Vec<Tree> {
    (0..tuning.tree_count)
        .map(|_| Tree {
            pos: Vec2::new(
                rng.random_range(0.0..tuning.world_width),
                rng.random_range(0.0..tuning.world_height),
            ),
            radius: TREE_MIN_RADIUS + rng.random_range(0.0..TREE_RADIUS_JITTER),
            color: Rgb(
                20 + rng.random_range(0..40),
                60 + rng.random_range(0..60),
                20,
            ),
        })
        .collect()
}
