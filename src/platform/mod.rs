//! Platform abstraction layer
//!
//! Handles the parts of the outside world the simulation polls:
//! - Input events (held keys, discrete presses, pointer, shutdown)
//! - Frame timing

pub mod clock;
pub mod terminal;

use std::collections::HashSet;
use std::io;

use glam::Vec2;

use crate::sim::TickInput;

pub use clock::{FrameClock, StepPlan};
pub use terminal::TerminalInput;

/// Logical buttons the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Pause,
    Restart,
}

/// A raw input device polled once per frame
pub trait InputSource {
    /// Drain pending device events. Press events from the previous frame
    /// are forgotten here.
    fn pump(&mut self) -> io::Result<()>;

    /// Whether `key` is currently held
    fn is_down(&self, key: Key) -> bool;

    /// Whether `key` went down during the last `pump`
    fn was_pressed(&self, key: Key) -> bool;

    /// Pointer position in screen space
    fn pointer(&self) -> Option<Vec2>;

    /// The user asked to quit
    fn shutdown_requested(&self) -> bool;
}

/// Build the simulation input for one frame from a source
pub fn sample(source: &impl InputSource) -> TickInput {
    TickInput {
        up: source.is_down(Key::Up),
        down: source.is_down(Key::Down),
        left: source.is_down(Key::Left),
        right: source.is_down(Key::Right),
        pointer: source.pointer(),
        fire_pressed: source.was_pressed(Key::Fire),
        fire_held: source.is_down(Key::Fire),
        pause: source.was_pressed(Key::Pause),
    }
}

/// Input driven by code instead of a device (tests and the headless harness)
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    down: HashSet<Key>,
    queued: Vec<Key>,
    pressed: HashSet<Key>,
    pointer: Option<Vec2>,
    shutdown: bool,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a press; it is reported by the next `pump` and the key stays down
    pub fn press(&mut self, key: Key) {
        self.queued.push(key);
        self.down.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.down.remove(&key);
    }

    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    pub fn request_shutdown(&mut self) {
        self.shutdown = true;
    }
}

impl InputSource for ScriptedInput {
    fn pump(&mut self) -> io::Result<()> {
        self.pressed = self.queued.drain(..).collect();
        Ok(())
    }

    fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown
    }
}
