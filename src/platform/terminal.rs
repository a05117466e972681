//! Terminal input via crossterm
//!
//! Classic terminals only send key presses (OS key-repeat shows up as more
//! presses), so a key counts as held while its last press or repeat is
//! younger than `HOLD_WINDOW`. Terminals with the keyboard enhancement
//! protocol also send releases, which drop the key immediately.

use std::collections::{HashMap, HashSet};
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use glam::Vec2;

use super::{InputSource, Key};

/// How long a key stays held after its last press/repeat event.
/// OS key-repeat runs at 15 Hz or faster, so this is refreshed while held.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// On-screen pause button, drawn by the HUD at a fixed cell position
pub const PAUSE_LABEL: &str = "[PAUSE]";
pub const PAUSE_BUTTON_COLUMN: u16 = 1;
pub const PAUSE_BUTTON_ROW: u16 = 1;

/// Whether a cell lies on the pause button
pub fn on_pause_button(column: u16, row: u16) -> bool {
    row == PAUSE_BUTTON_ROW
        && column >= PAUSE_BUTTON_COLUMN
        && column < PAUSE_BUTTON_COLUMN + PAUSE_LABEL.len() as u16
}

#[derive(Debug, Default)]
pub struct TerminalInput {
    /// Last press/repeat time per held key
    held: HashMap<Key, Instant>,
    pressed: HashSet<Key>,
    mouse_down: bool,
    /// Cell-space pointer, centred in the cell
    pointer: Option<Vec2>,
    shutdown: bool,
    resized: Option<(u16, u16)>,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// New terminal size, if the terminal was resized since the last call
    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resized.take()
    }

    fn held_at(&self, key: Key, now: Instant) -> bool {
        self.held
            .get(&key)
            .is_some_and(|&last| now.saturating_duration_since(last) <= HOLD_WINDOW)
    }

    fn on_key(&mut self, event: KeyEvent, now: Instant) {
        if is_quit(&event) {
            self.shutdown = true;
            return;
        }
        let Some(key) = map_key(event.code) else {
            return;
        };

        match event.kind {
            KeyEventKind::Press => {
                // A press for a key that is still held is OS key-repeat
                if !self.held_at(key, now) {
                    self.pressed.insert(key);
                }
                self.held.insert(key, now);
            }
            KeyEventKind::Repeat => {
                self.held.insert(key, now);
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
            }
        }
    }

    fn on_mouse(&mut self, event: MouseEvent) {
        self.pointer = Some(Vec2::new(
            f32::from(event.column) + 0.5,
            f32::from(event.row) + 0.5,
        ));
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // A click on the pause button toggles pause and does not shoot
                if on_pause_button(event.column, event.row) {
                    self.pressed.insert(Key::Pause);
                    return;
                }
                if !self.mouse_down {
                    self.pressed.insert(Key::Fire);
                }
                self.mouse_down = true;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.mouse_down = false;
            }
            _ => {}
        }
    }

    fn on_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => self.on_key(key, now),
            Event::Mouse(mouse) => self.on_mouse(mouse),
            Event::Resize(width, height) => self.resized = Some((width, height)),
            _ => {}
        }
    }
}

impl InputSource for TerminalInput {
    fn pump(&mut self) -> io::Result<()> {
        self.pressed.clear();
        let now = Instant::now();
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            self.on_event(event, now);
        }
        Ok(())
    }

    fn is_down(&self, key: Key) -> bool {
        if key == Key::Fire && self.mouse_down {
            return true;
        }
        self.held_at(key, Instant::now())
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

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::Restart),
        _ => None,
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    if event.kind != KeyEventKind::Press {
        return false;
    }
    match event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
