// Keyboard collaborator: turns crossterm key events into per-tick input

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::collections::HashMap;
use std::time::Duration;

use crate::config::KeyBindings;
use crate::game::{Command, Direction, TickInput};

/// Without release events a direction counts as held this many ticks after
/// its last press or auto-repeat.
const FALLBACK_HOLD_TICKS: u64 = 30;

/// Parse a key name from the config file
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let trimmed = name.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        "tab" => Some(KeyCode::Tab),
        _ => {
            let mut chars = trimmed.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c.to_ascii_lowercase())),
                _ => None,
            }
        }
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Hold(Direction),
    Command(Command),
    Quit,
}

/// Resolved key bindings
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: Vec<(KeyCode, KeyAction)>,
}

impl KeyMap {
    pub fn from_bindings(keys: &KeyBindings) -> Result<Self> {
        let entries = [
            (&keys.up, KeyAction::Hold(Direction::Up)),
            (&keys.down, KeyAction::Hold(Direction::Down)),
            (&keys.left, KeyAction::Hold(Direction::Left)),
            (&keys.right, KeyAction::Hold(Direction::Right)),
            (&keys.start, KeyAction::Command(Command::Start)),
            (&keys.pause, KeyAction::Command(Command::TogglePause)),
            (&keys.reset, KeyAction::Command(Command::Reset)),
            (&keys.quit, KeyAction::Quit),
        ];

        let mut bindings = Vec::with_capacity(entries.len());
        for (name, action) in entries {
            let code = parse_key(name).ok_or_else(|| anyhow!("unknown key name {name:?}"))?;
            bindings.push((code, action));
        }
        // Esc always quits
        bindings.push((KeyCode::Esc, KeyAction::Quit));
        Ok(Self { bindings })
    }

    pub fn action_for(&self, code: KeyCode) -> Option<KeyAction> {
        let code = normalize(code);
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == code)
            .map(|(_, action)| *action)
    }
}

/// Input gathered for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub input: TickInput,
    pub quit: bool,
}

/// Tracks which directions are held across ticks.
///
/// Terminals that report key releases give exact hold state. Others only
/// send presses and auto-repeats, so a hold expires after a grace period and
/// pressing a direction drops its opposite.
pub struct KeyboardInput {
    keymap: KeyMap,
    held: HashMap<Direction, u64>,
    tick: u64,
    release_events: bool,
}

impl KeyboardInput {
    pub fn new(keymap: KeyMap, release_events: bool) -> Self {
        Self {
            keymap,
            held: HashMap::new(),
            tick: 0,
            release_events,
        }
    }

    /// Drain pending terminal events into this tick's input
    pub fn poll(&mut self) -> Result<InputFrame> {
        let mut frame = InputFrame::default();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key, &mut frame);
            }
        }
        self.finish(&mut frame);
        Ok(frame)
    }

    pub fn handle_key(&mut self, key: KeyEvent, frame: &mut InputFrame) {
        let Some(action) = self.keymap.action_for(key.code) else {
            return;
        };

        match (action, key.kind) {
            (KeyAction::Hold(direction), KeyEventKind::Press | KeyEventKind::Repeat) => {
                if !self.release_events {
                    self.held.remove(&opposite(direction));
                }
                self.held.insert(direction, self.tick);
            }
            (KeyAction::Hold(direction), KeyEventKind::Release) => {
                self.held.remove(&direction);
            }
            (KeyAction::Command(command), KeyEventKind::Press) => frame.input.commands.push(command),
            (KeyAction::Quit, KeyEventKind::Press) => frame.quit = true,
            _ => {}
        }
    }

    /// Resolve the held set for this tick and advance the tick counter
    pub fn finish(&mut self, frame: &mut InputFrame) {
        if !self.release_events {
            let now = self.tick;
            self.held
                .retain(|_, last_seen| now.saturating_sub(*last_seen) < FALLBACK_HOLD_TICKS);
        }
        frame.input.held = self.held.keys().copied().collect();
        self.tick += 1;
    }

    /// Forget every held key (e.g. after a reset)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

fn opposite(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Down,
        Direction::Down => Direction::Up,
        Direction::Left => Direction::Right,
        Direction::Right => Direction::Left,
    }
}
