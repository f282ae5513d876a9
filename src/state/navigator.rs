// Navigator - bounded slide position driven by wheel, key and touch gestures
use crate::config::NavigationConfig;
use eframe::egui;
use std::time::{Duration, Instant};

/// Which way the last accepted move went. Only picks the transition variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// A navigation intent that made it past the cooldown and threshold gates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Advance,
    Retreat,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavigatorState {
    pub position: usize,
    pub direction: Direction,
    pub last_transition: Option<Instant>,
    pub touch_origin: Option<f32>,
}

impl Default for NavigatorState {
    fn default() -> Self {
        Self {
            position: 0,
            direction: Direction::Forward,
            last_transition: None,
            touch_origin: None,
        }
    }
}

pub struct Navigator {
    state: NavigatorState,
    max_index: usize,
    cooldown: Duration,
    wheel_threshold: f32,
    swipe_threshold: f32,
}

impl Navigator {
    /// `swipe_threshold` is fixed for the navigator's lifetime.
    pub fn new(max_index: usize, config: &NavigationConfig, swipe_threshold: f32) -> Self {
        Self {
            state: NavigatorState::default(),
            max_index,
            cooldown: Duration::from_millis(config.cooldown_ms),
            wheel_threshold: config.wheel_threshold,
            swipe_threshold,
        }
    }

    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    pub fn position(&self) -> usize {
        self.state.position
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn max_index(&self) -> usize {
        self.max_index
    }

    pub fn swipe_threshold(&self) -> f32 {
        self.swipe_threshold
    }

    pub fn advance(&mut self) {
        if self.state.position >= self.max_index {
            return;
        }
        self.state.position += 1;
        self.state.direction = Direction::Forward;
    }

    pub fn retreat(&mut self) {
        if self.state.position == 0 {
            return;
        }
        self.state.position -= 1;
        self.state.direction = Direction::Backward;
    }

    fn cooling_down(&self, now: Instant) -> bool {
        match self.state.last_transition {
            Some(last) => now.saturating_duration_since(last) < self.cooldown,
            None => false,
        }
    }

    fn apply(&mut self, command: Command, now: Instant) -> Command {
        let from = self.state.position;
        match command {
            Command::Advance => self.advance(),
            Command::Retreat => self.retreat(),
        }
        self.state.last_transition = Some(now);
        tracing::debug!(?command, from, to = self.state.position, "navigation accepted");
        command
    }

    /// `delta_y` follows the page convention: positive scrolls down the deck.
    pub fn handle_wheel(&mut self, delta_y: f32, now: Instant) -> Option<Command> {
        if self.cooling_down(now) {
            return None;
        }
        let command = if delta_y > self.wheel_threshold {
            Command::Advance
        } else if delta_y < -self.wheel_threshold {
            Command::Retreat
        } else {
            return None;
        };
        Some(self.apply(command, now))
    }

    /// Returns `None` for keys the navigator does not own, and for owned keys
    /// swallowed by the cooldown. Only `Some` keys should be consumed.
    pub fn handle_key(&mut self, key: egui::Key, now: Instant) -> Option<Command> {
        if self.cooling_down(now) {
            return None;
        }
        let command = key_command(key)?;
        Some(self.apply(command, now))
    }

    pub fn handle_touch_start(&mut self, y: f32) {
        self.state.touch_origin = Some(y);
    }

    pub fn handle_touch_move(&mut self, y: f32, now: Instant) -> Option<Command> {
        let origin = self.state.touch_origin?;
        if self.cooling_down(now) {
            return None;
        }
        let dy = y - origin;
        let command = if dy < -self.swipe_threshold {
            Command::Advance
        } else if dy > self.swipe_threshold {
            Command::Retreat
        } else {
            return None;
        };
        self.state.touch_origin = None;
        Some(self.apply(command, now))
    }
}

/// Key bindings owned by the navigator.
pub fn key_command(key: egui::Key) -> Option<Command> {
    match key {
        egui::Key::ArrowDown | egui::Key::PageDown | egui::Key::Space => Some(Command::Advance),
        egui::Key::ArrowUp | egui::Key::PageUp => Some(Command::Retreat),
        _ => None,
    }
}
