//! Input events and held state
//!
//! Front ends translate their native events into `InputEvent`s and push them
//! into an `InputState`. The frame loop drains the events once per frame
//! (to see `Quit`) and then samples held keys and the mouse through
//! `InputSource` to build the tick's `TickInput`.

use std::collections::{BTreeSet, VecDeque};
use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Key> {
        match key {
            "w" | "W" | "ArrowUp" => Some(Key::W),
            "a" | "A" | "ArrowLeft" => Some(Key::A),
            "s" | "S" | "ArrowDown" => Some(Key::S),
            "d" | "D" | "ArrowRight" => Some(Key::D),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Quit,
    MouseDown,
    MouseUp,
    MouseMove(Vec2),
    KeyDown(Key),
    KeyUp(Key),
}

pub trait InputSource {
    /// Events since the last poll, oldest first
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn key_state(&self, key: Key) -> bool;
    /// Pointer position in screen pixels
    fn mouse_position(&self) -> Vec2;
    /// Primary button held
    fn mouse_down(&self) -> bool;
}

/// Event queue plus the held state those events imply
#[derive(Debug, Clone, Default)]
pub struct InputState {
    queue: VecDeque<InputEvent>,
    held: BTreeSet<Key>,
    mouse: Vec2,
    button: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event to the held state and queue it for the next poll
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.held.insert(key);
            }
            InputEvent::KeyUp(key) => {
                self.held.remove(&key);
            }
            InputEvent::MouseDown => self.button = true,
            InputEvent::MouseUp => self.button = false,
            InputEvent::MouseMove(pos) => self.mouse = pos,
            InputEvent::Quit => {}
        }
        self.queue.push_back(event);
    }
}

impl InputSource for InputState {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.queue.drain(..).collect()
    }

    fn key_state(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn mouse_position(&self) -> Vec2 {
        self.mouse
    }

    fn mouse_down(&self) -> bool {
        self.button
    }
}

/// Frames each autopilot thrust leg lasts
const AUTOPILOT_LEG_FRAMES: u64 = 90;
/// Pointer orbit radius around the screen center, in pixels
const AUTOPILOT_AIM_RADIUS: f32 = 200.0;

/// Scripted input for headless runs: flies a square pattern, sweeps the
/// pointer around the ship and holds fire, then quits after `frames` polls
#[derive(Debug, Clone)]
pub struct Autopilot {
    state: InputState,
    screen: Vec2,
    frame: u64,
    frames: Option<u64>,
}

impl Autopilot {
    pub fn new(screen: Vec2, frames: Option<u64>) -> Self {
        Self {
            state: InputState::new(),
            screen,
            frame: 0,
            frames,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn leg(frame: u64) -> Key {
        match (frame / AUTOPILOT_LEG_FRAMES) % 4 {
            0 => Key::D,
            1 => Key::S,
            2 => Key::A,
            _ => Key::W,
        }
    }
}

impl InputSource for Autopilot {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        if self.frames.is_some_and(|limit| self.frame >= limit) {
            self.state.push(InputEvent::Quit);
            return self.state.poll_events();
        }

        let key = Self::leg(self.frame);
        if self.frame == 0 {
            self.state.push(InputEvent::MouseDown);
        } else {
            let previous = Self::leg(self.frame - 1);
            if previous != key {
                self.state.push(InputEvent::KeyUp(previous));
            }
        }
        if !self.state.key_state(key) {
            self.state.push(InputEvent::KeyDown(key));
        }

        let sweep = (self.frame as f32 / 240.0) * TAU;
        let aim = self.screen * 0.5 + Vec2::from_angle(sweep) * AUTOPILOT_AIM_RADIUS;
        self.state.push(InputEvent::MouseMove(aim));

        self.frame += 1;
        self.state.poll_events()
    }

    fn key_state(&self, key: Key) -> bool {
        self.state.key_state(key)
    }

    fn mouse_position(&self) -> Vec2 {
        self.state.mouse_position()
    }

    fn mouse_down(&self) -> bool {
        self.state.mouse_down()
    }
}

/// Sample held controls into a tick input
pub fn read_controls(source: &dyn InputSource) -> TickInput {
    TickInput {
        left: source.key_state(Key::A),
        right: source.key_state(Key::D),
        up: source.key_state(Key::W),
        down: source.key_state(Key::S),
        fire: source.mouse_down(),
        pointer: source.mouse_position(),
    }
}
