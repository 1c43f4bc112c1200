//! Input latch
//!
//! Event handlers only flip flags on the latch. The frame loop calls
//! [`InputLatch::take`] once per tick, which consumes the edge-triggered
//! flags and leaves the held ones alone.

use crate::sim::TickInput;

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
    Restart,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            "ArrowUp" | "w" | "W" | " " => Some(Key::Jump),
            "Enter" | "r" | "R" => Some(Key::Restart),
            _ => None,
        }
    }
}

/// Which third of the canvas a touch landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchZone {
    Left,
    Middle,
    Right,
}

impl TouchZone {
    /// Classify a touch by its x position relative to the canvas width
    pub fn from_position(x: f32, width: f32) -> Self {
        if width <= 0.0 {
            return TouchZone::Middle;
        }
        let t = x / width;
        if t < 1.0 / 3.0 {
            TouchZone::Left
        } else if t > 2.0 / 3.0 {
            TouchZone::Right
        } else {
            TouchZone::Middle
        }
    }

    fn key(self) -> Key {
        match self {
            TouchZone::Left => Key::Left,
            TouchZone::Middle => Key::Jump,
            TouchZone::Right => Key::Right,
        }
    }
}

/// Current input intent, written by event handlers and read by the tick
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    left: bool,
    right: bool,
    jump: bool,
    jump_edge: bool,
    restart: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Jump => {
                // Key repeat must not re-trigger the edge
                if !self.jump {
                    self.jump_edge = true;
                }
                self.jump = true;
            }
            Key::Restart => self.restart = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Jump => self.jump = false,
            Key::Restart => {}
        }
    }

    /// A touch is a press in its zone; it also acknowledges a game over
    pub fn touch_start(&mut self, zone: TouchZone) {
        self.key_down(zone.key());
        self.restart = true;
    }

    pub fn touch_end(&mut self, zone: TouchZone) {
        self.key_up(zone.key());
    }

    /// Drop every held flag (e.g. when the touch list empties)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
        self.jump = false;
    }

    /// Input for this tick; edge flags are cleared
    pub fn take(&mut self) -> TickInput {
        let input = TickInput {
            move_left: self.left,
            move_right: self.right,
            jump_held: self.jump,
            jump_pressed: self.jump_edge,
            restart: self.restart,
        };
        self.jump_edge = false;
        self.restart = false;
        input
    }
}
