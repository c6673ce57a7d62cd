//! Discrete input events delivered by the host each tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys the engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// One raw event from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Window close or similar
    Quit,
    KeyDown(Key),
    PointerDown { pos: Vec2, button: PointerButton },
    PointerUp { button: PointerButton },
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Events since the previous tick, in arrival order
    pub events: Vec<InputEvent>,
    /// Current pointer position, None when the host window lacks focus
    pub pointer: Option<Vec2>,
}

impl TickInput {
    pub fn new(events: Vec<InputEvent>, pointer: Option<Vec2>) -> Self {
        Self { events, pointer }
    }

    /// Pointer pressed and released at `pos` within the same tick
    pub fn click(pos: Vec2) -> Self {
        Self {
            events: vec![
                InputEvent::PointerDown {
                    pos,
                    button: PointerButton::Primary,
                },
                InputEvent::PointerUp {
                    button: PointerButton::Primary,
                },
            ],
            pointer: Some(pos),
        }
    }
}
