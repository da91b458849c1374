use crate::api::types::Timestamp;

/// Pointer events the gesture engine understands.
/// Mouse, pen and touch all map onto these. Coordinates are relative to the
/// drawing surface; `time` is the event timestamp in ms when the host has one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32, time: Option<Timestamp> },
    /// A touch/cursor moved to (x, y).
    PointerMove { x: f32, y: f32, time: Option<Timestamp> },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32, time: Option<Timestamp> },
    /// The pointer left the drawing surface. Ends the stroke like an up.
    PointerLeave { x: f32, y: f32, time: Option<Timestamp> },
    /// The platform cancelled the pointer. The stroke is abandoned.
    PointerCancel { x: f32, y: f32, time: Option<Timestamp> },
}

impl InputEvent {
    pub fn down(x: f32, y: f32) -> Self {
        Self::PointerDown { x, y, time: None }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::PointerMove { x, y, time: None }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y, time: None }
    }

    /// Same event with an explicit timestamp.
    pub fn at(self, t: Timestamp) -> Self {
        let time = Some(t);
        match self {
            Self::PointerDown { x, y, .. } => Self::PointerDown { x, y, time },
            Self::PointerMove { x, y, .. } => Self::PointerMove { x, y, time },
            Self::PointerUp { x, y, .. } => Self::PointerUp { x, y, time },
            Self::PointerLeave { x, y, .. } => Self::PointerLeave { x, y, time },
            Self::PointerCancel { x, y, .. } => Self::PointerCancel { x, y, time },
        }
    }

    pub fn position(&self) -> (f32, f32) {
        match *self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. }
            | Self::PointerLeave { x, y, .. }
            | Self::PointerCancel { x, y, .. } => (x, y),
        }
    }

    pub fn time(&self) -> Option<Timestamp> {
        match *self {
            Self::PointerDown { time, .. }
            | Self::PointerMove { time, .. }
            | Self::PointerUp { time, .. }
            | Self::PointerLeave { time, .. }
            | Self::PointerCancel { time, .. } => time,
        }
    }
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them in arrival order.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(64),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
