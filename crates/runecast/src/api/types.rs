use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch (or any monotonic origin the host picks).
pub type Timestamp = u64;

/// A single observation of the pointer while a gesture is being drawn.
/// Coordinates are in drawing-surface pixels, already relative to its origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathSample {
    pub x: f32,
    pub y: f32,
    pub timestamp: Timestamp,
}

impl PathSample {
    pub fn new(x: f32, y: f32, timestamp: Timestamp) -> Self {
        Self { x, y, timestamp }
    }

    /// Position as a vector for geometric work.
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn with_pos(&self, pos: Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            timestamp: self.timestamp,
        }
    }
}

/// Kinds of [`RecognitionEvent`] written for the UI layer.
pub mod event_kind {
    /// A gesture matched a pattern.
    pub const RECOGNIZED: f32 = 1.0;
    /// A complete gesture was drawn but nothing matched.
    pub const UNRECOGNIZED: f32 = 2.0;
}

/// A recognition outcome communicated from Rust to TypeScript as four floats.
/// `pattern_index` is the pattern's registration index (-1 when unrecognized).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RecognitionEvent {
    pub kind: f32,
    pub pattern_index: f32,
    pub score: f32,
    /// 1.0 if the associated action was dispatched and reported success.
    pub dispatched: f32,
}

impl RecognitionEvent {
    pub const FLOATS: usize = 4;

    pub fn recognized(pattern_index: usize, score: f32, dispatched: bool) -> Self {
        Self {
            kind: event_kind::RECOGNIZED,
            pattern_index: pattern_index as f32,
            score,
            dispatched: if dispatched { 1.0 } else { 0.0 },
        }
    }

    pub fn unrecognized() -> Self {
        Self {
            kind: event_kind::UNRECOGNIZED,
            pattern_index: -1.0,
            score: 0.0,
            dispatched: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_is_four_floats() {
        assert_eq!(
            std::mem::size_of::<RecognitionEvent>(),
            RecognitionEvent::FLOATS * std::mem::size_of::<f32>()
        );
        let events = [RecognitionEvent::recognized(3, 0.8, true)];
        let floats: &[f32] = bytemuck::cast_slice(&events);
        assert_eq!(floats, &[event_kind::RECOGNIZED, 3.0, 0.8, 1.0]);
    }

    #[test]
    fn sample_finiteness() {
        assert!(PathSample::new(1.0, 2.0, 0).is_finite());
        assert!(!PathSample::new(f32::NAN, 2.0, 0).is_finite());
        assert!(!PathSample::new(1.0, f32::INFINITY, 0).is_finite());
    }
}
