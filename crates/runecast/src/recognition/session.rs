use crate::api::types::PathSample;

/// Drawing state of the gesture surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No pointer is down.
    Idle,
    /// A pointer is down and samples are being collected.
    Drawing,
}

/// Result of feeding a pointer event to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionResult {
    /// A new path was started.
    Started,
    /// A sample was appended to the current path.
    Sampled,
    /// Nothing happened (e.g. move or up while idle).
    Ignored,
    /// The stroke ended with enough samples to classify.
    Completed(Vec<PathSample>),
    /// The stroke ended too short, or was cancelled; the path was dropped.
    Discarded,
}

/// Collects one stroke at a time between pointer down and pointer up.
///
/// Samples are kept in arrival order. Capture is O(1) per event; nothing is
/// analyzed here.
#[derive(Debug, Clone)]
pub struct RecognitionSession {
    state: SessionState,
    path: Vec<PathSample>,
    min_points: usize,
}

impl RecognitionSession {
    pub fn new(min_points: usize) -> Self {
        Self {
            state: SessionState::Idle,
            path: Vec::with_capacity(256),
            min_points,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state == SessionState::Drawing
    }

    /// Samples of the stroke in progress (empty when idle).
    pub fn path(&self) -> &[PathSample] {
        &self.path
    }

    /// Start a new stroke. A down while already drawing restarts the path.
    pub fn on_pointer_down(&mut self, sample: PathSample) -> SessionResult {
        self.path.clear();
        self.path.push(sample);
        self.state = SessionState::Drawing;
        SessionResult::Started
    }

    pub fn on_pointer_move(&mut self, sample: PathSample) -> SessionResult {
        if self.state != SessionState::Drawing {
            return SessionResult::Ignored;
        }
        self.path.push(sample);
        SessionResult::Sampled
    }

    /// End the stroke. The path is handed back only if it is long enough to classify.
    pub fn on_pointer_up(&mut self) -> SessionResult {
        if self.state != SessionState::Drawing {
            return SessionResult::Ignored;
        }
        self.state = SessionState::Idle;
        let path = std::mem::take(&mut self.path);
        if path.len() < self.min_points {
            log::debug!("stroke discarded: {} samples", path.len());
            return SessionResult::Discarded;
        }
        SessionResult::Completed(path)
    }

    /// Abandon the stroke without classifying it.
    pub fn cancel(&mut self) -> SessionResult {
        if self.state != SessionState::Drawing {
            return SessionResult::Ignored;
        }
        self.state = SessionState::Idle;
        self.path.clear();
        SessionResult::Discarded
    }
}

impl Default for RecognitionSession {
    fn default() -> Self {
        Self::new(5)
    }
}
