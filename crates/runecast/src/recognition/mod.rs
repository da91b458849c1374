//! Turning strokes into matches: stroke capture, classification, and the
//! bookkeeping that follows a match.

pub mod actions;
pub mod classifier;
pub mod history;
pub mod session;

pub use actions::{ActionLog, ActionRecord, ActionStats, CooldownStatus, ACTION_LOG_CAPACITY};
pub use classifier::{classify, Classification, Classifier};
pub use history::{HistoryEntry, HistoryLedger};
pub use session::{RecognitionSession, SessionResult, SessionState};
