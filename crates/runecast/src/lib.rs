pub mod analysis;
pub mod api;
pub mod error;
pub mod input;
pub mod patterns;
pub mod recognition;

// Re-export key types at crate root for convenience
pub use api::clock::{Clock, SystemClock};
pub use api::config::{EngineConfig, FeatureConfig};
pub use api::engine::{DispatchOutcome, EngineStats, GestureEngine, Recognition};
pub use api::hooks::{ActionDispatcher, EffectsSink};
pub use api::persist::{ExportData, PatternExport};
pub use api::types::{event_kind, PathSample, RecognitionEvent, Timestamp};
pub use analysis::{path_similarity, validate_path, FeatureExtractor, FeatureSet};
pub use error::{PathError, PatternError};
pub use input::queue::{InputEvent, InputQueue};
pub use patterns::{FeatureRanges, Pattern, PatternLibrary, Scorer, Suggestion};
pub use recognition::{
    ActionLog, ActionRecord, Classification, Classifier, HistoryEntry, HistoryLedger,
    RecognitionSession, SessionResult, SessionState,
};
