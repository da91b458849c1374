use serde::{Deserialize, Serialize};

/// No path shorter than this is ever classified, whatever the config says.
pub const MIN_PATH_POINTS: usize = 5;

/// Engine configuration, provided by the host shell.
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Maximum recognition history entries kept (default: 30).
    pub history_capacity: usize,
    /// Paths shorter than this are never classified (default: 5, never below 5).
    pub min_path_points: usize,
    /// Paths longer than this are rejected as malformed (default: 1000).
    pub max_path_points: usize,
    /// First/last distance below which a path counts as closed (default: 20).
    pub closure_tolerance: f32,
    /// Smallest sample offset used for the curvature triple (default: 1).
    pub curvature_window: usize,
    /// Window spans per path. Longer paths widen the curvature window to
    /// `len / curvatureSpans` samples so densely sampled strokes measure the
    /// same turn as sparse ones (default: 20, 0 keeps the window fixed).
    pub curvature_spans: usize,
    /// Mirror distance at which a symmetry comparison scores zero (default: 10).
    pub symmetry_tolerance: f32,
    /// Canonical size of the longer bounding-box side after normalization (default: 100).
    pub normalization_size: f32,
    /// Samples closer than this to the previous kept sample are dropped (default: 1).
    pub dedupe_distance: f32,
    /// Smooth and normalize a path before live classification (default: false).
    pub optimize_before_classify: bool,
    /// Matches scoring below this are recorded but their action is not dispatched (default: 0.5).
    pub min_dispatch_confidence: f32,
    /// Recognition events kept between two reads of the event buffer (default: 32).
    pub max_events: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_capacity: 30,
            min_path_points: 5,
            max_path_points: 1000,
            closure_tolerance: 20.0,
            curvature_window: 1,
            curvature_spans: 20,
            symmetry_tolerance: 10.0,
            normalization_size: 100.0,
            dedupe_distance: 1.0,
            optimize_before_classify: false,
            min_dispatch_confidence: 0.5,
            max_events: 32,
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective minimum path length.
    pub fn min_points(&self) -> usize {
        self.min_path_points.max(MIN_PATH_POINTS)
    }

    /// The subset of settings the feature extractor needs.
    pub fn features(&self) -> FeatureConfig {
        FeatureConfig {
            closure_tolerance: self.closure_tolerance,
            curvature_window: self.curvature_window.max(1),
            curvature_spans: self.curvature_spans,
            symmetry_tolerance: self.symmetry_tolerance,
        }
    }
}

/// Tuning knobs for feature extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureConfig {
    pub closure_tolerance: f32,
    pub curvature_window: usize,
    pub curvature_spans: usize,
    pub symmetry_tolerance: f32,
}

impl FeatureConfig {
    /// Curvature window for a path of `len` samples.
    pub fn window_for(&self, len: usize) -> usize {
        let scaled = match self.curvature_spans {
            0 => 0,
            spans => (len as f32 / spans as f32).round() as usize,
        };
        self.curvature_window.max(scaled).max(1)
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        EngineConfig::default().features()
    }
}
