use serde::{Deserialize, Serialize};
use crate::api::types::Timestamp;
use crate::error::PatternError;
use super::scoring::Scorer;

/// Expected feature values for a pattern. Every criterion is optional;
/// ranges are inclusive `[min, max]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureRanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_closed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curvature: Option<[f32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction_changes_min: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction_changes_max: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_length_min: Option<usize>,
}

impl FeatureRanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A named shape definition with its acceptance criteria and action payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    /// Unique key. Optional in incoming JSON; `PatternLibrary::add` assigns it.
    #[serde(default)]
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Opaque payload handed to the action dispatcher (e.g. a spell phrase).
    pub associated_action: String,
    /// A match needs a score strictly above this (0..=1).
    pub acceptance_threshold: f32,
    pub minimum_points: usize,
    #[serde(default)]
    pub expected_feature_ranges: FeatureRanges,
    /// Scoring strategy. Custom patterns default to the generic range scorer.
    #[serde(default)]
    pub scorer: Scorer,
    /// Minimum time between two dispatches of this pattern's action.
    #[serde(default)]
    pub cooldown_ms: u64,
    /// Set when a custom pattern is added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Pattern {
    pub fn new(id: &str, display_name: &str, associated_action: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            description: String::new(),
            associated_action: associated_action.to_string(),
            acceptance_threshold: 0.5,
            minimum_points: 5,
            expected_feature_ranges: FeatureRanges::default(),
            scorer: Scorer::Ranges,
            cooldown_ms: 0,
            created_at: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.acceptance_threshold = threshold;
        self
    }

    pub fn with_minimum_points(mut self, minimum_points: usize) -> Self {
        self.minimum_points = minimum_points;
        self
    }

    pub fn with_ranges(mut self, ranges: FeatureRanges) -> Self {
        self.expected_feature_ranges = ranges;
        self
    }

    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_cooldown(mut self, cooldown_ms: u64) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    /// Check that the definition is complete and internally consistent.
    pub fn validate(&self) -> Result<(), PatternError> {
        if self.id.trim().is_empty() {
            return Err(PatternError::EmptyId);
        }
        if self.display_name.trim().is_empty() {
            return Err(PatternError::EmptyDisplayName(self.id.clone()));
        }
        if self.associated_action.trim().is_empty() {
            return Err(PatternError::EmptyAction(self.id.clone()));
        }
        if !(0.0..=1.0).contains(&self.acceptance_threshold) {
            return Err(PatternError::InvalidThreshold {
                id: self.id.clone(),
                value: self.acceptance_threshold,
            });
        }
        if self.minimum_points == 0 {
            return Err(PatternError::InvalidMinimumPoints(self.id.clone()));
        }

        let ranges = &self.expected_feature_ranges;
        let bad_range = |r: Option<[f32; 2]>| {
            r.is_some_and(|[lo, hi]| !lo.is_finite() || !hi.is_finite() || lo > hi)
        };
        if bad_range(ranges.aspect_ratio) {
            return Err(self.range_error("aspect ratio"));
        }
        if bad_range(ranges.curvature) {
            return Err(self.range_error("curvature"));
        }
        if let (Some(lo), Some(hi)) = (ranges.direction_changes_min, ranges.direction_changes_max) {
            if lo > hi {
                return Err(self.range_error("direction change"));
            }
        }
        Ok(())
    }

    fn range_error(&self, feature: &'static str) -> PatternError {
        PatternError::InvalidRange {
            id: self.id.clone(),
            feature,
        }
    }
}
