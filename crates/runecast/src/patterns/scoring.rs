//! Per-pattern scoring heuristics.
//!
//! Each heuristic is a weighted sum of closed-form checks against a
//! [`FeatureSet`]. The weights are tuned defaults, not calibrated
//! probabilities. Scores are quantized to thousandths so that sums of decimal
//! weights compare exactly against decimal thresholds.

use serde::{Deserialize, Serialize};
use crate::analysis::FeatureSet;
use super::pattern::FeatureRanges;

/// Scoring strategy attached to a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scorer {
    Circle,
    Zigzag,
    Spiral,
    Heart,
    Star,
    Triangle,
    Square,
    Infinity,
    /// Generic scorer built from the pattern's expected feature ranges.
    #[default]
    Ranges,
}

/// Round to thousandths.
pub fn quantize(score: f32) -> f32 {
    (score * 1000.0).round() / 1000.0
}

fn weigh(checks: &[(bool, f32)]) -> f32 {
    checks.iter().filter(|(hit, _)| *hit).map(|(_, w)| w).sum()
}

fn within(value: f32, [lo, hi]: [f32; 2]) -> bool {
    value >= lo && value <= hi
}

fn aspect_within(f: &FeatureSet, range: [f32; 2]) -> bool {
    f.has_shape() && within(f.aspect_ratio, range)
}

impl Scorer {
    /// Heuristic confidence in 0..=1 that `features` depict this shape.
    pub fn score(&self, ranges: &FeatureRanges, f: &FeatureSet) -> f32 {
        let raw = match self {
            Scorer::Circle => weigh(&[
                (f.is_closed, 0.4),
                (f.has_shape() && (f.aspect_ratio - 1.0).abs() < 0.3, 0.3),
                (f.curvature > 0.1 && f.curvature < 0.5, 0.3),
            ]),
            Scorer::Zigzag => weigh(&[
                (f.direction_changes > 6, 0.4),
                (f.aspect_ratio > 1.2, 0.3),
                (!f.is_closed, 0.3),
            ]),
            Scorer::Spiral => weigh(&[
                (f.is_closed, 0.3),
                (f.curvature > 0.2, 0.3),
                (f.path_length > 20, 0.4),
            ]),
            Scorer::Heart => weigh(&[
                (f.is_closed, 0.3),
                (f.has_shape() && f.aspect_ratio < 1.2, 0.3),
                (f.curvature > 0.1, 0.4),
            ]),
            Scorer::Star => weigh(&[
                (f.is_closed, 0.3),
                (aspect_within(f, [0.8, 1.2]), 0.2),
                (within(f.curvature, [0.2, 0.7]), 0.2),
                (f.direction_changes >= 8, 0.3),
            ]),
            Scorer::Triangle => weigh(&[
                (f.is_closed, 0.3),
                (f.direction_changes <= 6, 0.3),
                (f.path_length < 20, 0.2),
                (f.symmetry > 0.6, 0.2),
            ]),
            Scorer::Square => weigh(&[
                (f.is_closed, 0.3),
                (f.direction_changes <= 8, 0.3),
                (f.curvature < 0.1, 0.2),
                (f.symmetry > 0.8, 0.2),
            ]),
            Scorer::Infinity => weigh(&[
                (f.is_closed, 0.3),
                (aspect_within(f, [1.5, 2.5]), 0.3),
                (within(f.curvature, [0.3, 0.8]), 0.2),
                (f.path_length >= 30, 0.2),
            ]),
            Scorer::Ranges => range_score(ranges, f),
        };
        quantize(raw.clamp(0.0, 1.0))
    }
}

/// Fraction of the specified range criteria that `f` satisfies, weighted
/// (closure .3, aspect .25, curvature .25, each count bound .1).
/// A pattern that specifies nothing scores 0.
pub fn range_score(ranges: &FeatureRanges, f: &FeatureSet) -> f32 {
    let mut earned = 0.0;
    let mut possible = 0.0;
    let mut check = |specified: bool, hit: bool, weight: f32| {
        if specified {
            possible += weight;
            if hit {
                earned += weight;
            }
        }
    };

    check(ranges.is_closed.is_some(), ranges.is_closed == Some(f.is_closed), 0.3);
    check(
        ranges.aspect_ratio.is_some(),
        ranges.aspect_ratio.is_some_and(|r| aspect_within(f, r)),
        0.25,
    );
    check(
        ranges.curvature.is_some(),
        ranges.curvature.is_some_and(|r| within(f.curvature, r)),
        0.25,
    );
    check(
        ranges.direction_changes_min.is_some(),
        ranges.direction_changes_min.is_some_and(|min| f.direction_changes >= min),
        0.1,
    );
    check(
        ranges.direction_changes_max.is_some(),
        ranges.direction_changes_max.is_some_and(|max| f.direction_changes <= max),
        0.1,
    );
    check(
        ranges.path_length_min.is_some(),
        ranges.path_length_min.is_some_and(|min| f.path_length >= min),
        0.1,
    );

    if possible > 0.0 { earned / possible } else { 0.0 }
}

/// Loose pre-filter score used for UI hints: aspect .3, curvature .3,
/// closure .2, each direction-change bound .1.
pub fn suggestion_score(ranges: &FeatureRanges, f: &FeatureSet) -> f32 {
    let raw = weigh(&[
        (ranges.aspect_ratio.is_some_and(|r| aspect_within(f, r)), 0.3),
        (ranges.curvature.is_some_and(|r| within(f.curvature, r)), 0.3),
        (ranges.is_closed == Some(f.is_closed), 0.2),
        (ranges.direction_changes_min.is_some_and(|min| f.direction_changes >= min), 0.1),
        (ranges.direction_changes_max.is_some_and(|max| f.direction_changes <= max), 0.1),
    ]);
    quantize(raw)
}
