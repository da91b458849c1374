use serde::Serialize;
use crate::analysis::{optimize, validate_path, FeatureExtractor, FeatureSet};
use crate::api::config::EngineConfig;
use crate::api::types::PathSample;
use crate::error::PathError;
use crate::patterns::PatternLibrary;

/// The winning pattern for a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub pattern_id: String,
    /// Registration index of the pattern in the library.
    pub pattern_index: usize,
    pub score: f32,
    pub features: FeatureSet,
}

/// Pick the best-scoring pattern for an already-extracted feature set.
///
/// A pattern qualifies when the path has at least its minimum point count and
/// its score is strictly above its acceptance threshold. The highest score
/// wins; equal scores keep the first-registered pattern.
pub fn classify(
    library: &PatternLibrary,
    features: &FeatureSet,
    path: &[PathSample],
) -> Option<Classification> {
    if path.is_empty() || !features.has_shape() {
        return None;
    }

    let mut best: Option<(usize, &str, f32)> = None;
    for (index, pattern) in library.iter().enumerate() {
        if path.len() < pattern.minimum_points {
            continue;
        }
        let score = pattern.scorer.score(&pattern.expected_feature_ranges, features);
        if score <= pattern.acceptance_threshold {
            continue;
        }
        if best.map_or(true, |(_, _, top)| score > top) {
            best = Some((index, pattern.id.as_str(), score));
        }
    }

    best.map(|(pattern_index, id, score)| Classification {
        pattern_id: id.to_string(),
        pattern_index,
        score,
        features: features.clone(),
    })
}

/// Path-to-match pipeline: validate, optionally optimize, extract, classify.
#[derive(Debug, Clone)]
pub struct Classifier {
    extractor: FeatureExtractor,
    min_points: usize,
    max_points: usize,
    optimize: Option<(f32, f32)>,
}

impl Classifier {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            extractor: FeatureExtractor::new(config.features()),
            min_points: config.min_points(),
            max_points: config.max_path_points,
            optimize: config
                .optimize_before_classify
                .then_some((config.normalization_size, config.dedupe_distance)),
        }
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Validate and extract features, honoring the optimize setting.
    /// Returns the path that was actually measured alongside its features.
    pub fn analyze(&self, path: &[PathSample]) -> Result<(Vec<PathSample>, FeatureSet), PathError> {
        validate_path(path, self.min_points, self.max_points)?;
        let measured = match self.optimize {
            Some((size, min_distance)) => optimize(path, size, min_distance),
            None => path.to_vec(),
        };
        let features = self.extractor.extract(&measured);
        Ok((measured, features))
    }

    /// Classify a raw path. Invalid or too-short paths are a no-match and
    /// never reach the feature extractor.
    pub fn recognize(
        &self,
        library: &PatternLibrary,
        path: &[PathSample],
    ) -> Option<Classification> {
        match self.analyze(path) {
            Ok((measured, features)) => {
                log::debug!(
                    "features: len={} ar={:.3} curv={:.3} dc={} closed={} sym={:.3}",
                    measured.len(),
                    features.aspect_ratio,
                    features.curvature,
                    features.direction_changes,
                    features.is_closed,
                    features.symmetry,
                );
                classify(library, &features, &measured)
            }
            Err(err) => {
                log::debug!("path rejected: {err}");
                None
            }
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
