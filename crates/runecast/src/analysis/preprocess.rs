//! Path clean-up applied before cross-path comparison (and optionally before
//! live classification): smoothing, scale normalization, de-duplication.

use glam::Vec2;
use crate::api::types::PathSample;
use super::features::{BoundingBox, FeatureExtractor};

/// 3-point moving average. Endpoints are kept as-is; timestamps are preserved.
pub fn smooth(path: &[PathSample]) -> Vec<PathSample> {
    if path.len() < 3 {
        return path.to_vec();
    }

    let mut out = Vec::with_capacity(path.len());
    out.push(path[0]);
    for w in path.windows(3) {
        let avg = (w[0].pos() + w[1].pos() + w[2].pos()) / 3.0;
        out.push(w[1].with_pos(avg));
    }
    out.push(path[path.len() - 1]);
    out
}

/// Scale so the longer bounding-box side equals `size`, centered in a
/// `size × size` frame. Paths without extent are returned unchanged.
pub fn normalize(path: &[PathSample], size: f32) -> Vec<PathSample> {
    let bounds = BoundingBox::of(path);
    let longest = bounds.width().max(bounds.height());
    if path.is_empty() || longest <= 0.0 {
        return path.to_vec();
    }

    let scale = size / longest;
    let center = bounds.center();
    let frame_center = Vec2::splat(size * 0.5);
    path.iter()
        .map(|p| p.with_pos((p.pos() - center) * scale + frame_center))
        .collect()
}

/// Drop samples within `min_distance` of the last kept sample. The first sample is always kept.
pub fn dedupe(path: &[PathSample], min_distance: f32) -> Vec<PathSample> {
    let mut out: Vec<PathSample> = Vec::with_capacity(path.len());
    for p in path {
        match out.last() {
            Some(last) if last.pos().distance(p.pos()) <= min_distance => {}
            _ => out.push(*p),
        }
    }
    out
}

/// Smooth, normalize, then de-duplicate.
pub fn optimize(path: &[PathSample], size: f32, min_distance: f32) -> Vec<PathSample> {
    let smoothed = smooth(path);
    let normalized = normalize(&smoothed, size);
    dedupe(&normalized, min_distance)
}

/// Similarity of two paths in 0..=1 after normalizing both to `size`.
/// Averages agreement on aspect ratio, curvature, direction changes and closure.
pub fn path_similarity(
    extractor: &FeatureExtractor,
    a: &[PathSample],
    b: &[PathSample],
    size: f32,
) -> f32 {
    let fa = extractor.extract(&normalize(a, size));
    let fb = extractor.extract(&normalize(b, size));

    let aspect = (1.0 - (fa.aspect_ratio - fb.aspect_ratio).abs() / 2.0).max(0.0);
    let curvature = (1.0 - (fa.curvature - fb.curvature).abs()).max(0.0);
    let turns = (1.0 - fa.direction_changes.abs_diff(fb.direction_changes) as f32 / 10.0).max(0.0);
    let closure = if fa.is_closed == fb.is_closed { 1.0 } else { 0.0 };

    (aspect + curvature + turns + closure) / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(f32, f32)]) -> Vec<PathSample> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| PathSample::new(x, y, i as u64 * 16))
            .collect()
    }

    fn circle(n: usize, cx: f32, cy: f32, r: f32) -> Vec<PathSample> {
        (0..n)
            .map(|i| {
                let a = i as f32 / n as f32 * std::f32::consts::TAU;
                PathSample::new(cx + r * a.cos(), cy + r * a.sin(), i as u64 * 16)
            })
            .collect()
    }

    #[test]
    fn smoothing_keeps_endpoints() {
        let path = line(&[(0.0, 0.0), (3.0, 9.0), (6.0, 0.0), (9.0, 9.0)]);
        let s = smooth(&path);
        assert_eq!(s.len(), 4);
        assert_eq!(s[0], path[0]);
        assert_eq!(s[3], path[3]);
        assert_eq!(s[1].pos(), Vec2::new(3.0, 3.0));
        assert_eq!(s[1].timestamp, path[1].timestamp);
    }

    #[test]
    fn short_paths_are_not_smoothed() {
        let path = line(&[(0.0, 0.0), (5.0, 5.0)]);
        assert_eq!(smooth(&path), path);
    }

    #[test]
    fn normalize_fits_longer_side() {
        let path = line(&[(100.0, 100.0), (300.0, 100.0), (300.0, 200.0)]);
        let n = normalize(&path, 100.0);
        let b = BoundingBox::of(&n);
        assert!((b.width() - 100.0).abs() < 1e-4);
        assert!((b.height() - 50.0).abs() < 1e-4);
        assert!((b.center() - Vec2::splat(50.0)).length() < 1e-4);
    }

    #[test]
    fn normalize_leaves_a_point_alone() {
        let path = vec![PathSample::new(7.0, 7.0, 0); 5];
        assert_eq!(normalize(&path, 100.0), path);
    }

    #[test]
    fn dedupe_drops_near_duplicates() {
        let path = line(&[(0.0, 0.0), (0.5, 0.0), (2.0, 0.0), (2.2, 0.1), (5.0, 0.0)]);
        let d = dedupe(&path, 1.0);
        assert_eq!(d.len(), 3);
        assert_eq!(d[1].pos(), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn optimize_handles_empty() {
        assert!(optimize(&[], 100.0, 1.0).is_empty());
    }

    #[test]
    fn similarity_is_scale_invariant() {
        let extractor = FeatureExtractor::default();
        let small = circle(24, 60.0, 60.0, 20.0);
        let large = circle(24, 400.0, 300.0, 150.0);
        let s = path_similarity(&extractor, &small, &large, 100.0);
        assert!(s > 0.95, "similarity {s}");
    }

    #[test]
    fn circle_and_line_are_dissimilar() {
        let extractor = FeatureExtractor::default();
        let round = circle(24, 100.0, 100.0, 50.0);
        let straight: Vec<_> = (0..24)
            .map(|i| PathSample::new(i as f32 * 10.0, i as f32 * 2.0, i as u64))
            .collect();
        assert!(path_similarity(&extractor, &round, &straight, 100.0) < 0.6);
    }
}
