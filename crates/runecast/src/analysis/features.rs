//! Geometric and kinematic features of a drawn path.
//!
//! Everything here is a pure function of the sample slice. Degenerate input
//! (empty paths, coincident points, repeated timestamps) is handled with
//! zero-guards rather than errors, so extraction is total.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use crate::api::config::FeatureConfig;
use crate::api::types::PathSample;

/// Axis-aligned bounds of a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundingBox {
    /// Bounds of all samples. An empty path yields an all-zero box.
    pub fn of(path: &[PathSample]) -> Self {
        let Some(first) = path.first() else {
            return Self::default();
        };
        path.iter().skip(1).fold(
            Self {
                min_x: first.x,
                min_y: first.y,
                max_x: first.x,
                max_y: first.y,
            },
            |b, p| Self {
                min_x: b.min_x.min(p.x),
                min_y: b.min_y.min(p.y),
                max_x: b.max_x.max(p.x),
                max_y: b.max_y.max(p.y),
            },
        )
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// Width over height; 0 when the box has no height.
    pub fn aspect_ratio(&self) -> f32 {
        let h = self.height();
        if h > 0.0 {
            self.width() / h
        } else {
            0.0
        }
    }
}

/// Dominant direction of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Horizontal label when |dx| > |dy|, vertical otherwise (y grows downward).
    pub fn of(delta: Vec2) -> Self {
        if delta.x.abs() > delta.y.abs() {
            if delta.x > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if delta.y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

/// Read-only summary of a completed path, computed once per gesture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    /// Number of samples.
    pub path_length: usize,
    pub bounding_box: BoundingBox,
    /// Width / height, 0 for a box without height.
    pub aspect_ratio: f32,
    /// Mean absolute normalized cross product over interior samples.
    pub curvature: f32,
    pub direction_changes: usize,
    pub is_closed: bool,
    /// 0..=1, how well the path maps onto itself reflected through the box center.
    pub symmetry: f32,
    /// Samples per unit of bounding-box area.
    pub density: f32,
    /// Per-segment distance / elapsed ms.
    pub velocity: Vec<f32>,
    /// Per-segment velocity delta / elapsed ms.
    pub acceleration: Vec<f32>,
}

impl FeatureSet {
    /// A zero aspect ratio means the path has no two-dimensional extent.
    pub fn has_shape(&self) -> bool {
        self.aspect_ratio > 0.0
    }

    pub fn mean_velocity(&self) -> f32 {
        if self.velocity.is_empty() {
            return 0.0;
        }
        self.velocity.iter().sum::<f32>() / self.velocity.len() as f32
    }
}

/// Computes a [`FeatureSet`] from a path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl FeatureExtractor {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Extract all features. Never mutates the input.
    pub fn extract(&self, path: &[PathSample]) -> FeatureSet {
        let bounding_box = BoundingBox::of(path);
        let velocity = velocities(path);
        let acceleration = accelerations(path, &velocity);

        FeatureSet {
            path_length: path.len(),
            bounding_box,
            aspect_ratio: bounding_box.aspect_ratio(),
            curvature: curvature(path, self.config.window_for(path.len())),
            direction_changes: direction_changes(path),
            is_closed: is_closed(path, self.config.closure_tolerance),
            symmetry: symmetry(path, self.config.symmetry_tolerance),
            density: density(path),
            velocity,
            acceleration,
        }
    }
}

/// Signed curvature at `b` given its neighbours: the cross product of the
/// two displacement vectors divided by their lengths. Zero-length legs give 0.
pub fn point_curvature(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    let v1 = b - a;
    let v2 = c - b;
    let n1 = v1.length();
    let n2 = v2.length();
    if n1 == 0.0 || n2 == 0.0 {
        return 0.0;
    }
    v1.perp_dot(v2) / (n1 * n2)
}

/// Mean absolute curvature, sampling triples `window` samples apart and
/// skipping `window` samples at each end.
pub fn curvature(path: &[PathSample], window: usize) -> f32 {
    let w = window.max(1);
    if path.len() < 3 || path.len() <= 2 * w {
        return 0.0;
    }

    let mut total = 0.0;
    let mut count = 0usize;
    for i in w..path.len() - w {
        total += point_curvature(path[i - w].pos(), path[i].pos(), path[i + w].pos()).abs();
        count += 1;
    }

    if count > 0 { total / count as f32 } else { 0.0 }
}

/// Number of times the dominant segment direction differs from the previous segment's.
pub fn direction_changes(path: &[PathSample]) -> usize {
    if path.len() < 3 {
        return 0;
    }

    path.windows(2)
        .map(|pair| Direction::of(pair[1].pos() - pair[0].pos()))
        .collect::<Vec<_>>()
        .windows(2)
        .filter(|dirs| dirs[0] != dirs[1])
        .count()
}

/// True when the first and last samples are within `tolerance`.
/// Paths under four samples are never closed.
pub fn is_closed(path: &[PathSample], tolerance: f32) -> bool {
    match (path.first(), path.last()) {
        (Some(first), Some(last)) if path.len() >= 4 => {
            first.pos().distance(last.pos()) < tolerance
        }
        _ => false,
    }
}

/// Point symmetry: sample `i` reflected through the bounding-box center is
/// compared with sample `len - 1 - i`. Each pair scores `1 - d / tolerance`,
/// floored at 0, and the scores are averaged.
pub fn symmetry(path: &[PathSample], tolerance: f32) -> f32 {
    if path.len() < 4 {
        return 0.0;
    }

    let center = BoundingBox::of(path).center();
    let tolerance = tolerance.max(f32::EPSILON);
    let n = path.len();
    let pairs = (n + 1) / 2;

    let total: f32 = (0..pairs)
        .map(|i| {
            let mirrored = center * 2.0 - path[i].pos();
            let d = path[n - 1 - i].pos().distance(mirrored);
            (1.0 - d / tolerance).max(0.0)
        })
        .sum();

    total / pairs as f32
}

/// Samples per unit of bounding-box area; 0 for zero area or under two samples.
pub fn density(path: &[PathSample]) -> f32 {
    if path.len() < 2 {
        return 0.0;
    }
    let area = BoundingBox::of(path).area();
    if area > 0.0 { path.len() as f32 / area } else { 0.0 }
}

fn elapsed_ms(from: &PathSample, to: &PathSample) -> f32 {
    to.timestamp.saturating_sub(from.timestamp) as f32
}

/// Distance over elapsed time for each adjacent pair. Zero elapsed time gives 0.
pub fn velocities(path: &[PathSample]) -> Vec<f32> {
    path.windows(2)
        .map(|pair| {
            let dt = elapsed_ms(&pair[0], &pair[1]);
            if dt > 0.0 {
                pair[0].pos().distance(pair[1].pos()) / dt
            } else {
                0.0
            }
        })
        .collect()
}

/// First difference of `velocity` divided by the elapsed time of the later segment.
pub fn accelerations(path: &[PathSample], velocity: &[f32]) -> Vec<f32> {
    if velocity.len() < 2 || path.len() < velocity.len() + 1 {
        return Vec::new();
    }

    (1..velocity.len())
        .map(|i| {
            let dt = elapsed_ms(&path[i], &path[i + 1]);
            if dt > 0.0 {
                (velocity[i] - velocity[i - 1]) / dt
            } else {
                0.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_of(points: &[(f32, f32)]) -> Vec<PathSample> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| PathSample::new(x, y, i as u64 * 100))
            .collect()
    }

    fn circle(n: usize, radius: f32) -> Vec<PathSample> {
        (0..n)
            .map(|i| {
                let a = i as f32 / n as f32 * std::f32::consts::TAU;
                PathSample::new(150.0 + radius * a.cos(), 150.0 + radius * a.sin(), i as u64 * 100)
            })
            .collect()
    }

    #[test]
    fn bounding_box_and_aspect() {
        let path = path_of(&[(10.0, 20.0), (50.0, 40.0), (30.0, 10.0)]);
        let b = BoundingBox::of(&path);
        assert_eq!(b, BoundingBox { min_x: 10.0, min_y: 10.0, max_x: 50.0, max_y: 40.0 });
        assert_eq!(b.aspect_ratio(), 40.0 / 30.0);
        assert_eq!(b.center(), Vec2::new(30.0, 25.0));
    }

    #[test]
    fn flat_box_has_zero_aspect() {
        let path = path_of(&[(0.0, 5.0), (10.0, 5.0), (20.0, 5.0)]);
        assert_eq!(BoundingBox::of(&path).aspect_ratio(), 0.0);
    }

    #[test]
    fn empty_path_features_are_zero() {
        let f = FeatureExtractor::default().extract(&[]);
        assert_eq!(f.path_length, 0);
        assert_eq!(f.aspect_ratio, 0.0);
        assert_eq!(f.curvature, 0.0);
        assert!(!f.is_closed);
        assert!(f.velocity.is_empty());
        assert!(f.acceleration.is_empty());
    }

    #[test]
    fn circle_features() {
        let f = FeatureExtractor::default().extract(&circle(20, 50.0));
        assert!(f.is_closed);
        assert!((f.aspect_ratio - 1.0).abs() < 0.01, "aspect {}", f.aspect_ratio);
        // Each step turns by 18 degrees: sin(18°) ≈ 0.309.
        assert!((f.curvature - 0.309).abs() < 0.01, "curvature {}", f.curvature);
        assert!(f.density > 0.0);
    }

    #[test]
    fn circle_curvature_ignores_sampling_density() {
        let extractor = FeatureExtractor::default();
        for n in [40, 64, 91, 120] {
            let f = extractor.extract(&circle(n, 80.0));
            assert!(f.curvature > 0.2 && f.curvature < 0.45, "n={n} curvature {}", f.curvature);
        }
    }

    #[test]
    fn wider_window_sees_sharper_turns() {
        let path = circle(20, 50.0);
        let narrow = curvature(&path, 1);
        let wide = curvature(&path, 3);
        assert!(wide > narrow);
    }

    #[test]
    fn straight_line_has_no_curvature() {
        let path = path_of(&[(0.0, 0.0), (10.0, 10.0), (20.0, 20.0), (30.0, 30.0)]);
        assert_eq!(curvature(&path, 1), 0.0);
        assert_eq!(direction_changes(&path), 0);
    }

    #[test]
    fn curvature_sign_does_not_cancel() {
        // Left turn then right turn: signed values cancel, absolute ones do not.
        let path = path_of(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (20.0, 10.0)]);
        assert!((curvature(&path, 1) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zigzag_direction_changes() {
        let path: Vec<_> = (0..=10)
            .map(|i| {
                let y = if i % 2 == 0 { 100.0 } else { 200.0 };
                PathSample::new(50.0 + i as f32 * 20.0, y, i as u64)
            })
            .collect();
        assert_eq!(direction_changes(&path), 9);
    }

    #[test]
    fn closure_needs_four_samples() {
        let three = path_of(&[(0.0, 0.0), (30.0, 0.0), (1.0, 1.0)]);
        assert!(!is_closed(&three, 20.0));
        let four = path_of(&[(0.0, 0.0), (30.0, 0.0), (30.0, 30.0), (1.0, 1.0)]);
        assert!(is_closed(&four, 20.0));
        assert!(!is_closed(&four, 1.0));
    }

    #[test]
    fn diagonal_line_is_point_symmetric() {
        let path = path_of(&[(0.0, 0.0), (10.0, 10.0), (20.0, 20.0), (30.0, 30.0)]);
        assert!((symmetry(&path, 10.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let path = vec![PathSample::new(40.0, 40.0, 0); 12];
        let f = FeatureExtractor::default().extract(&path);
        assert_eq!(f.aspect_ratio, 0.0);
        assert_eq!(f.density, 0.0);
        assert_eq!(f.curvature, 0.0);
        assert!(!f.has_shape());
        assert!(f.velocity.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn velocity_and_acceleration() {
        let path = vec![
            PathSample::new(0.0, 0.0, 0),
            PathSample::new(10.0, 0.0, 10),
            PathSample::new(30.0, 0.0, 20),
            PathSample::new(40.0, 0.0, 20),
        ];
        let v = velocities(&path);
        assert_eq!(v, vec![1.0, 2.0, 0.0]);
        let f = FeatureExtractor::default().extract(&path);
        assert_eq!(f.mean_velocity(), 1.0);
        assert_eq!(FeatureSet::default().mean_velocity(), 0.0);
        let a = accelerations(&path, &v);
        // Second acceleration segment has zero elapsed time.
        assert_eq!(a, vec![0.1, 0.0]);
    }

    #[test]
    fn out_of_order_timestamps_do_not_panic() {
        let path = vec![PathSample::new(0.0, 0.0, 50), PathSample::new(10.0, 0.0, 10)];
        assert_eq!(velocities(&path), vec![0.0]);
    }
}
