//! The fixed set of shapes every engine starts with.

use super::pattern::{FeatureRanges, Pattern};
use super::scoring::Scorer;

struct BuiltIn {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    action: &'static str,
    threshold: f32,
    min_points: usize,
    cooldown_ms: u64,
    scorer: Scorer,
    ranges: FeatureRanges,
}

fn closed_ranges(aspect: [f32; 2], curvature: [f32; 2]) -> FeatureRanges {
    FeatureRanges {
        is_closed: Some(true),
        aspect_ratio: Some(aspect),
        curvature: Some(curvature),
        ..FeatureRanges::default()
    }
}

fn table() -> [BuiltIn; 8] {
    [
        BuiltIn {
            id: "circle",
            name: "Circle",
            description: "Portal opening gesture",
            action: "open portal",
            threshold: 0.6,
            min_points: 15,
            cooldown_ms: 1000,
            scorer: Scorer::Circle,
            ranges: FeatureRanges {
                direction_changes_max: Some(6),
                ..closed_ranges([0.5, 1.5], [0.05, 0.6])
            },
        },
        BuiltIn {
            id: "zigzag",
            name: "Zigzag",
            description: "Lightning gesture",
            action: "summon light",
            threshold: 0.7,
            min_points: 10,
            cooldown_ms: 500,
            scorer: Scorer::Zigzag,
            ranges: FeatureRanges {
                is_closed: Some(false),
                aspect_ratio: Some([1.2, 3.0]),
                curvature: Some([0.0, 0.3]),
                direction_changes_min: Some(6),
                ..FeatureRanges::default()
            },
        },
        BuiltIn {
            id: "spiral",
            name: "Spiral",
            description: "Fire gesture",
            action: "ignite fireplace",
            threshold: 0.6,
            min_points: 15,
            cooldown_ms: 2000,
            scorer: Scorer::Spiral,
            ranges: FeatureRanges {
                path_length_min: Some(10),
                ..closed_ranges([0.6, 1.4], [0.1, 0.9])
            },
        },
        BuiltIn {
            id: "heart",
            name: "Heart",
            description: "Favorites gesture",
            action: "cast protection spell",
            threshold: 0.7,
            min_points: 12,
            cooldown_ms: 3000,
            scorer: Scorer::Heart,
            ranges: FeatureRanges {
                direction_changes_max: Some(12),
                ..closed_ranges([0.3, 1.5], [0.05, 0.8])
            },
        },
        BuiltIn {
            id: "star",
            name: "Star",
            description: "Magic star gesture",
            action: "summon magic",
            threshold: 0.6,
            min_points: 30,
            cooldown_ms: 5000,
            scorer: Scorer::Star,
            ranges: FeatureRanges {
                direction_changes_min: Some(8),
                ..closed_ranges([0.8, 1.2], [0.2, 0.7])
            },
        },
        BuiltIn {
            id: "triangle",
            name: "Triangle",
            description: "Stability gesture",
            action: "cast stability",
            threshold: 0.7,
            min_points: 12,
            cooldown_ms: 1500,
            scorer: Scorer::Triangle,
            ranges: FeatureRanges {
                direction_changes_max: Some(6),
                ..closed_ranges([0.7, 1.4], [0.0, 0.2])
            },
        },
        BuiltIn {
            id: "square",
            name: "Square",
            description: "Protection gesture",
            action: "cast protection",
            threshold: 0.7,
            min_points: 16,
            cooldown_ms: 2000,
            scorer: Scorer::Square,
            ranges: FeatureRanges {
                direction_changes_max: Some(8),
                ..closed_ranges([0.8, 1.2], [0.0, 0.1])
            },
        },
        BuiltIn {
            id: "infinity",
            name: "Infinity",
            description: "Eternal gesture",
            action: "cast eternal",
            threshold: 0.6,
            min_points: 35,
            cooldown_ms: 10_000,
            scorer: Scorer::Infinity,
            ranges: FeatureRanges {
                path_length_min: Some(30),
                ..closed_ranges([1.5, 2.5], [0.3, 0.8])
            },
        },
    ]
}

/// Built-in patterns in registration order.
pub fn builtin_patterns() -> Vec<Pattern> {
    table()
        .into_iter()
        .map(|b| {
            Pattern::new(b.id, b.name, b.action)
                .with_description(b.description)
                .with_threshold(b.threshold)
                .with_minimum_points(b.min_points)
                .with_ranges(b.ranges)
                .with_scorer(b.scorer)
                .with_cooldown(b.cooldown_ms)
        })
        .collect()
}

/// Built-in ids grouped by theme. Unknown categories have no members.
pub fn category_members(category: &str) -> &'static [&'static str] {
    match category {
        "basic" => &["circle", "square", "triangle"],
        "complex" => &["spiral", "star", "infinity"],
        "emotional" => &["heart"],
        "elemental" => &["zigzag", "spiral"],
        _ => &[],
    }
}
