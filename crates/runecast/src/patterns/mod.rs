//! Pattern definitions, scoring strategies and the pattern registry.

pub mod builtin;
pub mod library;
pub mod pattern;
pub mod scoring;

pub use builtin::{builtin_patterns, category_members};
pub use library::{PatternLibrary, Suggestion};
pub use pattern::{FeatureRanges, Pattern};
pub use scoring::{quantize, Scorer};
