//! Feature extraction and path preprocessing.

pub mod features;
pub mod preprocess;
pub mod validate;

pub use features::{BoundingBox, Direction, FeatureExtractor, FeatureSet};
pub use preprocess::{dedupe, normalize, optimize, path_similarity, smooth};
pub use validate::validate_path;
