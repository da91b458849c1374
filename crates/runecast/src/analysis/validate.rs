use crate::api::types::PathSample;
use crate::error::PathError;

/// Check that a path is usable for recognition: within the length limits and
/// made only of finite coordinates.
pub fn validate_path(path: &[PathSample], min: usize, max: usize) -> Result<(), PathError> {
    if path.len() < min {
        return Err(PathError::TooShort { len: path.len(), min });
    }
    if path.len() > max {
        return Err(PathError::TooLong { len: path.len(), max });
    }
    if let Some(index) = path.iter().position(|p| !p.is_finite()) {
        return Err(PathError::InvalidSample { index });
    }
    Ok(())
}
