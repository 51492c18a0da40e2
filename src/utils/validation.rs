//! Path and input validation utilities.

use std::error::Error;
use std::path::Path;

/// Validate that a path exists and is a directory.
///
/// # Returns
///
/// * `Ok(())` if the path is a directory
/// * `Err` with a message naming the path otherwise
pub fn validate_directory(path: &Path) -> Result<(), Box<dyn Error>> {
    if !path.exists() {
        return Err(format!("Path does not exist: {}", path.display()).into());
    }
    if !path.is_dir() {
        return Err(format!("Selected path is not a folder: {}", path.display()).into());
    }
    Ok(())
}
