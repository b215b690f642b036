//! Shared utility functions for ojet crates

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Get the user's home directory
///
/// Prefers the HOME environment variable over dirs::home_dir() so that
/// tests and wrapper scripts can redirect it.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir().ok_or(Error::HomeDirNotFound)
}

/// Get the ojet user directory (~/.ojet)
pub fn get_ojet_dir() -> Result<PathBuf> {
    Ok(get_home_dir()?.join(".ojet"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_home_dir_from_env() {
        if std::env::var("HOME").is_ok() {
            let home = get_home_dir().unwrap();
            assert!(!home.as_os_str().is_empty());
        }
    }

    #[test]
    fn test_ojet_dir_is_under_home() {
        if let Ok(home) = get_home_dir() {
            assert_eq!(get_ojet_dir().unwrap(), home.join(".ojet"));
        }
    }
}
