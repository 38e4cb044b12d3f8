//! Configuration file management.
//!
//! Loads the Slack API token from a YAML file (`token.yml` by default).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{AppError, Result};

/// Contents of the token configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenConfig {
    /// Slack API token used as the bearer credential.
    #[serde(default)]
    pub token: String,
}

/// Load the API token from a YAML file at `path`.
///
/// A missing file is not an error: a warning is logged and an empty token is
/// returned, so later API calls fail with a clear Slack error instead. A file
/// that exists but does not parse is an error.
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_token(path: &Path) -> Result<String> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "token file not found, continuing with empty token");
        return Ok(String::new());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read token file: {}", path.display()), e))?;

    let config: TokenConfig = serde_yaml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("Failed to parse token file {}: {e}", path.display()),
    })?;

    Ok(config.token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token.yml");
        fs::write(&path, "token: xoxp-12345\n").unwrap();

        assert_eq!(load_token(&path).unwrap(), "xoxp-12345");
    }

    #[test]
    fn test_missing_file_yields_empty_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.yml");

        assert_eq!(load_token(&path).unwrap(), "");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token.yml");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "token: [unclosed").unwrap();

        assert!(matches!(
            load_token(&path),
            Err(AppError::Config { .. })
        ));
    }

    #[test]
    fn test_missing_key_defaults_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token.yml");
        fs::write(&path, "other: value\n").unwrap();

        assert_eq!(load_token(&path).unwrap(), "");
    }
}
