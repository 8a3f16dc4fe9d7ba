//! Optional TOML configuration file

use crate::types::{MergeDirection, MergeError};
use serde::Deserialize;
use std::path::Path;

/// Defaults read from `--config <FILE>`
///
/// ```toml
/// exclude_extensions = ["mp4", "mov"]
/// exclude = ["**/.thumbnails/**"]
/// max_depth = 4
/// threads = 4
/// direction = "source"
/// keep_going = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub dry_run: Option<bool>,

    #[serde(default)]
    pub exclude_extensions: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    pub max_depth: Option<usize>,

    pub threads: Option<usize>,

    pub direction: Option<MergeDirection>,

    pub keep_going: Option<bool>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self, MergeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MergeError::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| MergeError::Config(format!("Invalid config file {}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty() {
        assert_eq!(ConfigFile::parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_parse_full() {
        let file = ConfigFile::parse(
            r#"
            dry_run = true
            exclude_extensions = ["mp4"]
            exclude = ["*.tmp"]
            max_depth = 3
            threads = 4
            direction = "destination-only"
            keep_going = true
            "#,
        )
        .unwrap();

        assert_eq!(file.dry_run, Some(true));
        assert_eq!(file.exclude_extensions, vec!["mp4"]);
        assert_eq!(file.exclude, vec!["*.tmp"]);
        assert_eq!(file.max_depth, Some(3));
        assert_eq!(file.threads, Some(4));
        assert_eq!(file.direction, Some(MergeDirection::DestinationOnly));
        assert_eq!(file.keep_going, Some(true));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ConfigFile::parse("delete = true").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigFile::load(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(MergeError::Config(_))));
    }
}
