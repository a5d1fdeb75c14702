//! Configuration file support
//!
//! Handles optional `.mood.toml` files that customize which paths the
//! analysis visits.
//!
//! ## Configuration File Format
//!
//! ```toml
//! # .mood.toml
//!
//! [analysis]
//! # Paths to completely exclude from analysis (glob patterns)
//! exclude = ["*/generated/*", "*/migrations/*"]
//!
//! # Directory names treated as vendored dependencies and skipped.
//! # Overrides the built-in list when set.
//! vendor_dirs = ["venv", "third_party"]
//! ```

use std::fs;
use std::path::Path;

use glob::Pattern;
use serde::Deserialize;
use thiserror::Error;

/// Directory names skipped as vendored dependencies by default
const DEFAULT_VENDOR_DIRS: &[&str] = &["venv", ".venv", "site-packages", "__pycache__", "node_modules"];

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid glob pattern: {0}")]
    PatternError(String),
}

/// Analysis configuration section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AnalysisConfig {
    /// Paths to completely exclude from analysis (glob patterns)
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Vendored-dependency directory names; replaces the default list
    #[serde(default)]
    pub vendor_dirs: Vec<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MoodConfig {
    /// Analysis configuration (path excludes, vendored directories)
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Compiled configuration with glob patterns
#[derive(Debug)]
pub struct CompiledConfig {
    exclude_patterns: Vec<Pattern>,
    vendor_dirs: Vec<String>,
}

impl CompiledConfig {
    /// Create a compiled config from raw config
    pub fn from_config(config: MoodConfig) -> Result<Self, ConfigError> {
        let exclude_patterns = config
            .analysis
            .exclude
            .iter()
            .map(|p| Pattern::new(p).map_err(|e| ConfigError::PatternError(format!("{}: {}", p, e))))
            .collect::<Result<Vec<_>, _>>()?;

        let vendor_dirs = if config.analysis.vendor_dirs.is_empty() {
            DEFAULT_VENDOR_DIRS.iter().map(|s| s.to_string()).collect()
        } else {
            config.analysis.vendor_dirs
        };

        Ok(Self {
            exclude_patterns,
            vendor_dirs,
        })
    }

    /// Create a config with no overrides (default vendored directories only)
    pub fn empty() -> Self {
        Self {
            exclude_patterns: Vec::new(),
            vendor_dirs: DEFAULT_VENDOR_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Check if a path should be completely excluded from analysis
    pub fn should_exclude(&self, path: &str) -> bool {
        self.exclude_patterns.iter().any(|p| p.matches(path))
    }

    /// Check if a directory name is a vendored-dependency subtree
    pub fn is_vendored_dir(&self, name: &str) -> bool {
        self.vendor_dirs.iter().any(|d| d == name)
    }
}

impl Default for CompiledConfig {
    fn default() -> Self {
        Self::empty()
    }
}

/// Load configuration from the project directory
///
/// Searches for `.mood.toml` in the given directory and parent directories.
/// A missing config file is not an error; defaults apply.
pub fn load_config(project_path: &Path) -> Result<MoodConfig, ConfigError> {
    match find_config_file(project_path) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: MoodConfig = toml::from_str(&content)?;
            Ok(config)
        }
        None => Ok(MoodConfig::default()),
    }
}

/// Find the config file by searching up the directory tree
fn find_config_file(start_path: &Path) -> Option<std::path::PathBuf> {
    let config_names = [".mood.toml", "mood.toml"];

    let mut current = if start_path.is_file() {
        start_path.parent()?.to_path_buf()
    } else {
        start_path.to_path_buf()
    };

    loop {
        for name in &config_names {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            break;
        }
    }

    None
}

/// Load and compile configuration
pub fn load_compiled_config(project_path: &Path) -> Result<CompiledConfig, ConfigError> {
    let config = load_config(project_path)?;
    CompiledConfig::from_config(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MoodConfig::default();
        assert!(config.analysis.exclude.is_empty());
        assert!(config.analysis.vendor_dirs.is_empty());

        let compiled = CompiledConfig::from_config(config).unwrap();
        assert!(compiled.is_vendored_dir("venv"));
        assert!(compiled.is_vendored_dir("site-packages"));
        assert!(!compiled.is_vendored_dir("src"));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [analysis]
            exclude = ["*/generated/*", "*/migrations/*"]
            vendor_dirs = ["third_party"]
        "#;

        let config: MoodConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.analysis.exclude.len(), 2);
        assert_eq!(config.analysis.vendor_dirs, vec!["third_party"]);
    }

    #[test]
    fn test_exclude_patterns() {
        let toml = r#"
            [analysis]
            exclude = ["*/generated/*"]
        "#;

        let config: MoodConfig = toml::from_str(toml).unwrap();
        let compiled = CompiledConfig::from_config(config).unwrap();
        assert!(compiled.should_exclude("app/generated/models.py"));
        assert!(!compiled.should_exclude("app/models.py"));
    }

    #[test]
    fn test_vendor_dirs_override_replaces_defaults() {
        let toml = r#"
            [analysis]
            vendor_dirs = ["third_party"]
        "#;

        let config: MoodConfig = toml::from_str(toml).unwrap();
        let compiled = CompiledConfig::from_config(config).unwrap();
        assert!(compiled.is_vendored_dir("third_party"));
        assert!(!compiled.is_vendored_dir("venv"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let config = MoodConfig {
            analysis: AnalysisConfig {
                exclude: vec!["[".to_string()],
                vendor_dirs: Vec::new(),
            },
        };
        assert!(CompiledConfig::from_config(config).is_err());
    }
}
