//! Engine configuration loading
//!
//! An optional YAML file overrides any subset of `EngineConfig`; omitted
//! fields keep their defaults. For example:
//!
//! ```yaml
//! max_iterations: 20000
//! return_ranges:
//!   aggressive: { min_pct: 9.0, max_pct: 12.0 }
//! annuity:
//!   allocation: 0.5
//! ```

use std::fs;
use std::path::Path;

use retireplan_core::{EngineConfig, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Parse and validate a YAML configuration document
pub fn parse_config(yaml: &str) -> Result<EngineConfig, ConfigError> {
    // An empty document means "all defaults"
    if yaml.trim().is_empty() {
        return Ok(EngineConfig::default());
    }
    let config: EngineConfig =
        serde_saphyr::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Load the configuration at `path`, or defaults when no path is given
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_config(&content)?;

    tracing::info!(path = %path.display(), "Loaded engine configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use retireplan_core::{ReturnRange, RiskProfile};
    use tempfile::TempDir;

    #[test]
    fn test_no_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_yaml_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("engine.yaml");
        fs::write(
            &path,
            "max_iterations: 20000\n\
             return_ranges:\n  aggressive:\n    min_pct: 9.0\n    max_pct: 12.0\n\
             annuity:\n  allocation: 0.5\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.max_iterations, 20_000);
        assert_eq!(config.min_iterations, 1_000);
        assert_eq!(
            config.return_ranges.range(RiskProfile::Aggressive),
            ReturnRange::new(9.0, 12.0)
        );
        assert_eq!(
            config.return_ranges.range(RiskProfile::Moderate),
            ReturnRange::new(6.0, 8.0)
        );
        assert_eq!(config.annuity.allocation, 0.5);
        assert_eq!(config.annuity.rate_pct, 6.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = parse_config("return_ranges:\n  moderate:\n    min_pct: 8.0\n    max_pct: 6.0\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(e) if e.field == "return_ranges.moderate"));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        assert!(matches!(
            parse_config("max_iterations: [not, a, number]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_config(Some(&temp_dir.path().join("absent.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse_config("\n").unwrap(), EngineConfig::default());
    }
}
