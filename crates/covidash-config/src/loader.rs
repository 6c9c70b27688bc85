//! Configuration loading utilities

use crate::schema::Config;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "COVIDASH_CONFIG";

/// Files probed in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["covidash.yaml", "covidash.yml", "covidash.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration format: {0} (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(PathBuf),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        /// Variable name.
        var: String,
        /// Underlying cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Invalid configuration value for '{field}': {message}")]
    Validation {
        /// Dotted path of the offending field.
        field: String,
        /// Why the value is rejected.
        message: String,
    },
}

impl ConfigError {
    /// Create a new validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with environment variable overrides.
    ///
    /// Lookup order: `explicit`, then `COVIDASH_CONFIG`, then the first of
    /// [`DEFAULT_CONFIG_FILES`] that exists, then built-in defaults.
    ///
    /// # Errors
    ///
    /// Fails when the chosen file cannot be read or parsed, when an override
    /// does not parse, or when the result does not validate.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(|| {
                DEFAULT_CONFIG_FILES
                    .iter()
                    .map(PathBuf::from)
                    .find(|candidate| candidate.exists())
            });

        let mut config = match path {
            Some(path) => Self::parse_file(&path)?,
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_env_overrides(&mut config, |var| env::var(var).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file, without environment overrides.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or does not validate.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let config = Self::parse_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML or TOML document, chosen by file extension.
    fn parse_file(path: &Path) -> Result<Config, ConfigError> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse_str(&content, format)?;
        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    fn parse_str(content: &str, format: Format) -> Result<Config, ConfigError> {
        // An empty YAML document parses as null rather than an empty map.
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(match format {
            Format::Yaml => serde_yaml::from_str(content)?,
            Format::Toml => toml::from_str(content)?,
        })
    }

    /// Apply `COVIDASH_*` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Fails when a numeric or boolean override does not parse.
    pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("COVIDASH_DATA_PATH") {
            config.data.path = PathBuf::from(path);
        }

        if let Some(dir) = lookup("COVIDASH_OUTPUT_DIR") {
            config.output.dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup("COVIDASH_WRITE_IMAGES") {
            config.output.write_images = parse_env("COVIDASH_WRITE_IMAGES", &value)?;
        }

        if let Some(value) = lookup("COVIDASH_CHART_WIDTH") {
            config.charts.width = parse_env("COVIDASH_CHART_WIDTH", &value)?;
        }

        if let Some(value) = lookup("COVIDASH_CHART_HEIGHT") {
            config.charts.height = parse_env("COVIDASH_CHART_HEIGHT", &value)?;
        }

        if let Some(level) = lookup("COVIDASH_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_env<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParse {
        var: var.to_string(),
        source: Box::new(e),
    })
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Yaml,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ChartTheme;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_parse_partial_yaml_keeps_defaults() {
        let yaml = "charts:\n  theme: light\n  width: 1200\n";
        let config = ConfigLoader::parse_str(yaml, Format::Yaml).unwrap();
        assert_eq!(config.charts.theme, ChartTheme::Light);
        assert_eq!(config.charts.width, 1200);
        assert_eq!(config.charts.height, 600);
        assert_eq!(config.widgets.top_n_default, 10);
    }

    #[test]
    fn test_parse_toml() {
        let toml = "[widgets]\ndefault_metric = \"deaths\"\ntop_n_default = 7\n";
        let config = ConfigLoader::parse_str(toml, Format::Toml).unwrap();
        assert_eq!(config.widgets.default_metric, covidash_common::Metric::Deaths);
        assert_eq!(config.widgets.top_n_default, 7);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = ConfigLoader::parse_str("  \n", Format::Yaml).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_metric_is_rejected() {
        let yaml = "widgets:\n  default_metric: active\n";
        assert!(matches!(
            ConfigLoader::parse_str(yaml, Format::Yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_format_from_extension() {
        assert!(matches!(Format::from_path(Path::new("a.yml")), Ok(Format::Yaml)));
        assert!(matches!(Format::from_path(Path::new("a.toml")), Ok(Format::Toml)));
        assert!(matches!(
            Format::from_path(Path::new("a.json")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("COVIDASH_DATA_PATH", "/data/jhu.json"),
            ("COVIDASH_CHART_WIDTH", "1400"),
            ("COVIDASH_WRITE_IMAGES", "false"),
            ("COVIDASH_LOG_LEVEL", "debug"),
        ]);
        ConfigLoader::apply_env_overrides(&mut config, lookup).unwrap();
        assert_eq!(config.data.path, PathBuf::from("/data/jhu.json"));
        assert_eq!(config.charts.width, 1400);
        assert!(!config.output.write_images);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_env_override_parse_error_names_variable() {
        let mut config = Config::default();
        let lookup = lookup_from(&[("COVIDASH_CHART_HEIGHT", "tall")]);
        let err = ConfigLoader::apply_env_overrides(&mut config, lookup).unwrap_err();
        assert!(matches!(err, ConfigError::EnvParse { ref var, .. } if var == "COVIDASH_CHART_HEIGHT"));
    }
}
