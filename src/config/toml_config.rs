use crate::domain::model::ModelFamily;
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictorConfig {
    #[serde(default)]
    pub models: ModelPaths,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Per-family artifact locations; unset entries fall back to the built-in filenames.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelPaths {
    pub knn: Option<String>,
    pub random_forest: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl PredictorConfig {
    /// Reads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PredictError::ConfigValidationError {
                field: path.display().to_string(),
                message: format!("cannot read config file: {e}"),
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PredictError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` from the environment; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PredictError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn model_path(&self, family: ModelFamily) -> Option<PathBuf> {
        let entry = match family {
            ModelFamily::Knn => self.models.knn.as_ref(),
            ModelFamily::RandomForest => self.models.random_forest.as_ref(),
        };
        entry.map(PathBuf::from)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }
}

impl Validate for PredictorConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.models.knn {
            validation::validate_path("models.knn", path)?;
        }
        if let Some(path) = &self.models.random_forest {
            validation::validate_path("models.random_forest", path)?;
        }
        if let Some(level) = &self.logging.level {
            validation::validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}

/// Chooses the artifact path: explicit override, then config, then the family default.
pub fn resolve_model_path(
    explicit: Option<&Path>,
    config: Option<&PredictorConfig>,
    family: ModelFamily,
) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| config.and_then(|c| c.model_path(family)))
        .unwrap_or_else(|| family.default_artifact().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let config = PredictorConfig::from_toml_str(
            r#"
[models]
knn = "models/knn_model.json"
random_forest = "models/rf_model.json"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(
            config.model_path(ModelFamily::Knn),
            Some(PathBuf::from("models/knn_model.json"))
        );
        assert_eq!(config.log_level(), Some("debug"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PredictorConfig::from_toml_str("").unwrap();
        assert!(config.model_path(ModelFamily::RandomForest).is_none());
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SURFACE_PREDICT_TEST_MODEL_DIR", "/srv/models");

        let config = PredictorConfig::from_toml_str(
            r#"
[models]
random_forest = "${SURFACE_PREDICT_TEST_MODEL_DIR}/rf_model.json"
knn = "${SURFACE_PREDICT_TEST_UNSET_VAR}/knn_model.json"
"#,
        )
        .unwrap();

        assert_eq!(
            config.model_path(ModelFamily::RandomForest),
            Some(PathBuf::from("/srv/models/rf_model.json"))
        );
        assert_eq!(
            config.models.knn.as_deref(),
            Some("${SURFACE_PREDICT_TEST_UNSET_VAR}/knn_model.json")
        );

        std::env::remove_var("SURFACE_PREDICT_TEST_MODEL_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = PredictorConfig::from_toml_str(
            r#"
[models]
knn = ""

[logging]
level = "loud"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = PredictorConfig::from_toml_str("[models\nknn = 1").unwrap_err();
        assert!(matches!(err, PredictError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[models]\nknn = \"file_knn.json\"\n")
            .unwrap();

        let config = PredictorConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.model_path(ModelFamily::Knn),
            Some(PathBuf::from("file_knn.json"))
        );
    }

    #[test]
    fn test_resolve_model_path_precedence() {
        let config = PredictorConfig::from_toml_str("[models]\nknn = \"cfg_knn.json\"").unwrap();

        assert_eq!(
            resolve_model_path(Some(Path::new("cli.json")), Some(&config), ModelFamily::Knn),
            PathBuf::from("cli.json")
        );
        assert_eq!(
            resolve_model_path(None, Some(&config), ModelFamily::Knn),
            PathBuf::from("cfg_knn.json")
        );
        assert_eq!(
            resolve_model_path(None, Some(&config), ModelFamily::RandomForest),
            PathBuf::from("rf_model.json")
        );
        assert_eq!(
            resolve_model_path(None, None, ModelFamily::Knn),
            PathBuf::from("knn_model.json")
        );
    }
}
