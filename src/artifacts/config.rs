use crate::error::ArtifactError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const DEFAULT_MODELS_DIR: &str = "models";

fn default_feature_names() -> PathBuf {
    PathBuf::from("feature_names.json")
}

fn default_scaler() -> PathBuf {
    PathBuf::from("scaler.json")
}

fn default_variants() -> Vec<VariantConfig> {
    [
        ("Logistic Regression", "logistic_regression.json"),
        ("Decision Tree", "decision_tree.json"),
        ("Random Forest", "random_forest.json"),
    ]
    .into_iter()
    .map(|(name, file)| VariantConfig {
        name: name.to_string(),
        file: PathBuf::from(file),
    })
    .collect()
}

fn default_categorical_fields() -> Vec<String> {
    [
        "Gender",
        "Marital_Status",
        "Smoking_Habit",
        "Meditation_Practice",
        "Exercise_Type",
        "Occupation",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariantConfig {
    pub name: String,
    pub file: PathBuf,
}

/// Where the artifact set lives and how it is laid out. Relative paths are
/// resolved against `models_dir`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArtifactConfig {
    #[serde(skip)]
    pub models_dir: PathBuf,

    #[serde(default = "default_feature_names")]
    pub feature_names: PathBuf,

    #[serde(default = "default_scaler")]
    pub scaler: PathBuf,

    /// Display name -> artifact file, in menu order.
    #[serde(default = "default_variants")]
    pub variants: Vec<VariantConfig>,

    /// Fields expanded into `{field}_{value}` indicator columns.
    #[serde(default = "default_categorical_fields")]
    pub categorical_fields: Vec<String>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        ArtifactConfig {
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            feature_names: default_feature_names(),
            scaler: default_scaler(),
            variants: default_variants(),
            categorical_fields: default_categorical_fields(),
        }
    }
}

impl ArtifactConfig {
    /// Reads `<dir>/manifest.json` when present, otherwise uses the default
    /// layout inside `dir`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Result<Self, ArtifactError> {
        let dir = dir.into();
        let manifest = dir.join(MANIFEST_FILE);

        let mut config = if manifest.is_file() {
            let text = fs::read_to_string(&manifest).map_err(|source| ArtifactError::Io {
                path: manifest.clone(),
                source,
            })?;
            serde_json::from_str::<ArtifactConfig>(&text).map_err(|source| {
                ArtifactError::Decode {
                    path: manifest.clone(),
                    source,
                }
            })?
        } else {
            ArtifactConfig::default()
        };

        config.models_dir = dir;
        Ok(config)
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.models_dir.join(path)
        }
    }

    pub fn categorical_field_names(&self) -> Vec<&str> {
        self.categorical_fields.iter().map(String::as_str).collect()
    }
}
