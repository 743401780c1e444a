use crate::artifacts::config::ArtifactConfig;
use crate::classifiers::{Classifier, ClassifierArtifact};
use crate::core::FeatureSchema;
use crate::error::{ArtifactError, PipelineError};
use crate::preprocessing::{Scaler, ScalerArtifact};
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::fmt;
use std::fs;
use std::path::Path;

/// A named, loaded classifier.
pub struct ModelVariant {
    name: String,
    classifier: Box<dyn Classifier>,
}

impl ModelVariant {
    pub fn new(name: impl Into<String>, classifier: Box<dyn Classifier>) -> Self {
        ModelVariant {
            name: name.into(),
            classifier,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

impl fmt::Debug for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelVariant")
            .field("name", &self.name)
            .field("kind", &self.classifier.kind())
            .field("n_features", &self.classifier.number_of_features())
            .finish()
    }
}

/// Everything loaded once at startup: feature layout, scaler and the model
/// variants. Immutable afterwards and safe to share across threads.
pub struct ArtifactStore {
    schema: FeatureSchema,
    scaler: Box<dyn Scaler>,
    variants: Vec<ModelVariant>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let text = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

impl ArtifactStore {
    pub fn load(config: &ArtifactConfig) -> Result<Self, ArtifactError> {
        let names_path = config.resolve(&config.feature_names);
        let names: Vec<String> = read_json(&names_path)?;
        let schema = FeatureSchema::new(names, &config.categorical_field_names())?;
        info!(
            "loaded {} feature names from {}",
            schema.len(),
            names_path.display()
        );

        let scaler_path = config.resolve(&config.scaler);
        let scaler = read_json::<ScalerArtifact>(&scaler_path)?.into_scaler()?;
        info!("loaded {} scaler from {}", scaler.kind(), scaler_path.display());

        let mut variants = Vec::with_capacity(config.variants.len());
        for v in &config.variants {
            let path = config.resolve(&v.file);
            let classifier = read_json::<ClassifierArtifact>(&path)?.into_classifier()?;
            info!(
                "loaded model '{}' ({}) from {}",
                v.name,
                classifier.kind(),
                path.display()
            );
            variants.push(ModelVariant::new(v.name.clone(), classifier));
        }

        ArtifactStore::from_parts(schema, scaler, variants)
    }

    /// Assembles a store from already constructed parts. Width disagreements
    /// are only reported here; each request re-checks and fails on its own.
    pub fn from_parts(
        schema: FeatureSchema,
        scaler: Box<dyn Scaler>,
        variants: Vec<ModelVariant>,
    ) -> Result<Self, ArtifactError> {
        if variants.is_empty() {
            return Err(ArtifactError::NoModels);
        }
        for (i, v) in variants.iter().enumerate() {
            if variants[..i].iter().any(|o| o.name == v.name) {
                return Err(ArtifactError::DuplicateVariant(v.name.clone()));
            }
        }

        if scaler.number_of_features() != schema.len() {
            warn!(
                "scaler expects {} features but the feature list has {}",
                scaler.number_of_features(),
                schema.len()
            );
        }
        for v in &variants {
            let width = v.classifier.number_of_features();
            if width != schema.len() {
                warn!(
                    "model '{}' expects {} features but the feature list has {}",
                    v.name,
                    width,
                    schema.len()
                );
            }
        }

        Ok(ArtifactStore {
            schema,
            scaler,
            variants,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn scaler(&self) -> &dyn Scaler {
        self.scaler.as_ref()
    }

    pub fn variants(&self) -> &[ModelVariant] {
        &self.variants
    }

    pub fn variant_names(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.name.as_str()).collect()
    }

    pub fn variant(&self, name: &str) -> Result<&ModelVariant, PipelineError> {
        self.variants
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| PipelineError::UnknownModel(name.to_string()))
    }

    /// Logs every offered choice the models were not trained with. Those
    /// selections leave all of their field's indicators at zero.
    pub fn report_unmapped_choices(&self, fields: &[(&str, Vec<&str>)]) -> usize {
        let mut total = 0;
        for (field, choices) in fields {
            let missing = self.schema.unmapped_choices(field, choices);
            if !missing.is_empty() {
                warn!(
                    "no indicator column for {field} = {}; these selections are ignored",
                    missing.join(", ")
                );
                total += missing.len();
            }
        }
        total
    }
}

impl fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("schema", &self.schema)
            .field("scaler", &self.scaler.kind())
            .field("variants", &self.variants)
            .finish()
    }
}
