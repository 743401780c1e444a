use crate::core::FeatureVector;
use crate::error::{ArtifactError, PipelineError};
use serde::{Deserialize, Serialize};

const STAGE: &str = "scaler";

/// A fitted normalization applied to every assembled vector before inference.
pub trait Scaler: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector, PipelineError>;

    fn number_of_features(&self) -> usize;

    fn kind(&self) -> &'static str;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MinMaxScalerParams {
    pub min: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

/// On-disk scaler artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
pub enum ScalerArtifact {
    Standard(StandardScalerParams),
    MinMax(MinMaxScalerParams),
}

impl ScalerArtifact {
    pub fn into_scaler(self) -> Result<Box<dyn Scaler>, ArtifactError> {
        Ok(match self {
            ScalerArtifact::Standard(p) => Box::new(StandardScaler::new(p)?),
            ScalerArtifact::MinMax(p) => Box::new(MinMaxScaler::new(p)?),
        })
    }
}

fn check_lengths(
    kind: &str,
    a: (&str, usize),
    b: (&str, usize),
    names: Option<&Vec<String>>,
) -> Result<(), ArtifactError> {
    if a.1 != b.1 {
        return Err(ArtifactError::Invalid(format!(
            "{kind} scaler has {} {} values but {} {} values",
            a.1, a.0, b.1, b.0
        )));
    }
    if let Some(names) = names
        && names.len() != a.1
    {
        return Err(ArtifactError::Invalid(format!(
            "{kind} scaler has {} feature names for {} columns",
            names.len(),
            a.1
        )));
    }
    Ok(())
}

/// Rejects a vector whose width or column order differs from what the scaler
/// was fitted on.
fn check_input(
    expected_len: usize,
    names: Option<&[String]>,
    features: &FeatureVector,
) -> Result<(), PipelineError> {
    if features.len() != expected_len {
        return Err(PipelineError::ShapeMismatch {
            stage: STAGE,
            expected: expected_len,
            actual: features.len(),
        });
    }

    if let Some(names) = names
        && let Some((position, (expected, found))) = names
            .iter()
            .zip(features.columns())
            .enumerate()
            .find(|(_, (e, f))| e != f)
    {
        return Err(PipelineError::ColumnOrder {
            stage: STAGE,
            position,
            expected: expected.clone(),
            found: found.clone(),
        });
    }

    Ok(())
}

/// `(x - mean) / scale`, with a zero scale treated as 1.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
    feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    pub fn new(params: StandardScalerParams) -> Result<Self, ArtifactError> {
        check_lengths(
            "standard",
            ("mean", params.mean.len()),
            ("scale", params.scale.len()),
            params.feature_names.as_ref(),
        )?;

        let scale = params
            .scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();

        Ok(StandardScaler {
            mean: params.mean,
            scale,
            feature_names: params.feature_names,
        })
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector, PipelineError> {
        check_input(self.mean.len(), self.feature_names.as_deref(), features)?;

        let values = features
            .values()
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect();

        features.with_values(values)
    }

    fn number_of_features(&self) -> usize {
        self.mean.len()
    }

    fn kind(&self) -> &'static str {
        "standard"
    }
}

/// `x * scale + min`.
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    min: Vec<f64>,
    scale: Vec<f64>,
    feature_names: Option<Vec<String>>,
}

impl MinMaxScaler {
    pub fn new(params: MinMaxScalerParams) -> Result<Self, ArtifactError> {
        check_lengths(
            "min-max",
            ("min", params.min.len()),
            ("scale", params.scale.len()),
            params.feature_names.as_ref(),
        )?;

        Ok(MinMaxScaler {
            min: params.min,
            scale: params.scale,
            feature_names: params.feature_names,
        })
    }
}

impl Scaler for MinMaxScaler {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector, PipelineError> {
        check_input(self.min.len(), self.feature_names.as_deref(), features)?;

        let values = features
            .values()
            .iter()
            .zip(self.min.iter().zip(&self.scale))
            .map(|(x, (m, s))| x * s + m)
            .collect();

        features.with_values(values)
    }

    fn number_of_features(&self) -> usize {
        self.min.len()
    }

    fn kind(&self) -> &'static str {
        "min-max"
    }
}
