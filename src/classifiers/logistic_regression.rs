use crate::classifiers::classifier::{Classifier, argmax, check_width};
use crate::core::{ClassCode, FeatureVector};
use crate::error::{ArtifactError, PipelineError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogisticRegressionParams {
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    pub classes: Vec<ClassCode>,
}

/// Linear multinomial / binary logistic model. Only the decision function is
/// evaluated: the predicted class is the same as with probabilities.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    classes: Vec<ClassCode>,
    n_features: usize,
}

impl LogisticRegression {
    pub fn new(params: LogisticRegressionParams) -> Result<Self, ArtifactError> {
        let LogisticRegressionParams {
            coef,
            intercept,
            classes,
        } = params;

        if classes.len() < 2 {
            return Err(ArtifactError::Invalid(format!(
                "logistic regression needs at least 2 classes, got {}",
                classes.len()
            )));
        }

        let expected_rows = if classes.len() == 2 { 1 } else { classes.len() };
        if coef.len() != expected_rows && coef.len() != classes.len() {
            return Err(ArtifactError::Invalid(format!(
                "logistic regression has {} coefficient rows for {} classes",
                coef.len(),
                classes.len()
            )));
        }
        if intercept.len() != coef.len() {
            return Err(ArtifactError::Invalid(format!(
                "logistic regression has {} intercepts for {} coefficient rows",
                intercept.len(),
                coef.len()
            )));
        }

        let n_features = coef[0].len();
        if n_features == 0 || coef.iter().any(|row| row.len() != n_features) {
            return Err(ArtifactError::Invalid(
                "logistic regression coefficient rows must share a non-zero width".into(),
            ));
        }

        Ok(LogisticRegression {
            coef,
            intercept,
            classes,
            n_features,
        })
    }

    pub fn decision_function(&self, x: &[f64]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect()
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, features: &FeatureVector) -> Result<ClassCode, PipelineError> {
        check_width("logistic regression", self.n_features, features)?;

        let scores = self.decision_function(features.values());
        let idx = if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            argmax(&scores)
        };
        Ok(self.classes[idx])
    }

    fn number_of_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[ClassCode] {
        &self.classes
    }

    fn kind(&self) -> &'static str {
        "logistic-regression"
    }
}
