use crate::classifiers::Classifier;
use crate::classifiers::classifier::check_width;
use crate::core::{ClassCode, FeatureVector};
use crate::error::PipelineError;

/// Always answers the same class for vectors of the expected width.
pub struct ConstantClassifier {
    code: ClassCode,
    n_features: usize,
    classes: Vec<ClassCode>,
}

impl ConstantClassifier {
    pub fn new(code: ClassCode, n_features: usize) -> Self {
        Self {
            code,
            n_features,
            classes: vec![code],
        }
    }
}

impl Classifier for ConstantClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<ClassCode, PipelineError> {
        check_width("constant", self.n_features, features)?;
        Ok(self.code)
    }

    fn number_of_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[ClassCode] {
        &self.classes
    }

    fn kind(&self) -> &'static str {
        "constant"
    }
}
