pub mod classifier;
pub mod decision_tree;
pub mod logistic_regression;
pub mod random_forest;

pub use classifier::Classifier;
pub use decision_tree::{DecisionTree, DecisionTreeParams, TreeStructure};
pub use logistic_regression::{LogisticRegression, LogisticRegressionParams};
pub use random_forest::{RandomForest, RandomForestParams};

use crate::error::ArtifactError;
use serde::{Deserialize, Serialize};

/// On-disk classifier artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
pub enum ClassifierArtifact {
    LogisticRegression(LogisticRegressionParams),
    DecisionTree(DecisionTreeParams),
    RandomForest(RandomForestParams),
}

impl ClassifierArtifact {
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, ArtifactError> {
        Ok(match self {
            ClassifierArtifact::LogisticRegression(p) => Box::new(LogisticRegression::new(p)?),
            ClassifierArtifact::DecisionTree(p) => Box::new(DecisionTree::new(p)?),
            ClassifierArtifact::RandomForest(p) => Box::new(RandomForest::new(p)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn artifact_dispatches_on_type_tag() {
        let a: ClassifierArtifact = serde_json::from_value(json!({
            "type": "logistic-regression",
            "params": { "coef": [[1.0, 2.0]], "intercept": [0.0], "classes": [1, 2] }
        }))
        .unwrap();
        let c = a.into_classifier().unwrap();
        assert_eq!(c.kind(), "logistic-regression");
        assert_eq!(c.number_of_features(), 2);
        assert_eq!(c.classes(), &[1, 2]);
    }

    #[test]
    fn unknown_type_tag_fails_to_decode() {
        let r: Result<ClassifierArtifact, _> = serde_json::from_value(json!({
            "type": "gradient-boosting",
            "params": {}
        }));
        assert!(r.is_err());
    }
}
