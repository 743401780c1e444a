use crate::classifiers::classifier::{Classifier, argmax, check_width};
use crate::classifiers::decision_tree::{Tree, TreeStructure};
use crate::core::{ClassCode, FeatureVector};
use crate::error::{ArtifactError, PipelineError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandomForestParams {
    pub trees: Vec<TreeStructure>,
    pub classes: Vec<ClassCode>,
    pub n_features: usize,
}

/// Soft-voting ensemble: each tree contributes its normalized leaf
/// distribution and the class with the highest mean wins.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<Tree>,
    classes: Vec<ClassCode>,
    n_features: usize,
}

impl RandomForest {
    pub fn new(params: RandomForestParams) -> Result<Self, ArtifactError> {
        if params.trees.is_empty() {
            return Err(ArtifactError::Invalid("random forest has no trees".into()));
        }
        if params.classes.is_empty() {
            return Err(ArtifactError::Invalid("random forest has no classes".into()));
        }

        let n_classes = params.classes.len();
        let trees = params
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                Tree::build(s, n_classes, params.n_features).map_err(|e| {
                    ArtifactError::Invalid(format!("random forest tree {i}: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RandomForest {
            trees,
            classes: params.classes,
            n_features: params.n_features,
        })
    }

    pub fn number_of_trees(&self) -> usize {
        self.trees.len()
    }

    fn mean_distribution(&self, x: &[f64]) -> Vec<f64> {
        let mut acc = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let dist = tree.leaf_distribution(x);
            let total: f64 = dist.iter().sum();
            if total <= 0.0 {
                continue;
            }
            for (a, w) in acc.iter_mut().zip(dist) {
                *a += w / total;
            }
        }
        let n = self.trees.len() as f64;
        acc.iter_mut().for_each(|a| *a /= n);
        acc
    }
}

impl Classifier for RandomForest {
    fn predict(&self, features: &FeatureVector) -> Result<ClassCode, PipelineError> {
        check_width("random forest", self.n_features, features)?;
        let dist = self.mean_distribution(features.values());
        Ok(self.classes[argmax(&dist)])
    }

    fn number_of_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[ClassCode] {
        &self.classes
    }

    fn kind(&self) -> &'static str {
        "random-forest"
    }
}
