use crate::classifiers::classifier::{Classifier, argmax, check_width};
use crate::core::{ClassCode, FeatureVector};
use crate::error::{ArtifactError, PipelineError};
use serde::{Deserialize, Serialize};

const LEAF: i64 = -1;

/// Flat parallel-array encoding of a fitted tree. A node whose left child is
/// `-1` is a leaf.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeStructure {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTreeParams {
    #[serde(flatten)]
    pub tree: TreeStructure,
    pub classes: Vec<ClassCode>,
    pub n_features: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        distribution: Vec<f64>,
    },
}

/// Validated tree, shared by [`DecisionTree`] and the forest.
#[derive(Debug, Clone)]
pub(crate) struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    pub(crate) fn build(
        s: TreeStructure,
        n_classes: usize,
        n_features: usize,
    ) -> Result<Self, ArtifactError> {
        let n = s.children_left.len();
        if n == 0 {
            return Err(ArtifactError::Invalid("tree has no nodes".into()));
        }
        if s.children_right.len() != n
            || s.feature.len() != n
            || s.threshold.len() != n
            || s.value.len() != n
        {
            return Err(ArtifactError::Invalid(format!(
                "tree arrays disagree in length (children_left has {n} nodes)"
            )));
        }

        let child = |raw: i64, node: usize| -> Result<usize, ArtifactError> {
            // children always come after their parent in a fitted tree
            usize::try_from(raw)
                .ok()
                .filter(|c| *c > node && *c < n)
                .ok_or_else(|| {
                    ArtifactError::Invalid(format!("node {node} has invalid child index {raw}"))
                })
        };

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            if s.children_left[i] == LEAF {
                let distribution = s.value[i].clone();
                if distribution.len() != n_classes {
                    return Err(ArtifactError::Invalid(format!(
                        "leaf {i} has {} class weights for {n_classes} classes",
                        distribution.len()
                    )));
                }
                nodes.push(TreeNode::Leaf { distribution });
                continue;
            }

            let feature = usize::try_from(s.feature[i])
                .ok()
                .filter(|f| *f < n_features)
                .ok_or_else(|| {
                    ArtifactError::Invalid(format!(
                        "node {i} splits on feature {} of {n_features}",
                        s.feature[i]
                    ))
                })?;

            nodes.push(TreeNode::Split {
                feature,
                threshold: s.threshold[i],
                left: child(s.children_left[i], i)?,
                right: child(s.children_right[i], i)?,
            });
        }

        Ok(Tree { nodes })
    }

    /// Class weights of the leaf `x` falls into. Goes left on `<=`.
    pub(crate) fn leaf_distribution(&self, x: &[f64]) -> &[f64] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { distribution } => return distribution,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    tree: Tree,
    classes: Vec<ClassCode>,
    n_features: usize,
}

impl DecisionTree {
    pub fn new(params: DecisionTreeParams) -> Result<Self, ArtifactError> {
        if params.classes.is_empty() {
            return Err(ArtifactError::Invalid("decision tree has no classes".into()));
        }
        let tree = Tree::build(params.tree, params.classes.len(), params.n_features)?;
        Ok(DecisionTree {
            tree,
            classes: params.classes,
            n_features: params.n_features,
        })
    }
}

impl Classifier for DecisionTree {
    fn predict(&self, features: &FeatureVector) -> Result<ClassCode, PipelineError> {
        check_width("decision tree", self.n_features, features)?;
        let dist = self.tree.leaf_distribution(features.values());
        Ok(self.classes[argmax(dist)])
    }

    fn number_of_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[ClassCode] {
        &self.classes
    }

    fn kind(&self) -> &'static str {
        "decision-tree"
    }
}
