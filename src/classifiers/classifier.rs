use crate::core::{ClassCode, FeatureVector};
use crate::error::PipelineError;

pub trait Classifier: Send + Sync {
    /// Class code for a single, already scaled vector.
    fn predict(&self, features: &FeatureVector) -> Result<ClassCode, PipelineError>;
    fn number_of_features(&self) -> usize;
    fn classes(&self) -> &[ClassCode];
    fn kind(&self) -> &'static str;
}

pub(crate) fn check_width(
    stage: &'static str,
    expected: usize,
    features: &FeatureVector,
) -> Result<(), PipelineError> {
    if features.len() != expected {
        return Err(PipelineError::ShapeMismatch {
            stage,
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

/// Index of the largest score; the first one wins on ties.
pub(crate) fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, s) in scores.iter().enumerate().skip(1) {
        if *s > scores[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_prefers_first_on_ties() {
        assert_eq!(argmax(&[0.2, 0.5, 0.5]), 1);
        assert_eq!(argmax(&[1.0, 1.0]), 0);
        assert_eq!(argmax(&[-3.0, -1.0, -2.0]), 1);
    }
}
