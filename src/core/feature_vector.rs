use crate::error::PipelineError;
use std::fmt;
use std::sync::Arc;

/// Fixed-order numeric vector together with the column names it is laid out by.
#[derive(Clone, PartialEq)]
pub struct FeatureVector {
    columns: Arc<[String]>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn zeros(columns: Arc<[String]>) -> Self {
        let values = vec![0.0; columns.len()];
        FeatureVector { columns, values }
    }

    /// Builds a vector from explicit values. Lengths must agree.
    pub fn from_values(columns: Arc<[String]>, values: Vec<f64>) -> Result<Self, PipelineError> {
        if columns.len() != values.len() {
            return Err(PipelineError::ShapeMismatch {
                stage: "feature vector",
                expected: columns.len(),
                actual: values.len(),
            });
        }
        Ok(FeatureVector { columns, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Value of the named column, if the vector has it.
    pub fn value_of(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    pub(crate) fn set(&mut self, index: usize, value: f64) {
        self.values[index] = value;
    }

    /// Same columns, new values. Used by transforms that keep the shape.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Result<Self, PipelineError> {
        FeatureVector::from_values(Arc::clone(&self.columns), values)
    }

    /// Indices of every non-zero entry.
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, v)| *v != 0.0)
    }
}

impl fmt::Debug for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (c, v) in self.columns.iter().zip(&self.values) {
            map.entry(c, v);
        }
        map.finish()
    }
}
