use crate::error::ArtifactError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Ordered feature names a model set was trained on, plus the lookups derived
/// from them once at load time.
#[derive(Clone)]
pub struct FeatureSchema {
    names: Arc<[String]>,
    name_to_index: HashMap<String, usize>,
    /// field -> value -> indicator column
    indicators: HashMap<String, HashMap<String, usize>>,
    is_indicator: Vec<bool>,
}

impl FeatureSchema {
    /// Builds the schema and registers every `{field}_{value}` column for the
    /// given categorical fields. A column prefixed by several fields is
    /// registered under each of them.
    pub fn new(names: Vec<String>, categorical_fields: &[&str]) -> Result<Self, ArtifactError> {
        if names.is_empty() {
            return Err(ArtifactError::Invalid("feature name list is empty".into()));
        }

        let mut name_to_index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name_to_index.insert(name.clone(), i).is_some() {
                return Err(ArtifactError::Invalid(format!(
                    "duplicate feature name '{name}'"
                )));
            }
        }

        let mut indicators: HashMap<String, HashMap<String, usize>> = HashMap::new();
        let mut is_indicator = vec![false; names.len()];
        for (i, name) in names.iter().enumerate() {
            for field in categorical_fields {
                let prefixed = name.len() > field.len() + 1
                    && name.starts_with(*field)
                    && name.as_bytes()[field.len()] == b'_';
                if !prefixed {
                    continue;
                }
                let value = &name[field.len() + 1..];
                indicators
                    .entry((*field).to_string())
                    .or_default()
                    .insert(value.to_string(), i);
                is_indicator[i] = true;
            }
        }

        Ok(FeatureSchema {
            names: names.into(),
            name_to_index,
            indicators,
            is_indicator,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn shared_names(&self) -> Arc<[String]> {
        Arc::clone(&self.names)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Column for `{field}_{value}`, if the model was trained with it.
    pub fn indicator_index(&self, field: &str, value: &str) -> Option<usize> {
        if let Some(values) = self.indicators.get(field) {
            return values.get(value).copied();
        }
        self.index_of(&format!("{field}_{value}"))
    }

    /// True when column `i` is an indicator of a registered categorical field.
    pub fn is_indicator(&self, i: usize) -> bool {
        self.is_indicator.get(i).copied().unwrap_or(false)
    }

    /// All indicator columns registered for `field`, in column order.
    pub fn indicator_columns(&self, field: &str) -> Vec<usize> {
        let mut cols: Vec<usize> = self
            .indicators
            .get(field)
            .map(|m| m.values().copied().collect())
            .unwrap_or_default();
        cols.sort_unstable();
        cols
    }

    /// Values of `choices` that have no indicator column for `field`.
    pub fn unmapped_choices<'a>(&self, field: &str, choices: &[&'a str]) -> Vec<&'a str> {
        choices
            .iter()
            .copied()
            .filter(|v| self.indicator_index(field, v).is_none())
            .collect()
    }
}

impl fmt::Debug for FeatureSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureSchema")
            .field("n_features", &self.names.len())
            .field("categorical_fields", &self.indicators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_feature_list_is_rejected() {
        let err = FeatureSchema::new(vec![], &[]).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid(_)));
    }

    #[test]
    fn duplicate_feature_name_is_rejected() {
        let err = FeatureSchema::new(names(&["Age", "Age"]), &[]).unwrap_err();
        assert!(err.to_string().contains("duplicate feature name 'Age'"));
    }

    #[test]
    fn indicator_map_splits_on_known_fields() {
        let s = FeatureSchema::new(
            names(&[
                "Age",
                "Marital_Status_Single",
                "Marital_Status_Married",
                "Occupation_Software Engineer",
            ]),
            &["Marital_Status", "Occupation"],
        )
        .unwrap();

        assert_eq!(s.indicator_index("Marital_Status", "Single"), Some(1));
        assert_eq!(s.indicator_index("Marital_Status", "Married"), Some(2));
        assert_eq!(s.indicator_index("Marital_Status", "Divorced"), None);
        assert_eq!(
            s.indicator_index("Occupation", "Software Engineer"),
            Some(3)
        );
        assert_eq!(s.indicator_columns("Marital_Status"), vec![1, 2]);
    }

    #[test]
    fn overlapping_field_prefixes_share_the_column() {
        let s = FeatureSchema::new(
            names(&["Sleep_Quality_Good", "Sleep_Bad", "Age"]),
            &["Sleep", "Sleep_Quality"],
        )
        .unwrap();

        assert_eq!(s.indicator_index("Sleep_Quality", "Good"), Some(0));
        assert_eq!(s.indicator_index("Sleep", "Quality_Good"), Some(0));
        assert_eq!(s.indicator_index("Sleep", "Bad"), Some(1));
        assert!(s.unmapped_choices("Sleep", &["Quality_Good", "Bad"]).is_empty());
        assert_eq!(s.indicator_columns("Sleep"), vec![0, 1]);

        assert!(s.is_indicator(0));
        assert!(s.is_indicator(1));
        assert!(!s.is_indicator(2));
        assert!(!s.is_indicator(3));
    }

    #[test]
    fn unregistered_field_falls_back_to_column_name() {
        let s = FeatureSchema::new(names(&["Age", "Pet_Dog"]), &[]).unwrap();
        assert_eq!(s.indicator_index("Pet", "Dog"), Some(1));
        assert_eq!(s.indicator_index("Pet", "Cat"), None);
    }

    #[test]
    fn bare_field_name_is_not_an_indicator() {
        let s = FeatureSchema::new(names(&["Gender", "Gender_"]), &["Gender"]).unwrap();
        assert!(s.indicator_columns("Gender").is_empty());
    }

    #[test]
    fn unmapped_choices_lists_dropped_values() {
        let s = FeatureSchema::new(names(&["Gender_Male"]), &["Gender"]).unwrap();
        assert_eq!(
            s.unmapped_choices("Gender", &["Male", "Female"]),
            vec!["Female"]
        );
    }
}
