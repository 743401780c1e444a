use crate::core::{FeatureSchema, FeatureVector, RawInputRecord, RawValue};
use log::debug;

/// Lays a raw record out in the schema's column order.
///
/// Numbers land in the column of the same name unless that column is an
/// indicator. A choice sets the indicator column `{field}_{value}` to 1. Anything without a column is dropped and
/// every column without input stays 0.
pub fn assemble(schema: &FeatureSchema, record: &RawInputRecord) -> FeatureVector {
    let mut vector = FeatureVector::zeros(schema.shared_names());

    for (field, value) in record.iter() {
        match value {
            RawValue::Number(x) => match schema.index_of(field) {
                Some(i) if schema.is_indicator(i) => {
                    debug!("{field} is an indicator column, numeric value dropped")
                }
                Some(i) => vector.set(i, *x),
                None => debug!("no feature column for numeric field {field}, dropped"),
            },
            RawValue::Choice(choice) => match schema.indicator_index(field, choice) {
                Some(i) => vector.set(i, 1.0),
                None => debug!("no indicator column for {field} = {choice}, dropped"),
            },
        }
    }

    vector
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const CATEGORICAL: &[&str] = &["Gender", "Occupation", "Marital_Status"];

    fn schema() -> FeatureSchema {
        let names = [
            "Age",
            "Sleep_Duration",
            "Sleep_Quality",
            "Blood_Pressure",
            "Gender_Female",
            "Gender_Male",
            "Occupation_Doctor",
            "Occupation_Student",
            "Occupation_Software Engineer",
            "Marital_Status_Married",
            "Marital_Status_Single",
        ];
        FeatureSchema::new(names.iter().map(|s| s.to_string()).collect(), CATEGORICAL).unwrap()
    }

    fn random_record(rng: &mut StdRng) -> RawInputRecord {
        let mut r = RawInputRecord::new();
        if rng.random_bool(0.7) {
            r.insert("Age", rng.random_range(18..=100) as f64);
        }
        if rng.random_bool(0.7) {
            r.insert("Sleep_Duration", rng.random_range(0.0..=12.0));
        }
        if rng.random_bool(0.5) {
            r.insert("Blood_Pressure", rng.random_range(80..=200) as f64);
        }
        if rng.random_bool(0.7) {
            let g = ["Male", "Female", "Other"][rng.random_range(0..3)];
            r.insert("Gender", g);
        }
        if rng.random_bool(0.7) {
            let o = ["Doctor", "Student", "Software Engineer", "Nurse"][rng.random_range(0..4)];
            r.insert("Occupation", o);
        }
        if rng.random_bool(0.3) {
            r.insert("Unrelated", rng.random_range(0.0..1.0));
        }
        r
    }

    #[test]
    fn scenario_record_sets_expected_positions() {
        let s = schema();
        let record = RawInputRecord::new()
            .with("Age", 30u32)
            .with("Sleep_Duration", 7.0)
            .with("Gender", "Male")
            .with("Occupation", "Student");

        let v = assemble(&s, &record);

        assert_eq!(v.len(), s.len());
        assert_eq!(v.value_of("Age"), Some(30.0));
        assert_eq!(v.value_of("Sleep_Duration"), Some(7.0));
        assert_eq!(v.value_of("Gender_Male"), Some(1.0));
        assert_eq!(v.value_of("Occupation_Student"), Some(1.0));

        let set: Vec<&str> = v
            .non_zero()
            .map(|(i, _)| s.names()[i].as_str())
            .collect();
        assert_eq!(
            set,
            vec!["Age", "Sleep_Duration", "Gender_Male", "Occupation_Student"]
        );
    }

    #[test]
    fn empty_record_yields_all_zeros() {
        let v = assemble(&schema(), &RawInputRecord::new());
        assert!(v.values().iter().all(|x| *x == 0.0));
    }

    #[test]
    fn unknown_fields_and_values_are_dropped() {
        let s = schema();
        let record = RawInputRecord::new()
            .with("Shoe_Size", 44.0)
            .with("Gender", "Other")
            .with("Occupation", "Pilot")
            .with("Smoking_Habit", "Yes");

        let v = assemble(&s, &record);
        assert_eq!(v.non_zero().count(), 0);
    }

    #[test]
    fn numeric_values_are_copied_without_range_checks() {
        let s = schema();
        let v = assemble(&s, &RawInputRecord::new().with("Age", -5.0).with("Blood_Pressure", 1e6));
        assert_eq!(v.value_of("Age"), Some(-5.0));
        assert_eq!(v.value_of("Blood_Pressure"), Some(1e6));
    }

    #[test]
    fn fields_absent_from_record_stay_zero() {
        let s = schema();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let record = random_record(&mut rng);
            let v = assemble(&s, &record);
            for (i, name) in s.names().iter().enumerate() {
                let field_present = record.iter().any(|(f, _)| {
                    name == f || name.starts_with(&format!("{f}_"))
                });
                if !field_present {
                    assert_eq!(v.get(i), Some(0.0), "column {name} should be zero");
                }
            }
        }
    }

    #[test]
    fn each_known_choice_sets_exactly_one_indicator_of_its_field() {
        let s = schema();
        for (field, values) in [
            ("Gender", vec!["Male", "Female"]),
            ("Occupation", vec!["Doctor", "Student", "Software Engineer"]),
            ("Marital_Status", vec!["Married", "Single"]),
        ] {
            let cols = s.indicator_columns(field);
            for value in values {
                let v = assemble(&s, &RawInputRecord::new().with(field, value));
                let hot: Vec<usize> = cols.iter().copied().filter(|i| v.get(*i) == Some(1.0)).collect();
                assert_eq!(hot.len(), 1, "{field}={value}");
                assert_eq!(Some(hot[0]), s.indicator_index(field, value));
                assert!(cols.iter().all(|i| v.get(*i) == Some(0.0) || *i == hot[0]));
            }
        }
    }

    #[test]
    fn numbers_cannot_switch_on_indicator_columns() {
        let s = schema();
        let record = RawInputRecord::new()
            .with("Gender", "Male")
            .with("Gender_Female", 1.0)
            .with("Occupation_Doctor", 1.0);

        let v = assemble(&s, &record);
        assert_eq!(v.value_of("Gender_Male"), Some(1.0));
        assert_eq!(v.value_of("Gender_Female"), Some(0.0));
        assert_eq!(v.value_of("Occupation_Doctor"), Some(0.0));
        assert_eq!(v.non_zero().count(), 1);
    }

    #[test]
    fn overlapping_categorical_fields_both_reach_their_column() {
        let names = ["Sleep_Quality_Good", "Sleep_Bad"];
        let s = FeatureSchema::new(
            names.iter().map(|n| n.to_string()).collect(),
            &["Sleep", "Sleep_Quality"],
        )
        .unwrap();

        let v = assemble(&s, &RawInputRecord::new().with("Sleep", "Quality_Good"));
        assert_eq!(v.value_of("Sleep_Quality_Good"), Some(1.0));
        assert_eq!(v.value_of("Sleep_Bad"), Some(0.0));

        let v = assemble(&s, &RawInputRecord::new().with("Sleep_Quality", "Good"));
        assert_eq!(v.values(), &[1.0, 0.0]);
    }

    #[test]
    fn assembling_twice_is_identical() {
        let s = schema();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let record = random_record(&mut rng);
            assert_eq!(assemble(&s, &record), assemble(&s, &record));
        }
    }
}
