pub mod assembler;
pub mod presenter;

pub use assembler::assemble;
pub use presenter::{StressLevel, UNKNOWN_LABEL, label_for};

use crate::artifacts::ArtifactStore;
use crate::core::{ClassCode, RawInputRecord};
use crate::error::PipelineError;
use log::debug;
use serde::Serialize;

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub model: String,
    pub class_code: ClassCode,
    pub level: Option<StressLevel>,
    pub label: &'static str,
}

/// Runs one submission end to end: assemble, scale, classify, label.
///
/// Shape and column-order problems surface as errors; an unrecognized class
/// code does not, it is labelled [`UNKNOWN_LABEL`].
pub fn predict(
    store: &ArtifactStore,
    model: &str,
    record: &RawInputRecord,
) -> Result<Prediction, PipelineError> {
    let variant = store.variant(model)?;

    let assembled = assemble(store.schema(), record);
    debug!("assembled {} of {} features", assembled.non_zero().count(), assembled.len());

    let scaled = store.scaler().transform(&assembled)?;
    debug!("scaled input: {scaled:?}");

    let class_code = variant.classifier().predict(&scaled)?;
    debug!("model '{}' predicted class {class_code}", variant.name());

    Ok(Prediction {
        model: variant.name().to_string(),
        class_code,
        level: StressLevel::from_code(class_code),
        label: label_for(class_code),
    })
}
