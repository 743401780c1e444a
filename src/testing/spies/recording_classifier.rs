use crate::classifiers::Classifier;
use crate::classifiers::classifier::check_width;
use crate::core::{ClassCode, FeatureVector};
use crate::error::PipelineError;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
};

#[derive(Default)]
struct Recorded {
    calls: AtomicU64,
    last: Mutex<Option<Vec<f64>>>,
}

pub struct RecordingHandle(Arc<Recorded>);

impl RecordingHandle {
    pub fn calls(&self) -> u64 {
        self.0.calls.load(Ordering::Relaxed)
    }

    pub fn last_input(&self) -> Option<Vec<f64>> {
        self.0.last.lock().ok().and_then(|g| g.clone())
    }
}

/// Remembers the last vector it was asked about.
pub struct RecordingClassifier {
    recorded: Arc<Recorded>,
    n_features: usize,
    code: ClassCode,
    classes: Vec<ClassCode>,
}

impl RecordingClassifier {
    pub fn new(n_features: usize, code: ClassCode) -> (Self, RecordingHandle) {
        let recorded = Arc::new(Recorded::default());
        (
            Self {
                recorded: recorded.clone(),
                n_features,
                code,
                classes: vec![code],
            },
            RecordingHandle(recorded),
        )
    }
}

impl Classifier for RecordingClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<ClassCode, PipelineError> {
        check_width("recording", self.n_features, features)?;
        self.recorded.calls.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.recorded.last.lock() {
            *last = Some(features.values().to_vec());
        }
        Ok(self.code)
    }

    fn number_of_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[ClassCode] {
        &self.classes
    }

    fn kind(&self) -> &'static str {
        "recording"
    }
}
