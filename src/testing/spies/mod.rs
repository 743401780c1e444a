mod recording_classifier;

pub use recording_classifier::{RecordingClassifier, RecordingHandle};
