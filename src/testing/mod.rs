pub mod spies;
pub mod stubs;

pub use spies::{RecordingClassifier, RecordingHandle};
pub use stubs::{Answer, ConstantClassifier, ScriptedDriver};
