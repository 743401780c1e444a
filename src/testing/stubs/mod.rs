mod constant_classifier;
mod scripted_driver;

pub use constant_classifier::ConstantClassifier;
pub use scripted_driver::{Answer, ScriptedDriver};
