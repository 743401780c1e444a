pub mod artifacts;
pub mod classifiers;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod preprocessing;
pub mod ui;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
