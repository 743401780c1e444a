pub mod scaler;

pub use scaler::{MinMaxScaler, Scaler, ScalerArtifact, StandardScaler};
