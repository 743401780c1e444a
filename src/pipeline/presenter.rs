use crate::core::ClassCode;
use serde::Serialize;
use strum_macros::{Display, EnumIter, IntoStaticStr};

pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumIter, IntoStaticStr,
)]
pub enum StressLevel {
    #[strum(to_string = "Low Stress")]
    Low,
    #[strum(to_string = "Medium Stress")]
    Medium,
    #[strum(to_string = "High Stress")]
    High,
}

impl StressLevel {
    pub fn from_code(code: ClassCode) -> Option<Self> {
        match code {
            1 => Some(StressLevel::Low),
            2 => Some(StressLevel::Medium),
            3 => Some(StressLevel::High),
            _ => None,
        }
    }

    pub fn code(self) -> ClassCode {
        match self {
            StressLevel::Low => 1,
            StressLevel::Medium => 2,
            StressLevel::High => 3,
        }
    }

    pub fn label(self) -> &'static str {
        self.into()
    }
}

/// Display label for any class code. Codes outside the table map to
/// [`UNKNOWN_LABEL`].
pub fn label_for(code: ClassCode) -> &'static str {
    StressLevel::from_code(code).map_or(UNKNOWN_LABEL, StressLevel::label)
}
