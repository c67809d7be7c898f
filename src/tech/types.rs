use std::fmt::Display;
use serde::{Deserialize, Serialize};

/// Transistor characterization the fits were calibrated against
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum Roadmap {
    #[serde(rename = "HP")]
    HighPerformance,

    #[serde(rename = "LP")]
    LowPower,
}

impl Display for Roadmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighPerformance => write!(f, "HP"),
            Self::LowPower => write!(f, "LP"),
        }
    }
}
