use serde::{Deserialize, Serialize};

pub const DEFAULT_CAUTION_THRESHOLD: f64 = 200.0;
pub const DEFAULT_RESERVE_BUFFER: f64 = 100.0;

/// Balance thresholds used to colour days and size reserve recommendations.
///
/// The values are plain currency units of the snapshot; no normalisation is applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProjectionThresholds {
    pub caution_threshold: f64,
    pub reserve_buffer: f64,
}

impl Default for ProjectionThresholds {
    fn default() -> Self {
        Self {
            caution_threshold: DEFAULT_CAUTION_THRESHOLD,
            reserve_buffer: DEFAULT_RESERVE_BUFFER,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DayStatus {
    Good,
    Caution,
    Critical,
}

impl DayStatus {
    pub fn classify(balance: f64, thresholds: &ProjectionThresholds) -> DayStatus {
        if balance < 0.0 {
            DayStatus::Critical
        } else if balance < thresholds.caution_threshold {
            DayStatus::Caution
        } else {
            DayStatus::Good
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayStatus::Good => "good",
            DayStatus::Caution => "caution",
            DayStatus::Critical => "critical",
        }
    }
}
