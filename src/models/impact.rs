//! Impact assessment model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    /// Level implied by a score: [70,100] high, [40,70) medium, [0,40) low
    pub fn for_score(score: u8) -> Self {
        match score {
            70.. => Self::High,
            40..=69 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One weighted dimension of an assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub value: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactAssessment {
    pub level: ImpactLevel,
    pub score: u8,
    /// Display order drives angular placement in the chart
    pub factors: Vec<Factor>,
    pub recommendations: Vec<String>,
}

impl ImpactAssessment {
    /// Reject assessments that break the score/level/factor invariants
    pub fn validate(&self) -> AppResult<()> {
        if self.score > 100 {
            return Err(AppError::ValidationError(format!(
                "score {} is outside 0-100",
                self.score
            )));
        }

        let expected = ImpactLevel::for_score(self.score);
        if self.level != expected {
            return Err(AppError::ValidationError(format!(
                "level '{}' does not match score {} (expected '{}')",
                self.level, self.score, expected
            )));
        }

        if let Some(factor) = self
            .factors
            .iter()
            .find(|f| !(0.0..=100.0).contains(&f.value))
        {
            return Err(AppError::ValidationError(format!(
                "factor '{}' value {} is outside 0-100",
                factor.name, factor.value
            )));
        }

        Ok(())
    }
}
