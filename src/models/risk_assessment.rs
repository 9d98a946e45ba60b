use serde::{Deserialize, Serialize};

/// A single named contribution to a fraud score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    pub label: String,
    pub weight: f64,
}

impl RiskFactor {
    pub fn new(label: &str, weight: f64) -> Self {
        Self {
            label: label.to_string(),
            weight,
        }
    }
}

/// Outcome of scoring one payment attempt. Created fresh per request and
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Clamped to [0, 100].
    pub score: f64,
    /// Ordered rule contributions, noise last.
    pub factors: Vec<RiskFactor>,
    pub blocked: bool,
}

impl RiskAssessment {
    /// Coarse bucket used for logging and display.
    pub fn level(&self) -> &'static str {
        match self.score {
            s if s > 70.0 => "critical",
            s if s > 40.0 => "high",
            s if s > 20.0 => "medium",
            _ => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_levels() {
        let assessment = |score| RiskAssessment {
            score,
            factors: vec![],
            blocked: false,
        };
        assert_eq!(assessment(5.0).level(), "low");
        assert_eq!(assessment(30.0).level(), "medium");
        assert_eq!(assessment(55.0).level(), "high");
        assert_eq!(assessment(90.0).level(), "critical");
    }
}
