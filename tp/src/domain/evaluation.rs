//! Rubric evaluation result

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of the rule rubric for one plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Number of rules that held
    pub score: u32,
    /// Total number of rules, at least 1
    pub max: u32,
    /// Rule name to whether it held
    pub rules: BTreeMap<String, bool>,
}

impl EvaluationResult {
    /// Build a result, enforcing `max >= 1`
    pub fn new(score: u32, max: u32, rules: BTreeMap<String, bool>) -> Self {
        Self {
            score,
            max: max.max(1),
            rules,
        }
    }

    /// Whether the plan clears the rubric threshold.
    ///
    /// The threshold truncates rather than rounds up: for max = 6 the
    /// threshold is max(1, trunc(4.2)) = 4, so a score of 4 passes.
    pub fn passed(&self) -> bool {
        let threshold = (f64::from(self.max) * 0.7) as u32;
        self.score >= threshold.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: u32, max: u32) -> EvaluationResult {
        EvaluationResult::new(score, max, BTreeMap::new())
    }

    #[test]
    fn test_passed_boundary_for_six_rules() {
        // trunc(6 * 0.7) = 4
        assert!(!result(3, 6).passed());
        assert!(result(4, 6).passed());
        assert!(result(6, 6).passed());
    }

    #[test]
    fn test_threshold_never_below_one() {
        // trunc(1 * 0.7) = 0, clamped to 1
        assert!(!result(0, 1).passed());
        assert!(result(1, 1).passed());
    }

    #[test]
    fn test_max_is_clamped() {
        assert_eq!(result(0, 0).max, 1);
    }
}
