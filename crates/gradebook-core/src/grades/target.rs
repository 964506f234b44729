//! Target-grade solver.
//!
//! Inverts the weighted average: given the current counting grades of a
//! subject, find the mark needed on one more assessment of a known weight
//! so that the subject average lands exactly on a target.

use serde::{Deserialize, Serialize};

use super::average::{round2, WeightedTotals};
use super::model::{Subject, MAX_GRADE, MIN_GRADE};
use crate::error::ValidationError;

/// How a solved grade relates to the grading scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOutcome {
    /// The needed grade lies on the scale.
    Reachable,
    /// The needed grade is above the best possible mark.
    Impossible,
    /// Even the lowest mark reaches the target.
    AnyGradeSuffices,
}

/// Result of [`solve_target_grade`]. `needed` is never clamped to the scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetGrade {
    pub target: f64,
    pub next_weight: f64,
    pub needed: f64,
    pub outcome: TargetOutcome,
}

impl TargetGrade {
    pub fn display_needed(&self) -> f64 {
        round2(self.needed)
    }

    pub fn is_reachable(&self) -> bool {
        self.outcome == TargetOutcome::Reachable
    }
}

/// Grade needed on a next assessment weighted `next_weight` to bring the
/// subject's average to `target`.
///
/// Reads the subject; never mutates it.
///
/// # Errors
/// Returns an error if `target` lies outside the grading scale or
/// `next_weight` is not strictly positive.
pub fn solve_target_grade(
    subject: &Subject,
    target: f64,
    next_weight: f64,
) -> Result<TargetGrade, ValidationError> {
    if !(MIN_GRADE..=MAX_GRADE).contains(&target) {
        return Err(ValidationError::TargetOutOfRange {
            value: target,
            min: MIN_GRADE,
            max: MAX_GRADE,
        });
    }
    if !(next_weight.is_finite() && next_weight > 0.0) {
        return Err(ValidationError::NonPositiveWeight(next_weight));
    }

    let totals = WeightedTotals::of(subject.grades());
    let needed = (target * (totals.weight + next_weight) - totals.score) / next_weight;

    let outcome = if needed > MAX_GRADE {
        TargetOutcome::Impossible
    } else if needed < MIN_GRADE {
        TargetOutcome::AnyGradeSuffices
    } else {
        TargetOutcome::Reachable
    };

    Ok(TargetGrade {
        target,
        next_weight,
        needed,
        outcome,
    })
}
