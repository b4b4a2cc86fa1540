//! Parlay win-probability estimation

use crate::correlation::CorrelationModel;
use crate::types::MatchedProp;
use rust_decimal::Decimal;

/// Estimates joint hit probability for a set of legs.
///
/// The raw product assumes every leg is independent; the correlation penalty
/// then nudges that product by the average pairwise coefficient. The penalty
/// is a heuristic multiplier, not a true joint-probability correction —
/// correlated legs are not actually independent, and this model makes no
/// claim of statistical rigor beyond being directionally sensible.
#[derive(Debug, Clone)]
pub struct ParlayEstimator {
    model: CorrelationModel,
}

impl ParlayEstimator {
    pub fn new(model: CorrelationModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &CorrelationModel {
        &self.model
    }

    /// Independence-assumed product of per-leg win probabilities.
    ///
    /// An empty leg set is "no bet" and returns 0, not an error.
    pub fn raw_probability(&self, legs: &[MatchedProp]) -> Decimal {
        if legs.is_empty() {
            return Decimal::ZERO;
        }
        legs.iter()
            .map(|leg| leg.win_probability())
            .fold(Decimal::ONE, |acc, p| acc * p)
    }

    /// Correlation penalty multiplier, clamped to the configured bounds.
    pub fn penalty(&self, legs: &[MatchedProp]) -> Decimal {
        self.model.penalty(legs)
    }

    /// Raw probability scaled by the penalty, clamped back into [0, 1]
    /// (a bonus multiplier can push the product past 1).
    pub fn adjusted_probability(&self, legs: &[MatchedProp]) -> Decimal {
        let adjusted = self.raw_probability(legs) * self.penalty(legs);
        adjusted.max(Decimal::ZERO).min(Decimal::ONE)
    }

    /// Same-team warning for the leg set, if any.
    pub fn warning(&self, legs: &[MatchedProp]) -> Option<String> {
        self.model.warning(legs)
    }
}
