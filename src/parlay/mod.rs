//! Parlay construction
//!
//! Takes the ranked prop set from the edge calculator, filters it down to
//! +EV candidates, selects deduplicated legs and scores the resulting slip.

mod estimator;
mod selection;


pub use estimator::ParlayEstimator;
pub use selection::{dedupe_legs, select_legs};

use crate::config::{DedupePolicy, EdgeConfig, ParlayConfig};
use crate::types::MatchedProp;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// A scored parlay slip
#[derive(Debug, Clone, Serialize)]
pub struct ParlayRecommendation {
    pub legs: Vec<MatchedProp>,
    /// Joint probability assuming independent legs
    pub raw_probability: Decimal,
    /// Correlation penalty applied to the raw probability
    pub penalty: Decimal,
    pub adjusted_probability: Decimal,
    /// Same-team warning, when legs share a known team
    pub warning: Option<String>,
    pub average_edge: Decimal,
    /// True when too few props cleared the edge threshold and the builder
    /// fell back to the best available board
    pub used_fallback: bool,
}

/// Builds a recommendation from a ranked prop set
#[derive(Debug, Clone)]
pub struct ParlayBuilder {
    estimator: ParlayEstimator,
    edge_config: EdgeConfig,
    parlay_config: ParlayConfig,
}

impl ParlayBuilder {
    pub fn new(
        estimator: ParlayEstimator,
        edge_config: EdgeConfig,
        parlay_config: ParlayConfig,
    ) -> Self {
        Self {
            estimator,
            edge_config,
            parlay_config,
        }
    }

    pub fn estimator(&self) -> &ParlayEstimator {
        &self.estimator
    }

    /// Assemble a parlay from matched props.
    ///
    /// Candidates must be positive and clear the configured edge threshold.
    /// When fewer than `num_legs` qualify, the builder falls back to the top
    /// `2 * num_legs` props by edge from the full board and flags the result.
    pub fn build(&self, props: &[MatchedProp]) -> ParlayRecommendation {
        let num_legs = self.parlay_config.num_legs;
        let min_edge = self.edge_config.min_edge;

        let mut candidates: Vec<MatchedProp> = props
            .iter()
            .filter(|p| p.is_positive && p.edge >= min_edge)
            .cloned()
            .collect();

        let used_fallback = candidates.len() < num_legs;
        if used_fallback {
            debug!(
                qualified = candidates.len(),
                num_legs, "too few props clear the edge threshold, using best available"
            );
            let mut all: Vec<MatchedProp> = props.to_vec();
            all.sort_by(|a, b| b.edge.cmp(&a.edge));
            all.truncate(num_legs * 2);
            candidates = all;
        }

        let legs = select_legs(&candidates, num_legs, self.parlay_config.dedupe);

        let raw_probability = self.estimator.raw_probability(&legs);
        let penalty = self.estimator.penalty(&legs);
        let adjusted_probability = self.estimator.adjusted_probability(&legs);
        let warning = self.estimator.warning(&legs);
        let average_edge = if legs.is_empty() {
            Decimal::ZERO
        } else {
            legs.iter().map(|l| l.edge).sum::<Decimal>() / Decimal::from(legs.len() as u64)
        };

        ParlayRecommendation {
            legs,
            raw_probability,
            penalty,
            adjusted_probability,
            warning,
            average_edge,
            used_fallback,
        }
    }
}

/// Convenience: dedupe policy the builder treats as canonical.
///
/// A real parlay cannot carry two legs on the same player, so player-keyed
/// deduplication is the default everywhere a policy is not given explicitly.
pub const CANONICAL_DEDUPE: DedupePolicy = DedupePolicy::Player;
