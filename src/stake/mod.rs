//! Stake sizing and bankroll tracking
//!
//! Three sizing methods are computed side by side and the most conservative
//! wins. This is a deliberate risk-reduction policy, not a Kelly-optimal
//! calculation.

use crate::config::StakeConfig;
use crate::error::{Error, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Sizing method that produced a bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StakeMethod {
    Kelly,
    FixedUnit,
    Confidence,
}

/// One method's stake bound, as a fraction of bankroll
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MethodStake {
    pub method: StakeMethod,
    pub fraction: Decimal,
}

/// Recommended wager for a single bet
#[derive(Debug, Clone, Serialize)]
pub struct StakeRecommendation {
    /// Dollar amount at the given bankroll
    pub amount: Decimal,
    /// Percentage of bankroll (e.g. 1.0 for 1%)
    pub percentage: Decimal,
    /// Every bound that was considered
    pub breakdown: Vec<MethodStake>,
}

/// Fractional-Kelly sizer blended with conservative caps
#[derive(Debug, Clone)]
pub struct StakeSizer {
    config: StakeConfig,
}

impl StakeSizer {
    pub fn new(config: StakeConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(StakeConfig::default())
    }

    /// Fractional-Kelly stake as a fraction of bankroll.
    ///
    /// Win probability is taken as `p = 0.5 + edge`. That treats the edge as
    /// a direct offset from a 50% baseline, which is exactly right only for
    /// the fixed-line assumption baked into the edge calculator — the two
    /// are coupled by design. Degenerate inputs (odds at or below even
    /// money, non-positive edge) size to zero rather than erroring.
    pub fn kelly_fraction(&self, decimal_odds: Decimal, edge: Decimal) -> Decimal {
        if decimal_odds <= Decimal::ONE || edge <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let p = dec!(0.5) + edge;
        let kelly = (p * decimal_odds - Decimal::ONE) / (decimal_odds - Decimal::ONE);
        (kelly * self.config.kelly_fraction).max(Decimal::ZERO)
    }

    /// Recommend a stake for one bet.
    ///
    /// The final fraction is the minimum of fractional Kelly (when it sizes
    /// above zero), the fixed unit, and the edge-scaled confidence bound.
    /// The result never goes negative: with a zero Kelly the non-Kelly
    /// bounds still floor the stake.
    pub fn recommend(
        &self,
        bankroll: Decimal,
        decimal_odds: Decimal,
        edge: Decimal,
    ) -> Result<StakeRecommendation> {
        if bankroll <= Decimal::ZERO {
            return Err(Error::invalid_input(
                "bankroll",
                bankroll,
                "must be positive",
            ));
        }
        if decimal_odds <= Decimal::ZERO {
            return Err(Error::invalid_input(
                "decimal_odds",
                decimal_odds,
                "must be positive",
            ));
        }

        let mut breakdown = Vec::with_capacity(3);

        let kelly = self.kelly_fraction(decimal_odds, edge);
        if kelly > Decimal::ZERO {
            breakdown.push(MethodStake {
                method: StakeMethod::Kelly,
                fraction: kelly,
            });
        }

        breakdown.push(MethodStake {
            method: StakeMethod::FixedUnit,
            fraction: self.config.unit_size,
        });

        let confidence = (edge * dec!(2))
            .max(self.config.min_confidence)
            .min(self.config.max_confidence);
        breakdown.push(MethodStake {
            method: StakeMethod::Confidence,
            fraction: confidence,
        });

        // Most conservative method wins
        let fraction = breakdown
            .iter()
            .map(|m| m.fraction)
            .min()
            .unwrap_or(Decimal::ZERO);

        Ok(StakeRecommendation {
            amount: (bankroll * fraction).round_dp(2),
            percentage: fraction * dec!(100),
            breakdown,
        })
    }
}

/// Bet-size limits derived from the current balance
#[derive(Debug, Clone, Serialize)]
pub struct BetLimits {
    pub min_bet: Decimal,
    pub max_bet: Decimal,
    pub suggested_unit: Decimal,
}

/// Settlement accumulator, external to the sizer.
///
/// The sizer itself has no side effects; wins and losses land here.
#[derive(Debug, Clone)]
pub struct Bankroll {
    balance: Decimal,
}

impl Bankroll {
    pub fn new(initial: Decimal) -> Self {
        Self { balance: initial }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Apply a signed settlement profit and return the new balance.
    pub fn settle(&mut self, profit: Decimal) -> Decimal {
        self.balance += profit;
        self.balance
    }

    pub fn limits(&self) -> BetLimits {
        BetLimits {
            min_bet: (self.balance * dec!(0.001)).max(Decimal::ONE),
            max_bet: self.balance * dec!(0.05),
            suggested_unit: self.balance * dec!(0.01),
        }
    }
}
