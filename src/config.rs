//! Engine configuration
//!
//! Layered loading: compiled defaults, then an optional TOML file, then
//! environment overrides with the `PROP_EDGE` prefix (e.g.
//! `PROP_EDGE__ARBITRAGE__MIN_PROFIT_PCT=2.5`).

use crate::error::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::Path;

/// How parlay legs are deduplicated before selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupePolicy {
    /// One leg per player, highest edge kept. A real parlay cannot carry
    /// two legs on the same player, so this is the canonical policy.
    Player,
    /// One leg per (player, stat type) pair. Allows the same player on
    /// different stats; kept for flows that build per-stat boards.
    PlayerStat,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    /// Minimum edge for a prop to count as a +EV candidate
    pub min_edge: Decimal,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            min_edge: dec!(0.05),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// How much the average pairwise coefficient moves the penalty
    pub weight: Decimal,
    /// Lower bound on the penalty multiplier
    pub min_penalty: Decimal,
    /// Upper bound on the penalty multiplier
    pub max_penalty: Decimal,
    /// Coefficient for two known players on the same team
    pub same_team: Decimal,
    /// Coefficient for two known players on different teams
    pub cross_team: Decimal,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            weight: dec!(0.3),
            min_penalty: dec!(0.7),
            max_penalty: dec!(1.3),
            same_team: dec!(-0.25),
            cross_team: dec!(0.10),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArbitrageConfig {
    /// Minimum guaranteed profit, in percent, to report
    pub min_profit_pct: Decimal,
    /// Whether the O(n^3) triple scan runs at all
    pub include_three_way: bool,
    /// Hard cap on the quote set fed to the combinatorial scans
    pub max_scan_size: usize,
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            min_profit_pct: dec!(1.0),
            include_three_way: true,
            max_scan_size: 50,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StakeConfig {
    /// Fraction of full Kelly to apply (0.25 = quarter Kelly)
    pub kelly_fraction: Decimal,
    /// Fixed-unit bound as a fraction of bankroll
    pub unit_size: Decimal,
    /// Floor on the edge-scaled confidence bound
    pub min_confidence: Decimal,
    /// Ceiling on the edge-scaled confidence bound
    pub max_confidence: Decimal,
}

impl Default for StakeConfig {
    fn default() -> Self {
        Self {
            kelly_fraction: dec!(0.25),
            unit_size: dec!(0.01),
            min_confidence: dec!(0.005),
            max_confidence: dec!(0.05),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParlayConfig {
    /// Number of legs to select
    pub num_legs: usize,
    pub dedupe: DedupePolicy,
}

impl Default for ParlayConfig {
    fn default() -> Self {
        Self {
            num_legs: 6,
            dedupe: DedupePolicy::Player,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub edge: EdgeConfig,
    pub correlation: CorrelationConfig,
    pub arbitrage: ArbitrageConfig,
    pub stake: StakeConfig,
    pub parlay: ParlayConfig,
}

impl EngineConfig {
    /// Load configuration, layering an optional file under env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let settings = builder
            .add_source(
                config::Environment::with_prefix("PROP_EDGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
